//! # Network Monitor
//!
//! Tracks what the host knows about connectivity so diagnostic reports can
//! include it. The viewer never acts on these flags itself.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkStatus {
    Online,
    Limited,
    Offline,
}

/// Connection flags reported by the host environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkFlags {
    pub status: NetworkStatus,
    /// Effective connection type if the host exposes one (`4g`, `wifi`, ...)
    pub connection_type: Option<String>,
    /// Host asked for reduced data usage
    pub save_data: bool,
}

impl Default for NetworkFlags {
    fn default() -> Self {
        Self {
            status: NetworkStatus::Online,
            connection_type: None,
            save_data: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct NetworkMonitor {
    flags: NetworkFlags,
}

impl NetworkMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: NetworkStatus) {
        if self.flags.status != status {
            tracing::debug!("[Network] {:?} -> {:?}", self.flags.status, status);
        }
        self.flags.status = status;
    }

    pub fn set_connection_type(&mut self, connection_type: Option<String>) {
        self.flags.connection_type = connection_type;
    }

    pub fn set_save_data(&mut self, save_data: bool) {
        self.flags.save_data = save_data;
    }

    pub fn get_status(&self) -> NetworkStatus {
        self.flags.status
    }

    pub fn is_online(&self) -> bool {
        self.flags.status != NetworkStatus::Offline
    }

    pub fn flags(&self) -> NetworkFlags {
        self.flags.clone()
    }
}
