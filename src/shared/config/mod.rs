//! Viewer configuration module
//!
//! Provides the configuration of the PDF delivery chain: the page origin
//! relative URLs resolve against, how streaming and local-fallback URLs are
//! built, strategy timeouts and the download directory.
//!
//! Values come from (lowest to highest priority) built-in defaults, an
//! optional TOML file and `BOOKSANSAR_*` environment variables.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default page origin
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:3000";
/// Default streaming endpoint, `{id}` is replaced by the book id
pub const DEFAULT_STREAM_PATH: &str = "/api/books/{id}/stream";
/// Default directory of locally hosted PDFs
pub const DEFAULT_LOCAL_PDF_DIR: &str = "/pdfs";
const DEFAULT_EMBED_TIMEOUT_MS: u64 = 3_000;
const DEFAULT_IFRAME_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_DOWNLOAD_TIMEOUT_MS: u64 = 60_000;

/// Viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Origin of the hosting page
    pub origin: String,
    /// Base URL of the API serving the streaming endpoint, defaults to `origin`
    pub api_base: Option<String>,
    /// Streaming endpoint path template
    pub stream_path: String,
    /// Directory holding filename-guessed PDFs
    pub local_pdf_dir: String,
    /// How long the native embed gets before escalating to an iframe
    pub embed_timeout_ms: u64,
    /// How long the iframe gets before moving to the next candidate
    pub iframe_timeout_ms: u64,
    /// Per-probe timeout for diagnostics
    pub probe_timeout_ms: u64,
    /// Whole-request limit for direct downloads, body included
    pub download_timeout_ms: u64,
    /// Where direct downloads are written
    pub download_dir: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            api_base: None,
            stream_path: DEFAULT_STREAM_PATH.to_string(),
            local_pdf_dir: DEFAULT_LOCAL_PDF_DIR.to_string(),
            embed_timeout_ms: DEFAULT_EMBED_TIMEOUT_MS,
            iframe_timeout_ms: DEFAULT_IFRAME_TIMEOUT_MS,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            download_timeout_ms: DEFAULT_DOWNLOAD_TIMEOUT_MS,
            download_dir: None,
        }
    }
}

impl ViewerConfig {
    /// Create a new ViewerConfigBuilder
    pub fn builder() -> ViewerConfigBuilder {
        ViewerConfigBuilder::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Self::from_toml_str(&contents)?
            }
            None => Self::default(),
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `BOOKSANSAR_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(origin) = std::env::var("BOOKSANSAR_ORIGIN") {
            self.origin = origin;
        }
        if let Ok(api_base) = std::env::var("BOOKSANSAR_API_BASE") {
            self.api_base = Some(api_base);
        }
        if let Some(ms) = env_millis("BOOKSANSAR_EMBED_TIMEOUT_MS")? {
            self.embed_timeout_ms = ms;
        }
        if let Some(ms) = env_millis("BOOKSANSAR_IFRAME_TIMEOUT_MS")? {
            self.iframe_timeout_ms = ms;
        }
        if let Some(ms) = env_millis("BOOKSANSAR_PROBE_TIMEOUT_MS")? {
            self.probe_timeout_ms = ms;
        }
        if let Some(ms) = env_millis("BOOKSANSAR_DOWNLOAD_TIMEOUT_MS")? {
            self.download_timeout_ms = ms;
        }
        if let Ok(dir) = std::env::var("BOOKSANSAR_DOWNLOAD_DIR") {
            self.download_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.origin_url()?;
        self.api_base_url()?;
        if !self.stream_path.contains("{id}") {
            return Err(ConfigError::InvalidTemplate(self.stream_path.clone()));
        }
        if self.embed_timeout_ms == 0 {
            return Err(ConfigError::MissingValue("embed_timeout_ms"));
        }
        if self.iframe_timeout_ms == 0 {
            return Err(ConfigError::MissingValue("iframe_timeout_ms"));
        }
        if self.probe_timeout_ms == 0 {
            return Err(ConfigError::MissingValue("probe_timeout_ms"));
        }
        if self.download_timeout_ms == 0 {
            return Err(ConfigError::MissingValue("download_timeout_ms"));
        }
        Ok(())
    }

    /// Parsed page origin
    pub fn origin_url(&self) -> Result<Url, ConfigError> {
        parse_base(&self.origin)
    }

    /// Parsed API base, falling back to the origin
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        match &self.api_base {
            Some(base) => parse_base(base),
            None => self.origin_url(),
        }
    }

    pub fn embed_timeout(&self) -> Duration {
        Duration::from_millis(self.embed_timeout_ms)
    }

    pub fn iframe_timeout(&self) -> Duration {
        Duration::from_millis(self.iframe_timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_millis(self.download_timeout_ms)
    }

    /// Configured download directory, or the user's download folder
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(std::env::temp_dir)
    }
}

/// Builder for ViewerConfig
#[derive(Debug, Default)]
pub struct ViewerConfigBuilder {
    config: ViewerConfig,
}

impl ViewerConfigBuilder {
    /// Set the page origin
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.config.origin = origin.into();
        self
    }

    /// Set the API base URL
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.config.api_base = Some(api_base.into());
        self
    }

    /// Set the streaming path template
    pub fn stream_path(mut self, template: impl Into<String>) -> Self {
        self.config.stream_path = template.into();
        self
    }

    /// Set the local PDF directory
    pub fn local_pdf_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.local_pdf_dir = dir.into();
        self
    }

    /// Set both strategy timeouts
    pub fn timeouts(mut self, embed: Duration, iframe: Duration) -> Self {
        self.config.embed_timeout_ms = embed.as_millis() as u64;
        self.config.iframe_timeout_ms = iframe.as_millis() as u64;
        self
    }

    /// Set the diagnostic probe timeout
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.config.probe_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set the direct download timeout
    pub fn download_timeout(mut self, timeout: Duration) -> Self {
        self.config.download_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set the download directory
    pub fn download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.download_dir = Some(dir.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ViewerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("stream path must contain {{id}}: {0}")]
    InvalidTemplate(String),
    #[error("invalid number in {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("failed to read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
    #[error("failed to parse config: {0}")]
    Parse(String),
}

fn parse_base(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|_| ConfigError::InvalidUrl(value.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(value.to_string()));
    }
    Ok(url)
}

fn env_millis(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        Err(_) => Ok(None),
    }
}
