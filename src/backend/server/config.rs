/**
 * Server Configuration
 *
 * Configuration is loaded from environment variables (a `.env` file is read
 * by the binary before this runs), with defaults suitable for local
 * development.
 *
 * | Variable         | Default        |
 * |------------------|----------------|
 * | `SERVER_PORT`    | `3000`         |
 * | `LIBRARY_DIR`    | `library`      |
 * | `PUBLIC_PDF_DIR` | `public/pdfs`  |
 * | `CATALOG_PATH`   | `books.toml`   |
 * | `STREAM_PATH`    | `/api/books/{id}/stream` |
 *
 * `STREAM_PATH` is the public path of the streaming endpoint as the viewer
 * sees it (behind a proxy prefix, for example). It must contain `{id}`.
 */

use crate::shared::config::DEFAULT_STREAM_PATH;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;

/// Server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Streaming endpoint source, `<id>.pdf` per book
    pub library_dir: PathBuf,
    /// Served under `/pdfs` for the viewer's filename-guess fallback
    pub public_pdf_dir: PathBuf,
    pub catalog_path: PathBuf,
    /// Public streaming path template, used for catalog entries without `pdf_url`
    pub stream_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            library_dir: PathBuf::from("library"),
            public_pdf_dir: PathBuf::from("public/pdfs"),
            catalog_path: PathBuf::from("books.toml"),
            stream_path: DEFAULT_STREAM_PATH.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load from the environment
    ///
    /// An unparsable `SERVER_PORT` is logged and replaced by the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = match std::env::var("SERVER_PORT") {
            Ok(value) => value.parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("SERVER_PORT={:?} is not a port, using {}", value, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };
        Self {
            port,
            library_dir: env_path("LIBRARY_DIR").unwrap_or(defaults.library_dir),
            public_pdf_dir: env_path("PUBLIC_PDF_DIR").unwrap_or(defaults.public_pdf_dir),
            catalog_path: env_path("CATALOG_PATH").unwrap_or(defaults.catalog_path),
            stream_path: env_stream_path().unwrap_or(defaults.stream_path),
        }
    }
}

fn env_stream_path() -> Option<String> {
    let value = std::env::var("STREAM_PATH").ok().filter(|v| !v.is_empty())?;
    if value.contains("{id}") {
        Some(value)
    } else {
        tracing::warn!(
            "STREAM_PATH={:?} has no {{id}}, using {}",
            value,
            DEFAULT_STREAM_PATH
        );
        None
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name).ok().filter(|v| !v.is_empty()).map(PathBuf::from)
}
