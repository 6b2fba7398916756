//! # Download Fallback
//!
//! Lets the reader get the PDF even when nothing renders inline. It works
//! off the same [`CandidateList`] as the selector but is independent of it:
//! callable in any selector state, including `Exhausted`.
//!
//! The first candidate is downloaded through a [`DownloadAgent`]. When the
//! agent cannot download, or the download fails, the URL is opened in a new
//! tab instead.

use crate::shared::{CandidateList, ViewerError};
use crate::viewer::resolver::slugify;
use futures_util::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Whole-request limit used by [`HttpDownloadAgent::new`]
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// What the fallback ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded { url: String, path: PathBuf },
    OpenedInTab { url: String },
}

/// Platform mechanisms for getting a file to the user
#[allow(async_fn_in_trait)]
pub trait DownloadAgent {
    /// Whether direct downloads are possible at all
    fn supports_download(&self) -> bool;

    /// Save `url` as `filename`, returning where it was written
    async fn download(&self, url: &str, filename: &str) -> Result<PathBuf, ViewerError>;

    /// Hand `url` to a new browser tab
    fn open_in_new_tab(&self, url: &str) -> Result<(), ViewerError>;
}

/// Filename offered for a book, `document.pdf` when there is no usable title
pub fn download_filename(title: Option<&str>) -> String {
    let slug = title.map(slugify).unwrap_or_default();
    if slug.is_empty() {
        "document.pdf".to_string()
    } else {
        format!("{}.pdf", slug)
    }
}

/// Run the download fallback against the first candidate
pub async fn offer_download<A: DownloadAgent>(
    candidates: &CandidateList,
    title: Option<&str>,
    agent: &A,
) -> Result<DownloadOutcome, ViewerError> {
    let url = candidates.first().ok_or(ViewerError::NoCandidates)?.url.clone();
    let filename = download_filename(title);

    if agent.supports_download() {
        match agent.download(&url, &filename).await {
            Ok(path) => {
                tracing::info!("[Download] Saved {} to {}", url, path.display());
                return Ok(DownloadOutcome::Downloaded { url, path });
            }
            Err(e) => {
                tracing::warn!("[Download] {}; opening in a new tab", e);
            }
        }
    } else {
        tracing::debug!("[Download] Direct download unavailable; opening in a new tab");
    }

    agent.open_in_new_tab(&url)?;
    Ok(DownloadOutcome::OpenedInTab { url })
}

/// Downloads over HTTP into a directory and opens tabs in the system browser
#[derive(Debug, Clone)]
pub struct HttpDownloadAgent {
    client: Client,
    directory: PathBuf,
    timeout: Duration,
}

impl HttpDownloadAgent {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_client(Client::new(), directory)
    }

    pub fn with_client(client: Client, directory: impl Into<PathBuf>) -> Self {
        Self {
            client,
            directory: directory.into(),
            timeout: DEFAULT_DOWNLOAD_TIMEOUT,
        }
    }

    /// Limit a whole download, connect to last byte
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn describe(&self, error: reqwest::Error) -> String {
        if error.is_timeout() {
            format!("timed out after {}ms", self.timeout.as_millis())
        } else {
            error.to_string()
        }
    }

    /// `name.pdf`, then `name (1).pdf`, ... for the first path not taken
    fn unique_path(&self, filename: &str) -> PathBuf {
        let candidate = self.directory.join(filename);
        if !candidate.exists() {
            return candidate;
        }
        let stem = filename.strip_suffix(".pdf").unwrap_or(filename);
        (1..)
            .map(|n| self.directory.join(format!("{} ({}).pdf", stem, n)))
            .find(|path| !path.exists())
            .unwrap_or(candidate)
    }
}

impl DownloadAgent for HttpDownloadAgent {
    fn supports_download(&self) -> bool {
        self.directory.is_dir()
    }

    async fn download(&self, url: &str, filename: &str) -> Result<PathBuf, ViewerError> {
        let fail = |reason: String| ViewerError::download_failed(url, reason);

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| fail(self.describe(e)))?;
        if !response.status().is_success() {
            return Err(fail(format!("HTTP {}", response.status())));
        }

        let path = self.unique_path(filename);
        let partial = path.with_extension("pdf.part");
        let written = match write_body(response, &partial).await {
            Ok(written) => written,
            Err(reason) => {
                discard_partial(&partial).await;
                return Err(fail(reason));
            }
        };
        commit_partial(&partial, &path).await.map_err(fail)?;

        tracing::debug!("[Download] Wrote {} bytes from {}", written, url);
        Ok(path)
    }

    fn open_in_new_tab(&self, url: &str) -> Result<(), ViewerError> {
        open::that(url).map_err(|e| ViewerError::tab_open_failed(url, e.to_string()))
    }
}

/// Stream the response body into `partial`, returning the byte count
async fn write_body(response: reqwest::Response, partial: &Path) -> Result<usize, String> {
    let mut file = tokio::fs::File::create(partial)
        .await
        .map_err(|e| e.to_string())?;

    let mut stream = response.bytes_stream();
    let mut written = 0usize;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            if e.is_timeout() {
                "timed out while reading the body".to_string()
            } else {
                e.to_string()
            }
        })?;
        written += chunk.len();
        file.write_all(&chunk).await.map_err(|e| e.to_string())?;
    }
    file.flush().await.map_err(|e| e.to_string())?;
    Ok(written)
}

/// Move a finished `.part` file into place; the `.part` file is gone either way
async fn commit_partial(partial: &Path, path: &Path) -> Result<(), String> {
    if let Err(e) = tokio::fs::rename(partial, path).await {
        discard_partial(partial).await;
        return Err(e.to_string());
    }
    Ok(())
}

async fn discard_partial(partial: &Path) {
    if let Err(e) = tokio::fs::remove_file(partial).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("[Download] Could not remove {}: {}", partial.display(), e);
        }
    }
}
