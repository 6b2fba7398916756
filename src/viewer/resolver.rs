//! # URL Resolver
//!
//! Turns a stored [`PdfReference`] into the ordered list of places the same
//! document might be fetched from:
//!
//! 1. the primary URL (made absolute when it is origin-relative)
//! 2. the streaming endpoint derived from the book id
//! 3. a filename guessed from the book title in the local PDF directory
//!
//! Nothing here touches the network. Malformed input is passed through as-is
//! and left for the embed or the reachability probe to reject.

use crate::shared::config::{ConfigError, ViewerConfig};
use crate::shared::{CandidateList, CandidateSource, CandidateUrl, PdfReference};
use reqwest::Url;

/// Builds candidate lists for one page origin
#[derive(Debug, Clone)]
pub struct UrlResolver {
    origin: Url,
    api_base: Url,
    stream_path: String,
    local_pdf_dir: String,
}

impl UrlResolver {
    pub fn new(origin: Url, api_base: Url, stream_path: impl Into<String>, local_pdf_dir: impl Into<String>) -> Self {
        Self {
            origin,
            api_base,
            stream_path: stream_path.into(),
            local_pdf_dir: local_pdf_dir.into(),
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.origin_url()?,
            config.api_base_url()?,
            config.stream_path.clone(),
            config.local_pdf_dir.clone(),
        ))
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Resolve a reference into deduplicated candidates in priority order
    pub fn resolve(&self, reference: &PdfReference) -> CandidateList {
        let mut candidates = CandidateList::new();

        let primary = reference.primary_url.trim();
        if !primary.is_empty() {
            candidates.push(CandidateUrl::new(
                self.absolutize(primary),
                CandidateSource::Primary,
            ));
        }

        if let Some(url) = reference
            .book_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .and_then(|id| self.streaming_url(id))
        {
            candidates.push(CandidateUrl::new(url, CandidateSource::Streaming));
        }

        if let Some(url) = reference
            .book_title
            .as_deref()
            .and_then(|title| self.local_fallback_url(title))
        {
            candidates.push(CandidateUrl::new(url, CandidateSource::LocalFallback));
        }

        tracing::debug!(
            "[Resolver] {} candidate(s) for {:?}: {:?}",
            candidates.len(),
            reference.primary_url,
            candidates.urls()
        );
        candidates
    }

    /// Rewrite an origin-relative URL; anything else is returned unchanged
    pub fn absolutize(&self, url: &str) -> String {
        if !url.starts_with('/') {
            return url.to_string();
        }
        match self.origin.join(url) {
            Ok(absolute) => absolute.to_string(),
            Err(e) => {
                tracing::debug!("[Resolver] Keeping {:?} as-is: {}", url, e);
                url.to_string()
            }
        }
    }

    /// Streaming endpoint for a book id, with the id percent-encoded
    pub fn streaming_url(&self, book_id: &str) -> Option<String> {
        let mut url = self.api_base.clone();
        {
            let mut segments = url.path_segments_mut().ok()?;
            segments.pop_if_empty();
            for part in self.stream_path.split('/').filter(|p| !p.is_empty()) {
                if part == "{id}" {
                    segments.push(book_id);
                } else {
                    segments.push(part);
                }
            }
        }
        url.set_query(None);
        url.set_fragment(None);
        Some(url.to_string())
    }

    /// Guessed local file for a title, `None` when the title has no usable characters
    pub fn local_fallback_url(&self, title: &str) -> Option<String> {
        let slug = slugify(title);
        if slug.is_empty() {
            return None;
        }
        let dir = self.local_pdf_dir.trim_matches('/');
        let path = if dir.is_empty() {
            format!("/{}.pdf", slug)
        } else {
            format!("/{}/{}.pdf", dir, slug)
        };
        self.origin.join(&path).ok().map(|url| url.to_string())
    }
}

/// Lowercase, with runs of non-alphanumerics collapsed to a single `-`
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
