/**
 * PDF Reference Types
 *
 * A `PdfReference` is what a book record stores about its document: a
 * primary URL plus optional hints (book id, title) that let the viewer guess
 * alternative locations. The resolver turns it into a `CandidateList`.
 */
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored pointer to a book's PDF
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PdfReference {
    /// Primary location, relative (`/files/a.pdf`) or absolute
    pub primary_url: String,
    /// Identifier used to derive the streaming endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<String>,
    /// Title used to guess a local filename
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_title: Option<String>,
}

impl PdfReference {
    /// Create a reference with only a primary URL
    pub fn new(primary_url: impl Into<String>) -> Self {
        Self {
            primary_url: primary_url.into(),
            book_id: None,
            book_title: None,
        }
    }

    /// Set the book id
    pub fn with_book_id(mut self, book_id: impl Into<String>) -> Self {
        self.book_id = Some(book_id.into());
        self
    }

    /// Set the book title
    pub fn with_book_title(mut self, title: impl Into<String>) -> Self {
        self.book_title = Some(title.into());
        self
    }
}

/// Where a candidate URL came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    Primary,
    Streaming,
    LocalFallback,
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CandidateSource::Primary => "primary",
            CandidateSource::Streaming => "streaming",
            CandidateSource::LocalFallback => "local fallback",
        };
        f.write_str(label)
    }
}

/// One location to try
///
/// The URL is kept as a string: malformed input passes through the resolver
/// untouched and only fails later, when it is embedded or probed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateUrl {
    pub url: String,
    pub source: CandidateSource,
}

impl CandidateUrl {
    pub fn new(url: impl Into<String>, source: CandidateSource) -> Self {
        Self {
            url: url.into(),
            source,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for CandidateUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Ordered, deduplicated candidate URLs
///
/// Order is priority, not confidence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateList {
    entries: Vec<CandidateUrl>,
}

impl CandidateList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate unless the same URL is already present.
    ///
    /// Returns `true` if the candidate was added.
    pub fn push(&mut self, candidate: CandidateUrl) -> bool {
        if self.entries.iter().any(|c| c.url == candidate.url) {
            return false;
        }
        self.entries.push(candidate);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CandidateUrl> {
        self.entries.get(index)
    }

    pub fn first(&self) -> Option<&CandidateUrl> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateUrl> {
        self.entries.iter()
    }

    /// URLs only, in priority order
    pub fn urls(&self) -> Vec<&str> {
        self.entries.iter().map(|c| c.url.as_str()).collect()
    }
}

impl FromIterator<CandidateUrl> for CandidateList {
    fn from_iter<T: IntoIterator<Item = CandidateUrl>>(iter: T) -> Self {
        let mut list = CandidateList::new();
        for candidate in iter {
            list.push(candidate);
        }
        list
    }
}
