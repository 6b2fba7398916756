/**
 * Book Catalog
 *
 * In-memory index of the books the server knows about, loaded once at
 * startup from a TOML file:
 *
 * ```toml
 * [[book]]
 * id = "muna-madan"
 * title = "Muna Madan"
 * pdf_url = "/files/muna-madan.pdf"
 * ```
 *
 * A book without `pdf_url` points its primary URL at its own streaming
 * endpoint, built from the server's stream path template.
 */

use crate::backend::error::BackendError;
use crate::shared::PdfReference;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

impl BookEntry {
    /// The reference handed to the viewer; `stream_path` is a `{id}` template
    pub fn pdf_reference(&self, stream_path: &str) -> PdfReference {
        let primary = self
            .pdf_url
            .clone()
            .unwrap_or_else(|| stream_path.replace("{id}", &self.id));
        PdfReference::new(primary)
            .with_book_id(self.id.clone())
            .with_book_title(self.title.clone())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    book: Vec<BookEntry>,
}

/// Books by id
#[derive(Debug, Clone, Default)]
pub struct BookCatalog {
    books: HashMap<String, BookEntry>,
}

impl BookCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, BackendError> {
        let file: CatalogFile =
            toml::from_str(contents).map_err(|e| BackendError::catalog(e.to_string()))?;
        let mut catalog = Self::new();
        for entry in file.book {
            if !is_valid_book_id(&entry.id) {
                return Err(BackendError::catalog(format!("invalid book id: {:?}", entry.id)));
            }
            if catalog.books.contains_key(&entry.id) {
                return Err(BackendError::catalog(format!("duplicate book id: {}", entry.id)));
            }
            catalog.books.insert(entry.id.clone(), entry);
        }
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, BackendError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BackendError::catalog(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn insert(&mut self, entry: BookEntry) {
        self.books.insert(entry.id.clone(), entry);
    }

    pub fn get(&self, id: &str) -> Option<&BookEntry> {
        self.books.get(id)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Book ids double as file names, so only `[A-Za-z0-9_-]` is allowed
pub fn is_valid_book_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 128
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
