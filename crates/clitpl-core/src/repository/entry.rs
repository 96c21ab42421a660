//! Entry repository trait definition.

use std::future::Future;
use std::path::PathBuf;

use futures_util::{Stream, StreamExt};
use serde::Deserialize;

use clitpl_types::entry::Entry;
use clitpl_types::error::CatalogError;

/// A stored entry file in its raw JSON form.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub path: PathBuf,
    pub value: serde_json::Value,
}

impl StoredDocument {
    /// Parse the document as a typed [`Entry`], naming the file on failure.
    pub fn to_entry(&self) -> Result<Entry, CatalogError> {
        Entry::deserialize(&self.value).map_err(|e| CatalogError::CorruptEntry {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    pub fn into_entry(self) -> Result<Entry, CatalogError> {
        self.to_entry()
    }
}

/// Repository trait for catalog entry persistence.
///
/// Implementations live in clitpl-infra (e.g., JsonEntryRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait EntryRepository: Send + Sync {
    /// Persist a new entry and return the path it was written to.
    ///
    /// Must reject an entry whose slug is already stored with
    /// [`CatalogError::DuplicateSlug`], leaving the existing file untouched.
    fn write(
        &self,
        entry: &Entry,
    ) -> impl Future<Output = Result<PathBuf, CatalogError>> + Send;

    /// Lazily yield every stored entry file as raw JSON.
    ///
    /// Order is unspecified. A file that is not valid JSON ends the scan
    /// with [`CatalogError::CorruptEntry`].
    fn scan_documents(
        &self,
    ) -> impl Stream<Item = Result<StoredDocument, CatalogError>> + Send + '_;

    /// Lazily yield every stored entry as a typed [`Entry`].
    ///
    /// Order is unspecified. A file that does not parse as an entry ends the
    /// scan with [`CatalogError::CorruptEntry`].
    fn scan_all(&self) -> impl Stream<Item = Result<Entry, CatalogError>> + Send + '_ {
        self.scan_documents()
            .map(|doc| doc.and_then(StoredDocument::into_entry))
    }
}
