//! Batch catalog operations: index rebuild and whole-catalog validation.
//!
//! Both operations are read-mostly scans over the entry repository and can
//! run from CI independently of any submission.

use std::cmp::Ordering;
use std::path::PathBuf;
use std::sync::LazyLock;

use futures_util::StreamExt;
use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use serde_json::Value;

use clitpl_types::catalog::CatalogLayout;
use clitpl_types::entry::Entry;
use clitpl_types::error::CatalogError;
use clitpl_types::validation::{BatchReport, FileViolations};

use crate::repository::entry::EntryRepository;
use crate::schema::SchemaValidator;
use crate::service::fs::FileSystem;

/// Result of an index rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub path: PathBuf,
    pub entries: usize,
}

/// Root-locale collator, built once from the compiled CLDR data.
static NAME_COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    match Collator::try_new(Default::default(), CollatorOptions::default()) {
        Ok(collator) => Some(collator),
        Err(err) => {
            tracing::warn!("name collator unavailable, falling back to case-folded order: {err}");
            None
        }
    }
});

/// Compare display names the way a human-facing listing expects.
///
/// Uses Unicode collation: accents and case are secondary and tertiary
/// differences, so `"eagle" < "Éclair" < "fig"` and `"apple" < "Apple" <
/// "banana"`.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    match NAME_COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)),
    }
}

/// A stored document together with its parsed form, kept for ordering.
struct IndexItem {
    entry: Entry,
    value: Value,
}

/// Index order: name, then slug and creation time so the output never
/// depends on directory enumeration order.
fn index_order(a: &Entry, b: &Entry) -> Ordering {
    compare_names(&a.name, &b.name)
        .then_with(|| a.slug.cmp(&b.slug))
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// Serialize stored documents as the index file body (pretty JSON + trailing newline).
///
/// Documents are emitted exactly as stored; nothing is re-encoded through
/// [`Entry`].
pub fn render_index(documents: &[Value]) -> Result<String, CatalogError> {
    let mut body =
        serde_json::to_string_pretty(documents).map_err(|e| CatalogError::Serialize(e.to_string()))?;
    body.push('\n');
    Ok(body)
}

/// Read and compile `templates/schema.json`.
pub async fn load_schema<F: FileSystem>(
    fs: &F,
    layout: &CatalogLayout,
) -> Result<SchemaValidator, CatalogError> {
    let path = layout.schema_path();
    let raw = fs
        .read_file(&path)
        .await
        .map_err(|source| CatalogError::Io { path, source })?;
    SchemaValidator::from_json_str(&raw)
}

/// Service for whole-catalog batch operations.
pub struct CatalogService<R: EntryRepository, F: FileSystem> {
    repo: R,
    fs: F,
    layout: CatalogLayout,
}

impl<R: EntryRepository, F: FileSystem> CatalogService<R, F> {
    pub fn new(repo: R, fs: F, layout: CatalogLayout) -> Self {
        Self { repo, fs, layout }
    }

    /// Rebuild `templates/index.json` from every stored entry.
    ///
    /// The file is replaced wholesale. Running it twice over unchanged
    /// entries produces byte-identical output.
    ///
    /// # Errors
    ///
    /// Fails on the first corrupt entry ([`CatalogError::CorruptEntry`]) or
    /// on an I/O error writing the index; the existing index is left as is.
    pub async fn rebuild_index(&self) -> Result<IndexSummary, CatalogError> {
        let mut items: Vec<IndexItem> = Vec::new();
        let mut scan = std::pin::pin!(self.repo.scan_documents());
        while let Some(doc) = scan.next().await {
            let doc = doc?;
            let entry = doc.to_entry()?;
            items.push(IndexItem {
                entry,
                value: doc.value,
            });
        }

        items.sort_by(|a, b| index_order(&a.entry, &b.entry));
        let documents: Vec<Value> = items.into_iter().map(|item| item.value).collect();
        let body = render_index(&documents)?;

        let path = self.layout.index_path();
        self.fs
            .write_file(&path, &body)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::info!(entries = documents.len(), path = %path.display(), "index rebuilt");
        Ok(IndexSummary {
            path,
            entries: documents.len(),
        })
    }

    /// Validate every stored entry against the catalog schema.
    ///
    /// Every file is checked; failures are collected with their
    /// catalog-relative path and all of their violations, sorted by path.
    ///
    /// # Errors
    ///
    /// Fails when the schema cannot be loaded or a file is not valid JSON.
    pub async fn validate_all(&self) -> Result<BatchReport, CatalogError> {
        let validator = load_schema(&self.fs, &self.layout).await?;

        let mut report = BatchReport::default();
        let mut scan = std::pin::pin!(self.repo.scan_documents());
        while let Some(doc) = scan.next().await {
            let doc = doc?;
            report.checked += 1;

            let violations = validator.validate(&doc.value);
            if !violations.is_empty() {
                let path = self.layout.relative(&doc.path).to_path_buf();
                tracing::warn!(
                    path = %path.display(),
                    violations = violations.len(),
                    "entry failed schema validation"
                );
                report.failures.push(FileViolations { path, violations });
            }
        }

        report.failures.sort_by(|a, b| a.path.cmp(&b.path));
        tracing::info!(
            checked = report.checked,
            failed = report.failures.len(),
            "catalog validation finished"
        );
        Ok(report)
    }
}
