//! Catalog directory layout.
//!
//! Every path the tool touches is derived from one explicit catalog root:
//!
//! ```text
//! {root}/
//!   clitpl.toml            optional tool configuration
//!   templates/
//!     schema.json          entry JSON Schema (read-only)
//!     index.json           derived, sorted aggregate of all entries
//!     entries/
//!       <slug>.json        one entry per file
//! ```

use std::path::{Path, PathBuf};

/// Paths inside a catalog checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLayout {
    root: PathBuf,
}

impl CatalogLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join("templates")
    }

    pub fn schema_path(&self) -> PathBuf {
        self.templates_dir().join("schema.json")
    }

    pub fn entries_dir(&self) -> PathBuf {
        self.templates_dir().join("entries")
    }

    pub fn index_path(&self) -> PathBuf {
        self.templates_dir().join("index.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("clitpl.toml")
    }

    /// `{root}/templates/entries/{slug}.json`
    pub fn entry_path(&self, slug: &str) -> PathBuf {
        self.entries_dir().join(format!("{slug}.json"))
    }

    /// Path relative to the catalog root, for display. Paths outside the
    /// root are returned unchanged.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}
