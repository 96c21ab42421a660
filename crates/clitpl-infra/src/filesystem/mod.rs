//! Filesystem adapters for the catalog.
//!
//! Implements the `FileSystem` trait from `clitpl-core` for real filesystem
//! I/O and resolves the catalog root the tool operates on.

use std::path::{Path, PathBuf};

use clitpl_core::service::fs::FileSystem;

/// Environment variable overriding the catalog root.
pub const CATALOG_ROOT_ENV: &str = "CLITPL_ROOT";

/// Local filesystem implementation of the `FileSystem` trait.
///
/// All operations go through `tokio::fs` for async I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Create a new LocalFileSystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    async fn write_file(&self, path: &Path, content: &str) -> Result<(), std::io::Error> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await
    }

    async fn read_file(&self, path: &Path) -> Result<String, std::io::Error> {
        tokio::fs::read_to_string(path).await
    }
}

/// Resolve the catalog root from environment or the working directory.
///
/// Priority:
/// 1. `CLITPL_ROOT` environment variable
/// 2. Current working directory
pub fn resolve_catalog_root() -> std::io::Result<PathBuf> {
    match std::env::var_os(CATALOG_ROOT_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => std::env::current_dir(),
    }
}
