use std::path::PathBuf;

use thiserror::Error;

/// Errors from catalog storage and schema handling.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("an entry with slug '{slug}' already exists at {}", .path.display())]
    DuplicateSlug { slug: String, path: PathBuf },

    #[error("corrupt entry {}: {reason}", .path.display())]
    CorruptEntry { path: PathBuf, reason: String },

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

/// Errors from external tool invocations (version control, hosting CLI).
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("'{tool}' is not available")]
    Unavailable { tool: String },

    #[error("`{command}` failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Errors that abort a submission run.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("submission rejected: {0}")]
    InputRejected(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("version control failed while {step} (entry kept at {}): {source}", .entry_path.display())]
    Vcs {
        step: &'static str,
        entry_path: PathBuf,
        #[source]
        source: GatewayError,
    },
}
