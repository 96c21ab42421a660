//! Schema validation results.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One schema violation inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaViolation {
    /// JSON pointer to the offending value ("" for the document root).
    pub instance_path: String,
    /// JSON pointer to the schema keyword that failed.
    pub schema_path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.instance_path.is_empty() {
            "/"
        } else {
            self.instance_path.as_str()
        };
        write!(f, "{at}: {}", self.message)
    }
}

/// Result of the best-effort validation run right after an entry is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Passed,
    Failed(Vec<SchemaViolation>),
    /// The local validator could not run (e.g. missing schema); CI validates.
    Skipped(String),
}

impl ValidationOutcome {
    pub fn from_violations(violations: Vec<SchemaViolation>) -> Self {
        if violations.is_empty() {
            ValidationOutcome::Passed
        } else {
            ValidationOutcome::Failed(violations)
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ValidationOutcome::Failed(_))
    }
}

/// A stored entry file that failed batch validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileViolations {
    /// Path relative to the catalog root.
    pub path: PathBuf,
    pub violations: Vec<SchemaViolation>,
}

/// Result of validating every stored entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub checked: usize,
    pub failures: Vec<FileViolations>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
