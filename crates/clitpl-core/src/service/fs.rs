//! FileSystem trait for abstracting file I/O.
//!
//! Defined in clitpl-core so services can read the schema and write the
//! index without depending on any specific filesystem implementation. The
//! `LocalFileSystem` adapter lives in clitpl-infra.

use std::future::Future;
use std::path::Path;

/// Abstraction over filesystem operations.
///
/// This trait allows the service layer to read/write files without coupling
/// to the real filesystem, enabling easy testing with in-memory implementations.
pub trait FileSystem: Send + Sync {
    /// Write string content to a file, replacing it and creating parent
    /// directories as needed.
    fn write_file(
        &self,
        path: &Path,
        content: &str,
    ) -> impl Future<Output = Result<(), std::io::Error>> + Send;

    /// Read a file's content as a string.
    fn read_file(&self, path: &Path) -> impl Future<Output = Result<String, std::io::Error>> + Send;
}
