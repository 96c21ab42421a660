//! Infrastructure layer for the CLI-Templates catalog.
//!
//! Contains implementations of the ports defined in `clitpl-core`: the
//! local filesystem, the JSON-file entry repository, and process-backed
//! gateways for `git` and `gh`. Also loads `clitpl.toml`.

pub mod catalog;
pub mod config;
pub mod filesystem;
pub mod gh;
pub mod git;
pub mod process;
