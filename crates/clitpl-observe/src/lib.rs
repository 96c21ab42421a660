//! Logging setup shared by clitpl binaries.

pub mod tracing_setup;
