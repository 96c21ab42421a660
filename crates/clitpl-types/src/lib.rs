//! Shared domain types for the CLI-Templates catalog.
//!
//! This crate contains the types used across the workspace: the catalog
//! Entry, the wizard's Answer Set, catalog layout and configuration, slug
//! generation, validation reports, and the error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror, regex.

pub mod answers;
pub mod catalog;
pub mod config;
pub mod entry;
pub mod error;
pub mod slug;
pub mod validation;
