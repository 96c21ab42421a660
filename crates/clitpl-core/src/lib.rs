//! Business logic and port definitions for the CLI-Templates catalog.
//!
//! This crate defines the "ports" (entry repository, filesystem, version
//! control and hosting gateways) that the infrastructure layer implements,
//! plus the services built on them: the submission pipeline and the batch
//! catalog operations. It depends only on `clitpl-types` -- never on
//! `clitpl-infra` or any process/IO crate.

pub mod gateway;
pub mod repository;
pub mod schema;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;
