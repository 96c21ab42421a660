//! Business logic services (use cases).
//!
//! Services orchestrate repository calls, filesystem operations, external
//! gateways, and catalog rules. They depend on traits (ports) -- never on
//! concrete infrastructure implementations.

pub mod catalog;
pub mod fs;
pub mod proposal;
pub mod submission;
