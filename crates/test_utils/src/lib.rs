//! Test Utilities Crate
//!
//! Provides shared test infrastructure for the claims test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built valid inputs for common entities
//! - `builders`: Builder patterns for claim construction at any workflow stage

pub mod builders;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
