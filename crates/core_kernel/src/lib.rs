//! Core Kernel - Foundational types for the PERITAR claims system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers for claims, users, budgets, and audit events
//! - Port abstractions for the hexagonal architecture boundary

pub mod identifiers;
pub mod ports;

pub use identifiers::{AuditEventId, BudgetId, ClaimId, UserId};
pub use ports::{DomainPort, PortError};
