//! Claims domain errors
//!
//! The taxonomy distinguishes user-correctable input problems
//! (`Validation`), actions that do not exist from the current status
//! (`InvalidTransition`), role or identity mismatches (`Unauthorized`,
//! kept separate for security logging), failed business rules
//! (`PreconditionFailed`, with a machine-readable code), and lost
//! conditional writes (`PersistenceConflict`).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::{ClaimId, PortError};

use crate::claim::ClaimStatus;
use crate::rules::Action;

/// Machine-readable reason codes for failed business preconditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreconditionCode {
    /// Another adjuster already holds the claim
    AdjusterAlreadyAssigned,
    /// A budget cannot be requested without an assigned shop
    ShopNotAssigned,
    /// The budget decision requires a submitted budget
    BudgetMissing,
}

impl fmt::Display for PreconditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            PreconditionCode::AdjusterAlreadyAssigned => "adjuster_already_assigned",
            PreconditionCode::ShopNotAssigned => "shop_not_assigned",
            PreconditionCode::BudgetMissing => "budget_missing",
        };
        f.write_str(code)
    }
}

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    /// Malformed input at claim creation or attachment; never mutates state
    #[error("Validation failed: {}", errors.join("; "))]
    Validation { errors: Vec<String> },

    /// The requested action does not exist from the current status
    #[error("Action {} is not available from status {}", action.wire_name(), status.wire_name())]
    InvalidTransition {
        status: ClaimStatus,
        action: Action,
    },

    /// Role or identity mismatch
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// A business rule was not met; the caller may retry after refreshing
    #[error("Precondition failed: {code}")]
    PreconditionFailed { code: PreconditionCode },

    /// The conditional write lost a race; reload and decide whether to retry
    #[error("Claim was modified concurrently")]
    PersistenceConflict,

    #[error("Claim not found: {0}")]
    NotFound(ClaimId),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl ClaimError {
    /// Creates a validation failure from a single message
    pub fn validation(message: impl Into<String>) -> Self {
        ClaimError::Validation {
            errors: vec![message.into()],
        }
    }

    /// Creates an authorization failure
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        ClaimError::Unauthorized {
            reason: reason.into(),
        }
    }

    /// Creates a precondition failure
    pub fn precondition(code: PreconditionCode) -> Self {
        ClaimError::PreconditionFailed { code }
    }
}
