//! Audit events and the best-effort recorder
//!
//! Every accepted transition produces one structured event for the external
//! append-only log. Recording is fire-and-forget relative to the state
//! change: an append failure is logged locally and never rolls back or
//! blocks the already-applied transition.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AuditEventId, ClaimId, UserId};

use crate::claim::Claim;
use crate::engine::ActionRequest;
use crate::ports::EventLog;
use crate::rules::{Action, Role};

/// One append-only audit trail entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: AuditEventId,
    pub timestamp: DateTime<Utc>,
    pub actor_id: UserId,
    pub actor_role: Role,
    pub action: Action,
    pub claim_id: ClaimId,
    pub description: String,
}

impl AuditEvent {
    /// Creates an audit event
    pub fn new(
        actor_id: UserId,
        actor_role: Role,
        action: Action,
        claim_id: ClaimId,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AuditEventId::new_v7(),
            timestamp,
            actor_id,
            actor_role,
            action,
            claim_id,
            description: description.into(),
        }
    }

    /// Drafts the event for an accepted transition
    pub fn for_transition(claim: &Claim, request: &ActionRequest, now: DateTime<Utc>) -> Self {
        let description = match request.action {
            Action::CreateClaim => format!("Claim {} was opened", claim.id),
            Action::SelfAssign => format!(
                "Adjuster {} took claim {}",
                request.acting_user_id, claim.id
            ),
            Action::SubmitReport => format!(
                "Adjuster {} filed the damage report for claim {}",
                request.acting_user_id, claim.id
            ),
            Action::RequestBudget => format!(
                "Insurer {} requested a repair budget for claim {}",
                request.acting_user_id, claim.id
            ),
            Action::SubmitBudget => format!(
                "Shop {} submitted a repair budget for claim {}",
                request.acting_user_id, claim.id
            ),
            Action::ApproveBudget => format!(
                "Insurer {} approved the repair budget for claim {}",
                request.acting_user_id, claim.id
            ),
            Action::RejectBudget => format!(
                "Insurer {} rejected the repair budget for claim {}",
                request.acting_user_id, claim.id
            ),
            Action::StartRepair => format!(
                "Shop {} started the repair for claim {}",
                request.acting_user_id, claim.id
            ),
            Action::FinishRepair => format!(
                "Shop {} finished the repair for claim {}",
                request.acting_user_id, claim.id
            ),
            Action::Close => format!(
                "Insurer {} closed claim {}",
                request.acting_user_id, claim.id
            ),
        };

        Self::new(
            request.acting_user_id,
            request.role,
            request.action,
            claim.id,
            description,
            now,
        )
    }
}

/// Best-effort recorder over the external event log
#[derive(Clone)]
pub struct AuditRecorder {
    log: Arc<dyn EventLog>,
}

impl AuditRecorder {
    pub fn new(log: Arc<dyn EventLog>) -> Self {
        Self { log }
    }

    /// Appends the event; a failed append is logged and swallowed
    pub async fn record(&self, event: AuditEvent) {
        if let Err(error) = self.log.append(event.clone()).await {
            tracing::warn!(
                event_id = %event.id,
                claim_id = %event.claim_id,
                action = event.action.wire_name(),
                %error,
                "failed to append audit event"
            );
        }
    }
}
