//! Application service wiring the workflow engine to its ports
//!
//! Request handlers in the surrounding application call this service; it
//! resolves the caller's role once through the identity directory, runs the
//! pure engine, persists through the conditional write, and hands the
//! accepted transition to the audit recorder.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use core_kernel::UserId;

use crate::assignment::AssignmentResolver;
use crate::audit::{AuditEvent, AuditRecorder};
use crate::claim::{Claim, NewClaim};
use crate::engine::{apply_action, ActionRequest};
use crate::error::ClaimError;
use crate::ports::{ClaimStore, EventLog, Identity, IdentityProvider};
use crate::rules::{Action, Role};
use crate::validation::ClaimValidator;

/// Entry point for all claim operations
pub struct ClaimService {
    store: Arc<dyn ClaimStore>,
    identity: Arc<dyn IdentityProvider>,
    audit: AuditRecorder,
}

impl ClaimService {
    pub fn new(
        store: Arc<dyn ClaimStore>,
        identity: Arc<dyn IdentityProvider>,
        log: Arc<dyn EventLog>,
    ) -> Self {
        Self {
            store,
            identity,
            audit: AuditRecorder::new(log),
        }
    }

    /// Files a new claim; insurer only
    pub async fn create_claim(
        &self,
        acting_user_id: UserId,
        input: NewClaim,
    ) -> Result<Claim, ClaimError> {
        let identity = self.resolve_identity(acting_user_id).await?;
        if identity.role != Role::Aseguradora {
            return Err(ClaimError::unauthorized("only an insurer may open a claim"));
        }

        let now = Utc::now();
        ClaimValidator::validate_creation(&input, now).into_result()?;

        let claim = Claim::open(acting_user_id, input, now);
        self.store.insert(claim.clone()).await?;

        info!(claim_id = %claim.id, insurer_id = %acting_user_id, "claim opened");

        let event = AuditEvent::new(
            acting_user_id,
            identity.role,
            Action::CreateClaim,
            claim.id,
            format!(
                "Insurer {} opened claim {} for client {} {}",
                acting_user_id, claim.id, claim.client.first_name, claim.client.last_name
            ),
            now,
        );
        self.audit.record(event).await;

        Ok(claim)
    }

    /// Validates, applies, and persists one workflow action
    ///
    /// The write is conditional on the fields the accepted rule depended on,
    /// so concurrent actors racing for the same claim lose with
    /// [`ClaimError::PersistenceConflict`] instead of overwriting each other.
    pub async fn execute(&self, request: ActionRequest) -> Result<Claim, ClaimError> {
        let identity = self.resolve_identity(request.acting_user_id).await?;
        if identity.role != request.role {
            return Err(ClaimError::unauthorized(
                "declared role does not match the directory",
            ));
        }

        let claim = self
            .store
            .get(request.claim_id)
            .await?
            .ok_or(ClaimError::NotFound(request.claim_id))?;

        let transition = apply_action(&claim, &request, Utc::now())?;

        self.store
            .conditional_update(request.claim_id, &transition.expected, transition.claim.clone())
            .await
            .map_err(|error| {
                if error.is_conflict() {
                    ClaimError::PersistenceConflict
                } else {
                    ClaimError::Port(error)
                }
            })?;

        debug!(
            claim_id = %request.claim_id,
            action = request.action.wire_name(),
            status = transition.claim.status.wire_name(),
            "transition applied"
        );

        self.audit.record(transition.event).await;

        Ok(transition.claim)
    }

    /// All claims the caller may see, newest first
    pub async fn visible_claims(&self, acting_user_id: UserId) -> Result<Vec<Claim>, ClaimError> {
        let identity = self.resolve_identity(acting_user_id).await?;

        let mut claims = Vec::new();
        for query in AssignmentResolver::scope_queries(identity.role, identity.user_id) {
            claims.extend(self.store.query(query).await?);
        }

        // Uniform guard: never trust the per-role queries alone
        claims.retain(|claim| {
            AssignmentResolver::is_visible(claim, identity.role, identity.user_id)
        });
        claims.sort_by_key(|claim| Reverse(claim.created_at));

        Ok(claims)
    }

    async fn resolve_identity(&self, user_id: UserId) -> Result<Identity, ClaimError> {
        self.identity.resolve(user_id).await.map_err(|error| {
            if error.is_not_found() {
                ClaimError::unauthorized("caller has no role in the directory")
            } else {
                ClaimError::Port(error)
            }
        })
    }
}
