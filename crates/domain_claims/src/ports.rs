//! Claims domain ports
//!
//! The core depends on three abstract collaborators: a record store for
//! claim documents, an identity directory that maps users to their declared
//! role, and an append-only event log. Adapters implement these traits
//! against the hosted backend; `infra_memory` implements them in memory for
//! tests.

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, PortError, UserId};

use crate::audit::AuditEvent;
use crate::claim::{Claim, ClaimStatus};
use crate::engine::ClaimExpectation;
use crate::rules::Role;

/// Equality filters for finding claims
#[derive(Debug, Clone, Default)]
pub struct ClaimQuery {
    pub insurer_id: Option<UserId>,
    pub adjuster_id: Option<UserId>,
    pub shop_id: Option<UserId>,
    pub client_id: Option<UserId>,
    pub status: Option<ClaimStatus>,
    /// When true, only claims with no adjuster assigned
    pub unassigned: bool,
}

impl ClaimQuery {
    /// Matches every claim
    pub fn all() -> Self {
        Self::default()
    }

    /// Claims filed by the given insurer
    pub fn by_insurer(id: UserId) -> Self {
        Self {
            insurer_id: Some(id),
            ..Self::default()
        }
    }

    /// Claims assigned to the given adjuster
    pub fn by_adjuster(id: UserId) -> Self {
        Self {
            adjuster_id: Some(id),
            ..Self::default()
        }
    }

    /// Claims assigned to the given shop
    pub fn by_shop(id: UserId) -> Self {
        Self {
            shop_id: Some(id),
            ..Self::default()
        }
    }

    /// Claims belonging to the given client
    pub fn by_client(id: UserId) -> Self {
        Self {
            client_id: Some(id),
            ..Self::default()
        }
    }

    /// The unassigned `INICIADO` pool visible to every adjuster
    pub fn available_pool() -> Self {
        Self {
            status: Some(ClaimStatus::Iniciado),
            unassigned: true,
            ..Self::default()
        }
    }

    /// Restricts the query to a status
    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Evaluates the filters against a claim; shared by adapters
    pub fn matches(&self, claim: &Claim) -> bool {
        if let Some(insurer_id) = self.insurer_id {
            if claim.insurer_id != insurer_id {
                return false;
            }
        }
        if let Some(adjuster_id) = self.adjuster_id {
            if claim.adjuster_id != Some(adjuster_id) {
                return false;
            }
        }
        if let Some(shop_id) = self.shop_id {
            if claim.shop_id != Some(shop_id) {
                return false;
            }
        }
        if let Some(client_id) = self.client_id {
            if claim.client_id != client_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if claim.status != status {
                return false;
            }
        }
        if self.unassigned && claim.adjuster_id.is_some() {
            return false;
        }
        true
    }
}

/// Persistent record store for claim documents
#[async_trait]
pub trait ClaimStore: DomainPort {
    /// Fetches a claim by id
    async fn get(&self, id: ClaimId) -> Result<Option<Claim>, PortError>;

    /// Inserts a freshly opened claim; conflicts if the id already exists
    async fn insert(&self, claim: Claim) -> Result<(), PortError>;

    /// Atomic conditional write
    ///
    /// Persists `updated` only if the stored claim still satisfies
    /// `expected`; otherwise fails with [`PortError::Conflict`] and leaves
    /// the record untouched. The check and the swap must be one atomic
    /// operation, never a separate read-then-write.
    async fn conditional_update(
        &self,
        id: ClaimId,
        expected: &ClaimExpectation,
        updated: Claim,
    ) -> Result<(), PortError>;

    /// Returns all claims matching the equality filters
    async fn query(&self, query: ClaimQuery) -> Result<Vec<Claim>, PortError>;
}

/// Resolved caller identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

/// Directory mapping users to their declared role
#[async_trait]
pub trait IdentityProvider: DomainPort {
    /// Resolves the caller's role by membership lookup across the per-role
    /// collections, first match wins in fixed precedence order
    /// (`super_usuario`, `aseguradora`, `taller`, `perito`, `cliente`).
    /// A user in none of them yields [`PortError::NotFound`]; the core
    /// rejects every action for such callers.
    async fn resolve(&self, user_id: UserId) -> Result<Identity, PortError>;
}

/// External append-only event log
#[async_trait]
pub trait EventLog: DomainPort {
    /// Appends one audit event; non-blocking with respect to claim
    /// persistence
    async fn append(&self, event: AuditEvent) -> Result<(), PortError>;
}
