//! In-memory claim store with conditional-write semantics

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{ClaimId, DomainPort, PortError};
use domain_claims::{Claim, ClaimExpectation, ClaimQuery, ClaimStore};

/// Claim store backed by a `HashMap` behind a single `RwLock`
///
/// `conditional_update` evaluates the expectation and swaps the record while
/// holding the write lock, which is what makes the self-assignment race safe:
/// the losing writer finds the expectation already violated and gets a
/// `Conflict` without touching the record.
#[derive(Default)]
pub struct InMemoryClaimStore {
    claims: Arc<RwLock<HashMap<ClaimId, Claim>>>,
}

impl InMemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store for tests
    pub async fn with_claims(claims: Vec<Claim>) -> Self {
        let store = Self::new();
        {
            let mut guard = store.claims.write().await;
            for claim in claims {
                guard.insert(claim.id, claim);
            }
        }
        store
    }

    /// Number of stored claims
    pub async fn len(&self) -> usize {
        self.claims.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.claims.read().await.is_empty()
    }
}

fn expectation_holds(claim: &Claim, expected: &ClaimExpectation) -> bool {
    if claim.status != expected.status {
        return false;
    }
    if let Some(adjuster_id) = expected.adjuster_id {
        if claim.adjuster_id != adjuster_id {
            return false;
        }
    }
    if let Some(shop_id) = expected.shop_id {
        if claim.shop_id != shop_id {
            return false;
        }
    }
    true
}

impl DomainPort for InMemoryClaimStore {}

#[async_trait]
impl ClaimStore for InMemoryClaimStore {
    async fn get(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
        Ok(self.claims.read().await.get(&id).cloned())
    }

    async fn insert(&self, claim: Claim) -> Result<(), PortError> {
        let mut claims = self.claims.write().await;
        if claims.contains_key(&claim.id) {
            return Err(PortError::conflict(format!(
                "claim {} already exists",
                claim.id
            )));
        }
        claims.insert(claim.id, claim);
        Ok(())
    }

    async fn conditional_update(
        &self,
        id: ClaimId,
        expected: &ClaimExpectation,
        updated: Claim,
    ) -> Result<(), PortError> {
        let mut claims = self.claims.write().await;
        let current = claims
            .get(&id)
            .ok_or_else(|| PortError::not_found("Claim", id))?;

        if !expectation_holds(current, expected) {
            return Err(PortError::conflict(format!(
                "claim {} no longer satisfies the expected state",
                id
            )));
        }

        claims.insert(id, updated);
        Ok(())
    }

    async fn query(&self, query: ClaimQuery) -> Result<Vec<Claim>, PortError> {
        let claims = self.claims.read().await;
        Ok(claims
            .values()
            .filter(|claim| query.matches(claim))
            .cloned()
            .collect())
    }
}
