//! In-memory identity directory
//!
//! Mirrors the platform's per-role membership collections. Role resolution
//! walks the collections in a fixed precedence order and the first match
//! wins; a user present in none of them resolves to nothing, and the domain
//! rejects every action for such callers.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{DomainPort, PortError, UserId};
use domain_claims::{Identity, IdentityProvider, Role};

/// Membership collections, one per role
#[derive(Default)]
struct Collections {
    super_users: HashSet<UserId>,
    insurers: HashSet<UserId>,
    shops: HashSet<UserId>,
    adjusters: HashSet<UserId>,
    clients: HashSet<UserId>,
}

/// Identity directory backed by in-memory role collections
#[derive(Default)]
pub struct InMemoryDirectory {
    collections: Arc<RwLock<Collections>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user under a role collection
    pub async fn register(&self, user_id: UserId, role: Role) {
        let mut collections = self.collections.write().await;
        match role {
            Role::SuperUsuario => collections.super_users.insert(user_id),
            Role::Aseguradora => collections.insurers.insert(user_id),
            Role::Taller => collections.shops.insert(user_id),
            Role::Perito => collections.adjusters.insert(user_id),
            Role::Cliente => collections.clients.insert(user_id),
        };
    }
}

impl DomainPort for InMemoryDirectory {}

#[async_trait]
impl IdentityProvider for InMemoryDirectory {
    async fn resolve(&self, user_id: UserId) -> Result<Identity, PortError> {
        let collections = self.collections.read().await;

        // Fixed precedence: first matching collection wins
        let lookup: [(&HashSet<UserId>, Role); 5] = [
            (&collections.super_users, Role::SuperUsuario),
            (&collections.insurers, Role::Aseguradora),
            (&collections.shops, Role::Taller),
            (&collections.adjusters, Role::Perito),
            (&collections.clients, Role::Cliente),
        ];

        for (members, role) in lookup {
            if members.contains(&user_id) {
                return Ok(Identity { user_id, role });
            }
        }

        Err(PortError::not_found("Identity", user_id))
    }
}
