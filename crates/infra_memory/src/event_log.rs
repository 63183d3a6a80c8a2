//! In-memory append-only event log

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{DomainPort, PortError};
use domain_claims::{AuditEvent, EventLog};

/// Event log backed by an in-memory vector
#[derive(Default)]
pub struct InMemoryEventLog {
    events: Arc<RwLock<Vec<AuditEvent>>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, in append order
    pub async fn events(&self) -> Vec<AuditEvent> {
        self.events.read().await.clone()
    }

    /// Number of recorded events
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

impl DomainPort for InMemoryEventLog {}

#[async_trait]
impl EventLog for InMemoryEventLog {
    async fn append(&self, event: AuditEvent) -> Result<(), PortError> {
        self.events.write().await.push(event);
        Ok(())
    }
}
