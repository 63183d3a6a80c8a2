//! Tests for audit event drafting and the best-effort recorder

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Days, Utc};

use core_kernel::{DomainPort, PortError, UserId};
use domain_claims::{
    apply_action, Action, ActionPayload, ActionRequest, AuditEvent, AuditRecorder, Claim,
    ClientInfo, EventLog, NewClaim, Role, VehicleInfo,
};

fn open_claim() -> Claim {
    Claim::open(
        UserId::new_v7(),
        NewClaim {
            client_id: None,
            client: ClientInfo {
                first_name: "Lucía".to_string(),
                last_name: "Romero".to_string(),
                email: "lucia.romero@example.com".to_string(),
                phone: "+54911222333".to_string(),
            },
            vehicle: VehicleInfo {
                make: "Renault".to_string(),
                model: "Sandero".to_string(),
                plate: "AE901FK".to_string(),
                year: 2022,
            },
            incident_date: Utc::now().date_naive() - Days::new(1),
            description: "Parking lot scrape along the right rear panel".to_string(),
            insurer_report: None,
        },
        Utc::now(),
    )
}

/// Event log that records every append
#[derive(Default)]
struct CapturingLog {
    events: Mutex<Vec<AuditEvent>>,
}

impl DomainPort for CapturingLog {}

#[async_trait]
impl EventLog for CapturingLog {
    async fn append(&self, event: AuditEvent) -> Result<(), PortError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Event log that always fails
struct FailingLog;

impl DomainPort for FailingLog {}

#[async_trait]
impl EventLog for FailingLog {
    async fn append(&self, _event: AuditEvent) -> Result<(), PortError> {
        Err(PortError::connection("audit backend unreachable"))
    }
}

mod audit_event_tests {
    use super::*;

    #[test]
    fn test_transition_event_carries_actor_and_claim() {
        let claim = open_claim();
        let adjuster = UserId::new_v7();
        let now = Utc::now();

        let request = ActionRequest {
            claim_id: claim.id,
            acting_user_id: adjuster,
            role: Role::Perito,
            action: Action::SelfAssign,
            payload: ActionPayload::None,
        };

        let transition = apply_action(&claim, &request, now).unwrap();
        let event = transition.event;

        assert_eq!(event.actor_id, adjuster);
        assert_eq!(event.actor_role, Role::Perito);
        assert_eq!(event.action, Action::SelfAssign);
        assert_eq!(event.claim_id, claim.id);
        assert_eq!(event.timestamp, now);
        assert!(event.description.contains(&adjuster.to_string()));
        assert!(event.description.contains(&claim.id.to_string()));
    }

    #[test]
    fn test_event_ids_are_unique() {
        let claim = open_claim();
        let now = Utc::now();

        let a = AuditEvent::new(
            UserId::new_v7(),
            Role::Aseguradora,
            Action::CreateClaim,
            claim.id,
            "first",
            now,
        );
        let b = AuditEvent::new(
            UserId::new_v7(),
            Role::Aseguradora,
            Action::CreateClaim,
            claim.id,
            "second",
            now,
        );
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_event_roundtrips_through_json() {
        let event = AuditEvent::new(
            UserId::new_v7(),
            Role::Taller,
            Action::SubmitBudget,
            open_claim().id,
            "Shop submitted a repair budget",
            Utc::now(),
        );

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"submit_budget\""));
        assert!(json.contains("\"taller\""));

        let back: AuditEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, event.id);
        assert_eq!(back.action, event.action);
    }
}

mod recorder_tests {
    use super::*;

    fn sample_event() -> AuditEvent {
        AuditEvent::new(
            UserId::new_v7(),
            Role::Perito,
            Action::SelfAssign,
            open_claim().id,
            "Adjuster took the claim",
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_record_appends_to_the_log() {
        let log = Arc::new(CapturingLog::default());
        let recorder = AuditRecorder::new(log.clone());

        recorder.record(sample_event()).await;

        assert_eq!(log.events.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_append_failure_is_swallowed() {
        let recorder = AuditRecorder::new(Arc::new(FailingLog));

        // Must return normally; the failure is logged, not propagated
        recorder.record(sample_event()).await;
    }
}
