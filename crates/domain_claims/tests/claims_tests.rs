//! Tests for the claim entity model and input validation

use chrono::{Datelike, Days, Utc};
use rust_decimal_macros::dec;

use core_kernel::UserId;
use domain_claims::{
    BudgetInput, Claim, ClaimStatus, ClaimValidator, ClientInfo, NewClaim, ReportInput,
    VehicleInfo,
};

fn valid_input() -> NewClaim {
    NewClaim {
        client_id: None,
        client: ClientInfo {
            first_name: "Juan".to_string(),
            last_name: "Pérez".to_string(),
            email: "juan.perez@example.com".to_string(),
            phone: "+54911444555".to_string(),
        },
        vehicle: VehicleInfo {
            make: "Ford".to_string(),
            model: "Focus".to_string(),
            plate: "ab123cd".to_string(),
            year: 2018,
        },
        incident_date: Utc::now().date_naive() - Days::new(3),
        description: "Side collision while merging, left doors dented".to_string(),
        insurer_report: None,
    }
}

// ============================================================================
// Claim entity tests
// ============================================================================

mod claim_tests {
    use super::*;

    #[test]
    fn test_open_starts_in_iniciado() {
        let insurer = UserId::new_v7();
        let claim = Claim::open(insurer, valid_input(), Utc::now());

        assert_eq!(claim.status, ClaimStatus::Iniciado);
        assert_eq!(claim.insurer_id, insurer);
        assert!(claim.adjuster_id.is_none());
        assert!(claim.shop_id.is_none());
        assert!(claim.adjuster_report.is_none());
        assert!(claim.budget.is_none());
        assert_eq!(claim.created_at, claim.updated_at);
    }

    #[test]
    fn test_open_normalizes_plate() {
        let claim = Claim::open(UserId::new_v7(), valid_input(), Utc::now());
        assert_eq!(claim.vehicle.plate, "AB123CD");
    }

    #[test]
    fn test_open_mints_client_id_when_absent() {
        let claim = Claim::open(UserId::new_v7(), valid_input(), Utc::now());
        // A fresh id is generated for clients without an account
        assert_ne!(claim.client_id, claim.insurer_id);
    }

    #[test]
    fn test_open_keeps_existing_client_id() {
        let client_id = UserId::new_v7();
        let mut input = valid_input();
        input.client_id = Some(client_id);

        let claim = Claim::open(UserId::new_v7(), input, Utc::now());
        assert_eq!(claim.client_id, client_id);
    }

    #[test]
    fn test_open_attaches_insurer_report_when_provided() {
        let mut input = valid_input();
        input.insurer_report = Some(ReportInput {
            details: "Client reported the incident by phone the same evening.".to_string(),
            attachments: vec!["https://docs.example.com/denuncia.pdf".to_string()],
        });

        let claim = Claim::open(UserId::new_v7(), input, Utc::now());
        let report = claim.insurer_report.expect("report should be attached");
        assert_eq!(report.documents.len(), 1);
    }

    #[test]
    fn test_status_order_is_forward() {
        assert!(ClaimStatus::Iniciado < ClaimStatus::PeritajeAsignado);
        assert!(ClaimStatus::PeritajeAsignado < ClaimStatus::InformeCompletado);
        assert!(ClaimStatus::InformeCompletado < ClaimStatus::PresupuestoPendiente);
        assert!(ClaimStatus::PresupuestoPendiente < ClaimStatus::PresupuestoAprobado);
        assert!(ClaimStatus::PresupuestoAprobado < ClaimStatus::EnReparacion);
        assert!(ClaimStatus::EnReparacion < ClaimStatus::ReparacionFinalizada);
        assert!(ClaimStatus::ReparacionFinalizada < ClaimStatus::Cerrado);
    }

    #[test]
    fn test_only_cerrado_is_terminal() {
        assert!(ClaimStatus::Cerrado.is_terminal());
        assert!(!ClaimStatus::Iniciado.is_terminal());
        assert!(!ClaimStatus::ReparacionFinalizada.is_terminal());
    }

    #[test]
    fn test_status_serializes_to_wire_names() {
        for (status, wire) in [
            (ClaimStatus::Iniciado, "INICIADO"),
            (ClaimStatus::PeritajeAsignado, "PERITAJE_ASIGNADO"),
            (ClaimStatus::InformeCompletado, "INFORME_COMPLETADO"),
            (ClaimStatus::PresupuestoPendiente, "PRESUPUESTO_PENDIENTE"),
            (ClaimStatus::PresupuestoAprobado, "PRESUPUESTO_APROBADO"),
            (ClaimStatus::EnReparacion, "EN_REPARACION"),
            (ClaimStatus::ReparacionFinalizada, "REPARACION_FINALIZADA"),
            (ClaimStatus::Cerrado, "CERRADO"),
        ] {
            assert_eq!(status.wire_name(), wire);
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{wire}\"")
            );
            let back: ClaimStatus = serde_json::from_str(&format!("\"{wire}\"")).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_claim_roundtrips_through_json() {
        let claim = Claim::open(UserId::new_v7(), valid_input(), Utc::now());
        let json = serde_json::to_string(&claim).unwrap();
        let back: Claim = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, claim.id);
        assert_eq!(back.status, claim.status);
        assert_eq!(back.vehicle, claim.vehicle);
    }
}

// ============================================================================
// Creation validation tests
// ============================================================================

mod creation_validation_tests {
    use super::*;

    #[test]
    fn test_valid_input_passes() {
        let result = ClaimValidator::validate_creation(&valid_input(), Utc::now());
        assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
    }

    #[test]
    fn test_missing_client_name_fails() {
        let mut input = valid_input();
        input.client.first_name = " ".to_string();

        let result = ClaimValidator::validate_creation(&input, Utc::now());
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("first name")));
    }

    #[test]
    fn test_bad_email_fails() {
        let mut input = valid_input();
        input.client.email = "not-an-email".to_string();

        let result = ClaimValidator::validate_creation(&input, Utc::now());
        assert!(!result.is_valid);
    }

    #[test]
    fn test_short_phone_fails() {
        let mut input = valid_input();
        input.client.phone = "123".to_string();

        let result = ClaimValidator::validate_creation(&input, Utc::now());
        assert!(!result.is_valid);
    }

    #[test]
    fn test_malformed_plate_fails() {
        for plate in ["AB1", "ABCDEFGHIJK", "AB 123 CD", "AB-123"] {
            let mut input = valid_input();
            input.vehicle.plate = plate.to_string();

            let result = ClaimValidator::validate_creation(&input, Utc::now());
            assert!(!result.is_valid, "plate {plate:?} should be rejected");
        }
    }

    #[test]
    fn test_year_bounds() {
        let now = Utc::now();

        let mut too_old = valid_input();
        too_old.vehicle.year = 1949;
        assert!(!ClaimValidator::validate_creation(&too_old, now).is_valid);

        let mut lower_edge = valid_input();
        lower_edge.vehicle.year = 1950;
        assert!(ClaimValidator::validate_creation(&lower_edge, now).is_valid);

        let mut next_year = valid_input();
        next_year.vehicle.year = now.year() + 1;
        assert!(ClaimValidator::validate_creation(&next_year, now).is_valid);

        let mut too_new = valid_input();
        too_new.vehicle.year = now.year() + 2;
        assert!(!ClaimValidator::validate_creation(&too_new, now).is_valid);
    }

    #[test]
    fn test_future_incident_date_fails() {
        let mut input = valid_input();
        input.incident_date = Utc::now().date_naive() + Days::new(2);

        let result = ClaimValidator::validate_creation(&input, Utc::now());
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("future")));
    }

    #[test]
    fn test_old_incident_date_warns_but_passes() {
        let mut input = valid_input();
        input.incident_date = Utc::now().date_naive() - Days::new(800);

        let result = ClaimValidator::validate_creation(&input, Utc::now());
        assert!(result.is_valid);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_short_description_fails() {
        let mut input = valid_input();
        input.description = "crash".to_string();

        let result = ClaimValidator::validate_creation(&input, Utc::now());
        assert!(!result.is_valid);
    }

    #[test]
    fn test_invalid_insurer_report_fails_creation() {
        let mut input = valid_input();
        input.insurer_report = Some(ReportInput {
            details: "too short".to_string(),
            attachments: vec![],
        });

        let result = ClaimValidator::validate_creation(&input, Utc::now());
        assert!(!result.is_valid);
        assert!(result.errors.len() >= 2);
    }

    #[test]
    fn test_multiple_errors_accumulate() {
        let mut input = valid_input();
        input.client.first_name = String::new();
        input.vehicle.plate = "!!".to_string();
        input.description = "x".to_string();

        let result = ClaimValidator::validate_creation(&input, Utc::now());
        assert!(result.errors.len() >= 3);
    }
}

// ============================================================================
// Report and budget validation tests
// ============================================================================

mod attachment_validation_tests {
    use super::*;

    #[test]
    fn test_valid_report_passes() {
        let report = ReportInput {
            details: "Front axle bent, both left rims scraped, airbag not deployed.".to_string(),
            attachments: vec!["https://storage.example.com/p1.jpg".to_string()],
        };
        assert!(ClaimValidator::validate_report(&report).is_valid);
    }

    #[test]
    fn test_short_report_detail_fails() {
        let report = ReportInput {
            details: "minor damage".to_string(),
            attachments: vec!["https://storage.example.com/p1.jpg".to_string()],
        };
        assert!(!ClaimValidator::validate_report(&report).is_valid);
    }

    #[test]
    fn test_report_without_attachments_fails() {
        let report = ReportInput {
            details: "Front axle bent, both left rims scraped, airbag not deployed.".to_string(),
            attachments: vec![],
        };
        assert!(!ClaimValidator::validate_report(&report).is_valid);
    }

    #[test]
    fn test_report_with_only_blank_attachments_fails() {
        let report = ReportInput {
            details: "Front axle bent, both left rims scraped, airbag not deployed.".to_string(),
            attachments: vec!["  ".to_string()],
        };
        assert!(!ClaimValidator::validate_report(&report).is_valid);
    }

    #[test]
    fn test_valid_budget_passes() {
        let budget = BudgetInput {
            amount: dec!(120000),
            detail: "Replace front axle and both left rims".to_string(),
        };
        assert!(ClaimValidator::validate_budget(&budget).is_valid);
    }

    #[test]
    fn test_non_positive_budget_fails() {
        for amount in [dec!(0), dec!(-50)] {
            let budget = BudgetInput {
                amount,
                detail: "Replace front axle".to_string(),
            };
            assert!(!ClaimValidator::validate_budget(&budget).is_valid);
        }
    }

    #[test]
    fn test_budget_without_detail_fails() {
        let budget = BudgetInput {
            amount: dec!(120000),
            detail: "  ".to_string(),
        };
        assert!(!ClaimValidator::validate_budget(&budget).is_valid);
    }
}
