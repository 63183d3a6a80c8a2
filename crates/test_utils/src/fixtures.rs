//! Pre-built valid test inputs

use chrono::{Days, NaiveDate, Utc};
use rust_decimal_macros::dec;

use domain_claims::{BudgetInput, ClientInfo, NewClaim, ReportInput, VehicleInfo};

/// A valid client snapshot
pub fn client_info() -> ClientInfo {
    ClientInfo {
        first_name: "María".to_string(),
        last_name: "García".to_string(),
        email: "maria.garcia@example.com".to_string(),
        phone: "+54911555123".to_string(),
    }
}

/// A valid vehicle snapshot
pub fn vehicle_info() -> VehicleInfo {
    VehicleInfo {
        make: "Toyota".to_string(),
        model: "Corolla".to_string(),
        plate: "AB123CD".to_string(),
        year: 2019,
    }
}

/// An incident date a few days in the past
pub fn recent_incident_date() -> NaiveDate {
    Utc::now().date_naive() - Days::new(5)
}

/// Valid filing input without an insurer report
pub fn new_claim() -> NewClaim {
    NewClaim {
        client_id: None,
        client: client_info(),
        vehicle: vehicle_info(),
        incident_date: recent_incident_date(),
        description: "Rear-end collision at a traffic light, bumper and trunk damage".to_string(),
        insurer_report: None,
    }
}

/// A valid report payload with one attachment
pub fn report_input() -> ReportInput {
    ReportInput {
        details: "Deformed rear bumper, cracked tail light, trunk lid misaligned.".to_string(),
        attachments: vec!["https://storage.example.com/photos/rear-1.jpg".to_string()],
    }
}

/// A valid repair budget payload
pub fn budget_input() -> BudgetInput {
    BudgetInput {
        amount: dec!(185000),
        detail: "Replace rear bumper and tail light, realign trunk lid, paint.".to_string(),
    }
}
