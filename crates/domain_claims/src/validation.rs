//! Claim input validation rules
//!
//! Structurally invalid input is rejected here before it reaches the
//! workflow engine. Validation is pure and never mutates state.
//!
//! # Validation Rules
//!
//! ## Claim creation
//! - Client first and last name, email, and phone must be present
//! - Vehicle make and model must be present
//! - License plate must be 6-10 alphanumeric characters
//! - Vehicle year must fall in [1950, current year + 1]
//! - Incident date must not be in the future relative to filing
//! - Description must be reasonably descriptive
//!
//! ## Report attachment
//! - Detail text must meet a minimum length
//! - At least one document or photo reference must accompany it
//!
//! ## Repair budget
//! - Amount must be positive
//! - Detail must be present

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;

use crate::claim::{BudgetInput, NewClaim, ReportInput};
use crate::error::ClaimError;

const MIN_NAME_LEN: usize = 2;
const MIN_PHONE_LEN: usize = 8;
const MIN_DESCRIPTION_LEN: usize = 10;
const MIN_REPORT_DETAIL_LEN: usize = 20;
const PLATE_MIN_LEN: usize = 6;
const PLATE_MAX_LEN: usize = 10;
const MIN_VEHICLE_YEAR: i32 = 1950;

/// Result of claim input validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the input is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a failed validation result with errors
    pub fn fail(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Adds a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Merges another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Converts into a typed failure when invalid
    pub fn into_result(self) -> Result<(), ClaimError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(ClaimError::Validation {
                errors: self.errors,
            })
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for claim inputs
pub struct ClaimValidator;

impl ClaimValidator {
    /// Validates filing input for a new claim
    ///
    /// `now` anchors the year ceiling and the incident-date check to the
    /// filing moment.
    pub fn validate_creation(input: &NewClaim, now: DateTime<Utc>) -> ValidationResult {
        let mut result = ValidationResult::ok();

        Self::validate_client(input, &mut result);
        Self::validate_vehicle(input, now, &mut result);

        if input.incident_date > now.date_naive() {
            result.add_error("incident date cannot be in the future");
        }
        if now
            .date_naive()
            .signed_duration_since(input.incident_date)
            .num_days()
            > 365
        {
            result.add_warning("incident date is more than a year old");
        }

        if input.description.trim().chars().count() < MIN_DESCRIPTION_LEN {
            result.add_error("description is too short");
        }

        if let Some(ref report) = input.insurer_report {
            result.merge(Self::validate_report(report));
        }

        result
    }

    /// Validates a report attachment (insurer filing report or adjuster
    /// damage report)
    pub fn validate_report(report: &ReportInput) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if report.details.trim().chars().count() < MIN_REPORT_DETAIL_LEN {
            result.add_error("report details must be descriptive");
        }
        if !report.attachments.iter().any(|url| !url.trim().is_empty()) {
            result.add_error("report requires at least one attachment reference");
        }

        result
    }

    /// Validates a repair budget submission
    pub fn validate_budget(input: &BudgetInput) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if input.amount <= Decimal::ZERO {
            result.add_error("budget amount must be positive");
        }
        if input.detail.trim().is_empty() {
            result.add_error("budget detail is required");
        }

        result
    }

    fn validate_client(input: &NewClaim, result: &mut ValidationResult) {
        if input.client.first_name.trim().chars().count() < MIN_NAME_LEN {
            result.add_error("client first name is required");
        }
        if input.client.last_name.trim().chars().count() < MIN_NAME_LEN {
            result.add_error("client last name is required");
        }
        if !input.client.email.contains('@') || !input.client.email.contains('.') {
            result.add_error("client email is invalid");
        }
        if input.client.phone.trim().chars().count() < MIN_PHONE_LEN {
            result.add_error("client phone is invalid");
        }
    }

    fn validate_vehicle(input: &NewClaim, now: DateTime<Utc>, result: &mut ValidationResult) {
        if input.vehicle.make.trim().chars().count() < MIN_NAME_LEN {
            result.add_error("vehicle make is required");
        }
        if input.vehicle.model.trim().chars().count() < MIN_NAME_LEN {
            result.add_error("vehicle model is required");
        }

        let plate = input.vehicle.plate.trim();
        let plate_len = plate.chars().count();
        if plate_len < PLATE_MIN_LEN
            || plate_len > PLATE_MAX_LEN
            || !plate.chars().all(|c| c.is_ascii_alphanumeric())
        {
            result.add_error("vehicle plate is malformed");
        }

        let max_year = now.year() + 1;
        if input.vehicle.year < MIN_VEHICLE_YEAR || input.vehicle.year > max_year {
            result.add_error("vehicle year is out of range");
        }
    }
}
