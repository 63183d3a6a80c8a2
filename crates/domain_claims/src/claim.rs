//! Claim aggregate

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{BudgetId, ClaimId, UserId};

/// Claim status
///
/// Variants serialize to the platform's stored status strings
/// (`INICIADO`, `PERITAJE_ASIGNADO`, ...). The derived `Ord` follows the
/// forward workflow order, which callers rely on for the monotonic-progress
/// guarantee: accepted transitions never decrease the status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    /// Filed by the insurer, waiting for an adjuster to take it
    Iniciado,
    /// An adjuster took the case
    PeritajeAsignado,
    /// The adjuster filed the damage report
    InformeCompletado,
    /// A repair budget was requested from the shop
    PresupuestoPendiente,
    /// The insurer approved the shop's budget
    PresupuestoAprobado,
    /// Repair in progress at the shop
    EnReparacion,
    /// Repair finished, waiting for the insurer to close
    ReparacionFinalizada,
    /// Closed; terminal
    Cerrado,
}

impl ClaimStatus {
    /// Returns true when no further transition exists from this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Cerrado)
    }

    /// The stored wire name for this status
    pub fn wire_name(&self) -> &'static str {
        match self {
            ClaimStatus::Iniciado => "INICIADO",
            ClaimStatus::PeritajeAsignado => "PERITAJE_ASIGNADO",
            ClaimStatus::InformeCompletado => "INFORME_COMPLETADO",
            ClaimStatus::PresupuestoPendiente => "PRESUPUESTO_PENDIENTE",
            ClaimStatus::PresupuestoAprobado => "PRESUPUESTO_APROBADO",
            ClaimStatus::EnReparacion => "EN_REPARACION",
            ClaimStatus::ReparacionFinalizada => "REPARACION_FINALIZADA",
            ClaimStatus::Cerrado => "CERRADO",
        }
    }
}

/// Snapshot of the client's identity taken at filing time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Snapshot of the vehicle's identity, immutable after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub make: String,
    pub model: String,
    /// License plate, normalized to upper case at filing
    pub plate: String,
    pub year: i32,
}

/// Free-text report input with attachment references
///
/// Used both for the insurer's optional filing report and the adjuster's
/// damage report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportInput {
    pub details: String,
    /// Document or photo URLs backing the report
    pub attachments: Vec<String>,
}

/// Report attached once by the insurer at or after filing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurerReport {
    pub details: String,
    pub documents: Vec<String>,
    pub filed_at: DateTime<Utc>,
}

/// Damage report attached once by the assigned adjuster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjusterReport {
    pub details: String,
    pub photos: Vec<String>,
    pub filed_at: DateTime<Utc>,
}

/// Repair budget input submitted by the shop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetInput {
    pub amount: Decimal,
    pub detail: String,
}

/// Review state of a submitted repair budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Pendiente,
    Aprobado,
    Rechazado,
}

/// Repair budget attached to a claim by the assigned shop
///
/// A rejected budget stays attached, marked `Rechazado`, so the shop can
/// replace it with a fresh submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairBudget {
    pub id: BudgetId,
    pub shop_id: UserId,
    pub amount: Decimal,
    pub detail: String,
    pub status: BudgetStatus,
    pub submitted_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl RepairBudget {
    /// Creates a freshly submitted budget, pending review
    pub fn submitted(
        shop_id: UserId,
        input: BudgetInput,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: BudgetId::new_v7(),
            shop_id,
            amount: input.amount,
            detail: input.detail,
            status: BudgetStatus::Pendiente,
            submitted_at: now,
            decided_at: None,
        }
    }
}

/// Input for filing a new claim
///
/// Validated by [`crate::validation::ClaimValidator::validate_creation`]
/// before a [`Claim`] is built from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClaim {
    /// Existing client account, when the insured already has one; a fresh
    /// id is minted otherwise
    pub client_id: Option<UserId>,
    pub client: ClientInfo,
    pub vehicle: VehicleInfo,
    pub incident_date: NaiveDate,
    pub description: String,
    /// Optional insurer report attached at filing
    pub insurer_report: Option<ReportInput>,
}

/// A reported vehicle damage incident tracked end-to-end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier, immutable
    pub id: ClaimId,
    /// Single source of truth for workflow position
    pub status: ClaimStatus,
    /// Insurer that filed the claim
    pub insurer_id: UserId,
    /// Insured end-user tracking the claim
    pub client_id: UserId,
    /// Assigned adjuster; empty until self-assignment
    pub adjuster_id: Option<UserId>,
    /// Assigned repair shop; empty until a budget is requested
    pub shop_id: Option<UserId>,
    /// Client identity snapshot at filing time
    pub client: ClientInfo,
    /// Vehicle identity, immutable after creation
    pub vehicle: VehicleInfo,
    pub incident_date: NaiveDate,
    pub description: String,
    /// Attached once by the insurer; immutable once set
    pub insurer_report: Option<InsurerReport>,
    /// Attached once by the assigned adjuster
    pub adjuster_report: Option<AdjusterReport>,
    /// Current repair budget, if one has been submitted
    pub budget: Option<RepairBudget>,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every accepted transition
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Opens a new claim in `INICIADO` from validated filing input
    pub fn open(insurer_id: UserId, input: NewClaim, now: DateTime<Utc>) -> Self {
        let NewClaim {
            client_id,
            client,
            mut vehicle,
            incident_date,
            description,
            insurer_report,
        } = input;

        vehicle.plate = vehicle.plate.trim().to_uppercase();

        Self {
            id: ClaimId::new_v7(),
            status: ClaimStatus::Iniciado,
            insurer_id,
            client_id: client_id.unwrap_or_else(UserId::new_v7),
            adjuster_id: None,
            shop_id: None,
            client,
            vehicle,
            incident_date,
            description,
            insurer_report: insurer_report.map(|report| InsurerReport {
                details: report.details,
                documents: report.attachments,
                filed_at: now,
            }),
            adjuster_report: None,
            budget: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refreshes the update timestamp; called on every accepted transition
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
