//! PERITAR Claims Domain
//!
//! This crate implements the claim ("siniestro") lifecycle from filing by
//! the insurer through inspection, repair budgeting, repair, and closure.
//!
//! # Claim Lifecycle
//!
//! ```text
//! INICIADO -> PERITAJE_ASIGNADO -> INFORME_COMPLETADO -> PRESUPUESTO_PENDIENTE
//!          -> PRESUPUESTO_APROBADO -> EN_REPARACION -> REPARACION_FINALIZADA -> CERRADO
//! ```
//!
//! The declarative rule table in [`rules`] is the single source of truth for
//! which role may trigger which transition; the pure engine in [`engine`]
//! applies it; [`service::ClaimService`] wires both to the persistence,
//! identity, and audit ports.

pub mod assignment;
pub mod audit;
pub mod claim;
pub mod engine;
pub mod error;
pub mod ports;
pub mod rules;
pub mod service;
pub mod validation;

pub use assignment::AssignmentResolver;
pub use audit::{AuditEvent, AuditRecorder};
pub use claim::{
    AdjusterReport, BudgetInput, BudgetStatus, Claim, ClaimStatus, ClientInfo, InsurerReport,
    NewClaim, RepairBudget, ReportInput, VehicleInfo,
};
pub use engine::{apply_action, ActionPayload, ActionRequest, ClaimExpectation, Transition};
pub use error::{ClaimError, PreconditionCode};
pub use ports::{ClaimQuery, ClaimStore, EventLog, Identity, IdentityProvider};
pub use rules::{rule_for, Action, ActorBinding, Precondition, Role, TransitionRule, RULES};
pub use service::ClaimService;
pub use validation::{ClaimValidator, ValidationResult};
