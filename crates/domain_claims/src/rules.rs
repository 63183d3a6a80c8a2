//! Transition rule table
//!
//! The single source of truth for which role may move a claim from which
//! status with which action. Every screen in the surrounding application
//! consults this table through the workflow engine instead of keeping its
//! own status checks.

use serde::{Deserialize, Serialize};

use crate::claim::ClaimStatus;

/// Platform roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Insurer: originates claims and approves budgets
    Aseguradora,
    /// Adjuster: inspects the vehicle and files the damage report
    Perito,
    /// Repair shop: quotes and performs the repair
    Taller,
    /// Insured end-user tracking their own claim
    Cliente,
    /// Platform administrator with unrestricted visibility
    SuperUsuario,
}

impl Role {
    /// The stored wire name for this role
    pub fn wire_name(&self) -> &'static str {
        match self {
            Role::Aseguradora => "aseguradora",
            Role::Perito => "perito",
            Role::Taller => "taller",
            Role::Cliente => "cliente",
            Role::SuperUsuario => "super_usuario",
        }
    }
}

/// Workflow actions
///
/// `CreateClaim` is deliberately absent from the rule table: filing is not a
/// transition, it is the service operation that brings a claim into
/// `INICIADO`. It appears here so audit events can name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    CreateClaim,
    SelfAssign,
    SubmitReport,
    RequestBudget,
    SubmitBudget,
    ApproveBudget,
    RejectBudget,
    StartRepair,
    FinishRepair,
    Close,
}

impl Action {
    /// The stored wire name for this action
    pub fn wire_name(&self) -> &'static str {
        match self {
            Action::CreateClaim => "create_claim",
            Action::SelfAssign => "self_assign",
            Action::SubmitReport => "submit_report",
            Action::RequestBudget => "request_budget",
            Action::SubmitBudget => "submit_budget",
            Action::ApproveBudget => "approve_budget",
            Action::RejectBudget => "reject_budget",
            Action::StartRepair => "start_repair",
            Action::FinishRepair => "finish_repair",
            Action::Close => "close",
        }
    }
}

/// Identity constraint tying a rule to the claim's current assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorBinding {
    /// Any member of the rule's role may act
    Any,
    /// The acting user must be the assigned adjuster
    AssignedAdjuster,
    /// The acting user must be the assigned shop
    AssignedShop,
}

/// Business precondition evaluated against the claim and the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    None,
    /// No adjuster may be assigned yet
    AdjusterUnassigned,
    /// A shop must be assigned, either already on the claim or by the payload
    ShopAssigned,
    /// A repair budget must have been submitted
    BudgetSubmitted,
}

/// One entry of the declarative transition table
#[derive(Debug, Clone, Copy)]
pub struct TransitionRule {
    pub from: ClaimStatus,
    pub action: Action,
    pub role: Role,
    pub binding: ActorBinding,
    pub to: ClaimStatus,
    pub precondition: Precondition,
}

/// The complete transition table, in forward workflow order
///
/// `submit_budget` and `reject_budget` are self-loops on
/// `PRESUPUESTO_PENDIENTE`: neither moves the claim backward, and a rejected
/// budget is replaced by a fresh shop submission.
pub const RULES: &[TransitionRule] = &[
    TransitionRule {
        from: ClaimStatus::Iniciado,
        action: Action::SelfAssign,
        role: Role::Perito,
        binding: ActorBinding::Any,
        to: ClaimStatus::PeritajeAsignado,
        precondition: Precondition::AdjusterUnassigned,
    },
    TransitionRule {
        from: ClaimStatus::PeritajeAsignado,
        action: Action::SubmitReport,
        role: Role::Perito,
        binding: ActorBinding::AssignedAdjuster,
        to: ClaimStatus::InformeCompletado,
        precondition: Precondition::None,
    },
    TransitionRule {
        from: ClaimStatus::InformeCompletado,
        action: Action::RequestBudget,
        role: Role::Aseguradora,
        binding: ActorBinding::Any,
        to: ClaimStatus::PresupuestoPendiente,
        precondition: Precondition::ShopAssigned,
    },
    TransitionRule {
        from: ClaimStatus::PresupuestoPendiente,
        action: Action::SubmitBudget,
        role: Role::Taller,
        binding: ActorBinding::AssignedShop,
        to: ClaimStatus::PresupuestoPendiente,
        precondition: Precondition::None,
    },
    TransitionRule {
        from: ClaimStatus::PresupuestoPendiente,
        action: Action::ApproveBudget,
        role: Role::Aseguradora,
        binding: ActorBinding::Any,
        to: ClaimStatus::PresupuestoAprobado,
        precondition: Precondition::BudgetSubmitted,
    },
    TransitionRule {
        from: ClaimStatus::PresupuestoPendiente,
        action: Action::RejectBudget,
        role: Role::Aseguradora,
        binding: ActorBinding::Any,
        to: ClaimStatus::PresupuestoPendiente,
        precondition: Precondition::BudgetSubmitted,
    },
    TransitionRule {
        from: ClaimStatus::PresupuestoAprobado,
        action: Action::StartRepair,
        role: Role::Taller,
        binding: ActorBinding::AssignedShop,
        to: ClaimStatus::EnReparacion,
        precondition: Precondition::None,
    },
    TransitionRule {
        from: ClaimStatus::EnReparacion,
        action: Action::FinishRepair,
        role: Role::Taller,
        binding: ActorBinding::AssignedShop,
        to: ClaimStatus::ReparacionFinalizada,
        precondition: Precondition::None,
    },
    TransitionRule {
        from: ClaimStatus::ReparacionFinalizada,
        action: Action::Close,
        role: Role::Aseguradora,
        binding: ActorBinding::Any,
        to: ClaimStatus::Cerrado,
        precondition: Precondition::None,
    },
];

/// Looks up the rule for an action from a status, if one exists
pub fn rule_for(status: ClaimStatus, action: Action) -> Option<&'static TransitionRule> {
    RULES
        .iter()
        .find(|rule| rule.from == status && rule.action == action)
}
