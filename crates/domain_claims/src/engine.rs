//! Workflow engine
//!
//! Validates a requested transition against the rule table and the current
//! claim state, and applies it. [`apply_action`] is pure: given the same
//! claim, request, and clock instant it always produces the same outcome,
//! and it touches no external state. Persistence and audit recording are the
//! caller's job, guided by the returned [`ClaimExpectation`] and audit-event
//! draft.

use chrono::{DateTime, Utc};

use core_kernel::{ClaimId, UserId};

use crate::audit::AuditEvent;
use crate::claim::{
    AdjusterReport, BudgetInput, BudgetStatus, Claim, ClaimStatus, RepairBudget, ReportInput,
};
use crate::error::{ClaimError, PreconditionCode};
use crate::rules::{rule_for, Action, ActorBinding, Precondition, Role, TransitionRule};
use crate::validation::ClaimValidator;

/// An action request submitted by a role-specific screen
///
/// The role is resolved once from the identity directory and threaded
/// explicitly; it is never inferred from navigation state.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    pub claim_id: ClaimId,
    pub acting_user_id: UserId,
    pub role: Role,
    pub action: Action,
    pub payload: ActionPayload,
}

/// Per-action payload merged into the claim on acceptance
#[derive(Debug, Clone, Default)]
pub enum ActionPayload {
    #[default]
    None,
    /// Damage report for `submit_report`
    Report(ReportInput),
    /// Shop chosen by the insurer for `request_budget`
    ShopAssignment { shop_id: UserId },
    /// Repair quote for `submit_budget`
    Budget(BudgetInput),
}

/// Expected field values the store must verify atomically when persisting
///
/// The conditional write is keyed on the fields the accepted rule depended
/// on, so a racing writer loses with a conflict instead of silently
/// overwriting (the self-assignment race in particular).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimExpectation {
    /// Status the stored claim must still have
    pub status: ClaimStatus,
    /// When present, the stored adjuster assignment must equal this value
    pub adjuster_id: Option<Option<UserId>>,
    /// When present, the stored shop assignment must equal this value
    pub shop_id: Option<Option<UserId>>,
}

/// Outcome of an accepted transition
#[derive(Debug, Clone)]
pub struct Transition {
    /// The updated claim to persist
    pub claim: Claim,
    /// Audit-event draft for the recorder
    pub event: AuditEvent,
    /// Condition the persistence layer must enforce atomically
    pub expected: ClaimExpectation,
}

/// Validates and applies one workflow action to a claim
pub fn apply_action(
    claim: &Claim,
    request: &ActionRequest,
    now: DateTime<Utc>,
) -> Result<Transition, ClaimError> {
    let rule = rule_for(claim.status, request.action).ok_or(ClaimError::InvalidTransition {
        status: claim.status,
        action: request.action,
    })?;

    check_actor(claim, request, rule)?;
    check_precondition(claim, request, rule)?;

    let expected = expectation_for(claim, rule);

    let mut updated = claim.clone();
    merge_payload(&mut updated, request, now)?;
    updated.status = rule.to;
    updated.touch(now);

    let event = AuditEvent::for_transition(&updated, request, now);

    Ok(Transition {
        claim: updated,
        event,
        expected,
    })
}

fn check_actor(
    claim: &Claim,
    request: &ActionRequest,
    rule: &TransitionRule,
) -> Result<(), ClaimError> {
    if request.role != rule.role {
        return Err(ClaimError::unauthorized(format!(
            "role {} may not perform {}",
            request.role.wire_name(),
            request.action.wire_name()
        )));
    }

    match rule.binding {
        ActorBinding::Any => Ok(()),
        ActorBinding::AssignedAdjuster => {
            if claim.adjuster_id == Some(request.acting_user_id) {
                Ok(())
            } else {
                Err(ClaimError::unauthorized(
                    "only the assigned adjuster may act on this claim",
                ))
            }
        }
        ActorBinding::AssignedShop => {
            if claim.shop_id == Some(request.acting_user_id) {
                Ok(())
            } else {
                Err(ClaimError::unauthorized(
                    "only the assigned shop may act on this claim",
                ))
            }
        }
    }
}

fn check_precondition(
    claim: &Claim,
    request: &ActionRequest,
    rule: &TransitionRule,
) -> Result<(), ClaimError> {
    match rule.precondition {
        Precondition::None => Ok(()),
        Precondition::AdjusterUnassigned => {
            if claim.adjuster_id.is_none() {
                Ok(())
            } else {
                Err(ClaimError::precondition(
                    PreconditionCode::AdjusterAlreadyAssigned,
                ))
            }
        }
        Precondition::ShopAssigned => {
            let assigned = claim.shop_id.is_some()
                || matches!(request.payload, ActionPayload::ShopAssignment { .. });
            if assigned {
                Ok(())
            } else {
                Err(ClaimError::precondition(PreconditionCode::ShopNotAssigned))
            }
        }
        Precondition::BudgetSubmitted => {
            if claim.budget.is_some() {
                Ok(())
            } else {
                Err(ClaimError::precondition(PreconditionCode::BudgetMissing))
            }
        }
    }
}

fn expectation_for(claim: &Claim, rule: &TransitionRule) -> ClaimExpectation {
    ClaimExpectation {
        status: claim.status,
        adjuster_id: match rule.precondition {
            Precondition::AdjusterUnassigned => Some(None),
            _ => None,
        },
        shop_id: match rule.binding {
            ActorBinding::AssignedShop => Some(claim.shop_id),
            _ => None,
        },
    }
}

fn merge_payload(
    claim: &mut Claim,
    request: &ActionRequest,
    now: DateTime<Utc>,
) -> Result<(), ClaimError> {
    match request.action {
        Action::SelfAssign => {
            claim.adjuster_id = Some(request.acting_user_id);
        }
        Action::SubmitReport => {
            let ActionPayload::Report(ref report) = request.payload else {
                return Err(ClaimError::validation("submit_report requires a report payload"));
            };
            ClaimValidator::validate_report(report).into_result()?;
            claim.adjuster_report = Some(AdjusterReport {
                details: report.details.clone(),
                photos: report.attachments.clone(),
                filed_at: now,
            });
        }
        Action::RequestBudget => {
            if claim.shop_id.is_none() {
                let ActionPayload::ShopAssignment { shop_id } = request.payload else {
                    // check_precondition already required one of the two
                    return Err(ClaimError::precondition(PreconditionCode::ShopNotAssigned));
                };
                claim.shop_id = Some(shop_id);
            }
        }
        Action::SubmitBudget => {
            let ActionPayload::Budget(ref input) = request.payload else {
                return Err(ClaimError::validation("submit_budget requires a budget payload"));
            };
            ClaimValidator::validate_budget(input).into_result()?;
            claim.budget = Some(RepairBudget::submitted(
                request.acting_user_id,
                input.clone(),
                now,
            ));
        }
        Action::ApproveBudget | Action::RejectBudget => {
            // BudgetSubmitted precondition guarantees presence
            if let Some(ref mut budget) = claim.budget {
                budget.status = if request.action == Action::ApproveBudget {
                    BudgetStatus::Aprobado
                } else {
                    BudgetStatus::Rechazado
                };
                budget.decided_at = Some(now);
            }
        }
        Action::StartRepair | Action::FinishRepair | Action::Close => {}
        Action::CreateClaim => {
            // Unreachable through the rule table; filing goes through the
            // service, not the engine.
        }
    }

    Ok(())
}
