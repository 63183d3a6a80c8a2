//! Test Data Builders
//!
//! Builder patterns for constructing claims at any workflow stage with
//! sensible defaults. Tests specify only the fields they care about.

use chrono::{DateTime, Utc};

use core_kernel::{ClaimId, UserId};
use domain_claims::{
    AdjusterReport, BudgetStatus, Claim, ClaimStatus, InsurerReport, RepairBudget, ReportInput,
};

use crate::fixtures;

/// Builder for constructing test claims
pub struct ClaimBuilder {
    claim: Claim,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// Creates a builder holding a freshly filed `INICIADO` claim
    pub fn new() -> Self {
        let claim = Claim::open(UserId::new_v7(), fixtures::new_claim(), Utc::now());
        Self { claim }
    }

    /// Sets the claim id
    pub fn with_id(mut self, id: ClaimId) -> Self {
        self.claim.id = id;
        self
    }

    /// Sets the status
    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.claim.status = status;
        self
    }

    /// Sets the filing insurer
    pub fn with_insurer(mut self, insurer_id: UserId) -> Self {
        self.claim.insurer_id = insurer_id;
        self
    }

    /// Sets the client owner
    pub fn with_client(mut self, client_id: UserId) -> Self {
        self.claim.client_id = client_id;
        self
    }

    /// Assigns an adjuster
    pub fn with_adjuster(mut self, adjuster_id: UserId) -> Self {
        self.claim.adjuster_id = Some(adjuster_id);
        self
    }

    /// Assigns a repair shop
    pub fn with_shop(mut self, shop_id: UserId) -> Self {
        self.claim.shop_id = Some(shop_id);
        self
    }

    /// Attaches an insurer report built from the given input
    pub fn with_insurer_report(mut self, report: ReportInput) -> Self {
        self.claim.insurer_report = Some(InsurerReport {
            details: report.details,
            documents: report.attachments,
            filed_at: Utc::now(),
        });
        self
    }

    /// Attaches an adjuster report built from the given input
    pub fn with_adjuster_report(mut self, report: ReportInput) -> Self {
        self.claim.adjuster_report = Some(AdjusterReport {
            details: report.details,
            photos: report.attachments,
            filed_at: Utc::now(),
        });
        self
    }

    /// Attaches a pending repair budget from the assigned shop
    ///
    /// Assigns the shop first when none is set.
    pub fn with_pending_budget(mut self) -> Self {
        let shop_id = self.claim.shop_id.unwrap_or_else(UserId::new_v7);
        self.claim.shop_id = Some(shop_id);
        self.claim.budget = Some(RepairBudget::submitted(
            shop_id,
            fixtures::budget_input(),
            Utc::now(),
        ));
        self
    }

    /// Marks the attached budget with the given review status
    pub fn with_budget_status(mut self, status: BudgetStatus) -> Self {
        if let Some(ref mut budget) = self.claim.budget {
            budget.status = status;
            budget.decided_at = Some(Utc::now());
        }
        self
    }

    /// Sets the creation timestamp
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.claim.created_at = created_at;
        self
    }

    /// Builds the claim
    pub fn build(self) -> Claim {
        self.claim
    }
}

/// Shorthand for a claim sitting in `PERITAJE_ASIGNADO` with the given
/// adjuster
pub fn assigned_claim(adjuster_id: UserId) -> Claim {
    ClaimBuilder::new()
        .with_status(ClaimStatus::PeritajeAsignado)
        .with_adjuster(adjuster_id)
        .build()
}

/// Shorthand for a claim awaiting a budget from the given shop
pub fn budget_pending_claim(shop_id: UserId) -> Claim {
    ClaimBuilder::new()
        .with_status(ClaimStatus::PresupuestoPendiente)
        .with_adjuster(UserId::new_v7())
        .with_adjuster_report(fixtures::report_input())
        .with_shop(shop_id)
        .build()
}
