//! Assignment and visibility policy
//!
//! One place answers "who can see which claim" and "who can take an
//! unassigned case". The service consults this resolver before rendering
//! any claim list and before permitting transitions, so role isolation is
//! enforced uniformly instead of per screen.

use core_kernel::UserId;

use crate::claim::{Claim, ClaimStatus};
use crate::ports::ClaimQuery;
use crate::rules::Role;

pub struct AssignmentResolver;

impl AssignmentResolver {
    /// True iff the claim is still in `INICIADO` with no adjuster, i.e. any
    /// adjuster may take it
    pub fn can_self_assign(claim: &Claim, _acting_user_id: UserId) -> bool {
        claim.adjuster_id.is_none() && claim.status == ClaimStatus::Iniciado
    }

    /// Whether a single claim is visible to the caller
    pub fn is_visible(claim: &Claim, role: Role, user_id: UserId) -> bool {
        match role {
            Role::Aseguradora => claim.insurer_id == user_id,
            // Assigned cases plus the unassigned pool every adjuster may browse
            Role::Perito => {
                claim.adjuster_id == Some(user_id)
                    || (claim.adjuster_id.is_none() && claim.status == ClaimStatus::Iniciado)
            }
            Role::Taller => claim.shop_id == Some(user_id),
            Role::Cliente => claim.client_id == user_id,
            Role::SuperUsuario => true,
        }
    }

    /// Lazy, restartable filter over an arbitrary claim sequence
    pub fn visible_claims<'a, I>(
        role: Role,
        user_id: UserId,
        claims: I,
    ) -> impl Iterator<Item = &'a Claim>
    where
        I: IntoIterator<Item = &'a Claim>,
    {
        claims
            .into_iter()
            .filter(move |claim| Self::is_visible(claim, role, user_id))
    }

    /// Store queries covering a role's visibility scope
    ///
    /// The adjuster scope needs two queries because the store only supports
    /// equality filters: assigned cases and the unassigned pool. The two are
    /// disjoint by construction.
    pub fn scope_queries(role: Role, user_id: UserId) -> Vec<ClaimQuery> {
        match role {
            Role::Aseguradora => vec![ClaimQuery::by_insurer(user_id)],
            Role::Perito => vec![
                ClaimQuery::by_adjuster(user_id),
                ClaimQuery::available_pool(),
            ],
            Role::Taller => vec![ClaimQuery::by_shop(user_id)],
            Role::Cliente => vec![ClaimQuery::by_client(user_id)],
            Role::SuperUsuario => vec![ClaimQuery::all()],
        }
    }
}
