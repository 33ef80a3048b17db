//! Remaining peg allowance for one person.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::PegError;
use crate::model::result::count_as_score;
use crate::model::{PegEvent, QuotaState, Remaining, Role};

/// The quota rules in force for a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaPolicy {
    /// Valid pegs a metered person may give per cycle.
    pub limit: Option<i64>,
    /// Holders of this role are never metered.
    pub exempt_role: Role,
}

impl QuotaPolicy {
    #[must_use]
    pub const fn new(limit: Option<i64>) -> Self {
        Self {
            limit,
            exempt_role: Role::Unmetered,
        }
    }

    #[must_use]
    pub const fn with_exempt_role(mut self, role: Role) -> Self {
        self.exempt_role = role;
        self
    }
}

/// Number of valid pegs `person_id` sent. Penalties never consume quota.
#[must_use]
pub fn given_count(person_id: &str, person_events: &[PegEvent]) -> i64 {
    count_as_score(
        person_events
            .iter()
            .filter(|peg| peg.is_valid && peg.sender_id == person_id)
            .count(),
    )
}

/// Compute how many pegs `person_id` has left this cycle.
///
/// `person_events` may be the whole cycle snapshot or just the person's own
/// events; only valid pegs sent by `person_id` are counted. The result is not
/// clamped, so an over-given person reports a negative remainder.
///
/// # Errors
///
/// Returns [`PegError::MissingLimit`] when the person is metered and the
/// policy carries no limit.
pub fn compute_remaining(
    person_id: &str,
    person_events: &[PegEvent],
    roles: &BTreeSet<Role>,
    policy: &QuotaPolicy,
) -> Result<QuotaState, PegError> {
    let given = given_count(person_id, person_events);

    let remaining = if roles.contains(&policy.exempt_role) {
        Remaining::Unlimited
    } else {
        let limit = policy.limit.ok_or_else(|| PegError::MissingLimit {
            person_id: person_id.to_string(),
        })?;
        Remaining::Count(limit.saturating_sub(given))
    };

    Ok(QuotaState {
        remaining,
        given_count: given,
    })
}
