//! Report assembly for the engine's call sites.
//!
//! - [`close_out`]: the end-of-cycle leaderboard with winners, losers,
//!   penalty and category sections.
//! - [`status`]: one person's allowance and peg slices.
//!
//! Both aggregate the snapshot exactly once and return either a complete
//! report or an error, never a partial one.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::aggregate::aggregate;
use crate::award::{AwardPolicy, split_winners};
use crate::category::{CategorySection, project_all};
use crate::error::PegError;
use crate::model::{PegEvent, PersonResult, QuotaState, Role};
use crate::quota::{QuotaPolicy, compute_remaining};
use crate::rank::rank;

/// Event counts for a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventTotals {
    pub total: usize,
    pub valid: usize,
    pub penalties: usize,
}

impl EventTotals {
    #[must_use]
    pub fn of(events: &[PegEvent]) -> Self {
        let valid = events.iter().filter(|peg| peg.is_valid).count();
        Self {
            total: events.len(),
            valid,
            penalties: events.len() - valid,
        }
    }
}

/// Everything the cycle close-out renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub totals: EventTotals,
    pub leaderboard: Vec<PersonResult>,
    /// Leaderboard entries that won under the [`AwardPolicy`].
    pub winners: Vec<PersonResult>,
    /// Remaining leaderboard entries, in leaderboard order.
    pub losers: Vec<PersonResult>,
    /// Leaderboard entries that gave at least one penalty, in leaderboard order.
    pub penalties: Vec<PersonResult>,
    pub categories: Vec<CategorySection>,
}

/// Build the close-out report for a cycle snapshot.
///
/// `categories` is the configured label list; each label gets a section even
/// when nobody received a peg in it. `award` splits the leaderboard into
/// winners and losers.
///
/// # Errors
///
/// Propagates [`PegError::MissingField`] from aggregation.
#[instrument(skip_all, fields(events = events.len(), categories = categories.len()))]
pub fn close_out<S: AsRef<str>>(
    events: &[PegEvent],
    categories: &[S],
    award: &AwardPolicy,
) -> Result<CycleReport, PegError> {
    let standings = aggregate(events)?;
    let leaderboard = rank(&standings);
    let (winners, losers) = split_winners(&leaderboard, award);
    let penalties = leaderboard
        .iter()
        .filter(|result| !result.penalty_pegs_given.is_empty())
        .cloned()
        .collect();
    let categories = project_all(&standings, categories);

    debug!(
        people = leaderboard.len(),
        winners = winners.len(),
        "cycle report assembled"
    );
    Ok(CycleReport {
        totals: EventTotals::of(events),
        leaderboard,
        winners,
        losers,
        penalties,
        categories,
    })
}

/// One person's view of the current cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub person_id: String,
    pub quota: QuotaState,
    /// Valid pegs this person sent, in snapshot order.
    pub pegs_given: Vec<PegEvent>,
    pub valid_pegs_received: Vec<PegEvent>,
    pub penalty_pegs_given: Vec<PegEvent>,
}

/// Build the status answer for `person_id`.
///
/// `events` can be the full cycle snapshot or any subset that contains the
/// person's own pegs.
///
/// # Errors
///
/// Propagates [`PegError::MissingField`] from aggregation and
/// [`PegError::MissingLimit`] from the quota calculation.
#[instrument(skip_all, fields(person = person_id, events = events.len()))]
pub fn status(
    person_id: &str,
    events: &[PegEvent],
    roles: &BTreeSet<Role>,
    policy: &QuotaPolicy,
) -> Result<StatusReport, PegError> {
    let standings = aggregate(events)?;
    let quota = compute_remaining(person_id, events, roles, policy)?;

    let pegs_given = events
        .iter()
        .filter(|peg| peg.is_valid && peg.sender_id == person_id)
        .cloned()
        .collect();

    let (valid_pegs_received, penalty_pegs_given) = rank(&standings)
        .into_iter()
        .find(|result| result.person_id == person_id)
        .map(|result| (result.valid_pegs_received, result.penalty_pegs_given))
        .unwrap_or_default();

    debug!(remaining = %quota.remaining, "status assembled");
    Ok(StatusReport {
        person_id: person_id.to_string(),
        quota,
        pegs_given,
        valid_pegs_received,
        penalty_pegs_given,
    })
}
