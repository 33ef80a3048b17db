//! Leaderboard ordering.
//!
//! Entries are ordered by weighted score, highest first. The sort is stable,
//! so equal scores keep the standings' iteration order (ascending person id).
//! Each entry's peg lists are also put into display order here: received pegs
//! by sender name, given penalties by receiver name.

use std::cmp::Ordering;

use crate::aggregate::Standings;
use crate::model::{PegEvent, PersonResult};

/// Display comparator for names: case-sensitive lexicographic order.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Put received pegs into display order (by sender name).
pub fn sort_by_sender(pegs: &mut [PegEvent]) {
    pegs.sort_by(|a, b| compare_names(&a.sender_name, &b.sender_name));
}

/// Put given penalties into display order (by receiver name).
pub fn sort_by_receiver(pegs: &mut [PegEvent]) {
    pegs.sort_by(|a, b| compare_names(&a.receiver_name, &b.receiver_name));
}

/// Build the full leaderboard from aggregated standings.
///
/// The input is left untouched; re-ranking the same standings always yields
/// the same sequence.
#[must_use]
pub fn rank(standings: &Standings) -> Vec<PersonResult> {
    let mut ranked: Vec<PersonResult> = standings
        .values()
        .cloned()
        .map(|mut result| {
            sort_by_sender(&mut result.valid_pegs_received);
            sort_by_receiver(&mut result.penalty_pegs_given);
            result
        })
        .collect();

    ranked.sort_by(|a, b| b.weighted_pegs_received.cmp(&a.weighted_pegs_received));
    ranked
}
