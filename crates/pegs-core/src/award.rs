//! Winners and losers of a closed cycle.
//!
//! People whose weighted score reaches `minimum` qualify. The first `winners`
//! qualifying entries of the leaderboard win, plus anyone tied with the last
//! of them. Everyone else on the leaderboard is a loser, in leaderboard order.

use serde::{Deserialize, Serialize};

use crate::model::PersonResult;

/// Award rules for a cycle close-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardPolicy {
    /// Lowest weighted score that can still win.
    pub minimum: i64,
    /// Number of winning places; `None` means every qualifier wins.
    pub winners: Option<usize>,
}

impl AwardPolicy {
    #[must_use]
    pub const fn new(minimum: i64, winners: Option<usize>) -> Self {
        Self { minimum, winners }
    }
}

/// Split a ranked leaderboard into `(winners, losers)`.
///
/// `leaderboard` must already be in [`rank`](crate::rank::rank) order.
#[must_use]
pub fn split_winners(
    leaderboard: &[PersonResult],
    policy: &AwardPolicy,
) -> (Vec<PersonResult>, Vec<PersonResult>) {
    let qualifying = leaderboard
        .iter()
        .take_while(|result| result.weighted_pegs_received >= policy.minimum)
        .count();

    let cut = match policy.winners {
        Some(0) => 0,
        Some(places) if places < qualifying => {
            let last = leaderboard[places - 1].weighted_pegs_received;
            places
                + leaderboard[places..qualifying]
                    .iter()
                    .take_while(|result| result.weighted_pegs_received == last)
                    .count()
        }
        _ => qualifying,
    };

    let (winners, losers) = leaderboard.split_at(cut);
    (winners.to_vec(), losers.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::model::PegEvent;
    use crate::rank::rank;

    fn peg(sender: &str, receiver: &str, is_valid: bool) -> PegEvent {
        PegEvent {
            sender_id: sender.into(),
            sender_name: sender.to_uppercase(),
            receiver_id: receiver.into(),
            receiver_name: receiver.to_uppercase(),
            comment: String::new(),
            categories: std::collections::BTreeSet::new(),
            is_valid,
        }
    }

    /// Scores: a 3, b 2, c 2, d 1, e -1.
    fn leaderboard() -> Vec<PersonResult> {
        let mut events = Vec::new();
        events.extend(std::iter::repeat_with(|| peg("x", "a", true)).take(3));
        events.extend(std::iter::repeat_with(|| peg("x", "b", true)).take(2));
        events.extend(std::iter::repeat_with(|| peg("x", "c", true)).take(2));
        events.push(peg("x", "d", true));
        events.push(peg("e", "sink", false));
        rank(&aggregate(&events).unwrap())
    }

    fn ids(results: &[PersonResult]) -> Vec<&str> {
        results.iter().map(|r| r.person_id.as_str()).collect()
    }

    #[test]
    fn default_policy_makes_every_non_negative_score_a_winner() {
        let (winners, losers) = split_winners(&leaderboard(), &AwardPolicy::default());
        assert_eq!(ids(&winners), ["a", "b", "c", "d"]);
        assert_eq!(ids(&losers), ["e"]);
    }

    #[test]
    fn minimum_excludes_low_scores() {
        let (winners, losers) = split_winners(&leaderboard(), &AwardPolicy::new(2, None));
        assert_eq!(ids(&winners), ["a", "b", "c"]);
        assert_eq!(ids(&losers), ["d", "e"]);
    }

    #[test]
    fn places_extend_to_include_ties() {
        let (winners, losers) = split_winners(&leaderboard(), &AwardPolicy::new(0, Some(2)));
        assert_eq!(ids(&winners), ["a", "b", "c"]);
        assert_eq!(ids(&losers), ["d", "e"]);
    }

    #[test]
    fn places_without_tie_cut_exactly() {
        let (winners, _) = split_winners(&leaderboard(), &AwardPolicy::new(0, Some(1)));
        assert_eq!(ids(&winners), ["a"]);
    }

    #[test]
    fn ties_never_pull_in_non_qualifiers() {
        // Place 4 is d (score 1); minimum 2 stops at c.
        let (winners, losers) = split_winners(&leaderboard(), &AwardPolicy::new(2, Some(4)));
        assert_eq!(ids(&winners), ["a", "b", "c"]);
        assert_eq!(ids(&losers), ["d", "e"]);
    }

    #[test]
    fn zero_places_means_no_winners() {
        let (winners, losers) = split_winners(&leaderboard(), &AwardPolicy::new(0, Some(0)));
        assert!(winners.is_empty());
        assert_eq!(losers.len(), 5);
    }

    #[test]
    fn empty_leaderboard_splits_empty() {
        let (winners, losers) = split_winners(&[], &AwardPolicy::new(1, Some(3)));
        assert!(winners.is_empty());
        assert!(losers.is_empty());
    }
}
