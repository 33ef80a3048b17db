//! Group a cycle's peg events into per-person standings.
//!
//! Every event is attributed to exactly one person:
//!
//! - a valid peg goes to its **receiver**'s `valid_pegs_received`;
//! - a penalty goes to its **sender**'s `penalty_pegs_given`.
//!
//! The receiver of a penalty is never materialized, which keeps placeholder
//! sinks out of the leaderboard. Display names are last-write-wins across the
//! events that contributed to an entry.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::error::PegError;
use crate::model::{PegEvent, PersonResult};

/// Aggregated standings keyed by person id.
///
/// Ordered by id, so iteration (and every stable tie-break built on it) is
/// reproducible across runs.
pub type Standings = BTreeMap<String, PersonResult>;

/// The person an event is attributed to, as `(id, display name)`.
#[must_use]
pub fn attributed_to(peg: &PegEvent) -> (&str, &str) {
    if peg.is_valid {
        (peg.receiver_id.as_str(), peg.receiver_name.as_str())
    } else {
        (peg.sender_id.as_str(), peg.sender_name.as_str())
    }
}

/// Fold a snapshot of events into [`Standings`].
///
/// Scores are settled once all events are grouped, so each entry satisfies
/// `weighted == valid.len() - penalties.len()`. An empty snapshot yields empty
/// standings.
///
/// # Errors
///
/// Returns [`PegError::MissingField`] for the first event with a blank id. No
/// partial standings are returned.
#[instrument(skip_all, fields(events = events.len()))]
pub fn aggregate(events: &[PegEvent]) -> Result<Standings, PegError> {
    let mut standings = events
        .iter()
        .enumerate()
        .try_fold(Standings::new(), |mut acc, (index, peg)| {
            peg.validate(index)?;

            let (id, name) = attributed_to(peg);
            let entry = acc
                .entry(id.to_string())
                .or_insert_with(|| PersonResult::new(id, name));
            name.clone_into(&mut entry.person_name);

            if peg.is_valid {
                entry.valid_pegs_received.push(peg.clone());
            } else {
                entry.penalty_pegs_given.push(peg.clone());
            }
            Ok::<_, PegError>(acc)
        })?;

    for result in standings.values_mut() {
        result.settle();
    }

    debug!(people = standings.len(), "aggregated peg events");
    Ok(standings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EventField;

    fn peg(sender: (&str, &str), receiver: (&str, &str), is_valid: bool) -> PegEvent {
        PegEvent {
            sender_id: sender.0.into(),
            sender_name: sender.1.into(),
            receiver_id: receiver.0.into(),
            receiver_name: receiver.1.into(),
            comment: String::new(),
            categories: std::collections::BTreeSet::new(),
            is_valid,
        }
    }

    #[test]
    fn empty_snapshot_yields_empty_standings() {
        let standings = aggregate(&[]).unwrap();
        assert!(standings.is_empty());
    }

    #[test]
    fn valid_peg_credits_receiver_only() {
        let standings = aggregate(&[peg(("p1", "Luke"), ("p2", "Gillian"), true)]).unwrap();
        assert_eq!(standings.len(), 1);
        let gillian = &standings["p2"];
        assert_eq!(gillian.person_name, "Gillian");
        assert_eq!(gillian.valid_pegs_received.len(), 1);
        assert_eq!(gillian.weighted_pegs_received, 1);
        assert!(!standings.contains_key("p1"));
    }

    #[test]
    fn penalty_charges_sender_and_skips_sink() {
        let standings = aggregate(&[peg(("p4", "Jim"), ("b1", "Gif"), false)]).unwrap();
        assert_eq!(standings.len(), 1);
        assert!(!standings.contains_key("b1"));
        let jim = &standings["p4"];
        assert_eq!(jim.penalty_pegs_given.len(), 1);
        assert!(jim.valid_pegs_received.is_empty());
        assert_eq!(jim.weighted_pegs_received, -1);
    }

    #[test]
    fn person_name_is_last_write_wins() {
        let standings = aggregate(&[
            peg(("p1", "Luke"), ("p2", "Gillian"), true),
            peg(("p3", "Dula"), ("p2", "Gill"), true),
        ])
        .unwrap();
        assert_eq!(standings["p2"].person_name, "Gill");
    }

    #[test]
    fn penalty_sender_name_updates_entry_name() {
        let standings = aggregate(&[
            peg(("p3", "Dula"), ("p1", "Luke"), true),
            peg(("p1", "Luke S."), ("b1", "Gif"), false),
        ])
        .unwrap();
        assert_eq!(standings["p1"].person_name, "Luke S.");
        assert_eq!(standings["p1"].weighted_pegs_received, 0);
    }

    #[test]
    fn non_contributing_mentions_do_not_rename() {
        // p1 sends a valid peg under a different name; only received pegs
        // and sent penalties contribute to p1's entry.
        let standings = aggregate(&[
            peg(("p3", "Dula"), ("p1", "Luke"), true),
            peg(("p1", "Lucas"), ("p3", "Dula"), true),
        ])
        .unwrap();
        assert_eq!(standings["p1"].person_name, "Luke");
    }

    #[test]
    fn blank_id_fails_with_position() {
        let err = aggregate(&[
            peg(("p1", "Luke"), ("p2", "Gillian"), true),
            peg(("", "Ghost"), ("p2", "Gillian"), true),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            PegError::MissingField {
                index: 1,
                field: EventField::SenderId
            }
        );
    }

    #[test]
    fn blank_sink_id_is_still_malformed() {
        let err = aggregate(&[peg(("p1", "Luke"), ("", ""), false)]).unwrap_err();
        assert!(matches!(
            err,
            PegError::MissingField {
                field: EventField::ReceiverId,
                ..
            }
        ));
    }

    #[test]
    fn every_event_is_attributed_once() {
        let events = vec![
            peg(("p1", "Luke"), ("p2", "Gillian"), true),
            peg(("p2", "Gillian"), ("p1", "Luke"), true),
            peg(("p1", "Luke"), ("b1", "Gif"), false),
            peg(("p2", "Gillian"), ("p2", "Gillian"), false),
        ];
        let standings = aggregate(&events).unwrap();
        let attributed: usize = standings
            .values()
            .map(|r| r.valid_pegs_received.len() + r.penalty_pegs_given.len())
            .sum();
        assert_eq!(attributed, events.len());
    }
}
