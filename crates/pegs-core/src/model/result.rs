//! Aggregated, per-person views produced by the engine.
//!
//! All of these are transient: they are recomputed from the full event
//! snapshot on every call and never persisted.

use std::fmt;

use serde::{Serialize, Serializer};

use super::peg::PegEvent;

/// One participant's standing for the current cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonResult {
    pub person_id: String,
    /// Display only; taken from the last event that contributed to this entry.
    pub person_name: String,
    pub valid_pegs_received: Vec<PegEvent>,
    pub penalty_pegs_given: Vec<PegEvent>,
    /// `valid_pegs_received.len() - penalty_pegs_given.len()`; may be negative.
    pub weighted_pegs_received: i64,
}

impl PersonResult {
    pub(crate) fn new(person_id: &str, person_name: &str) -> Self {
        Self {
            person_id: person_id.to_string(),
            person_name: person_name.to_string(),
            valid_pegs_received: Vec::new(),
            penalty_pegs_given: Vec::new(),
            weighted_pegs_received: 0,
        }
    }

    /// Recompute the weighted score from the two lists.
    pub(crate) fn settle(&mut self) {
        self.weighted_pegs_received = count_as_score(self.valid_pegs_received.len())
            - count_as_score(self.penalty_pegs_given.len());
    }
}

/// A [`PersonResult`] narrowed to a single category label.
///
/// `valid_pegs_received` only holds pegs tagged with `category` and
/// `weighted_pegs_received` is their count; penalties are carried for
/// reference but never subtracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    pub category: String,
    pub person_id: String,
    pub person_name: String,
    pub valid_pegs_received: Vec<PegEvent>,
    pub penalty_pegs_given: Vec<PegEvent>,
    pub weighted_pegs_received: i64,
}

/// How many more pegs a person may give this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    Unlimited,
    /// Raw `limit - given`; negative when the person over-gave.
    Count(i64),
}

impl Remaining {
    #[must_use]
    pub const fn is_unlimited(self) -> bool {
        matches!(self, Self::Unlimited)
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => f.write_str("unlimited"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for Remaining {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unlimited => serializer.serialize_str("unlimited"),
            Self::Count(n) => serializer.serialize_i64(*n),
        }
    }
}

/// Per-person quota snapshot, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotaState {
    pub remaining: Remaining,
    pub given_count: i64,
}

/// Saturating `usize -> i64` for peg counts.
pub(crate) fn count_as_score(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
