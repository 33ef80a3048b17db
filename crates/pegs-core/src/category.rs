//! Per-category leaderboards.
//!
//! A category view keeps only the valid pegs tagged with one label, drops
//! people left with none, and ranks by that filtered count. Penalties are not
//! subtracted here; a category board ranks raw participation.

use serde::Serialize;
use tracing::debug;

use crate::aggregate::Standings;
use crate::model::result::count_as_score;
use crate::model::CategoryView;
use crate::rank::{sort_by_receiver, sort_by_sender};

/// One configured category and its ranked entries.
///
/// `entries` may be empty; that is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySection {
    pub category: String,
    pub entries: Vec<CategoryView>,
}

/// Project the standings onto a single category label.
///
/// Label matching is exact and case-sensitive. The standings are read only,
/// so callers can project many categories from one aggregation.
#[must_use]
pub fn project_by_category(standings: &Standings, category: &str) -> Vec<CategoryView> {
    let mut views: Vec<CategoryView> = standings
        .values()
        .filter_map(|result| {
            let mut valid: Vec<_> = result
                .valid_pegs_received
                .iter()
                .filter(|peg| peg.has_category(category))
                .cloned()
                .collect();
            if valid.is_empty() {
                return None;
            }
            sort_by_sender(&mut valid);

            let mut penalties = result.penalty_pegs_given.clone();
            sort_by_receiver(&mut penalties);

            Some(CategoryView {
                category: category.to_string(),
                person_id: result.person_id.clone(),
                person_name: result.person_name.clone(),
                weighted_pegs_received: count_as_score(valid.len()),
                valid_pegs_received: valid,
                penalty_pegs_given: penalties,
            })
        })
        .collect();

    views.sort_by(|a, b| b.weighted_pegs_received.cmp(&a.weighted_pegs_received));
    debug!(category, people = views.len(), "projected category");
    views
}

/// Project every configured category, in the order given.
///
/// The category list comes from configuration; labels that occur in the data
/// but are not listed are not reported.
#[must_use]
pub fn project_all<S: AsRef<str>>(
    standings: &Standings,
    categories: &[S],
) -> Vec<CategorySection> {
    categories
        .iter()
        .map(|category| {
            let category = category.as_ref();
            CategorySection {
                category: category.to_string(),
                entries: project_by_category(standings, category),
            }
        })
        .collect()
}
