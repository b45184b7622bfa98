//! Derived views over the result collection
//!
//! Pure business logic with no I/O dependencies. Views are always rebuilt
//! from the full collection; nothing is patched incrementally.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use shared::{Category, ResultRecord};

/// Number of single-category participants published in the ranking
pub const TOP_PARTICIPANTS: usize = 3;

/// Read-only projections published alongside the collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedViews {
    /// Distinct uppercased team names, first occurrence order
    pub unique_teams: Vec<String>,
    /// Program names with at least one GROUP record
    pub group_programs: Vec<String>,
    /// Program names with at least one SINGLE record
    pub single_programs: Vec<String>,
    /// Program names with at least one GENERAL record
    pub general_programs: Vec<String>,
    /// Highest scoring SINGLE records, best first
    pub top_single_participants: Vec<ResultRecord>,
}

impl DerivedViews {
    /// Program list for one of the ranked categories
    pub fn programs_for(&self, category: Category) -> &[String] {
        match category {
            Category::Group => &self.group_programs,
            Category::Single => &self.single_programs,
            Category::General => &self.general_programs,
            Category::Unknown => &[],
        }
    }
}

/// Build every view from the full collection
pub fn build_views(records: &[ResultRecord]) -> DerivedViews {
    let all_programs = distinct(records.iter().filter_map(ResultRecord::normalized_program));

    DerivedViews {
        unique_teams: distinct(records.iter().filter_map(ResultRecord::normalized_team)),
        group_programs: programs_in_category(&all_programs, records, Category::Group),
        single_programs: programs_in_category(&all_programs, records, Category::Single),
        general_programs: programs_in_category(&all_programs, records, Category::General),
        top_single_participants: top_participants(records, Category::Single, TOP_PARTICIPANTS),
    }
}

/// Filter the distinct program names down to those with a record of `category`.
/// A name shared across categories appears in each of their lists.
fn programs_in_category(all_programs: &[String], records: &[ResultRecord], category: Category) -> Vec<String> {
    let present: HashSet<String> = records
        .iter()
        .filter(|record| record.category == category)
        .filter_map(ResultRecord::normalized_program)
        .collect();

    all_programs
        .iter()
        .filter(|program| present.contains(*program))
        .cloned()
        .collect()
}

/// Rank records of `category` by coerced score, descending. The sort is
/// stable, so equal scores keep collection order.
fn top_participants(records: &[ResultRecord], category: Category, limit: usize) -> Vec<ResultRecord> {
    let mut ranked: Vec<&ResultRecord> = records.iter().filter(|record| record.category == category).collect();
    ranked.sort_by(|a, b| b.score().total_cmp(&a.score()));
    ranked.into_iter().take(limit).cloned().collect()
}

fn distinct(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names.filter(|name| seen.insert(name.clone())).collect()
}
