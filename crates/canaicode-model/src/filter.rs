//! Row filtering against dashboard [`FilterCriteria`].
//!
//! Every unset criterion is inclusive. Set criteria are AND-ed together;
//! within the language criterion a row passes if it has *any* selected
//! language.

use std::collections::BTreeSet;

use canaicode_types::{FilterCriteria, MetricRow, MetricSet, RawDataset};
use tracing::debug;

/// Whether a single row satisfies every criterion that is set.
pub fn row_matches(criteria: &FilterCriteria, row: &MetricRow) -> bool {
    if !criteria
        .languages
        .intersects(row.languages.iter().map(String::as_str))
    {
        return false;
    }
    if !criteria.teams.contains(&row.team) {
        return false;
    }
    if let Some(period) = criteria.period.as_deref().filter(|p| !p.is_empty())
        && period != row.period
    {
        return false;
    }
    if let Some(lower) = criteria.date_lower_bound
        && row.period_start < lower
    {
        return false;
    }
    if let Some(upper) = criteria.date_upper_bound
        && row.period_end > upper
    {
        return false;
    }
    if let Some(authors) = criteria.author_count
        && row.number_of_authors != authors
    {
        return false;
    }
    true
}

/// Keep the rows that pass `criteria`, in their original order.
///
/// The metric mode of `set` is carried over even if filtering removes every
/// row that determined it.
pub fn filter_rows(set: &MetricSet, criteria: &FilterCriteria) -> MetricSet {
    let rows: Vec<MetricRow> = set
        .rows
        .iter()
        .filter(|row| row_matches(criteria, row))
        .cloned()
        .collect();
    debug!(input = set.len(), kept = rows.len(), "filtered metric rows");
    set.with_rows(rows)
}

/// Every language mentioned by any dataset, for the filter picker.
pub fn available_languages(datasets: &[RawDataset]) -> BTreeSet<String> {
    datasets
        .iter()
        .flat_map(|d| d.languages.iter().cloned())
        .collect()
}

/// Every team mentioned by any dataset, for the filter picker.
pub fn available_teams(datasets: &[RawDataset]) -> BTreeSet<String> {
    datasets.iter().map(|d| d.team.clone()).collect()
}
