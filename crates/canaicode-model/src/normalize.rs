//! Period normalisation: backend rows into [`MetricRow`]s.
//!
//! Dates arrive as ISO strings in several flavours (`2024-01-01`,
//! `2024-01-01T00:00:00`, RFC 3339 with an offset). They all become UTC
//! instants here so later day-level formatting never shifts by a timezone.

use canaicode_types::{MetricRow, MetricSet, RawDataset, RawSample};
use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};
use tracing::{debug, warn};

const NAIVE_T: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");
const NAIVE_SPACE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]");
const DATE_ONLY: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Invalid {field} '{value}' for team '{team}'")]
    InvalidDate {
        team: String,
        field: &'static str,
        value: String,
    },

    #[error("Period for team '{team}' starts after it ends: {start} > {end}")]
    InvertedPeriod {
        team: String,
        start: String,
        end: String,
    },
}

/// Anything that can be read as a UTC instant.
///
/// Strings are parsed; values that are already `time` types are converted.
/// Naive date-times and bare dates are taken to be UTC.
pub trait UtcInstant {
    fn utc_instant(&self) -> Option<OffsetDateTime>;
}

impl UtcInstant for str {
    fn utc_instant(&self) -> Option<OffsetDateTime> {
        parse_utc(self)
    }
}

impl UtcInstant for String {
    fn utc_instant(&self) -> Option<OffsetDateTime> {
        parse_utc(self)
    }
}

impl UtcInstant for OffsetDateTime {
    fn utc_instant(&self) -> Option<OffsetDateTime> {
        Some(self.to_offset(UtcOffset::UTC))
    }
}

impl UtcInstant for PrimitiveDateTime {
    fn utc_instant(&self) -> Option<OffsetDateTime> {
        Some(self.assume_utc())
    }
}

impl UtcInstant for Date {
    fn utc_instant(&self) -> Option<OffsetDateTime> {
        Some(self.midnight().assume_utc())
    }
}

/// Parse an ISO-8601 date or date-time into a UTC instant.
pub fn parse_utc(value: &str) -> Option<OffsetDateTime> {
    let value = value.trim();
    if let Ok(dt) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(dt.to_offset(UtcOffset::UTC));
    }
    for format in [NAIVE_T, NAIVE_SPACE] {
        if let Ok(dt) = PrimitiveDateTime::parse(value, format) {
            return Some(dt.assume_utc());
        }
    }
    Date::parse(value, DATE_ONLY)
        .ok()
        .map(|d| d.midnight().assume_utc())
}

/// Flatten one dataset into rows carrying its team, period label and languages.
pub fn normalize_dataset(dataset: &RawDataset) -> Result<Vec<MetricRow>, NormalizeError> {
    let label = dataset.period.label().to_string();
    dataset
        .data
        .iter()
        .map(|sample| normalize_sample(dataset, &label, sample))
        .collect()
}

/// Normalise every dataset and resolve the metric mode once for the whole set.
pub fn normalize_datasets(datasets: &[RawDataset]) -> Result<MetricSet, NormalizeError> {
    let mut rows = Vec::new();
    for dataset in datasets {
        rows.extend(normalize_dataset(dataset)?);
    }
    let set = MetricSet::from_rows(rows);
    debug!(
        datasets = datasets.len(),
        rows = set.len(),
        mode = ?set.mode,
        "normalized metrics"
    );
    Ok(set)
}

fn normalize_sample(
    dataset: &RawDataset,
    label: &str,
    sample: &RawSample,
) -> Result<MetricRow, NormalizeError> {
    let period_start = required_date(dataset, "initial_date", &sample.initial_date)?;
    let period_end = required_date(dataset, "final_date", &sample.final_date)?;
    if period_start > period_end {
        return Err(NormalizeError::InvertedPeriod {
            team: dataset.team.clone(),
            start: sample.initial_date.clone(),
            end: sample.final_date.clone(),
        });
    }

    // Logged, not clamped. Commit samples carry no line total to compare with.
    if sample.total_commits.is_none()
        && sample.net_changed_lines_by_copilot > sample.net_changed_lines
    {
        warn!(
            team = %dataset.team,
            initial_date = %sample.initial_date,
            total = sample.net_changed_lines,
            assisted = sample.net_changed_lines_by_copilot,
            "assistant lines exceed total changed lines"
        );
    }

    Ok(MetricRow {
        period_start,
        period_end,
        team: dataset.team.clone(),
        period: label.to_string(),
        languages: dataset.languages.clone(),
        net_changed_lines: sample.net_changed_lines,
        net_changed_lines_by_assistant: sample.net_changed_lines_by_copilot,
        assistant_ratio: sample.percentage_changed_lines_by_copilot,
        number_of_authors: sample.number_of_authors,
        total_commits: sample.total_commits,
    })
}

fn required_date(
    dataset: &RawDataset,
    field: &'static str,
    value: &str,
) -> Result<OffsetDateTime, NormalizeError> {
    parse_utc(value).ok_or_else(|| NormalizeError::InvalidDate {
        team: dataset.team.clone(),
        field,
        value: value.to_string(),
    })
}
