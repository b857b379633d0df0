//! # canaicode-types
//!
//! **Tier 0 (Core Types)**
//!
//! This crate defines the data structures and wire contracts for the
//! `canaicode` analytics pipeline. It contains only data types, Serde
//! definitions, and `SCHEMA_VERSION`.
//!
//! ## Stability Policy
//!
//! **JSON-first stability**: the primary contract is the JSON shape, not Rust
//! struct literals. Wire types (`Raw*`, `LanguageMetrics`, `PeriodAcceptance`)
//! mirror what the metrics backend returns and tolerate missing numeric fields.
//!
//! ## Scale convention
//! Every `*_ratio` field is a 0..1 ratio. Only display-facing types
//! (`Summary`, `LanguageOverview`) carry 0..100 values, and those fields are
//! named `*_percent`.
//!
//! ## What does NOT belong here
//! * File I/O
//! * CLI argument parsing
//! * Filtering, aggregation or statistics

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The current schema version for all receipt types.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

impl ToolInfo {
    pub fn current() -> Self {
        Self {
            name: "canaicode".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// -----------------------------------------------------------------------------
// Periods
// -----------------------------------------------------------------------------

/// Bucket size code as sent by the metrics backend (`D`, `W`, `M`, `Q`, `Y`).
///
/// Unknown codes are kept verbatim in [`PeriodCode::Other`] and shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PeriodCode {
    Day,
    Week,
    Month,
    Quarter,
    Year,
    Other(String),
}

impl PeriodCode {
    /// Parse a backend period code. Never fails.
    pub fn parse(code: &str) -> Self {
        match code {
            "D" => PeriodCode::Day,
            "W" => PeriodCode::Week,
            "M" => PeriodCode::Month,
            "Q" => PeriodCode::Quarter,
            "Y" => PeriodCode::Year,
            other => PeriodCode::Other(other.to_string()),
        }
    }

    /// Map the dashboard request form's time-range label to a code.
    ///
    /// The form labels quarters as "Semester"; anything unrecognised falls
    /// back to monthly buckets.
    pub fn from_form_label(label: &str) -> Self {
        match label {
            "Day" => PeriodCode::Day,
            "Week" => PeriodCode::Week,
            "Month" => PeriodCode::Month,
            "Semester" | "Quarter" => PeriodCode::Quarter,
            "Year" => PeriodCode::Year,
            _ => PeriodCode::Month,
        }
    }

    /// The single-letter wire code.
    pub fn code(&self) -> &str {
        match self {
            PeriodCode::Day => "D",
            PeriodCode::Week => "W",
            PeriodCode::Month => "M",
            PeriodCode::Quarter => "Q",
            PeriodCode::Year => "Y",
            PeriodCode::Other(code) => code,
        }
    }

    /// The display label (`week`, `month`, ...), or the raw code when unknown.
    pub fn label(&self) -> &str {
        match self {
            PeriodCode::Day => "day",
            PeriodCode::Week => "week",
            PeriodCode::Month => "month",
            PeriodCode::Quarter => "quarter",
            PeriodCode::Year => "year",
            PeriodCode::Other(code) => code,
        }
    }
}

impl From<String> for PeriodCode {
    fn from(code: String) -> Self {
        PeriodCode::parse(&code)
    }
}

impl From<PeriodCode> for String {
    fn from(code: PeriodCode) -> Self {
        code.code().to_string()
    }
}

impl fmt::Display for PeriodCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// -----------------------------------------------------------------------------
// Wire contracts (backend responses)
// -----------------------------------------------------------------------------

/// One bucket of a calculated-metrics response, before normalisation.
///
/// Code-lines responses carry the `net_changed_lines*` fields; commit
/// responses carry `total_commits` and name the ratio
/// `percentage_copilot_suggestions_accepted`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub initial_date: String,
    pub final_date: String,
    #[serde(default)]
    pub net_changed_lines: i64,
    #[serde(default)]
    pub net_changed_lines_by_copilot: i64,
    /// 0..1 ratio despite the name.
    #[serde(default, alias = "percentage_copilot_suggestions_accepted")]
    pub percentage_changed_lines_by_copilot: f64,
    #[serde(default)]
    pub number_of_authors: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_commits: Option<u64>,
}

/// A calculated-metrics response: one team, one period size, many buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDataset {
    pub team: String,
    #[serde(default, alias = "programming_languages")]
    pub languages: Vec<String>,
    pub period: PeriodCode,
    #[serde(default)]
    pub data: Vec<RawSample>,
}

/// Copilot code metrics for one language from one source record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageMetrics {
    pub language: String,
    #[serde(default)]
    pub code_acceptances: u64,
    #[serde(default)]
    pub code_suggestions: u64,
    #[serde(default)]
    pub lines_accepted: u64,
    #[serde(default)]
    pub lines_suggested: u64,
    /// Source-reported value; never trusted after aggregation.
    #[serde(default)]
    pub percentage_code_acceptances: f64,
    /// Source-reported value; never trusted after aggregation.
    #[serde(default)]
    pub percentage_lines_accepted: f64,
}

/// Copilot acceptance totals for one period bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodAcceptance {
    pub period_initial_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_final_date: Option<String>,
    #[serde(default)]
    pub total_code_acceptances: u64,
    /// 0..1 ratio of accepted to suggested code completions.
    #[serde(default)]
    pub percentage_code_acceptances: f64,
    #[serde(default)]
    pub total_lines_accepted: u64,
    /// 0..1 ratio of accepted to suggested lines.
    #[serde(default)]
    pub percentage_lines_accepted: f64,
}

// -----------------------------------------------------------------------------
// Normalised rows
// -----------------------------------------------------------------------------

/// A normalised metrics bucket. `period_start <= period_end` always.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    #[serde(with = "time::serde::rfc3339")]
    pub period_start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub period_end: OffsetDateTime,
    pub team: String,
    /// Display label of the bucket size (`week`, `month`, ...).
    pub period: String,
    pub languages: Vec<String>,
    pub net_changed_lines: i64,
    pub net_changed_lines_by_assistant: i64,
    /// 0..1 share of changed lines attributed to the assistant.
    pub assistant_ratio: f64,
    pub number_of_authors: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_commits: Option<u64>,
}

/// Which metric family a set of rows belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricMode {
    #[default]
    CodeLines,
    Commits,
}

impl MetricMode {
    /// Any row carrying `total_commits` puts the whole set in commit mode.
    pub fn detect(rows: &[MetricRow]) -> Self {
        if rows.iter().any(|r| r.total_commits.is_some()) {
            MetricMode::Commits
        } else {
            MetricMode::CodeLines
        }
    }
}

/// Rows tagged with their metric mode.
///
/// The mode is resolved once when the set is built and survives filtering,
/// so consumers never re-inspect individual rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricSet {
    pub mode: MetricMode,
    pub rows: Vec<MetricRow>,
}

impl MetricSet {
    pub fn from_rows(rows: Vec<MetricRow>) -> Self {
        Self {
            mode: MetricMode::detect(&rows),
            rows,
        }
    }

    pub fn with_rows(&self, rows: Vec<MetricRow>) -> Self {
        Self {
            mode: self.mode,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Filtering
// -----------------------------------------------------------------------------

/// A multi-select filter value.
///
/// `All` is the unset state and constrains nothing. `Only` with an empty set
/// is an explicit "nothing selected" and matches no row. On the wire an
/// absent or `null` list is `All` and `[]` is the empty selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    from = "Option<BTreeSet<String>>",
    into = "Option<BTreeSet<String>>"
)]
pub enum Selection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl Selection {
    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Only(values.into_iter().map(Into::into).collect())
    }

    /// Explicit empty selection.
    pub fn nothing() -> Self {
        Selection::Only(BTreeSet::new())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn contains(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(set) => set.contains(value),
        }
    }

    /// True when any of `values` is selected (logical OR).
    pub fn intersects<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self {
            Selection::All => true,
            Selection::Only(set) => values.into_iter().any(|v| set.contains(v)),
        }
    }
}

impl From<Option<BTreeSet<String>>> for Selection {
    fn from(value: Option<BTreeSet<String>>) -> Self {
        match value {
            None => Selection::All,
            Some(set) => Selection::Only(set),
        }
    }
}

impl From<Selection> for Option<BTreeSet<String>> {
    fn from(value: Selection) -> Self {
        match value {
            Selection::All => None,
            Selection::Only(set) => Some(set),
        }
    }
}

/// User-selected dashboard filters. The default value passes every row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Selection::is_all")]
    pub languages: Selection,
    #[serde(default, skip_serializing_if = "Selection::is_all")]
    pub teams: Selection,
    /// Period display label; `None` or `""` means no constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_lower_bound: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_upper_bound: Option<OffsetDateTime>,
    /// Exact author count, not a range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_count: Option<u32>,
}

// -----------------------------------------------------------------------------
// Aggregation outputs
// -----------------------------------------------------------------------------

/// Language metrics summed across source records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageBucket {
    pub language: String,
    pub code_acceptances: u64,
    pub code_suggestions: u64,
    pub lines_accepted: u64,
    pub lines_suggested: u64,
    /// `code_acceptances / code_suggestions`, 0 when nothing was suggested.
    pub code_acceptance_ratio: f64,
    /// `lines_accepted / lines_suggested`, 0 when nothing was suggested.
    pub lines_acceptance_ratio: f64,
}

/// Headline numbers for the language analytics view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LanguageOverview {
    pub total_languages: usize,
    /// Mean of per-language code acceptance, 0..100.
    pub average_acceptance_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_language: Option<String>,
    pub top_acceptance_percent: f64,
}

/// One bar pair of the suggestion acceptance chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptancePoint {
    #[serde(with = "time::serde::rfc3339")]
    pub period_start: OffsetDateTime,
    pub suggested: u64,
    pub accepted: u64,
}

/// Suggested-vs-accepted series for lines and for code completions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AcceptanceSeries {
    /// Bucket label the series was requested at (`month`); empty when unset.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub period: String,
    pub lines: Vec<AcceptancePoint>,
    pub suggestions: Vec<AcceptancePoint>,
}

// -----------------------------------------------------------------------------
// Statistics
// -----------------------------------------------------------------------------

/// Pearson coefficient, or an explicit "nothing to correlate" state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Correlation {
    Coefficient(f64),
    NotComputable,
}

impl Correlation {
    /// Wrap a raw coefficient; NaN becomes [`Correlation::NotComputable`].
    pub fn from_raw(value: f64) -> Self {
        if value.is_nan() {
            Correlation::NotComputable
        } else {
            Correlation::Coefficient(value)
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Correlation::Coefficient(v) => Some(*v),
            Correlation::NotComputable => None,
        }
    }
}

impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correlation::Coefficient(v) => write!(f, "{:.2}", v.clamp(-1.0, 1.0)),
            Correlation::NotComputable => f.write_str("no correlation available"),
        }
    }
}

/// Totals surfaced next to the charts; shape follows the metric mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Summary {
    CodeLines {
        row_count: usize,
        total_lines: i64,
        total_assistant_lines: i64,
        /// 0..100.
        assistant_percent: f64,
    },
    Commits {
        row_count: usize,
        total_commits: u64,
        /// Mean of per-row assistant ratios, 0..100.
        average_assistant_percent: f64,
    },
}

impl Summary {
    pub fn mode(&self) -> MetricMode {
        match self {
            Summary::CodeLines { .. } => MetricMode::CodeLines,
            Summary::Commits { .. } => MetricMode::Commits,
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            Summary::CodeLines { row_count, .. } | Summary::Commits { row_count, .. } => *row_count,
        }
    }
}

/// Everything the dashboard needs after one fetch/filter cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub mode: MetricMode,
    pub rows: Vec<MetricRow>,
    pub summary: Summary,
    pub correlation: Correlation,
    pub available_languages: BTreeSet<String>,
    pub available_teams: BTreeSet<String>,
}

/// Aggregated language analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageReport {
    pub buckets: Vec<LanguageBucket>,
    pub overview: LanguageOverview,
}

// -----------------------------------------------------------------------------
// Receipts
// -----------------------------------------------------------------------------

/// JSON envelope written by the CLI around any report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt<T> {
    pub schema_version: u32,
    pub generated_at_ms: u128,
    pub tool: ToolInfo,
    pub kind: String,
    pub report: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Markdown tables.
    #[default]
    Md,
    /// JSON receipt (compact).
    Json,
}
