//! # canaicode-settings
//!
//! **Tier 1 (Pure Settings)**
//!
//! Clap-free settings for the analytics pipeline, loadable from a
//! `canaicode.toml` file and overridable field by field from the CLI.
//!
//! ## What belongs here
//! * Serde settings types with defaults
//! * TOML loading
//! * Conversion of user-facing strings (dates, period names) into [`FilterCriteria`]
//!
//! ## What does NOT belong here
//! * Clap parsing (see the `canaicode` binary)
//! * Filtering or aggregation logic
//!
//! ```toml
//! [filters]
//! teams = ["backend-team"]
//! languages = ["Python", "Rust"]
//! period = "month"
//! from = "2024-01-01"
//! to = "2024-06-30"
//!
//! [catalog]
//! extra_languages = ["Zig"]
//!
//! [output]
//! format = "json"
//! ```

use std::path::Path;

pub use canaicode_math::MAX_DECIMALS;
use canaicode_types::{FilterCriteria, OutputFormat, PeriodCode, Selection};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

const DATE_ONLY: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Errors from loading or interpreting settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid {field} date '{value}': expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("Date range is inverted: {from} is after {to}")]
    InvertedRange { from: String, to: String },

    #[error("Invalid decimals {value}: expected 0..={max}", max = MAX_DECIMALS)]
    InvalidDecimals { value: u32 },
}

/// Root settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub filters: FilterSettings,
    pub catalog: CatalogSettings,
    pub output: OutputSettings,
}

impl Settings {
    /// Parse settings from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(s)?;
        settings.output.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

/// Dashboard filters as a user writes them.
///
/// `languages`/`teams` follow [`Selection`]: leave the key out to include
/// everything, write `[]` to select nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    #[serde(default, skip_serializing_if = "Selection::is_all")]
    pub languages: Selection,

    #[serde(default, skip_serializing_if = "Selection::is_all")]
    pub teams: Selection,

    /// Period label (`week`) or backend code (`W`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,

    /// First day included, `YYYY-MM-DD` (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Last day included, `YYYY-MM-DD` (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Exact number of authors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<u32>,
}

impl FilterSettings {
    /// Layer `overrides` on top of `self`; any field set in `overrides` wins.
    pub fn overlay(&self, overrides: &FilterSettings) -> FilterSettings {
        FilterSettings {
            languages: if overrides.languages.is_all() {
                self.languages.clone()
            } else {
                overrides.languages.clone()
            },
            teams: if overrides.teams.is_all() {
                self.teams.clone()
            } else {
                overrides.teams.clone()
            },
            period: overrides.period.clone().or_else(|| self.period.clone()),
            from: overrides.from.clone().or_else(|| self.from.clone()),
            to: overrides.to.clone().or_else(|| self.to.clone()),
            authors: overrides.authors.or(self.authors),
        }
    }

    /// Resolve into pipeline criteria.
    ///
    /// `from` starts at 00:00 UTC and `to` runs to the last nanosecond of its
    /// day, so both named days are included.
    pub fn to_criteria(&self) -> Result<FilterCriteria, SettingsError> {
        let lower = self
            .from
            .as_deref()
            .map(|v| parse_day("from", v))
            .transpose()?;
        let upper = self
            .to
            .as_deref()
            .map(|v| parse_day("to", v))
            .transpose()?;

        if let (Some(from), Some(to)) = (lower, upper)
            && from > to
        {
            return Err(SettingsError::InvertedRange {
                from: self.from.clone().unwrap_or_default(),
                to: self.to.clone().unwrap_or_default(),
            });
        }

        Ok(FilterCriteria {
            languages: self.languages.clone(),
            teams: self.teams.clone(),
            period: self
                .period
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(period_label),
            date_lower_bound: lower.map(start_of_day),
            date_upper_bound: upper.map(end_of_day).transpose()?,
            author_count: self.authors,
        })
    }
}

/// Extra canonical language names on top of the built-in list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub extra_languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    /// Decimal places for percentages and coefficients in Markdown.
    pub decimals: u32,
}

impl OutputSettings {
    /// Reject precision beyond [`MAX_DECIMALS`].
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.decimals > MAX_DECIMALS {
            return Err(SettingsError::InvalidDecimals {
                value: self.decimals,
            });
        }
        Ok(())
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Md,
            decimals: 2,
        }
    }
}

/// Accept either a display label or a backend code and return the label.
fn period_label(value: &str) -> String {
    match PeriodCode::parse(value) {
        PeriodCode::Other(raw) => raw,
        known => known.label().to_string(),
    }
}

fn parse_day(field: &'static str, value: &str) -> Result<Date, SettingsError> {
    Date::parse(value.trim(), DATE_ONLY).map_err(|_| SettingsError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn start_of_day(date: Date) -> OffsetDateTime {
    date.midnight().assume_utc()
}

fn end_of_day(date: Date) -> Result<OffsetDateTime, SettingsError> {
    date.with_hms_nano(23, 59, 59, 999_999_999)
        .map(|dt| dt.assume_utc())
        .map_err(|_| SettingsError::InvalidDate {
            field: "to",
            value: date.to_string(),
        })
}
