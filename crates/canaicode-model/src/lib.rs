//! # canaicode-model
//!
//! **Tier 2 (Pipeline)**
//!
//! The three pure stages that turn backend rows into dashboard numbers:
//!
//! 1. [`normalize`]: period codes to labels, date strings to UTC instants.
//! 2. [`filter`] and [`aggregate`]: apply [`FilterCriteria`] and collapse
//!    duplicate language records, recomputing ratios from sums.
//! 3. [`summary`]: totals and the Pearson coefficient for the active mode.
//!
//! Every function is a pure function of its inputs; nothing here performs I/O.
//!
//! [`FilterCriteria`]: canaicode_types::FilterCriteria

pub mod acceptance;
pub mod aggregate;
pub mod filter;
pub mod normalize;
pub mod summary;

pub use acceptance::{acceptance_series, suggested_from_ratio};
pub use aggregate::{KNOWN_LANGUAGES, LanguageCatalog, aggregate_languages, language_overview};
pub use filter::{available_languages, available_teams, filter_rows, row_matches};
pub use normalize::{
    NormalizeError, UtcInstant, normalize_dataset, normalize_datasets, parse_utc,
};
pub use summary::{correlate, correlation_series, summarize};
