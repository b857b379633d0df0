//! # canaicode-core
//!
//! This crate is the **primary library interface** for `canaicode`.
//! It coordinates normalisation, filtering, aggregation and statistics to
//! produce the reports behind the dashboard.
//!
//! If you are embedding `canaicode` into another Rust application, depend on
//! this crate and `canaicode-types`. Avoid depending on `canaicode-model`
//! directly unless necessary.
//!
//! ## Example
//!
//! ```rust,no_run
//! use canaicode_core::{JsonFileSource, MetricsRequest, SessionContext, dashboard_workflow};
//! use canaicode_core::types::{FilterCriteria, MetricMode, PeriodCode};
//! use time::macros::date;
//!
//! let source = JsonFileSource::new(["export.json"]);
//! let request = MetricsRequest {
//!     team: Some("backend-team".into()),
//!     period: Some(PeriodCode::Month),
//!     metric: Some(MetricMode::CodeLines),
//!     start: Some(date!(2024 - 01 - 01)),
//!     end: Some(date!(2024 - 06 - 30)),
//!     languages: vec![],
//! };
//! let report = dashboard_workflow(
//!     &source,
//!     &SessionContext::default(),
//!     &request,
//!     &FilterCriteria::default(),
//! )
//! .expect("dashboard failed");
//! println!("{} buckets, r = {}", report.rows.len(), report.correlation);
//! ```

pub mod error;
pub mod session;
pub mod source;

pub use canaicode_settings as settings;
pub use canaicode_types as types;

pub use canaicode_model::{KNOWN_LANGUAGES, LanguageCatalog};
pub use error::{CanaiError, ErrorCode};
pub use session::{DEFAULT_API_BASE_URL, MetricsRequest, SessionContext};
pub use source::{JsonFileSource, MetricsSource};

use canaicode_model::{
    acceptance_series, aggregate_languages, available_languages, available_teams, correlate,
    filter_rows, language_overview, normalize_datasets, summarize,
};
use canaicode_settings::CatalogSettings;
use canaicode_types::{
    AcceptanceSeries, DashboardReport, FilterCriteria, LanguageMetrics, LanguageReport,
    PeriodAcceptance, PeriodCode, RawDataset,
};
use tracing::info;

/// Normalise → filter → summarise one set of calculated-metrics datasets.
///
/// Filter options (`available_*`) come from the unfiltered datasets so the
/// caller can offer every language and team that exists.
pub fn build_dashboard(
    datasets: &[RawDataset],
    criteria: &FilterCriteria,
) -> Result<DashboardReport, CanaiError> {
    let set = normalize_datasets(datasets)?;
    let filtered = filter_rows(&set, criteria);

    let summary = summarize(&filtered);
    let correlation = correlate(&filtered);
    info!(
        mode = ?filtered.mode,
        rows_in = set.len(),
        rows_out = filtered.len(),
        "built dashboard"
    );

    Ok(DashboardReport {
        mode: filtered.mode,
        rows: filtered.rows,
        summary,
        correlation,
        available_languages: available_languages(datasets),
        available_teams: available_teams(datasets),
    })
}

/// Validate, fetch and build a dashboard in one step.
pub fn dashboard_workflow<S>(
    source: &S,
    session: &SessionContext,
    request: &MetricsRequest,
    criteria: &FilterCriteria,
) -> Result<DashboardReport, CanaiError>
where
    S: MetricsSource + ?Sized,
{
    request.validate()?;
    let datasets = source.fetch_datasets(session, request)?;
    build_dashboard(&datasets, criteria)
}

/// Merge language records from several sources into one report.
pub fn language_report(sources: &[Vec<LanguageMetrics>], catalog: &LanguageCatalog) -> LanguageReport {
    let records: Vec<LanguageMetrics> = sources.iter().flatten().cloned().collect();
    let buckets = aggregate_languages(&records, catalog);
    let overview = language_overview(&buckets);
    LanguageReport { buckets, overview }
}

/// Fetch language records and aggregate them.
pub fn language_workflow<S>(
    source: &S,
    session: &SessionContext,
    catalog: &LanguageCatalog,
) -> Result<LanguageReport, CanaiError>
where
    S: MetricsSource + ?Sized,
{
    let sources = source.fetch_language_metrics(session)?;
    Ok(language_report(&sources, catalog))
}

/// Suggested/accepted series for the acceptance charts, labelled by `period`.
pub fn acceptance_report(
    periods: &[PeriodAcceptance],
    period: &PeriodCode,
) -> Result<AcceptanceSeries, CanaiError> {
    Ok(acceptance_series(periods, period)?)
}

/// Fetch per-period acceptance totals and build the chart series.
pub fn acceptance_workflow<S>(
    source: &S,
    session: &SessionContext,
    period: &PeriodCode,
) -> Result<AcceptanceSeries, CanaiError>
where
    S: MetricsSource + ?Sized,
{
    let periods = source.fetch_period_acceptance(session, period)?;
    acceptance_report(&periods, period)
}

/// The built-in language list extended with configured names.
pub fn catalog_from_settings(settings: &CatalogSettings) -> LanguageCatalog {
    LanguageCatalog::default().with_extra(settings.extra_languages.iter().cloned())
}
