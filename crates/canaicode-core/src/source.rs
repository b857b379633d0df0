//! Where raw metrics come from.
//!
//! [`MetricsSource`] is the seam between the pipeline and the backend. The
//! HTTP client lives outside this crate; [`JsonFileSource`] reads exported
//! backend responses from disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use canaicode_types::{LanguageMetrics, PeriodAcceptance, PeriodCode, RawDataset};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{CanaiError, ErrorCode};
use crate::session::{MetricsRequest, SessionContext};

/// A provider of backend responses.
pub trait MetricsSource {
    /// Calculated-metrics datasets for a validated request.
    fn fetch_datasets(
        &self,
        session: &SessionContext,
        request: &MetricsRequest,
    ) -> Result<Vec<RawDataset>, CanaiError>;

    /// Per-language Copilot records, one list per reporting source.
    fn fetch_language_metrics(
        &self,
        session: &SessionContext,
    ) -> Result<Vec<Vec<LanguageMetrics>>, CanaiError>;

    /// Copilot acceptance totals bucketed by `period`.
    fn fetch_period_acceptance(
        &self,
        session: &SessionContext,
        period: &PeriodCode,
    ) -> Result<Vec<PeriodAcceptance>, CanaiError>;
}

/// A file may hold a single response object or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(v) => v,
            OneOrMany::One(v) => vec![v],
        }
    }
}

/// Reads backend responses saved as JSON files.
///
/// Files are returned whole: request parameters other than validation are
/// left to the filter stage.
#[derive(Debug, Clone, Default)]
pub struct JsonFileSource {
    paths: Vec<PathBuf>,
}

impl JsonFileSource {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// All datasets in all files, in file order.
    pub fn read_datasets(&self) -> Result<Vec<RawDataset>, CanaiError> {
        let mut datasets = Vec::new();
        for path in &self.paths {
            datasets.extend(read_json::<OneOrMany<RawDataset>>(path)?.into_vec());
        }
        debug!(files = self.paths.len(), datasets = datasets.len(), "read datasets");
        Ok(datasets)
    }
}

impl MetricsSource for JsonFileSource {
    fn fetch_datasets(
        &self,
        _session: &SessionContext,
        request: &MetricsRequest,
    ) -> Result<Vec<RawDataset>, CanaiError> {
        request.validate()?;
        self.read_datasets()
    }

    fn fetch_language_metrics(
        &self,
        _session: &SessionContext,
    ) -> Result<Vec<Vec<LanguageMetrics>>, CanaiError> {
        self.paths
            .iter()
            .map(|path| Ok(read_json::<OneOrMany<LanguageMetrics>>(path)?.into_vec()))
            .collect()
    }

    fn fetch_period_acceptance(
        &self,
        _session: &SessionContext,
        period: &PeriodCode,
    ) -> Result<Vec<PeriodAcceptance>, CanaiError> {
        let mut periods = Vec::new();
        for path in &self.paths {
            periods.extend(read_json::<OneOrMany<PeriodAcceptance>>(path)?.into_vec());
        }
        debug!(period = %period, rows = periods.len(), "read period acceptance");
        Ok(periods)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CanaiError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CanaiError::path_not_found(&display),
        _ => CanaiError::io_error(e),
    })?;
    serde_json::from_str(&content).map_err(|e| {
        CanaiError::with_details(ErrorCode::InvalidJson, format!("Invalid JSON: {e}"), display)
    })
}
