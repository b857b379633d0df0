//! Session context and metrics requests.
//!
//! The pipeline never reads ambient session state. Whoever fetches data gets
//! a [`SessionContext`] handed to it explicitly.

use std::fmt;

use canaicode_types::{MetricMode, PeriodCode};
use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::CanaiError;

const QUERY_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Default metrics backend when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Who is asking, and where the backend lives.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub api_base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl SessionContext {
    /// Anonymous session against `api_base_url`.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            user_id: None,
            token: None,
        }
    }

    pub fn with_credentials(mut self, user_id: impl Into<String>, token: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self.token = Some(token.into());
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// `Authorization` header value, when a token is present.
    ///
    /// Read by HTTP [`MetricsSource`](crate::MetricsSource) implementations
    /// living outside this crate; the file source ignores credentials.
    pub fn bearer(&self) -> Option<String> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("Bearer {t}"))
    }

    /// Absolute URL for a backend path, for the same external HTTP sources.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

// Tokens stay out of logs.
impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("api_base_url", &self.api_base_url)
            .field("user_id", &self.user_id)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Parameters of one calculated-metrics fetch.
///
/// Everything except `languages` must be set before a fetch is issued; an
/// empty language list means "all languages".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsRequest {
    pub team: Option<String>,
    pub period: Option<PeriodCode>,
    pub metric: Option<MetricMode>,
    pub start: Option<Date>,
    pub end: Option<Date>,
    #[serde(default)]
    pub languages: Vec<String>,
}

impl MetricsRequest {
    /// Check the request is complete and the range is ordered.
    pub fn validate(&self) -> Result<(), CanaiError> {
        if self.team.as_deref().is_none_or(|t| t.trim().is_empty()) {
            return Err(CanaiError::invalid_request("team is required"));
        }
        if self.period.is_none() {
            return Err(CanaiError::invalid_request("period is required"));
        }
        if self.metric.is_none() {
            return Err(CanaiError::invalid_request("metric is required"));
        }
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(CanaiError::invalid_request("start and end dates are required"));
        };
        if start > end {
            return Err(CanaiError::invalid_request(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(())
    }

    /// Query parameters for the calculated-metrics endpoint.
    ///
    /// Built for an HTTP [`MetricsSource`](crate::MetricsSource) outside this
    /// crate; [`JsonFileSource`](crate::JsonFileSource) only calls `validate`.
    pub fn query_pairs(&self) -> Result<Vec<(&'static str, String)>, CanaiError> {
        self.validate()?;
        let mut pairs = Vec::with_capacity(5);
        if let Some(period) = &self.period {
            pairs.push(("period", period.code().to_string()));
        }
        if let Some(metric) = self.metric {
            let metric = match metric {
                MetricMode::CodeLines => "code_lines",
                MetricMode::Commits => "commits",
            };
            pairs.push(("productivity_metric", metric.to_string()));
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            pairs.push(("initial_date_string", format_day(start)?));
            pairs.push(("final_date_string", format_day(end)?));
        }
        if !self.languages.is_empty() {
            pairs.push(("languages_string", self.languages.join(",")));
        }
        Ok(pairs)
    }
}

fn format_day(date: Date) -> Result<String, CanaiError> {
    date.format(QUERY_DATE)
        .map_err(|e| CanaiError::invalid_request(format!("unformattable date {date}: {e}")))
}
