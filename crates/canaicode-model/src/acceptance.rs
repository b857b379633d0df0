//! Suggested-vs-accepted series for the acceptance chart.
//!
//! The period endpoint reports accepted totals plus an acceptance ratio but
//! not the suggested totals, so those are reconstructed from the two.

use canaicode_types::{AcceptancePoint, AcceptanceSeries, PeriodAcceptance, PeriodCode};
use tracing::debug;

use crate::normalize::{NormalizeError, parse_utc};

/// `round(accepted / ratio)` when both are positive, otherwise `accepted`.
pub fn suggested_from_ratio(accepted: u64, ratio: f64) -> u64 {
    if accepted > 0 && ratio > 0.0 && ratio.is_finite() {
        (accepted as f64 / ratio).round() as u64
    } else {
        accepted
    }
}

/// Build the lines and code-completion series, one point per period,
/// labelled with the bucket size they were requested at.
pub fn acceptance_series(
    periods: &[PeriodAcceptance],
    period: &PeriodCode,
) -> Result<AcceptanceSeries, NormalizeError> {
    let mut series = AcceptanceSeries {
        period: period.label().to_string(),
        ..Default::default()
    };
    for period in periods {
        let period_start =
            parse_utc(&period.period_initial_date).ok_or_else(|| NormalizeError::InvalidDate {
                team: String::new(),
                field: "period_initial_date",
                value: period.period_initial_date.clone(),
            })?;

        series.lines.push(AcceptancePoint {
            period_start,
            suggested: suggested_from_ratio(
                period.total_lines_accepted,
                period.percentage_lines_accepted,
            ),
            accepted: period.total_lines_accepted,
        });
        series.suggestions.push(AcceptancePoint {
            period_start,
            suggested: suggested_from_ratio(
                period.total_code_acceptances,
                period.percentage_code_acceptances,
            ),
            accepted: period.total_code_acceptances,
        });
    }
    debug!(periods = periods.len(), period = %period, "built acceptance series");
    Ok(series)
}
