//! Totals and correlation over a filtered [`MetricSet`].
//!
//! | mode        | x                        | y                        |
//! |-------------|--------------------------|--------------------------|
//! | code lines  | assistant changed lines  | total changed lines      |
//! | commits     | total commits            | assistant changed lines  |

use canaicode_math::{mean, pearson, percent, safe_ratio};
use canaicode_types::{Correlation, MetricMode, MetricSet, Summary};
use tracing::debug;

/// The `(x, y)` series correlated for the set's mode.
///
/// Rows without `total_commits` count as zero commits in commit mode.
/// Commit rows without assistant line counts give a constant y series, so
/// their coefficient is 0.
pub fn correlation_series(set: &MetricSet) -> (Vec<f64>, Vec<f64>) {
    match set.mode {
        MetricMode::CodeLines => set
            .rows
            .iter()
            .map(|r| {
                (
                    r.net_changed_lines_by_assistant as f64,
                    r.net_changed_lines as f64,
                )
            })
            .unzip(),
        MetricMode::Commits => set
            .rows
            .iter()
            .map(|r| {
                (
                    r.total_commits.unwrap_or(0) as f64,
                    r.net_changed_lines_by_assistant as f64,
                )
            })
            .unzip(),
    }
}

/// Pearson coefficient for the set, or `NotComputable` when it is empty.
pub fn correlate(set: &MetricSet) -> Correlation {
    let (xs, ys) = correlation_series(set);
    let correlation = Correlation::from_raw(pearson(&xs, &ys));
    debug!(rows = set.len(), ?correlation, "computed correlation");
    correlation
}

/// Totals for the set's mode. Empty sets produce zeros, never NaN.
///
/// Sums are taken in 128-bit integers; the share is computed from the exact
/// sums and the reported totals saturate at the 64-bit bounds.
pub fn summarize(set: &MetricSet) -> Summary {
    let row_count = set.len();
    match set.mode {
        MetricMode::CodeLines => {
            let total_lines: i128 = set
                .rows
                .iter()
                .map(|r| i128::from(r.net_changed_lines))
                .sum();
            let total_assistant_lines: i128 = set
                .rows
                .iter()
                .map(|r| i128::from(r.net_changed_lines_by_assistant))
                .sum();
            Summary::CodeLines {
                row_count,
                total_lines: saturate_i64(total_lines),
                total_assistant_lines: saturate_i64(total_assistant_lines),
                assistant_percent: percent(safe_ratio(
                    total_assistant_lines as f64,
                    total_lines as f64,
                )),
            }
        }
        MetricMode::Commits => {
            let ratios: Vec<f64> = set.rows.iter().map(|r| r.assistant_ratio).collect();
            let total_commits: u128 = set
                .rows
                .iter()
                .filter_map(|r| r.total_commits)
                .map(u128::from)
                .sum();
            Summary::Commits {
                row_count,
                total_commits: u64::try_from(total_commits).unwrap_or(u64::MAX),
                average_assistant_percent: percent(mean(&ratios)),
            }
        }
    }
}

fn saturate_i64(sum: i128) -> i64 {
    i64::try_from(sum).unwrap_or(if sum < 0 { i64::MIN } else { i64::MAX })
}
