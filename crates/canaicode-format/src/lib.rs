//! # canaicode-format
//!
//! **Tier 3 (Formatting)**
//!
//! Rendering of pipeline reports as Markdown tables or JSON receipts.
//!
//! Dates are always printed as `YYYY-MM-DD` of the UTC instant. Rendering in
//! a local zone would move midnight-UTC bucket boundaries to the previous day.
//!
//! ## What does NOT belong here
//! * Calculating totals or coefficients
//! * CLI arg parsing

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use canaicode_math::{MAX_DECIMALS, clamp_unit, percent, round_f64};
use canaicode_types::{
    AcceptancePoint, AcceptanceSeries, Correlation, DashboardReport, LanguageReport, MetricMode,
    OutputFormat, Receipt, SCHEMA_VERSION, Summary, ToolInfo,
};
use serde::Serialize;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

const DAY: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// `YYYY-MM-DD` of the instant in UTC.
pub fn utc_day(instant: OffsetDateTime) -> String {
    let utc = instant.to_offset(UtcOffset::UTC);
    utc.format(DAY).unwrap_or_else(|_| utc.date().to_string())
}

/// Human label for a coefficient; never renders a missing value as `0`.
pub fn correlation_label(correlation: &Correlation, decimals: u32) -> String {
    match correlation {
        Correlation::Coefficient(v) => {
            format!("{:.*}", precision(decimals), round_f64(clamp_unit(*v), decimals))
        }
        Correlation::NotComputable => "no correlation available".to_string(),
    }
}

/// Which two series the coefficient relates, for captions.
pub fn correlation_subject(mode: MetricMode) -> &'static str {
    match mode {
        MetricMode::CodeLines => "Copilot changed lines vs total changed lines",
        MetricMode::Commits => "total commits vs Copilot changed lines",
    }
}

fn precision(decimals: u32) -> usize {
    decimals.min(MAX_DECIMALS) as usize
}

fn pct(value: f64, decimals: u32) -> String {
    format!("{:.*}%", precision(decimals), round_f64(value, decimals))
}

/// Wrap a report in the JSON envelope.
pub fn receipt<T: Serialize>(kind: &str, report: T) -> Receipt<T> {
    Receipt {
        schema_version: SCHEMA_VERSION,
        generated_at_ms: now_ms(),
        tool: ToolInfo::current(),
        kind: kind.to_string(),
        report,
    }
}

// -----------------------
// Dashboard summary
// -----------------------

pub fn render_summary(
    report: &DashboardReport,
    format: OutputFormat,
    decimals: u32,
) -> Result<String> {
    match format {
        OutputFormat::Md => Ok(render_summary_md(report, decimals)),
        OutputFormat::Json => Ok(serde_json::to_string(&receipt("summary", report))?),
    }
}

pub fn render_summary_md(report: &DashboardReport, decimals: u32) -> String {
    let mut s = String::new();

    s.push_str("|Metric|Value|\n");
    s.push_str("|---|---:|\n");
    s.push_str(&format!("|Buckets|{}|\n", report.summary.row_count()));
    match &report.summary {
        Summary::CodeLines {
            total_lines,
            total_assistant_lines,
            assistant_percent,
            ..
        } => {
            s.push_str(&format!("|Total changed lines|{}|\n", total_lines));
            s.push_str(&format!(
                "|Copilot changed lines|{}|\n",
                total_assistant_lines
            ));
            s.push_str(&format!(
                "|Copilot share|{}|\n",
                pct(*assistant_percent, decimals)
            ));
        }
        Summary::Commits {
            total_commits,
            average_assistant_percent,
            ..
        } => {
            s.push_str(&format!("|Total commits|{}|\n", total_commits));
            s.push_str(&format!(
                "|Average Copilot share|{}|\n",
                pct(*average_assistant_percent, decimals)
            ));
        }
    }
    s.push_str(&format!(
        "|Correlation ({})|{}|\n",
        correlation_subject(report.mode),
        correlation_label(&report.correlation, decimals)
    ));

    if report.rows.is_empty() {
        return s;
    }

    s.push('\n');
    let volume = match report.mode {
        MetricMode::CodeLines => "Changed",
        MetricMode::Commits => "Commits",
    };
    s.push_str(&format!(
        "|Start|End|Team|Period|Languages|{volume}|Copilot|Share|Authors|\n"
    ));
    s.push_str("|---|---|---|---|---|---:|---:|---:|---:|\n");
    for r in &report.rows {
        let volume = match report.mode {
            MetricMode::CodeLines => r.net_changed_lines.to_string(),
            MetricMode::Commits => r.total_commits.unwrap_or(0).to_string(),
        };
        s.push_str(&format!(
            "|{}|{}|{}|{}|{}|{}|{}|{}|{}|\n",
            utc_day(r.period_start),
            utc_day(r.period_end),
            r.team,
            r.period,
            r.languages.join(", "),
            volume,
            r.net_changed_lines_by_assistant,
            pct(percent(r.assistant_ratio), decimals),
            r.number_of_authors
        ));
    }
    s
}

// -----------------------
// Language analytics
// -----------------------

pub fn render_languages(
    report: &LanguageReport,
    format: OutputFormat,
    decimals: u32,
) -> Result<String> {
    match format {
        OutputFormat::Md => Ok(render_languages_md(report, decimals)),
        OutputFormat::Json => Ok(serde_json::to_string(&receipt("languages", report))?),
    }
}

pub fn render_languages_md(report: &LanguageReport, decimals: u32) -> String {
    let mut s = String::new();
    s.push_str("|Lang|Accepted|Suggested|Acceptance|Lines accepted|Lines suggested|Line acceptance|\n");
    s.push_str("|---|---:|---:|---:|---:|---:|---:|\n");
    for b in &report.buckets {
        s.push_str(&format!(
            "|{}|{}|{}|{}|{}|{}|{}|\n",
            b.language,
            b.code_acceptances,
            b.code_suggestions,
            pct(percent(b.code_acceptance_ratio), decimals),
            b.lines_accepted,
            b.lines_suggested,
            pct(percent(b.lines_acceptance_ratio), decimals),
        ));
    }

    let o = &report.overview;
    s.push('\n');
    s.push_str(&format!("Languages: {}\n", o.total_languages));
    s.push_str(&format!(
        "Average acceptance: {}\n",
        pct(o.average_acceptance_percent, decimals)
    ));
    match &o.top_language {
        Some(lang) => s.push_str(&format!(
            "Highest acceptance: {} ({})\n",
            lang,
            pct(o.top_acceptance_percent, decimals)
        )),
        None => s.push_str("Highest acceptance: N/A\n"),
    }
    s
}

// -----------------------
// Acceptance chart data
// -----------------------

pub fn render_acceptance(
    series: &AcceptanceSeries,
    format: OutputFormat,
    decimals: u32,
) -> Result<String> {
    match format {
        OutputFormat::Md => Ok(render_acceptance_md(series, decimals)),
        OutputFormat::Json => Ok(serde_json::to_string(&receipt("acceptance", series))?),
    }
}

pub fn render_acceptance_md(series: &AcceptanceSeries, decimals: u32) -> String {
    let per = if series.period.is_empty() {
        String::new()
    } else {
        format!(" per {}", series.period)
    };
    let mut s = String::new();
    s.push_str(&format!("Lines of code{per}\n\n"));
    push_acceptance_table(&mut s, &series.lines, decimals);
    s.push_str(&format!("\nCode suggestions{per}\n\n"));
    push_acceptance_table(&mut s, &series.suggestions, decimals);
    s
}

fn push_acceptance_table(s: &mut String, points: &[AcceptancePoint], decimals: u32) {
    s.push_str("|Period|Suggested|Accepted|Acceptance|\n");
    s.push_str("|---|---:|---:|---:|\n");
    for p in points {
        let rate = canaicode_math::safe_ratio(p.accepted as f64, p.suggested as f64);
        s.push_str(&format!(
            "|{}|{}|{}|{}|\n",
            utc_day(p.period_start),
            p.suggested,
            p.accepted,
            pct(percent(rate), decimals)
        ));
    }
}
