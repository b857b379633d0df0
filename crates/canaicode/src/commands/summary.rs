use anyhow::{Context, Result};
use canaicode_core::{JsonFileSource, build_dashboard};
use canaicode_format as format;
use tracing::info;

use crate::cli::SummaryArgs;
use crate::commands::emit;
use crate::config::{self, ResolvedConfig};

pub(crate) fn handle(args: SummaryArgs, resolved: &ResolvedConfig) -> Result<()> {
    let filters = config::resolve_filters(&args.filters, resolved);
    let output = config::resolve_output(&args.output, resolved);
    let criteria = filters.to_criteria().context("Invalid filter")?;

    let datasets = JsonFileSource::new(&args.inputs).read_datasets()?;
    let report = build_dashboard(&datasets, &criteria)?;
    info!(rows = report.rows.len(), mode = ?report.mode, "summary ready");

    emit(&format::render_summary(
        &report,
        output.format,
        output.decimals,
    )?)
}
