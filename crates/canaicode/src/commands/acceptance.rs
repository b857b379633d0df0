use anyhow::Result;
use canaicode_core::types::PeriodCode;
use canaicode_core::{JsonFileSource, SessionContext, acceptance_workflow};
use canaicode_format as format;

use crate::cli::AcceptanceArgs;
use crate::commands::emit;
use crate::config::{self, ResolvedConfig};

pub(crate) fn handle(args: AcceptanceArgs, resolved: &ResolvedConfig) -> Result<()> {
    let output = config::resolve_output(&args.output, resolved);
    let period = PeriodCode::parse(args.period.trim());

    let source = JsonFileSource::new([args.input]);
    let series = acceptance_workflow(&source, &SessionContext::default(), &period)?;

    emit(&format::render_acceptance(
        &series,
        output.format,
        output.decimals,
    )?)
}
