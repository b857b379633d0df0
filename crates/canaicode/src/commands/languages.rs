use anyhow::Result;
use canaicode_core::{JsonFileSource, SessionContext, catalog_from_settings, language_workflow};
use canaicode_format as format;

use crate::cli::LanguagesArgs;
use crate::commands::emit;
use crate::config::{self, ResolvedConfig};

pub(crate) fn handle(args: LanguagesArgs, resolved: &ResolvedConfig) -> Result<()> {
    let output = config::resolve_output(&args.output, resolved);
    let catalog = catalog_from_settings(&resolved.settings.catalog).with_extra(args.known);

    let source = JsonFileSource::new(&args.inputs);
    let report = language_workflow(&source, &SessionContext::default(), &catalog)?;

    emit(&format::render_languages(
        &report,
        output.format,
        output.decimals,
    )?)
}
