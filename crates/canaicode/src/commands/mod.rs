pub(crate) mod acceptance;
pub(crate) mod languages;
pub(crate) mod summary;

use std::io::Write;

use anyhow::{Context, Result};

use crate::cli::Commands;
use crate::config::ResolvedConfig;

pub(crate) fn dispatch(command: Commands, resolved: &ResolvedConfig) -> Result<()> {
    match command {
        Commands::Summary(args) => summary::handle(args, resolved),
        Commands::Languages(args) => languages::handle(args, resolved),
        Commands::Acceptance(args) => acceptance::handle(args, resolved),
    }
}

/// Write rendered output to stdout, newline-terminated.
pub(crate) fn emit(rendered: &str) -> Result<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(rendered.as_bytes())
        .context("Failed to write output")?;
    if !rendered.ends_with('\n') {
        out.write_all(b"\n").context("Failed to write output")?;
    }
    Ok(())
}
