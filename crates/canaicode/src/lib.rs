//! # canaicode
//!
//! **CLI Binary**
//!
//! This is the entry point for the `canaicode` command-line application.
//! It orchestrates the other crates to perform the requested actions.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Load configuration
//! * Initialise logging
//! * Dispatch commands to appropriate handlers
//! * Handle errors and exit codes
//!
//! This crate should contain minimal business logic.

pub mod cli;
mod commands;
pub mod config;
mod error_hints;
mod logging;

use anyhow::Result;
use clap::Parser;

pub use config::{ResolvedConfig, filter_overrides, load_config, resolve_filters, resolve_output};

/// Entry point used by the `canaicode` binary.
pub fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    logging::init_tracing(cli.global.verbose);

    let resolved = load_config(cli.global.config.as_deref())?;
    commands::dispatch(cli.command, &resolved)
}

/// Render an error and any matching hints for stderr.
pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}
