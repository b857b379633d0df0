//! Command-line surface.

use std::path::PathBuf;

use canaicode_settings::MAX_DECIMALS;
use canaicode_types::OutputFormat;
use clap::{ArgAction, Args, Parser, Subcommand};

/// Copilot adoption analytics over exported metrics.
#[derive(Parser, Debug)]
#[command(name = "canaicode", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings file. Defaults to ./canaicode.toml when present.
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Totals and correlation for calculated-metrics exports.
    Summary(SummaryArgs),
    /// Per-language acceptance, merged across sources.
    Languages(LanguagesArgs),
    /// Suggested vs accepted series per period.
    Acceptance(AcceptanceArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format [default: md].
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Decimal places for percentages and coefficients, 0 to 15 [default: 2].
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_DECIMALS)))]
    pub decimals: Option<u32>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Keep buckets tagged with any of these languages (repeatable).
    #[arg(long = "language", value_name = "LANG", conflicts_with = "no_languages")]
    pub languages: Vec<String>,

    /// Select no language at all; every bucket is filtered out.
    #[arg(long)]
    pub no_languages: bool,

    /// Keep buckets from these teams (repeatable).
    #[arg(long = "team", value_name = "TEAM")]
    pub teams: Vec<String>,

    /// Period label (`week`) or code (`W`).
    #[arg(long)]
    pub period: Option<String>,

    /// First day included, YYYY-MM-DD (UTC).
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Last day included, YYYY-MM-DD (UTC).
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Exact number of authors.
    #[arg(long)]
    pub authors: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    /// Calculated-metrics JSON export(s).
    #[arg(long = "input", value_name = "FILE", required = true)]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct LanguagesArgs {
    /// Language metrics JSON export(s), one per source.
    #[arg(long = "input", value_name = "FILE", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Extra canonical language names (repeatable).
    #[arg(long = "known", value_name = "LANG")]
    pub known: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct AcceptanceArgs {
    /// Copilot-by-period JSON export.
    #[arg(long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Bucket size the export was requested with (D, W, M, Q, Y); labels the tables.
    #[arg(long, default_value = "M")]
    pub period: String,

    #[command(flatten)]
    pub output: OutputArgs,
}
