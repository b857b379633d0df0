//! Settings resolution: CLI flags over the settings file over defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use canaicode_settings::{FilterSettings, OutputSettings, Settings};
use canaicode_types::Selection;
use tracing::debug;

use crate::cli::{FilterArgs, OutputArgs};

/// File picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "canaicode.toml";

/// Settings after loading, with the file they came from.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub settings: Settings,
    pub path: Option<PathBuf>,
}

/// Load settings from `explicit`, or from `./canaicode.toml` if it exists.
///
/// An explicit path that cannot be read is an error; a missing default file
/// is not.
pub fn load_config(explicit: Option<&Path>) -> Result<ResolvedConfig> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => {
            let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
            candidate.is_file().then_some(candidate)
        }
    };

    let Some(path) = path else {
        debug!("no settings file, using defaults");
        return Ok(ResolvedConfig::default());
    };

    let settings = Settings::from_file(&path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    debug!(path = %path.display(), "loaded settings");
    Ok(ResolvedConfig {
        settings,
        path: Some(path),
    })
}

/// CLI filter flags as a settings overlay.
pub fn filter_overrides(args: &FilterArgs) -> FilterSettings {
    let languages = if args.no_languages {
        Selection::nothing()
    } else if args.languages.is_empty() {
        Selection::All
    } else {
        Selection::only(args.languages.iter().cloned())
    };
    let teams = if args.teams.is_empty() {
        Selection::All
    } else {
        Selection::only(args.teams.iter().cloned())
    };

    FilterSettings {
        languages,
        teams,
        period: args.period.clone(),
        from: args.from.clone(),
        to: args.to.clone(),
        authors: args.authors,
    }
}

pub fn resolve_filters(args: &FilterArgs, resolved: &ResolvedConfig) -> FilterSettings {
    resolved.settings.filters.overlay(&filter_overrides(args))
}

pub fn resolve_output(args: &OutputArgs, resolved: &ResolvedConfig) -> OutputSettings {
    let file = &resolved.settings.output;
    OutputSettings {
        format: args.format.unwrap_or(file.format),
        decimals: args.decimals.unwrap_or(file.decimals),
    }
}
