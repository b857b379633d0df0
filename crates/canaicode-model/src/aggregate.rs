//! Language aggregation across source records.
//!
//! Several sources may report the same language, possibly with different
//! casing. Records are grouped by canonical name, counts are summed, and
//! ratios are recomputed from the sums. Source percentages are discarded.

use std::collections::BTreeMap;

use canaicode_math::{mean, percent, safe_ratio};
use canaicode_types::{LanguageBucket, LanguageMetrics, LanguageOverview};
use tracing::debug;

/// Languages the dashboard knows by name, in their canonical casing.
pub const KNOWN_LANGUAGES: [&str; 25] = [
    "Python",
    "Java",
    "JavaScript",
    "C",
    "C++",
    "C#",
    "Golang",
    "Rust",
    "Swift",
    "Kotlin",
    "PHP",
    "Ruby",
    "Dart",
    "Scala",
    "Julia",
    "Haskell",
    "Erlang",
    "Clojure",
    "Bash",
    "Perl",
    "PowerShell",
    "Lua",
    "VBA",
    "R",
    "TypeScript",
];

/// Case-insensitive whitelist of canonical language names.
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    by_key: BTreeMap<String, String>,
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::new(KNOWN_LANGUAGES)
    }
}

impl LanguageCatalog {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            by_key: BTreeMap::new(),
        }
        .with_extra(names)
    }

    /// Add more canonical names. A later name with the same key wins.
    pub fn with_extra<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            self.by_key.insert(lookup_key(name), name.to_string());
        }
        self
    }

    /// Canonical casing for a known name; unknown names come back unchanged.
    pub fn canonical(&self, name: &str) -> String {
        let trimmed = name.trim();
        self.by_key
            .get(&lookup_key(trimmed))
            .cloned()
            .unwrap_or_else(|| trimmed.to_string())
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.by_key.contains_key(&lookup_key(name.trim()))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

fn lookup_key(name: &str) -> String {
    name.to_lowercase()
}

/// Per-language sums, wide enough that backend counts cannot overflow.
#[derive(Default)]
struct Agg {
    code_acceptances: u128,
    code_suggestions: u128,
    lines_accepted: u128,
    lines_suggested: u128,
}

fn saturate(sum: u128) -> u64 {
    u64::try_from(sum).unwrap_or(u64::MAX)
}

/// Group language records by canonical name and recompute ratios.
///
/// Buckets are ordered by `code_suggestions` descending. The sort is stable,
/// so equal volumes keep first-seen order.
pub fn aggregate_languages(records: &[LanguageMetrics], catalog: &LanguageCatalog) -> Vec<LanguageBucket> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: BTreeMap<String, Agg> = BTreeMap::new();

    for record in records {
        let language = catalog.canonical(&record.language);
        let entry = groups.entry(language.clone()).or_insert_with(|| {
            order.push(language);
            Agg::default()
        });
        entry.code_acceptances += u128::from(record.code_acceptances);
        entry.code_suggestions += u128::from(record.code_suggestions);
        entry.lines_accepted += u128::from(record.lines_accepted);
        entry.lines_suggested += u128::from(record.lines_suggested);
    }

    // Ratios come from the exact sums; stored counts saturate at u64::MAX.
    let mut keyed: Vec<(u128, LanguageBucket)> = order
        .into_iter()
        .filter_map(|language| {
            let agg = groups.remove(&language)?;
            let bucket = LanguageBucket {
                code_acceptance_ratio: safe_ratio(
                    agg.code_acceptances as f64,
                    agg.code_suggestions as f64,
                ),
                lines_acceptance_ratio: safe_ratio(
                    agg.lines_accepted as f64,
                    agg.lines_suggested as f64,
                ),
                language,
                code_acceptances: saturate(agg.code_acceptances),
                code_suggestions: saturate(agg.code_suggestions),
                lines_accepted: saturate(agg.lines_accepted),
                lines_suggested: saturate(agg.lines_suggested),
            };
            Some((agg.code_suggestions, bucket))
        })
        .collect();

    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    let buckets: Vec<LanguageBucket> = keyed.into_iter().map(|(_, bucket)| bucket).collect();

    debug!(
        records = records.len(),
        buckets = buckets.len(),
        "aggregated language metrics"
    );
    buckets
}

/// Language count, mean acceptance and the best-accepted language.
///
/// Ties for the top spot go to the bucket that comes first.
pub fn language_overview(buckets: &[LanguageBucket]) -> LanguageOverview {
    let percents: Vec<f64> = buckets
        .iter()
        .map(|b| percent(b.code_acceptance_ratio))
        .collect();

    let mut top: Option<(&LanguageBucket, f64)> = None;
    for (bucket, pct) in buckets.iter().zip(&percents) {
        match top {
            Some((_, best)) if *pct <= best => {}
            _ => top = Some((bucket, *pct)),
        }
    }

    LanguageOverview {
        total_languages: buckets.len(),
        average_acceptance_percent: mean(&percents),
        top_language: top.map(|(b, _)| b.language.clone()),
        top_acceptance_percent: top.map(|(_, p)| p).unwrap_or(0.0),
    }
}
