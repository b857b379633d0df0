//! BDD-style scenarios for the metrics pipeline.
//!
//! Each test reads as a Given/When/Then scenario exercising:
//! - Period normalisation and UTC dates
//! - Empty-means-all vs explicit empty selections
//! - Language aggregation (casing, ratio recomputation, ordering)
//! - Mode detection and correlation edge cases

use canaicode_model::{
    LanguageCatalog, aggregate_languages, correlate, filter_rows, normalize_datasets, summarize,
};
use canaicode_types::{
    Correlation, FilterCriteria, LanguageMetrics, MetricMode, PeriodCode, RawDataset, RawSample,
    Selection, Summary,
};

fn sample(start: &str, end: &str, total: i64, assisted: i64, authors: u32) -> RawSample {
    RawSample {
        initial_date: start.into(),
        final_date: end.into(),
        net_changed_lines: total,
        net_changed_lines_by_copilot: assisted,
        percentage_changed_lines_by_copilot: if total > 0 {
            assisted as f64 / total as f64
        } else {
            0.0
        },
        number_of_authors: authors,
        total_commits: None,
    }
}

fn commit_sample(start: &str, end: &str, commits: u64, ratio: f64) -> RawSample {
    RawSample {
        initial_date: start.into(),
        final_date: end.into(),
        total_commits: Some(commits),
        percentage_changed_lines_by_copilot: ratio,
        number_of_authors: 2,
        ..Default::default()
    }
}

fn dataset(team: &str, langs: &[&str], period: &str, data: Vec<RawSample>) -> RawDataset {
    RawDataset {
        team: team.into(),
        languages: langs.iter().map(|s| s.to_string()).collect(),
        period: PeriodCode::parse(period),
        data,
    }
}

fn fixture() -> Vec<RawDataset> {
    vec![
        dataset(
            "backend-team",
            &["Python", "Rust"],
            "M",
            vec![
                sample("2024-01-01", "2024-01-31", 1000, 200, 3),
                sample("2024-02-01", "2024-02-29", 1500, 450, 4),
            ],
        ),
        dataset(
            "frontend-team",
            &["TypeScript"],
            "M",
            vec![sample("2024-01-01", "2024-01-31", 800, 400, 3)],
        ),
    ]
}

fn lang(name: &str, acc: u64, sugg: u64) -> LanguageMetrics {
    LanguageMetrics {
        language: name.into(),
        code_acceptances: acc,
        code_suggestions: sugg,
        ..Default::default()
    }
}

// ========================
// Scenario: Normalisation
// ========================

#[test]
fn scenario_period_codes_become_display_labels() {
    // Given datasets with every known code plus one unknown code
    let datasets: Vec<RawDataset> = ["W", "M", "Q", "Y", "X"]
        .iter()
        .map(|code| dataset("t", &[], code, vec![sample("2024-01-01", "2024-01-02", 1, 0, 1)]))
        .collect();

    // When they are normalised
    let set = normalize_datasets(&datasets).unwrap();

    // Then the labels are the display names and the unknown code passes through
    let labels: Vec<&str> = set.rows.iter().map(|r| r.period.as_str()).collect();
    assert_eq!(labels, vec!["week", "month", "quarter", "year", "X"]);
}

#[test]
fn scenario_invalid_dates_surface_as_errors() {
    // Given a bucket whose start date is not a date
    let datasets = vec![dataset("t", &[], "M", vec![sample("soon", "2024-01-31", 1, 0, 1)])];

    // When it is normalised, Then an error names the offending field
    let err = normalize_datasets(&datasets).unwrap_err();
    assert!(err.to_string().contains("initial_date"), "{err}");
}

#[test]
fn scenario_assistant_lines_above_total_pass_through() {
    // Given a malformed bucket where assisted lines exceed the total
    let datasets = vec![dataset("t", &[], "M", vec![sample("2024-01-01", "2024-01-31", 10, 25, 1)])];

    // When it is normalised and summarised
    let set = normalize_datasets(&datasets).unwrap();
    let summary = summarize(&set);

    // Then the values are kept verbatim, not clamped
    assert_eq!(set.rows[0].net_changed_lines_by_assistant, 25);
    match summary {
        Summary::CodeLines { assistant_percent, .. } => assert_eq!(assistant_percent, 250.0),
        other => panic!("unexpected {other:?}"),
    }
}

// ========================
// Scenario: Filtering
// ========================

#[test]
fn scenario_unset_criteria_keep_every_row_in_order() {
    // Given a normalised fixture
    let set = normalize_datasets(&fixture()).unwrap();

    // When filtering with default criteria
    let filtered = filter_rows(&set, &FilterCriteria::default());

    // Then the output equals the input
    assert_eq!(filtered, set);
}

#[test]
fn scenario_explicitly_empty_language_selection_shows_nothing() {
    // Given a normalised fixture
    let set = normalize_datasets(&fixture()).unwrap();

    // When the user deselects every language
    let criteria = FilterCriteria {
        languages: Selection::nothing(),
        ..Default::default()
    };
    let filtered = filter_rows(&set, &criteria);

    // Then no row passes
    assert!(filtered.is_empty());
}

#[test]
fn scenario_combined_criteria_are_anded() {
    // Given a normalised fixture
    let set = normalize_datasets(&fixture()).unwrap();

    // When filtering on a language, a team, and an author count
    let criteria = FilterCriteria {
        languages: Selection::only(["Rust", "Go"]),
        teams: Selection::only(["backend-team"]),
        author_count: Some(4),
        ..Default::default()
    };
    let filtered = filter_rows(&set, &criteria);

    // Then only the February backend bucket remains
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.rows[0].net_changed_lines, 1500);
}

#[test]
fn scenario_date_bounds_use_period_start_and_end() {
    // Given a normalised fixture
    let set = normalize_datasets(&fixture()).unwrap();

    // When the lower bound is the 1st of February
    let criteria = FilterCriteria {
        date_lower_bound: canaicode_model::parse_utc("2024-02-01"),
        ..Default::default()
    };
    let filtered = filter_rows(&set, &criteria);

    // Then only buckets starting on or after it remain
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.rows[0].team, "backend-team");
}

#[test]
fn scenario_everything_filtered_out_is_just_empty() {
    let set = normalize_datasets(&fixture()).unwrap();
    let criteria = FilterCriteria {
        teams: Selection::only(["nobody"]),
        ..Default::default()
    };
    let filtered = filter_rows(&set, &criteria);
    assert!(filtered.is_empty());
    assert_eq!(correlate(&filtered), Correlation::NotComputable);
}

// ========================
// Scenario: Aggregation
// ========================

#[test]
fn scenario_equal_ratios_aggregate_to_the_same_ratio() {
    // Given two Python records at 10% each
    let records = [lang("Python", 10, 100), lang("Python", 5, 50)];

    // When aggregated
    let buckets = aggregate_languages(&records, &LanguageCatalog::default());

    // Then sums are combined and the ratio is 15/150
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].code_acceptances, 15);
    assert_eq!(buckets[0].code_suggestions, 150);
    assert!((canaicode_math::percent(buckets[0].code_acceptance_ratio) - 10.0).abs() < 1e-9);
}

#[test]
fn scenario_differing_ratios_are_not_averaged() {
    // Given Python records at 10% and 40%
    let records = [lang("Python", 10, 100), lang("Python", 20, 50)];

    // When aggregated
    let buckets = aggregate_languages(&records, &LanguageCatalog::default());

    // Then the ratio is 30/150 = 20%, not the naive 25% average
    let pct = canaicode_math::percent(buckets[0].code_acceptance_ratio);
    assert!((pct - 20.0).abs() < 1e-9, "got {pct}");
}

#[test]
fn scenario_language_casing_is_merged_into_canonical_name() {
    let records = [lang("python", 1, 10), lang("Python", 1, 10), lang("PYTHON", 1, 10)];
    let buckets = aggregate_languages(&records, &LanguageCatalog::default());
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].language, "Python");
    assert_eq!(buckets[0].code_suggestions, 30);
}

#[test]
fn scenario_buckets_sort_by_volume_keeping_ties_stable() {
    // Given Rust and Go with equal volume, Java with more
    let records = [lang("Rust", 1, 50), lang("Go", 1, 50), lang("Java", 1, 90)];

    // When aggregated
    let buckets = aggregate_languages(&records, &LanguageCatalog::default());

    // Then Java leads and Rust stays ahead of Go
    let names: Vec<&str> = buckets.iter().map(|b| b.language.as_str()).collect();
    assert_eq!(names, vec!["Java", "Rust", "Go"]);
}

#[test]
fn scenario_no_language_records_is_no_buckets() {
    let buckets = aggregate_languages(&[], &LanguageCatalog::default());
    assert!(buckets.is_empty());
}

// ========================
// Scenario: Mode detection
// ========================

#[test]
fn scenario_all_commit_rows_select_commit_mode() {
    let datasets = vec![dataset(
        "t",
        &[],
        "W",
        vec![
            commit_sample("2024-01-01", "2024-01-07", 10, 0.2),
            commit_sample("2024-01-08", "2024-01-14", 20, 0.4),
        ],
    )];
    let set = normalize_datasets(&datasets).unwrap();
    assert_eq!(set.mode, MetricMode::Commits);
    match summarize(&set) {
        Summary::Commits {
            total_commits,
            average_assistant_percent,
            ..
        } => {
            assert_eq!(total_commits, 30);
            assert!((average_assistant_percent - 30.0).abs() < 1e-9);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn scenario_no_commit_rows_select_lines_mode() {
    let set = normalize_datasets(&fixture()).unwrap();
    assert_eq!(set.mode, MetricMode::CodeLines);
    assert_eq!(summarize(&set).mode(), MetricMode::CodeLines);
}

#[test]
fn scenario_mixed_rows_select_commit_mode_when_any_row_has_commits() {
    // Given one lines bucket followed by one commit bucket
    let datasets = vec![dataset(
        "t",
        &[],
        "W",
        vec![
            sample("2024-01-01", "2024-01-07", 100, 10, 1),
            commit_sample("2024-01-08", "2024-01-14", 20, 0.4),
        ],
    )];

    // When normalised
    let set = normalize_datasets(&datasets).unwrap();

    // Then the set is in commit mode and the lines row counts as zero commits
    assert_eq!(set.mode, MetricMode::Commits);
    match summarize(&set) {
        Summary::Commits { total_commits, row_count, .. } => {
            assert_eq!(total_commits, 20);
            assert_eq!(row_count, 2);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn scenario_single_bucket_has_zero_not_missing_correlation() {
    let datasets = vec![dataset("t", &[], "M", vec![sample("2024-01-01", "2024-01-31", 10, 5, 1)])];
    let set = normalize_datasets(&datasets).unwrap();
    assert_eq!(correlate(&set), Correlation::Coefficient(0.0));
}
