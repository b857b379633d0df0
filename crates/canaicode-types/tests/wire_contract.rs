//! The metrics backend owns the wire format; these fixtures pin the shapes
//! we accept from it.

use canaicode_types::{
    Correlation, FilterCriteria, LanguageMetrics, PeriodAcceptance, PeriodCode, RawDataset,
    Selection, Summary,
};
use serde_json::json;

#[test]
fn code_lines_response_deserializes() {
    let value = json!({
        "team": "backend-team",
        "programming_languages": ["Python", "Rust"],
        "period": "M",
        "data": [{
            "initial_date": "2024-01-01T00:00:00",
            "final_date": "2024-01-31T23:59:59",
            "net_changed_lines": 1200,
            "net_changed_lines_by_copilot": 300,
            "percentage_changed_lines_by_copilot": 0.25,
            "number_of_authors": 4
        }]
    });

    let dataset: RawDataset = serde_json::from_value(value).unwrap();
    assert_eq!(dataset.period, PeriodCode::Month);
    assert_eq!(dataset.languages, vec!["Python", "Rust"]);
    assert_eq!(dataset.data[0].net_changed_lines_by_copilot, 300);
    assert_eq!(dataset.data[0].total_commits, None);
}

#[test]
fn commit_response_deserializes_with_missing_line_fields() {
    let value = json!({
        "team": "data-team",
        "languages": [],
        "period": "W",
        "data": [{
            "initial_date": "2024-01-01",
            "final_date": "2024-01-07",
            "total_commits": 42,
            "percentage_copilot_suggestions_accepted": 0.4,
            "number_of_authors": 3
        }]
    });

    let dataset: RawDataset = serde_json::from_value(value).unwrap();
    let sample = &dataset.data[0];
    assert_eq!(sample.total_commits, Some(42));
    assert_eq!(sample.net_changed_lines, 0);
    assert_eq!(sample.percentage_changed_lines_by_copilot, 0.4);
}

#[test]
fn unknown_period_code_round_trips_verbatim() {
    let dataset: RawDataset =
        serde_json::from_value(json!({"team": "t", "period": "2W", "data": []})).unwrap();
    assert_eq!(dataset.period.label(), "2W");
    let back = serde_json::to_value(&dataset).unwrap();
    assert_eq!(back["period"], "2W");
}

#[test]
fn selection_wire_shape_separates_absent_from_empty() {
    let unset: FilterCriteria = serde_json::from_value(json!({})).unwrap();
    assert_eq!(unset.languages, Selection::All);

    let null: FilterCriteria = serde_json::from_value(json!({"languages": null})).unwrap();
    assert_eq!(null.languages, Selection::All);

    let empty: FilterCriteria = serde_json::from_value(json!({"languages": []})).unwrap();
    assert_eq!(empty.languages, Selection::nothing());

    let picked: FilterCriteria =
        serde_json::from_value(json!({"teams": ["data-team"], "author_count": 3})).unwrap();
    assert_eq!(picked.teams, Selection::only(["data-team"]));
    assert_eq!(picked.author_count, Some(3));
}

#[test]
fn default_criteria_serializes_to_empty_object() {
    let value = serde_json::to_value(FilterCriteria::default()).unwrap();
    assert_eq!(value, json!({}));
}

#[test]
fn language_and_period_payloads_deserialize() {
    let lang: LanguageMetrics = serde_json::from_value(json!({
        "language": "python",
        "code_acceptances": 10,
        "code_suggestions": 100,
        "lines_accepted": 20,
        "lines_suggested": 80,
        "percentage_code_acceptances": 10.0,
        "percentage_lines_accepted": 25.0
    }))
    .unwrap();
    assert_eq!(lang.code_suggestions, 100);

    let period: PeriodAcceptance = serde_json::from_value(json!({
        "period_initial_date": "2024-03-01T00:00:00",
        "period_final_date": "2024-03-31T00:00:00",
        "total_code_acceptances": 30,
        "percentage_code_acceptances": 0.3,
        "total_lines_accepted": 50,
        "percentage_lines_accepted": 0.5
    }))
    .unwrap();
    assert_eq!(period.total_lines_accepted, 50);
}

#[test]
fn correlation_serializes_with_explicit_status() {
    assert_eq!(
        serde_json::to_value(Correlation::NotComputable).unwrap(),
        json!({"status": "not_computable"})
    );
    assert_eq!(
        serde_json::to_value(Correlation::Coefficient(0.5)).unwrap(),
        json!({"status": "coefficient", "value": 0.5})
    );
}

#[test]
fn summary_is_tagged_by_mode() {
    let summary = Summary::Commits {
        row_count: 2,
        total_commits: 10,
        average_assistant_percent: 30.0,
    };
    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["mode"], "commits");
    assert_eq!(value["total_commits"], 10);
}
