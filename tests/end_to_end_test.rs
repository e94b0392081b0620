// ABOUTME: End-to-end tests for the performance engine facade
// ABOUTME: Runs a full player analysis from a JSON snapshot and checks every report section
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::synthetic_data::{daily_series, reference_time, PlayerPattern, SyntheticSeriesBuilder};
use helpers::test_utils::RecordingObserver;
use serde_json::json;
use skillpulse::errors::ErrorCode;
use skillpulse::intelligence::{IntelligenceConfig, PlayerPreferences, Priority};
use skillpulse::models::{MetricSeries, PerformanceHistory};
use skillpulse::{PerformanceEngine, PlayerSnapshot};
use std::collections::BTreeMap;
use std::sync::Arc;

const SLUMP: [f64; 15] = [
    70.0, 71.0, 69.0, 70.0, 68.0, 70.0, 71.0, 70.0, 69.0, 71.0, 70.0, 69.0, 40.0, 40.0, 40.0,
];

fn snapshot() -> PlayerSnapshot {
    let mut builder = SyntheticSeriesBuilder::new(42);
    let history = PerformanceHistory::new()
        .with_series(daily_series("accuracy", &SLUMP))
        .with_series(builder.generate("teamwork", PlayerPattern::Improving, 20, 6.0, 0.1))
        .with_series(builder.irregular("decision_making", 12, 7.0, 0.5));

    PlayerSnapshot {
        history,
        current_values: BTreeMap::from([
            ("accuracy".to_owned(), 40.0),
            ("teamwork".to_owned(), 16.0),
            ("decision_making".to_owned(), 7.0),
        ]),
        targets: BTreeMap::from([("teamwork".to_owned(), 15.0)]),
        preferences: PlayerPreferences {
            preferred_practice_time: Some("mornings".to_owned()),
        },
    }
}

#[test]
fn test_full_player_analysis() {
    let observer = Arc::new(RecordingObserver::default());
    let engine =
        PerformanceEngine::with_observer(IntelligenceConfig::default(), observer.clone()).unwrap();
    let analysis = engine.analyze_player_at(&snapshot(), reference_time()).unwrap();

    assert_eq!(analysis.reference_time, reference_time());
    assert_eq!(analysis.performance.len(), 3);
    assert_eq!(analysis.progress.len(), 3);

    // Accuracy slumped sharply and leads the recommendations
    assert_eq!(analysis.recommendations[0].metric, "accuracy");
    assert_eq!(analysis.recommendations[0].priority, Priority::High);
    assert!(analysis
        .recommendations
        .iter()
        .all(|r| r.metric != "teamwork"));

    // Teamwork passed its supplied target
    let teamwork = &analysis.progress["teamwork"];
    assert!((teamwork.milestone_progress.total_progress - 100.0).abs() < f64::EPSILON);
    assert!(analysis
        .summary
        .recent_milestones
        .iter()
        .any(|m| m.metric == "teamwork"));
    assert!(analysis.summary.overall_progress > 0.0);
    assert!(analysis.summary.overall_progress <= 100.0);

    // Accuracy is well below its short-term average
    assert!(analysis
        .summary
        .areas_of_concern
        .iter()
        .any(|c| c.metric == "accuracy"));
    let accuracy = analysis
        .suggestions
        .iter()
        .find(|s| s.metric == "accuracy")
        .unwrap();
    assert_eq!(accuracy.priority, Priority::High);

    assert!(observer.has_event("batch:analyze_performance:3"));
    assert!(observer.has_event("batch:track_progress:3"));
    assert!(observer.has_event("outliers:accuracy:3/15"));
}

#[test]
fn test_analysis_is_deterministic_for_fixed_reference() {
    let engine = PerformanceEngine::new(IntelligenceConfig::default()).unwrap();
    let first = engine.analyze_player_at(&snapshot(), reference_time()).unwrap();
    let second = engine.analyze_player_at(&snapshot(), reference_time()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_snapshot_from_json() {
    let payload = json!({
        "history": {
            "series": {
                "reaction_time": {
                    "metric": "reaction_time",
                    "points": [
                        { "timestamp": "2025-05-29T00:00:00Z", "value": 260.0 },
                        { "timestamp": "2025-05-30T00:00:00Z", "value": 255.0 },
                        { "timestamp": "2025-05-31T00:00:00Z", "value": 250.0 }
                    ]
                }
            }
        },
        "current_values": { "reaction_time": 245.0 }
    });
    let snapshot: PlayerSnapshot = serde_json::from_value(payload).unwrap();
    assert!(snapshot.targets.is_empty());
    assert_eq!(snapshot.preferences, PlayerPreferences::default());

    let engine = PerformanceEngine::new(IntelligenceConfig::default()).unwrap();
    let analysis = engine.analyze_player_at(&snapshot, reference_time()).unwrap();
    let report = &analysis.progress["reaction_time"];
    assert!((report.target_value - 196.0).abs() < 1e-9);

    let rendered = serde_json::to_value(&analysis).unwrap();
    assert_eq!(rendered["progress"]["reaction_time"]["polarity"], "lower_better");
    assert_eq!(
        rendered["progress"]["reaction_time"]["trend_analysis"]["short_term"]["direction"],
        "improving"
    );
    assert!(rendered["summary"]["key_improvements"].is_array());
}

#[test]
fn test_snapshot_with_unsorted_points_is_rejected() {
    let payload = json!({
        "history": {
            "series": {
                "accuracy": {
                    "metric": "accuracy",
                    "points": [
                        { "timestamp": "2025-05-30T00:00:00Z", "value": 70.0 },
                        { "timestamp": "2025-05-29T00:00:00Z", "value": 71.0 }
                    ]
                }
            }
        },
        "current_values": { "accuracy": 72.0 }
    });
    assert!(serde_json::from_value::<PlayerSnapshot>(payload).is_err());
}

#[test]
fn test_snapshot_with_mismatched_history_key_is_rejected() {
    let payload = json!({
        "history": {
            "series": {
                "reaction_time": {
                    "metric": "accuracy",
                    "points": [
                        { "timestamp": "2025-05-30T00:00:00Z", "value": 250.0 },
                        { "timestamp": "2025-05-31T00:00:00Z", "value": 240.0 }
                    ]
                }
            }
        },
        "current_values": { "reaction_time": 230.0 }
    });
    let error = serde_json::from_value::<PlayerSnapshot>(payload).unwrap_err();
    assert!(error.to_string().contains("reaction_time"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = IntelligenceConfig::default();
    config.tracking.num_milestones = 0;
    let error = PerformanceEngine::new(config).err().unwrap();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
}

#[test]
fn test_classify_empty_series_is_insufficient_data() {
    let engine = PerformanceEngine::new(IntelligenceConfig::default()).unwrap();
    let series = MetricSeries::new("accuracy", Vec::new()).unwrap();
    let error = engine.classify(&series).unwrap_err();
    assert_eq!(error.code, ErrorCode::InsufficientData);
}

#[test]
fn test_non_finite_current_value_fails_analysis() {
    let engine = PerformanceEngine::new(IntelligenceConfig::default()).unwrap();
    let mut snapshot = snapshot();
    snapshot
        .current_values
        .insert("accuracy".to_owned(), f64::INFINITY);
    let error = engine
        .analyze_player_at(&snapshot, reference_time())
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}
