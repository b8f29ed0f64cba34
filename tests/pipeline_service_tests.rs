// Integration tests for the startup pipeline and prediction path
//
// Covers:
// - Sample dataset → record store → frozen aggregate snapshot
// - Aggregate invariants over a realistic (non-toy) dataset
// - Prediction service end-to-end with cache behavior

use riskboard::dataset::{default_schema, generate_sample_records, risk_weights};
use riskboard::models::aggregates::RiskCategory;
use riskboard::services::aggregation::AggregateSnapshot;
use riskboard::services::classifier::create_classifier;
use riskboard::services::prediction::PredictionService;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

fn sample_snapshot(size: usize, seed: u64) -> AggregateSnapshot {
    let store = generate_sample_records(default_schema(), size, seed).unwrap();
    AggregateSnapshot::build(&store).unwrap()
}

#[test]
fn test_pipeline_is_deterministic_over_sample_data() {
    let a = sample_snapshot(500, 42);
    let b = sample_snapshot(500, 42);
    assert_eq!(a, b);
}

#[test]
fn test_age_risk_entries_come_in_pairs() {
    let snapshot = sample_snapshot(500, 42);
    let entries = snapshot.age_risk();
    assert!(!entries.is_empty());
    assert_eq!(entries.len() % 2, 0);

    // 每个年龄恰好一条高风险、一条低风险，且只含数据中出现的年龄
    let ages: BTreeSet<u32> = entries.iter().map(|e| e.age).collect();
    for age in ages {
        let high = entries
            .iter()
            .filter(|e| e.age == age && e.category == RiskCategory::HighRisk)
            .count();
        let low = entries
            .iter()
            .filter(|e| e.age == age && e.category == RiskCategory::LowRisk)
            .count();
        assert_eq!((high, low), (1, 1));
    }
}

#[test]
fn test_summary_consistent_with_store() {
    let store = generate_sample_records(default_schema(), 300, 7).unwrap();
    let snapshot = AggregateSnapshot::build(&store).unwrap();
    let summary = snapshot.summary();

    assert_eq!(summary.total_patients, 300);
    assert_eq!(summary.risk_factors, 15);
    assert_eq!(
        summary.high_risk_cases,
        store.records().iter().filter(|r| r.at_risk).count() as u64
    );
    assert!((0.0..=100.0).contains(&summary.average_risk));
}

#[test]
fn test_correlation_matrix_symmetry_over_sample_data() {
    let snapshot = sample_snapshot(500, 42);
    let rows = snapshot.correlation();
    assert_eq!(rows.len(), 15);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.correlations.len(), 15);
        assert_eq!(row.correlations[i], 1.0);
        for (j, &value) in row.correlations.iter().enumerate() {
            assert!(
                (value - rows[j].correlations[i]).abs() < 1e-9,
                "corr[{}][{}] != corr[{}][{}]",
                i,
                j,
                j,
                i
            );
            if i != j {
                assert!((-1.0..=1.0).contains(&value));
            }
        }
    }
}

#[test]
fn test_box_plot_ordering_over_sample_data() {
    let snapshot = sample_snapshot(500, 42);
    assert!(!snapshot.box_plots().is_empty());
    for plot in snapshot.box_plots() {
        assert!(plot.min <= plot.q1, "{}: min > q1", plot.symptom);
        assert!(plot.q1 <= plot.median, "{}: q1 > median", plot.symptom);
        assert!(plot.median <= plot.q3, "{}: median > q3", plot.symptom);
        assert!(plot.q3 <= plot.max, "{}: q3 > max", plot.symptom);
        assert!((plot.min..=plot.max).contains(&plot.mean));
    }
}

#[test]
fn test_symptom_prevalence_bounded() {
    let snapshot = sample_snapshot(500, 42);
    for stat in snapshot.symptom_stats() {
        assert!((0.0..=100.0).contains(&stat.high_risk));
        assert!((0.0..=100.0).contains(&stat.low_risk));
        assert!(stat.high_risk + stat.low_risk <= 100.0 + 1e-9);
    }
}

#[test]
fn test_age_filter_respects_bounds() {
    let snapshot = sample_snapshot(500, 42);
    let filtered = snapshot.filter_age_range(Some(40), Some(60));
    assert!(filtered.iter().all(|e| (40..=60).contains(&e.age)));
    assert!(filtered.len() <= snapshot.age_risk().len());
}

#[tokio::test]
async fn test_prediction_end_to_end_with_cache() {
    let schema = default_schema();
    let weights = risk_weights(42, schema.len());
    let classifier = create_classifier(weights);
    let service = PredictionService::new(schema, classifier, 1000, Duration::from_secs(1));

    let symptoms: Vec<String> = vec![
        "Chest Pain".to_string(),
        "High Blood Pressure".to_string(),
        "Dizziness".to_string(),
    ];
    let shuffled: Vec<String> = vec![
        "Dizziness".to_string(),
        "Chest Pain".to_string(),
        "High Blood Pressure".to_string(),
        "Chest Pain".to_string(),
    ];

    let first = service.predict(70, &symptoms).await.unwrap();
    let second = service.predict(70, &shuffled).await.unwrap();
    assert_eq!(first, second);
    assert!((0.0..=1.0).contains(&first.risk_probability));

    let stats = service.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.entries, 1);
}

#[tokio::test]
async fn test_prediction_cache_bounded_under_distinct_queries() {
    let schema = default_schema();
    let classifier = create_classifier(risk_weights(42, schema.len()));
    let service = PredictionService::new(schema, classifier, 8, Duration::from_secs(1));

    for age in 20..40 {
        service.predict(age, &["Chest Pain".to_string()]).await.unwrap();
    }

    let stats = service.cache_stats();
    assert_eq!(stats.entries, 8);
    assert_eq!(stats.evictions, 20 - 8);
}

#[test]
fn test_empty_store_is_fatal_at_startup() {
    let store = generate_sample_records(default_schema(), 0, 42).unwrap();
    assert!(AggregateSnapshot::build(&store).is_err());
}
