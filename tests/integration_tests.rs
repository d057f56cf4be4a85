//! Integration tests for the analysis engine.
//!
//! These tests verify end-to-end behavior over CSV fixtures and hand-built
//! datasets, from ingestion through the aggregate report.

use std::collections::BTreeMap;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tabular_insights::{
    AnalysisConfig, AnalysisEngine, CellValue, ChartType, ColumnKind, CorrelationValue, Dataset,
    ReportGenerator, Row, StatsOutcome,
};

const EPSILON: f64 = 1e-9;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_sales() -> Dataset {
    tabular_insights::read_csv_path(fixtures_path().join("sales.csv"))
        .expect("Failed to read fixture CSV")
}

fn single_column_dataset(name: &str, cells: Vec<CellValue>) -> Dataset {
    let rows: Vec<Row> = cells
        .into_iter()
        .map(|cell| {
            let mut row = Row::new();
            row.insert(name.to_string(), cell);
            row
        })
        .collect();
    Dataset::new(vec![name.to_string()], rows)
}

fn stats_of(outcomes: &BTreeMap<String, StatsOutcome>, name: &str) -> tabular_insights::DescriptiveStats {
    match outcomes.get(name).expect("missing column outcome") {
        StatsOutcome::Stats(stats) => stats.clone(),
        StatsOutcome::InsufficientData => panic!("expected statistics for '{}'", name),
    }
}

// ============================================================================
// End-to-End Fixture Tests
// ============================================================================

#[test]
fn test_fixture_classification() {
    let ds = load_sales();
    let engine = AnalysisEngine::new();
    let columns = engine.classify_columns(&ds);

    let kinds: BTreeMap<&str, ColumnKind> = columns
        .iter()
        .map(|c| (c.name.as_str(), c.kind))
        .collect();

    assert_eq!(kinds["date"], ColumnKind::Temporal);
    assert_eq!(kinds["region"], ColumnKind::Categorical);
    assert_eq!(kinds["units"], ColumnKind::Numeric);
    assert_eq!(kinds["revenue"], ColumnKind::Numeric);
}

#[test]
fn test_fixture_statistics() {
    let ds = load_sales();
    let engine = AnalysisEngine::new();
    let outcomes = engine
        .compute_statistics(&ds, &["units".to_string(), "revenue".to_string()])
        .unwrap();

    let units = stats_of(&outcomes, "units");
    assert_eq!(units.count, 6); // two missing cells excluded
    assert!((units.mean - 220.0 / 6.0).abs() < EPSILON);
    assert_eq!(units.median, 40.0);

    let revenue = stats_of(&outcomes, "revenue");
    assert_eq!(revenue.count, 8);
    assert!((revenue.mean - 962.5).abs() < EPSILON);
    assert_eq!(revenue.median, 500.0);
    assert_eq!(revenue.max, 5000.0);
}

#[test]
fn test_fixture_outliers() {
    let ds = load_sales();
    let engine = AnalysisEngine::new();
    let reports = engine
        .detect_outliers(&ds, &["units".to_string(), "revenue".to_string()], None)
        .unwrap();

    let revenue = &reports["revenue"];
    assert_eq!(revenue.q1, 300.0);
    assert_eq!(revenue.q3, 600.0);
    assert_eq!(revenue.count, 1);
    assert_eq!(revenue.flagged_indices[0].index, 7);
    assert_eq!(revenue.flagged_indices[0].value, 5000.0);

    assert_eq!(reports["units"].count, 0);
}

#[test]
fn test_fixture_quality_score() {
    let ds = load_sales();
    let engine = AnalysisEngine::new();
    let quality = engine.assess_quality(&ds);

    // 2 missing units, 1 duplicate row, 1 revenue outlier
    assert_eq!(quality.missing_by_column.get("units"), Some(&2));
    assert_eq!(quality.duplicate_row_count, 1);
    assert_eq!(quality.outlier_by_column.get("revenue"), Some(&1));
    assert!((quality.score - 99.1).abs() < EPSILON);
    assert_eq!(quality.recommendations.len(), 3);
}

#[test]
fn test_fixture_recommendations() {
    let ds = load_sales();
    let engine = AnalysisEngine::new();
    let columns = engine.classify_columns(&ds);
    let set = engine.recommend_visualizations(&ds, &columns, None);

    // Temporal + two numeric + low-cardinality categorical: all eight rules fire
    assert_eq!(set.top.len(), 3);
    assert_eq!(set.rest.len(), 5);
    assert_eq!(set.top[0].chart_type, ChartType::Line);
    assert_eq!(set.top[0].columns, vec!["date".to_string(), "units".to_string()]);
    assert_eq!(set.top[1].chart_type, ChartType::Area);
    assert_eq!(set.top[2].chart_type, ChartType::Distribution);

    // Radar fires on the two numeric columns
    let radar = set.iter().find(|r| r.chart_type == ChartType::Radar).unwrap();
    assert_eq!(radar.columns, vec!["units".to_string(), "revenue".to_string()]);
    // Pie fires: region has two distinct values
    assert!(set.iter().any(|r| r.chart_type == ChartType::Pie));
}

#[test]
fn test_fixture_full_report() {
    let ds = load_sales();
    let engine = AnalysisEngine::new();
    let report = ReportGenerator::build_report(&engine, &ds).unwrap();

    assert_eq!(report.row_count, 8);
    assert_eq!(report.column_count, 4);
    assert_eq!(report.statistics.len(), 2);
    assert_eq!(
        report.correlations.columns,
        vec!["units".to_string(), "revenue".to_string()]
    );
    assert!((report.quality.score - 99.1).abs() < EPSILON);
    assert!(!report.visualizations.is_empty());
}

// ============================================================================
// Statistical Scenarios
// ============================================================================

#[test]
fn test_statistics_known_series() {
    let ds = single_column_dataset(
        "value",
        (1..=5).map(|i| CellValue::Number(i as f64)).collect(),
    );
    let engine = AnalysisEngine::new();
    let outcomes = engine
        .compute_statistics(&ds, &["value".to_string()])
        .unwrap();

    let stats = stats_of(&outcomes, "value");
    assert_eq!(stats.mean, 3.0);
    assert_eq!(stats.median, 3.0);
    assert!((stats.variance - 2.0).abs() < EPSILON);
    assert!((stats.std_dev - 2.0_f64.sqrt()).abs() < EPSILON);
    assert_eq!(stats.range, 4.0);
}

#[test]
fn test_correlation_perfect_linear_relationship() {
    let rows: Vec<Row> = (1..=10)
        .map(|i| {
            let mut row = Row::new();
            row.insert("x".to_string(), CellValue::Number(i as f64));
            row.insert("y".to_string(), CellValue::Number(2.0 * i as f64));
            row
        })
        .collect();
    let ds = Dataset::new(vec!["x".to_string(), "y".to_string()], rows);

    let engine = AnalysisEngine::new();
    let matrix = engine
        .compute_correlations(&ds, &["x".to_string(), "y".to_string()])
        .unwrap();

    assert_eq!(
        matrix.get("x", "y"),
        Some(CorrelationValue::Coefficient(1.0))
    );
    assert_eq!(matrix.get("x", "y"), matrix.get("y", "x"));
    assert_eq!(
        matrix.get("x", "x"),
        Some(CorrelationValue::Coefficient(1.0))
    );
}

#[test]
fn test_outlier_scenario_single_spike() {
    let ds = single_column_dataset(
        "value",
        [1.0, 2.0, 3.0, 4.0, 5.0, 100.0]
            .iter()
            .map(|v| CellValue::Number(*v))
            .collect(),
    );
    let engine = AnalysisEngine::new();
    let reports = engine
        .detect_outliers(&ds, &["value".to_string()], None)
        .unwrap();

    let report = &reports["value"];
    assert_eq!(report.q1, 2.0);
    assert_eq!(report.q3, 5.0);
    assert_eq!(report.lower_bound, -2.5);
    assert_eq!(report.upper_bound, 9.5);
    assert_eq!(report.count, 1);
    assert_eq!(report.flagged_indices[0].value, 100.0);
}

#[test]
fn test_quality_combined_penalty_arithmetic() {
    // 2 missing cells, 1 duplicate row, 3 outliers: 100 - 0.2 - 0.5 - 0.6
    let mut rows: Vec<Row> = (1..=20)
        .map(|i| {
            let mut row = Row::new();
            row.insert("v".to_string(), CellValue::Number(i as f64));
            row.insert("c".to_string(), CellValue::from("ok"));
            row
        })
        .collect();
    for spike in [1000.0, 2000.0, 3000.0] {
        let mut row = Row::new();
        row.insert("v".to_string(), CellValue::Number(spike));
        row.insert("c".to_string(), CellValue::from("spike"));
        rows.push(row);
    }
    let mut missing_v = Row::new();
    missing_v.insert("v".to_string(), CellValue::Missing);
    missing_v.insert("c".to_string(), CellValue::from("gap"));
    rows.push(missing_v);
    let mut missing_c = Row::new();
    missing_c.insert("v".to_string(), CellValue::Number(7.5));
    missing_c.insert("c".to_string(), CellValue::Missing);
    rows.push(missing_c);
    let mut duplicate = Row::new();
    duplicate.insert("v".to_string(), CellValue::Number(1.0));
    duplicate.insert("c".to_string(), CellValue::from("ok"));
    rows.push(duplicate);

    let ds = Dataset::new(vec!["v".to_string(), "c".to_string()], rows);
    let quality = AnalysisEngine::new().assess_quality(&ds);

    assert!((quality.score - 98.7).abs() < EPSILON);
}

// ============================================================================
// Configuration Behavior
// ============================================================================

#[test]
fn test_custom_multiplier_widens_fences() {
    let ds = single_column_dataset(
        "value",
        [1.0, 2.0, 3.0, 4.0, 5.0, 12.0]
            .iter()
            .map(|v| CellValue::Number(*v))
            .collect(),
    );
    let engine = AnalysisEngine::new();

    let narrow = engine
        .detect_outliers(&ds, &["value".to_string()], Some(1.5))
        .unwrap();
    let wide = engine
        .detect_outliers(&ds, &["value".to_string()], Some(3.0))
        .unwrap();

    assert_eq!(narrow["value"].count, 1);
    assert_eq!(wide["value"].count, 0);
}

#[test]
fn test_custom_top_n_changes_split() {
    let ds = load_sales();
    let config = AnalysisConfig::builder()
        .top_recommendations(5)
        .build()
        .unwrap();
    let engine = AnalysisEngine::with_config(config);
    let columns = engine.classify_columns(&ds);

    let set = engine.recommend_visualizations(&ds, &columns, None);
    assert_eq!(set.top.len(), 5);
    assert_eq!(set.rest.len(), 3);
}

// ============================================================================
// Error Handling
// ============================================================================

#[test]
fn test_unknown_column_is_an_error() {
    let ds = load_sales();
    let engine = AnalysisEngine::new();

    let err = engine
        .compute_statistics(&ds, &["ghost".to_string()])
        .unwrap_err();
    assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");

    let err = engine
        .detect_outliers(&ds, &["ghost".to_string()], None)
        .unwrap_err();
    assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
}

#[test]
fn test_invalid_multiplier_is_an_error() {
    let ds = load_sales();
    let engine = AnalysisEngine::new();

    let err = engine
        .detect_outliers(&ds, &["units".to_string()], Some(-2.0))
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_CONFIG");
}

#[test]
fn test_empty_dataset_analyzes_cleanly() {
    let ds = Dataset::default();
    let engine = AnalysisEngine::new();
    let report = ReportGenerator::build_report(&engine, &ds).unwrap();

    assert_eq!(report.row_count, 0);
    assert!(report.statistics.is_empty());
    assert!(report.correlations.is_empty());
    assert_eq!(report.quality.score, 100.0);
    assert!(report.visualizations.is_empty());
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_repeated_analysis_is_byte_identical() {
    let engine = AnalysisEngine::new();

    let first = serde_json::to_string(
        &ReportGenerator::build_report(&engine, &load_sales()).unwrap(),
    )
    .unwrap();
    let second = serde_json::to_string(
        &ReportGenerator::build_report(&engine, &load_sales()).unwrap(),
    )
    .unwrap();

    assert_eq!(first, second);
}
