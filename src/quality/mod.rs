//! Dataset quality scoring.
//!
//! The score starts at 100 and loses points for missing cells, duplicate
//! rows, and outlier values, clamped to `[0, 100]`.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::analysis::outliers::detect_column_outliers;
use crate::classifier::ColumnClassifier;
use crate::config::AnalysisConfig;
use crate::types::{ColumnKind, Dataset, QualityReport};

/// Penalty per missing cell.
const MISSING_PENALTY: f64 = 0.1;
/// Penalty per duplicate row beyond the first occurrence.
const DUPLICATE_PENALTY: f64 = 0.5;
/// Penalty per flagged outlier value.
const OUTLIER_PENALTY: f64 = 0.2;

/// Computes a 0-100 quality score with per-issue breakdowns.
pub struct QualityScorer;

impl QualityScorer {
    /// Assess dataset quality.
    ///
    /// Outlier penalties only consider columns classified as numeric. An
    /// empty dataset scores a perfect 100 with no findings.
    pub fn assess(dataset: &Dataset, config: &AnalysisConfig) -> QualityReport {
        if dataset.is_empty() {
            return QualityReport {
                score: 100.0,
                missing_by_column: BTreeMap::new(),
                duplicate_row_count: 0,
                outlier_by_column: BTreeMap::new(),
                recommendations: Vec::new(),
            };
        }

        let missing_by_column = Self::count_missing(dataset);
        let duplicate_row_count = Self::count_duplicates(dataset);
        let outlier_by_column = Self::count_outliers(dataset, config);

        let total_missing: usize = missing_by_column.values().sum();
        let total_outliers: usize = outlier_by_column.values().sum();

        let penalty = MISSING_PENALTY * total_missing as f64
            + DUPLICATE_PENALTY * duplicate_row_count as f64
            + OUTLIER_PENALTY * total_outliers as f64;
        let score = (100.0 - penalty).clamp(0.0, 100.0);

        debug!(
            score,
            total_missing, duplicate_row_count, total_outliers, "quality assessment complete"
        );

        let recommendations =
            Self::build_recommendations(total_missing, duplicate_row_count, total_outliers);

        QualityReport {
            score,
            missing_by_column,
            duplicate_row_count,
            outlier_by_column,
            recommendations,
        }
    }

    /// Missing cells per column, reported only for columns with at least one.
    fn count_missing(dataset: &Dataset) -> BTreeMap<String, usize> {
        dataset
            .column_names
            .iter()
            .filter_map(|name| {
                let count = dataset.missing_count(name);
                (count > 0).then(|| (name.clone(), count))
            })
            .collect()
    }

    /// Rows identical to an earlier row across every column.
    fn count_duplicates(dataset: &Dataset) -> usize {
        let mut seen: HashSet<String> = HashSet::with_capacity(dataset.row_count());
        let mut duplicates = 0;

        for index in 0..dataset.row_count() {
            let key: String = dataset
                .column_names
                .iter()
                .map(|name| dataset.cell(index, name).canonical())
                .collect::<Vec<_>>()
                .join("\u{1f}");
            if !seen.insert(key) {
                duplicates += 1;
            }
        }
        duplicates
    }

    /// Outlier counts per numeric column, reported only when nonzero.
    fn count_outliers(dataset: &Dataset, config: &AnalysisConfig) -> BTreeMap<String, usize> {
        ColumnClassifier::classify(dataset, config.classification_sample_rows)
            .iter()
            .filter(|column| column.kind == ColumnKind::Numeric)
            .filter_map(|column| {
                detect_column_outliers(dataset, &column.name, config.outlier_multiplier)
                    .filter(|report| report.count > 0)
                    .map(|report| (column.name.clone(), report.count))
            })
            .collect()
    }

    fn build_recommendations(missing: usize, duplicates: usize, outliers: usize) -> Vec<String> {
        let mut recommendations = Vec::new();
        if missing > 0 {
            recommendations
                .push("Consider handling missing values through imputation or removal".to_string());
        }
        if duplicates > 0 {
            recommendations.push(format!(
                "Found {} duplicate rows - consider deduplication",
                duplicates
            ));
        }
        if outliers > 0 {
            recommendations.push(
                "Detected outliers in numeric columns - review for data quality".to_string(),
            );
        }
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellValue, Row};
    use pretty_assertions::assert_eq;

    const EPSILON: f64 = 1e-9;

    fn row(pairs: &[(&str, CellValue)]) -> Row {
        pairs
            .iter()
            .map(|(name, cell)| (name.to_string(), cell.clone()))
            .collect()
    }

    fn clean_dataset() -> Dataset {
        let rows = vec![
            row(&[("a", 1.0.into()), ("b", "x".into())]),
            row(&[("a", 2.0.into()), ("b", "y".into())]),
            row(&[("a", 3.0.into()), ("b", "z".into())]),
        ];
        Dataset::new(vec!["a".to_string(), "b".to_string()], rows)
    }

    // ==================== scoring ====================

    #[test]
    fn test_clean_dataset_scores_100() {
        let report = QualityScorer::assess(&clean_dataset(), &AnalysisConfig::default());
        assert_eq!(report.score, 100.0);
        assert!(report.missing_by_column.is_empty());
        assert_eq!(report.duplicate_row_count, 0);
        assert!(report.outlier_by_column.is_empty());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_missing_values_penalized() {
        let rows = vec![
            row(&[("a", 1.0.into()), ("b", "x".into())]),
            row(&[("a", CellValue::Missing), ("b", "y".into())]),
            row(&[("a", 2.0.into()), ("b", CellValue::Missing)]),
        ];
        let ds = Dataset::new(vec!["a".to_string(), "b".to_string()], rows);

        let report = QualityScorer::assess(&ds, &AnalysisConfig::default());
        assert!((report.score - 99.8).abs() < EPSILON);
        assert_eq!(report.missing_by_column.get("a"), Some(&1));
        assert_eq!(report.missing_by_column.get("b"), Some(&1));
        assert_eq!(
            report.recommendations,
            vec!["Consider handling missing values through imputation or removal".to_string()]
        );
    }

    #[test]
    fn test_duplicate_rows_penalized() {
        let rows = vec![
            row(&[("a", 1.0.into())]),
            row(&[("a", 1.0.into())]),
            row(&[("a", 1.0.into())]),
            row(&[("a", 2.0.into())]),
        ];
        let ds = Dataset::new(vec!["a".to_string()], rows);

        let report = QualityScorer::assess(&ds, &AnalysisConfig::default());
        // Two copies beyond the first occurrence
        assert_eq!(report.duplicate_row_count, 2);
        assert!((report.score - 99.0).abs() < EPSILON);
        assert_eq!(
            report.recommendations,
            vec!["Found 2 duplicate rows - consider deduplication".to_string()]
        );
    }

    #[test]
    fn test_outliers_penalized_in_numeric_columns_only() {
        let mut rows: Vec<Row> = (1..=5)
            .map(|i| row(&[("value", (i as f64).into()), ("label", "steady".into())]))
            .collect();
        rows.push(row(&[("value", 100.0.into()), ("label", "spike".into())]));
        let ds = Dataset::new(vec!["value".to_string(), "label".to_string()], rows);

        let report = QualityScorer::assess(&ds, &AnalysisConfig::default());
        assert_eq!(report.outlier_by_column.get("value"), Some(&1));
        assert_eq!(report.outlier_by_column.get("label"), None);
        assert!((report.score - 99.8).abs() < EPSILON);
    }

    #[test]
    fn test_combined_penalties() {
        // 2 missing, 1 duplicate pair, 3 outliers: 100 - 0.2 - 0.5 - 0.6
        let mut rows: Vec<Row> = (1..=20)
            .map(|i| row(&[("v", (i as f64).into()), ("c", "ok".into())]))
            .collect();
        rows.push(row(&[("v", 1000.0.into()), ("c", "a".into())]));
        rows.push(row(&[("v", 2000.0.into()), ("c", "b".into())]));
        rows.push(row(&[("v", 3000.0.into()), ("c", "c".into())]));
        rows.push(row(&[("v", CellValue::Missing), ("c", "d".into())]));
        rows.push(row(&[("v", 5.0.into()), ("c", CellValue::Missing)]));
        rows.push(row(&[("v", 1.0.into()), ("c", "ok".into())])); // duplicate of row 0
        let ds = Dataset::new(vec!["v".to_string(), "c".to_string()], rows);

        let report = QualityScorer::assess(&ds, &AnalysisConfig::default());
        assert_eq!(report.duplicate_row_count, 1);
        assert_eq!(report.outlier_by_column.get("v"), Some(&3));
        assert!((report.score - 98.7).abs() < EPSILON);
        assert_eq!(report.recommendations.len(), 3);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        // 1500 missing cells overwhelm the scale
        let rows: Vec<Row> = (0..1500).map(|_| row(&[("a", CellValue::Missing)])).collect();
        let ds = Dataset::new(vec!["a".to_string()], rows);

        let report = QualityScorer::assess(&ds, &AnalysisConfig::default());
        assert_eq!(report.score, 0.0);
    }

    // ==================== duplicate semantics ====================

    #[test]
    fn test_missing_cells_compare_equal_for_duplicates() {
        let rows = vec![
            row(&[("a", CellValue::Missing), ("b", "x".into())]),
            row(&[("a", CellValue::Missing), ("b", "x".into())]),
        ];
        let ds = Dataset::new(vec!["a".to_string(), "b".to_string()], rows);

        let report = QualityScorer::assess(&ds, &AnalysisConfig::default());
        assert_eq!(report.duplicate_row_count, 1);
    }

    #[test]
    fn test_number_and_text_cells_are_distinct() {
        // "1" as text is not the same row as 1 as a number
        let rows = vec![
            row(&[("a", 1.0.into())]),
            row(&[("a", "1".into())]),
        ];
        let ds = Dataset::new(vec!["a".to_string()], rows);

        let report = QualityScorer::assess(&ds, &AnalysisConfig::default());
        assert_eq!(report.duplicate_row_count, 0);
    }

    // ==================== edge cases ====================

    #[test]
    fn test_empty_dataset_is_perfect() {
        let report = QualityScorer::assess(&Dataset::default(), &AnalysisConfig::default());
        assert_eq!(report.score, 100.0);
        assert!(report.recommendations.is_empty());
    }
}
