//! The analysis engine: one façade over classification, statistics,
//! correlation, outlier detection, quality scoring, and chart
//! recommendation.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::analysis::{build_matrix, describe_values, detect_column_outliers};
use crate::classifier::ColumnClassifier;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::quality::QualityScorer;
use crate::recommend::ChartRecommender;
use crate::types::{
    Column, ColumnKind, CorrelationMatrix, Dataset, OutlierReport, QualityReport,
    RecommendationSet, StatsOutcome,
};

/// Stateless analysis entry point carrying its configuration.
///
/// All methods are deterministic: the same dataset and configuration
/// produce byte-identical serialized output.
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
}

impl AnalysisEngine {
    /// Engine with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a custom configuration.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Classify every column in the dataset by kind.
    pub fn classify_columns(&self, dataset: &Dataset) -> Vec<Column> {
        ColumnClassifier::classify(dataset, self.config.classification_sample_rows)
    }

    /// Descriptive statistics for the named columns.
    ///
    /// Every name must exist in the schema. Columns without a single usable
    /// numeric value report `InsufficientData` rather than failing the
    /// whole call. An empty dataset yields an empty map.
    pub fn compute_statistics(
        &self,
        dataset: &Dataset,
        names: &[String],
    ) -> Result<BTreeMap<String, StatsOutcome>> {
        if dataset.is_empty() {
            return Ok(BTreeMap::new());
        }
        self.validate_names(dataset, names)?;

        let mut outcomes = BTreeMap::new();
        for name in names {
            let values: Vec<f64> = dataset
                .numeric_values(name)
                .into_iter()
                .map(|(_, v)| v)
                .collect();
            let outcome = match describe_values(name, &values) {
                Ok(stats) => StatsOutcome::Stats(stats),
                Err(AnalysisError::InsufficientData(_)) => StatsOutcome::InsufficientData,
                Err(e) => return Err(e),
            };
            outcomes.insert(name.clone(), outcome);
        }

        debug!(columns = outcomes.len(), "computed descriptive statistics");
        Ok(outcomes)
    }

    /// Pairwise Pearson correlation matrix over the named columns.
    ///
    /// Names must exist; of those, only columns that classify as numeric
    /// enter the matrix, in the requested order.
    pub fn compute_correlations(
        &self,
        dataset: &Dataset,
        names: &[String],
    ) -> Result<CorrelationMatrix> {
        if dataset.is_empty() {
            return Ok(CorrelationMatrix::default());
        }
        self.validate_names(dataset, names)?;

        let kinds: BTreeMap<String, ColumnKind> = self
            .classify_columns(dataset)
            .into_iter()
            .map(|c| (c.name, c.kind))
            .collect();
        let numeric: Vec<String> = names
            .iter()
            .filter(|name| kinds.get(name.as_str()) == Some(&ColumnKind::Numeric))
            .cloned()
            .collect();

        debug!(
            requested = names.len(),
            numeric = numeric.len(),
            "building correlation matrix"
        );
        Ok(build_matrix(dataset, &numeric))
    }

    /// IQR outlier reports for the named columns.
    ///
    /// `multiplier` overrides the configured fence multiplier and must be a
    /// finite positive number. Columns without usable numeric values are
    /// omitted from the result.
    pub fn detect_outliers(
        &self,
        dataset: &Dataset,
        names: &[String],
        multiplier: Option<f64>,
    ) -> Result<BTreeMap<String, OutlierReport>> {
        let multiplier = multiplier.unwrap_or(self.config.outlier_multiplier);
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "outlier multiplier must be a finite positive number, got {}",
                multiplier
            )));
        }
        if dataset.is_empty() {
            return Ok(BTreeMap::new());
        }
        self.validate_names(dataset, names)?;

        let reports: BTreeMap<String, OutlierReport> = names
            .iter()
            .filter_map(|name| {
                detect_column_outliers(dataset, name, multiplier)
                    .map(|report| (name.clone(), report))
            })
            .collect();

        debug!(columns = reports.len(), multiplier, "outlier detection complete");
        Ok(reports)
    }

    /// Quality score and issue breakdown for the whole dataset.
    pub fn assess_quality(&self, dataset: &Dataset) -> QualityReport {
        let report = QualityScorer::assess(dataset, &self.config);
        info!(score = report.score, "dataset quality assessed");
        report
    }

    /// Ranked chart recommendations.
    ///
    /// `top_n` overrides the configured primary-list size.
    pub fn recommend_visualizations(
        &self,
        dataset: &Dataset,
        columns: &[Column],
        top_n: Option<usize>,
    ) -> RecommendationSet {
        let top_n = top_n.unwrap_or(self.config.top_recommendations);
        ChartRecommender::recommend(dataset, columns, top_n, &self.config)
    }

    fn validate_names(&self, dataset: &Dataset, names: &[String]) -> Result<()> {
        for name in names {
            if !dataset.has_column(name) {
                return Err(AnalysisError::ColumnNotFound(name.clone()));
            }
        }
        Ok(())
    }
}
