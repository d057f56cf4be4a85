//! Aggregate report assembly and JSON output.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::AnalysisEngine;
use crate::error::Result;
use crate::types::{
    Column, ColumnKind, CorrelationMatrix, Dataset, OutlierReport, QualityReport,
    RecommendationSet, StatsOutcome,
};

/// Every analysis pass over one dataset, in a single serializable document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<Column>,
    /// Descriptive statistics for numeric columns.
    pub statistics: BTreeMap<String, StatsOutcome>,
    pub correlations: CorrelationMatrix,
    pub outliers: BTreeMap<String, OutlierReport>,
    pub quality: QualityReport,
    pub visualizations: RecommendationSet,
}

/// Builds [`AnalysisReport`]s and writes them to disk.
pub struct ReportGenerator;

impl ReportGenerator {
    /// Run every analysis pass and assemble the report.
    pub fn build_report(engine: &AnalysisEngine, dataset: &Dataset) -> Result<AnalysisReport> {
        let columns = engine.classify_columns(dataset);
        let numeric: Vec<String> = columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Numeric)
            .map(|c| c.name.clone())
            .collect();

        let statistics = engine.compute_statistics(dataset, &numeric)?;
        let correlations = engine.compute_correlations(dataset, &numeric)?;
        let outliers = engine.detect_outliers(dataset, &numeric, None)?;
        let quality = engine.assess_quality(dataset);
        let visualizations = engine.recommend_visualizations(dataset, &columns, None);

        Ok(AnalysisReport {
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            columns,
            statistics,
            correlations,
            outliers,
            quality,
            visualizations,
        })
    }

    /// Write a report next to the input as `{stem}_analysis.json`.
    ///
    /// Returns the path written.
    pub fn write_report_to_file(report: &AnalysisReport, input_path: &Path) -> Result<PathBuf> {
        let stem = input_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("dataset");
        let output_path = input_path.with_file_name(format!("{}_analysis.json", stem));

        let json = serde_json::to_string_pretty(report)?;
        fs::write(&output_path, json)?;
        info!(path = %output_path.display(), "wrote analysis report");
        Ok(output_path)
    }
}
