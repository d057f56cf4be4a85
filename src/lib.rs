//! Tabular Dataset Analysis Engine
//!
//! Deterministic descriptive analytics and chart recommendations for
//! tabular data.
//!
//! # Overview
//!
//! This library turns a loaded tabular dataset into:
//!
//! - **Column Classification**: Numeric, categorical, or temporal, inferred
//!   from sampled values
//! - **Descriptive Statistics**: Mean, median, spread, and range per numeric
//!   column
//! - **Correlation Matrix**: Pairwise Pearson coefficients over complete
//!   observations
//! - **Outlier Detection**: IQR-fence flagging with row-index traceability
//! - **Quality Scoring**: A 0-100 score penalizing missing cells, duplicate
//!   rows, and outliers
//! - **Chart Recommendations**: A ranked list of chart types matched to the
//!   dataset's column mix
//!
//! All output is deterministic: the same dataset and configuration produce
//! byte-identical serialized results.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tabular_insights::{AnalysisConfig, AnalysisEngine, ReportGenerator};
//!
//! let dataset = tabular_insights::read_csv_path("sales.csv")?;
//!
//! // Option 1: the full report in one call
//! let engine = AnalysisEngine::new();
//! let report = ReportGenerator::build_report(&engine, &dataset)?;
//! println!("quality score: {:.1}", report.quality.score);
//!
//! // Option 2: individual passes with a custom configuration
//! let config = AnalysisConfig::builder()
//!     .outlier_multiplier(3.0)
//!     .top_recommendations(5)
//!     .build()?;
//! let engine = AnalysisEngine::with_config(config);
//!
//! let columns = engine.classify_columns(&dataset);
//! let outliers = engine.detect_outliers(&dataset, &["revenue".to_string()], None)?;
//! let charts = engine.recommend_visualizations(&dataset, &columns, None);
//! for rec in charts.top {
//!     println!("{} ({})", rec.title, rec.chart_type.display_name());
//! }
//! ```

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod quality;
pub mod recommend;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use analysis::{build_matrix, describe_values, detect_column_outliers, pearson};
pub use classifier::ColumnClassifier;
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use engine::AnalysisEngine;
pub use error::{AnalysisError, Result};
pub use ingest::{read_csv, read_csv_path};
pub use quality::QualityScorer;
pub use recommend::ChartRecommender;
pub use reporting::{AnalysisReport, ReportGenerator};
pub use types::{
    CellValue, ChartType, Column, ColumnKind, CorrelationMatrix, CorrelationValue, Dataset,
    DescriptiveStats, FlaggedValue, OutlierReport, QualityReport, RecommendationSet, Row,
    StatsOutcome, VisualizationRecommendation,
};
pub use utils::{clean_numeric_string, is_numeric_string, parse_numeric_string};
