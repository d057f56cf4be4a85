//! Configuration for the analysis engine, with a fluent builder.

use serde::{Deserialize, Serialize};

/// Tunables for an [`AnalysisEngine`](crate::AnalysisEngine).
///
/// Sample caps bound the classifier and cardinality estimator to a fixed
/// row prefix so worst-case cost stays linear in row count.
///
/// # Example
///
/// ```rust,ignore
/// use tabular_insights::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .outlier_multiplier(3.0)
///     .top_recommendations(5)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// IQR fence multiplier for outlier detection.
    /// Default: 1.5
    pub outlier_multiplier: f64,

    /// Maximum number of rows inspected when classifying column kinds.
    /// Default: 200
    pub classification_sample_rows: usize,

    /// Maximum number of rows inspected when estimating categorical
    /// cardinality for the pie-chart gate.
    /// Default: 500
    pub cardinality_sample_rows: usize,

    /// Maximum distinct values for a categorical column to qualify for a
    /// pie-chart recommendation.
    /// Default: 10
    pub pie_cardinality_limit: usize,

    /// Number of recommendations returned in the primary list; the
    /// remainder goes to the secondary list.
    /// Default: 3
    pub top_recommendations: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            outlier_multiplier: 1.5,
            classification_sample_rows: 200,
            cardinality_sample_rows: 500,
            pie_cardinality_limit: 10,
            top_recommendations: 3,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.outlier_multiplier.is_finite() || self.outlier_multiplier <= 0.0 {
            return Err(ConfigValidationError::InvalidMultiplier(
                self.outlier_multiplier,
            ));
        }
        if self.classification_sample_rows == 0 {
            return Err(ConfigValidationError::InvalidSampleSize {
                field: "classification_sample_rows".to_string(),
            });
        }
        if self.cardinality_sample_rows == 0 {
            return Err(ConfigValidationError::InvalidSampleSize {
                field: "cardinality_sample_rows".to_string(),
            });
        }
        if self.pie_cardinality_limit == 0 {
            return Err(ConfigValidationError::InvalidSampleSize {
                field: "pie_cardinality_limit".to_string(),
            });
        }
        if self.top_recommendations == 0 {
            return Err(ConfigValidationError::InvalidTopN(self.top_recommendations));
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid outlier multiplier: {0} (must be a finite positive number)")]
    InvalidMultiplier(f64),

    #[error("Invalid value for '{field}': must be at least 1")]
    InvalidSampleSize { field: String },

    #[error("Invalid top-N: {0} (must be at least 1)")]
    InvalidTopN(usize),
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    outlier_multiplier: Option<f64>,
    classification_sample_rows: Option<usize>,
    cardinality_sample_rows: Option<usize>,
    pie_cardinality_limit: Option<usize>,
    top_recommendations: Option<usize>,
}

impl AnalysisConfigBuilder {
    /// Set the IQR fence multiplier used for outlier detection.
    pub fn outlier_multiplier(mut self, multiplier: f64) -> Self {
        self.outlier_multiplier = Some(multiplier);
        self
    }

    /// Set the row-prefix cap for column-kind classification.
    pub fn classification_sample_rows(mut self, rows: usize) -> Self {
        self.classification_sample_rows = Some(rows);
        self
    }

    /// Set the row-prefix cap for categorical cardinality estimation.
    pub fn cardinality_sample_rows(mut self, rows: usize) -> Self {
        self.cardinality_sample_rows = Some(rows);
        self
    }

    /// Set the distinct-value ceiling for pie-chart eligibility.
    pub fn pie_cardinality_limit(mut self, limit: usize) -> Self {
        self.pie_cardinality_limit = Some(limit);
        self
    }

    /// Set the size of the primary recommendation list.
    pub fn top_recommendations(mut self, n: usize) -> Self {
        self.top_recommendations = Some(n);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            outlier_multiplier: self
                .outlier_multiplier
                .unwrap_or(defaults.outlier_multiplier),
            classification_sample_rows: self
                .classification_sample_rows
                .unwrap_or(defaults.classification_sample_rows),
            cardinality_sample_rows: self
                .cardinality_sample_rows
                .unwrap_or(defaults.cardinality_sample_rows),
            pie_cardinality_limit: self
                .pie_cardinality_limit
                .unwrap_or(defaults.pie_cardinality_limit),
            top_recommendations: self
                .top_recommendations
                .unwrap_or(defaults.top_recommendations),
        };

        config.validate()?;
        Ok(config)
    }
}
