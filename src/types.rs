//! Core data model: dataset snapshots and analysis result records.
//!
//! Every result type here is a plain serializable record constructed fresh
//! per analysis call. Maps use `BTreeMap` so identical inputs serialize to
//! byte-identical JSON.

use crate::utils::parse_numeric_string;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ============================================================================
// Dataset
// ============================================================================

/// A single cell of a dataset row.
///
/// Missing is a first-class state: an absent row key, an explicit `Missing`,
/// and empty/whitespace-only text all count as missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Whether this cell counts as a missing value.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Coerce the cell to a numeric value if possible.
    ///
    /// Text cells go through the forgiving parser, so `"$1,234.56"` and
    /// `" 42 "` coerce; non-finite numbers and unparseable text do not.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Number(_) => None,
            CellValue::Text(s) => parse_numeric_string(s),
            CellValue::Missing => None,
        }
    }

    /// The text content of the cell, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Canonical string key for equality grouping (duplicate detection,
    /// cardinality estimation). Distinguishes `Number(1.0)` from `Text("1")`.
    pub(crate) fn canonical(&self) -> String {
        if self.is_missing() {
            return "\u{1}missing".to_string();
        }
        match self {
            CellValue::Number(n) => format!("n\u{1}{}", n),
            CellValue::Text(s) => format!("t\u{1}{}", s),
            CellValue::Missing => unreachable!("handled above"),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

/// One dataset row: a mapping from column name to cell value.
///
/// Keys must be a subset of the dataset's column names; absent keys are
/// treated as missing.
pub type Row = HashMap<String, CellValue>;

/// An in-memory dataset snapshot: an ordered column schema plus rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub column_names: Vec<String>,
    pub rows: Vec<Row>,
}

static MISSING_CELL: CellValue = CellValue::Missing;

impl Dataset {
    pub fn new(column_names: Vec<String>, rows: Vec<Row>) -> Self {
        Self { column_names, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    /// A dataset with zero rows or zero columns has nothing to analyze.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.column_names.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    /// Cell at (row, column); absent keys resolve to `Missing`.
    pub fn cell(&self, row_index: usize, column: &str) -> &CellValue {
        self.rows
            .get(row_index)
            .and_then(|row| row.get(column))
            .unwrap_or(&MISSING_CELL)
    }

    /// Numeric-coercible values of a column, with their original row index.
    ///
    /// Missing and non-coercible cells are excluded; the index is kept so
    /// callers can trace a value back to its source row.
    pub fn numeric_values(&self, column: &str) -> Vec<(usize, f64)> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(index, row)| {
                row.get(column)
                    .and_then(CellValue::as_number)
                    .map(|value| (index, value))
            })
            .collect()
    }

    /// Keep only the named columns, removing the rest from the schema and
    /// their cells from every row. Schema order is preserved.
    pub fn retain_columns(&mut self, names: &[String]) {
        self.column_names.retain(|c| names.iter().any(|n| n == c));
        let kept: std::collections::HashSet<&str> =
            self.column_names.iter().map(String::as_str).collect();
        for row in &mut self.rows {
            row.retain(|name, _| kept.contains(name.as_str()));
        }
    }

    /// Count of missing cells in a column (absent key, `Missing`, or
    /// empty text).
    pub fn missing_count(&self, column: &str) -> usize {
        self.rows
            .iter()
            .filter(|row| row.get(column).map(CellValue::is_missing).unwrap_or(true))
            .count()
    }
}

// ============================================================================
// Column classification
// ============================================================================

/// Semantic kind of a column, inferred from sampled values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Temporal,
}

/// A column with its inferred kind. Immutable once computed for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

// ============================================================================
// Descriptive statistics
// ============================================================================

/// Descriptive statistics for one numeric column, derived strictly from its
/// non-missing, numeric-coercible values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub column: String,
    pub mean: f64,
    /// Middle element of the ascending sort; for even counts this is the
    /// upper-middle element (`sorted[n / 2]`).
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    /// Population variance (divide by N, not N - 1).
    pub variance: f64,
    pub count: usize,
}

/// Per-column statistics outcome: either real stats or an explicit
/// insufficient-data marker the caller can report as N/A.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsOutcome {
    Stats(DescriptiveStats),
    InsufficientData,
}

impl StatsOutcome {
    pub fn stats(&self) -> Option<&DescriptiveStats> {
        match self {
            StatsOutcome::Stats(s) => Some(s),
            StatsOutcome::InsufficientData => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, StatsOutcome::InsufficientData)
    }
}

// ============================================================================
// Correlation
// ============================================================================

/// One cell of the correlation matrix.
///
/// `Undefined` (fewer than 2 paired observations, or zero variance) is a
/// distinct marker so downstream code can never mistake it for a real 0.
/// Serializes as a bare number or the string `"undefined"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CorrelationValue {
    Coefficient(f64),
    Undefined,
}

impl CorrelationValue {
    pub fn coefficient(&self) -> Option<f64> {
        match self {
            CorrelationValue::Coefficient(r) => Some(*r),
            CorrelationValue::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, CorrelationValue::Undefined)
    }
}

impl Serialize for CorrelationValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            CorrelationValue::Coefficient(r) => serializer.serialize_f64(*r),
            CorrelationValue::Undefined => serializer.serialize_str("undefined"),
        }
    }
}

impl<'de> Deserialize<'de> for CorrelationValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Marker(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(r) => Ok(CorrelationValue::Coefficient(r)),
            Raw::Marker(s) if s == "undefined" => Ok(CorrelationValue::Undefined),
            Raw::Marker(s) => Err(serde::de::Error::custom(format!(
                "expected a number or \"undefined\", got \"{}\"",
                s
            ))),
        }
    }
}

/// Symmetric pairwise correlation matrix over the numeric columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Columns covered by the matrix, in schema order.
    pub columns: Vec<String>,
    pub entries: BTreeMap<String, BTreeMap<String, CorrelationValue>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<CorrelationValue> {
        self.entries.get(a).and_then(|row| row.get(b)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ============================================================================
// Outliers
// ============================================================================

/// A flagged outlier value, traceable to its original row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlaggedValue {
    /// Row index in the source dataset.
    pub index: usize,
    pub value: f64,
}

/// IQR outlier analysis for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub column: String,
    pub q1: f64,
    pub q3: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Total number of flagged values.
    pub count: usize,
    pub flagged_indices: Vec<FlaggedValue>,
}

// ============================================================================
// Data quality
// ============================================================================

/// Aggregate data-quality assessment with a 0-100 score.
///
/// Maps only contain columns with nonzero findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub score: f64,
    pub missing_by_column: BTreeMap<String, usize>,
    pub duplicate_row_count: usize,
    pub outlier_by_column: BTreeMap<String, usize>,
    /// Fixed order: missing, then duplicates, then outliers.
    pub recommendations: Vec<String>,
}

// ============================================================================
// Visualization recommendations
// ============================================================================

/// Chart families the recommender can propose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Line,
    Area,
    Distribution,
    Scatter,
    Bar,
    Comparison,
    Radar,
    Pie,
}

impl ChartType {
    /// Human-readable name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Line => "Line Chart",
            Self::Area => "Area Chart",
            Self::Distribution => "Distribution Chart",
            Self::Scatter => "Scatter Plot",
            Self::Bar => "Bar Chart",
            Self::Comparison => "Comparison Chart",
            Self::Radar => "Radar Chart",
            Self::Pie => "Pie Chart",
        }
    }
}

/// One ranked chart suggestion. Priority is a relative score (higher is
/// better), not a probability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualizationRecommendation {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    pub description: String,
    pub columns: Vec<String>,
    pub priority: u8,
}

/// Ranked recommendations split into a primary list and the remainder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub top: Vec<VisualizationRecommendation>,
    pub rest: Vec<VisualizationRecommendation>,
}

impl RecommendationSet {
    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.rest.is_empty()
    }

    /// All recommendations in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &VisualizationRecommendation> {
        self.top.iter().chain(self.rest.iter())
    }
}

// ============================================================================
// Tests
// ============================================================================
