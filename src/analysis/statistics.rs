//! Per-column descriptive statistics.

use crate::error::{AnalysisError, Result};
use crate::types::DescriptiveStats;

/// Compute descriptive statistics over a column's usable numeric values.
///
/// The median is the upper-middle element of the sorted values for an even
/// count. Variance is the population variance (divide by N), and standard
/// deviation its square root. Returns `InsufficientData` when `values` is
/// empty.
pub fn describe_values(column: &str, values: &[f64]) -> Result<DescriptiveStats> {
    if values.is_empty() {
        return Err(AnalysisError::InsufficientData(column.to_string()));
    }

    let count = values.len();
    let sum: f64 = values.iter().sum();
    let mean = sum / count as f64;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let median = sorted[count / 2];

    let min = sorted[0];
    let max = sorted[count - 1];

    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
    let std_dev = variance.sqrt();

    Ok(DescriptiveStats {
        column: column.to_string(),
        mean,
        median,
        std_dev,
        min,
        max,
        range: max - min,
        variance,
        count,
    })
}
