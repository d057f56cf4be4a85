//! IQR-fence outlier detection.

use crate::types::{Dataset, FlaggedValue, OutlierReport};

/// Quartile boundaries computed by rank on the sorted values.
///
/// Ranks floor toward the lower element, so small samples still yield
/// defined quartiles. `values` must be non-empty.
fn quartiles(sorted: &[f64]) -> (f64, f64) {
    let n = sorted.len();
    let q1 = sorted[(n as f64 * 0.25) as usize];
    let q3 = sorted[(n as f64 * 0.75) as usize];
    (q1, q3)
}

/// Detect outliers in one column using the IQR fence rule.
///
/// Values strictly outside `[Q1 - m*IQR, Q3 + m*IQR]` are flagged, keeping
/// their original row indices. Returns `None` when the column has no usable
/// numeric values.
pub fn detect_column_outliers(
    dataset: &Dataset,
    column: &str,
    multiplier: f64,
) -> Option<OutlierReport> {
    let values = dataset.numeric_values(column);
    if values.is_empty() {
        return None;
    }

    let mut sorted: Vec<f64> = values.iter().map(|(_, v)| *v).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let (q1, q3) = quartiles(&sorted);
    let iqr = q3 - q1;
    let lower_bound = q1 - multiplier * iqr;
    let upper_bound = q3 + multiplier * iqr;

    let flagged_indices: Vec<FlaggedValue> = values
        .into_iter()
        .filter(|(_, v)| *v < lower_bound || *v > upper_bound)
        .map(|(index, value)| FlaggedValue { index, value })
        .collect();

    Some(OutlierReport {
        column: column.to_string(),
        q1,
        q3,
        lower_bound,
        upper_bound,
        count: flagged_indices.len(),
        flagged_indices,
    })
}
