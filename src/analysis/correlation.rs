//! Pairwise Pearson correlation.

use std::collections::BTreeMap;

use crate::types::{CorrelationMatrix, CorrelationValue, Dataset};

/// Minimum number of complete pairs required for a defined coefficient.
const MIN_PAIRS: usize = 2;

/// Pearson correlation coefficient over complete pairs.
///
/// Returns `Undefined` when fewer than two pairs exist or either series has
/// zero variance.
pub fn pearson(pairs: &[(f64, f64)]) -> CorrelationValue {
    let n = pairs.len();
    if n < MIN_PAIRS {
        return CorrelationValue::Undefined;
    }

    let nf = n as f64;
    let sum_x: f64 = pairs.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = pairs.iter().map(|(_, y)| y).sum();
    let sum_xy: f64 = pairs.iter().map(|(x, y)| x * y).sum();
    let sum_x2: f64 = pairs.iter().map(|(x, _)| x * x).sum();
    let sum_y2: f64 = pairs.iter().map(|(_, y)| y * y).sum();

    let numerator = nf * sum_xy - sum_x * sum_y;
    let denominator = ((nf * sum_x2 - sum_x * sum_x) * (nf * sum_y2 - sum_y * sum_y)).sqrt();

    if denominator == 0.0 || !denominator.is_finite() {
        return CorrelationValue::Undefined;
    }

    // Floating-point cancellation can push the quotient just past 1
    CorrelationValue::Coefficient((numerator / denominator).clamp(-1.0, 1.0))
}

/// Build the full correlation matrix over the given numeric columns.
///
/// Each off-diagonal cell uses pairwise-complete observations: only rows
/// where both columns hold a usable number contribute. The matrix is
/// symmetric by construction (the lower triangle mirrors the upper) and the
/// diagonal is exactly 1 regardless of the column's contents.
pub fn build_matrix(dataset: &Dataset, columns: &[String]) -> CorrelationMatrix {
    let series: Vec<BTreeMap<usize, f64>> = columns
        .iter()
        .map(|name| dataset.numeric_values(name).into_iter().collect())
        .collect();

    let mut entries: BTreeMap<String, BTreeMap<String, CorrelationValue>> = BTreeMap::new();
    for name in columns {
        entries.insert(name.clone(), BTreeMap::new());
    }

    for (i, left) in columns.iter().enumerate() {
        for (j, right) in columns.iter().enumerate().skip(i) {
            let value = if i == j {
                CorrelationValue::Coefficient(1.0)
            } else {
                let pairs: Vec<(f64, f64)> = series[i]
                    .iter()
                    .filter_map(|(row, x)| series[j].get(row).map(|y| (*x, *y)))
                    .collect();
                pearson(&pairs)
            };

            if let Some(row) = entries.get_mut(left) {
                row.insert(right.clone(), value);
            }
            if i != j {
                if let Some(row) = entries.get_mut(right) {
                    row.insert(left.clone(), value);
                }
            }
        }
    }

    CorrelationMatrix {
        columns: columns.to_vec(),
        entries,
    }
}
