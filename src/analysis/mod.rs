//! Numeric analysis passes: descriptive statistics, pairwise correlation,
//! and IQR outlier detection.

pub mod correlation;
pub mod outliers;
pub mod statistics;

pub use correlation::{build_matrix, pearson};
pub use outliers::detect_column_outliers;
pub use statistics::describe_values;
