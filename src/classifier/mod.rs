//! Column kind inference.
//!
//! A column is Numeric when its first non-missing value coerces to a number
//! and the majority of sampled values do; Temporal when string values match
//! common date/time shapes; otherwise Categorical. Ties resolve toward
//! Categorical, the safer default for display. Classification inspects a
//! bounded row prefix so cost stays linear in row count.

use crate::types::{CellValue, Column, ColumnKind, Dataset};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

// Date shape regexes - compiled once at startup
static PLAIN_ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid regex: YYYY-MM-DD"));
static SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("Invalid regex: M/D/YYYY"));
static ISO_DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}").expect("Invalid regex: ISO datetime")
});

/// Infers the semantic kind of each column from sampled values.
pub struct ColumnClassifier;

impl ColumnClassifier {
    /// Classify every column in the dataset, in schema order.
    ///
    /// At most `sample_rows` leading rows are inspected per column. An
    /// empty dataset yields an empty classification.
    pub fn classify(dataset: &Dataset, sample_rows: usize) -> Vec<Column> {
        if dataset.is_empty() {
            return Vec::new();
        }
        dataset
            .column_names
            .iter()
            .map(|name| {
                Column::new(
                    name.clone(),
                    Self::classify_column(dataset, name, sample_rows),
                )
            })
            .collect()
    }

    fn classify_column(dataset: &Dataset, column: &str, sample_rows: usize) -> ColumnKind {
        let samples: Vec<&CellValue> = dataset
            .rows
            .iter()
            .take(sample_rows)
            .filter_map(|row| row.get(column))
            .filter(|cell| !cell.is_missing())
            .collect();

        // No usable values: safest to treat as categorical
        if samples.is_empty() {
            return ColumnKind::Categorical;
        }

        let numeric_hits = samples
            .iter()
            .filter(|cell| cell.as_number().is_some())
            .count();
        let first_is_numeric = samples[0].as_number().is_some();

        // Strict majority; an even split falls through to categorical
        if first_is_numeric && numeric_hits * 2 > samples.len() {
            return ColumnKind::Numeric;
        }

        let temporal = samples.iter().any(|cell| {
            cell.as_text()
                .map(Self::is_temporal_value)
                .unwrap_or(false)
        });
        if temporal {
            return ColumnKind::Temporal;
        }

        ColumnKind::Categorical
    }

    /// Whether a string value looks like a date or time.
    ///
    /// Plain dates are verified with chrono so `9999-99-99` does not pass.
    pub(crate) fn is_temporal_value(value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return false;
        }

        if PLAIN_ISO_DATE.is_match(trimmed) {
            return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok();
        }
        if SLASH_DATE.is_match(trimmed) {
            return NaiveDate::parse_from_str(trimmed, "%m/%d/%Y").is_ok()
                || NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").is_ok();
        }
        if ISO_DATETIME.is_match(trimmed) {
            return true;
        }

        let lower = trimmed.to_ascii_lowercase();
        lower.contains("time") || lower.contains("date")
    }
}
