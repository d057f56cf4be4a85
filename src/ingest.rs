//! CSV ingestion.
//!
//! Cells parse with strict `f64` syntax at load time; formatted numbers
//! ("$1,234") stay as text and are coerced later, per value, by the
//! analysis passes. Empty fields become missing cells.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::types::{CellValue, Dataset, Row};

/// Read a dataset from a CSV file with a header row.
pub fn read_csv_path<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = read_csv(file)?;
    info!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "loaded CSV dataset"
    );
    Ok(dataset)
}

/// Read a dataset from any CSV source with a header row.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let column_names: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows: Vec<Row> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row: Row = column_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), parse_field(record.get(i).unwrap_or(""))))
            .collect();
        rows.push(row);
    }

    Ok(Dataset::new(column_names, rows))
}

/// One CSV field as a typed cell.
fn parse_field(field: &str) -> CellValue {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return CellValue::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Text(trimmed.to_string()),
    }
}
