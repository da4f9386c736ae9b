//! Read/write series JSON files.
//!
//! Series JSON is the "portable" representation of a run's output:
//! - run metadata (operation, rate model, unit, value column)
//! - the generated `(date, value)` rows
//!
//! The schema is defined by `domain::SeriesFile`. A saved file can be fed back
//! in as the input of another run.

use std::fs::File;
use std::path::Path;

use crate::domain::{Operation, RateModel, SeriesFile, TimeSeries, TimeUnit};
use crate::error::AppError;

/// Write a series JSON file.
pub fn write_series_json(
    path: &Path,
    series: &TimeSeries,
    operation: Operation,
    rate_model: RateModel,
    unit: TimeUnit,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create series JSON '{}': {e}", path.display()))
    })?;

    let doc = to_series_file(series, operation, rate_model, unit);
    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::new(2, format!("Failed to write series JSON: {e}")))?;

    Ok(())
}

/// Read a series JSON file.
pub fn read_series_json(path: &Path) -> Result<SeriesFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open series JSON '{}': {e}", path.display()))
    })?;
    let doc: SeriesFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid series JSON: {e}")))?;
    if doc.points.is_empty() {
        return Err(AppError::new(3, "Series JSON contains no points."));
    }
    Ok(doc)
}

pub fn to_series_file(
    series: &TimeSeries,
    operation: Operation,
    rate_model: RateModel,
    unit: TimeUnit,
) -> SeriesFile {
    SeriesFile {
        tool: "tempute".to_string(),
        operation,
        rate_model,
        unit,
        value_column: series.value_column.clone(),
        points: series.observations.clone(),
    }
}

impl From<SeriesFile> for TimeSeries {
    fn from(doc: SeriesFile) -> Self {
        TimeSeries::new(doc.value_column, doc.points)
    }
}
