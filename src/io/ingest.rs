//! CSV ingest and normalization.
//!
//! This module is responsible for turning a `(date, value, ...)` CSV into a clean
//! `TimeSeries` the engine can work on.
//!
//! Design goals:
//! - **Strict schema** for the date and value columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **No silent repair**: rows are kept in file order; ordering problems are
//!   reported by the engine, not fixed here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::warn;

use crate::domain::{Observation, TimeSeries};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the series + row errors + counters.
#[derive(Debug, Clone)]
pub struct IngestedSeries {
    pub series: TimeSeries,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load `date_column` and `value_column` from a CSV file.
pub fn load_series_csv(
    path: &Path,
    date_column: &str,
    value_column: &str,
) -> Result<IngestedSeries, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_series_csv(file, date_column, value_column)
}

/// Same as [`load_series_csv`] over any reader.
pub fn read_series_csv<R: Read>(
    input: R,
    date_column: &str,
    value_column: &str,
) -> Result<IngestedSeries, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let date_idx = require_column(&header_map, date_column)?;
    let value_idx = require_column(&header_map, value_column)?;

    let mut observations = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header, and lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let parsed = result
            .map_err(|e| format!("CSV parse error: {e}"))
            .and_then(|record| parse_row(&record, date_idx, value_idx));

        match parsed {
            Ok(obs) => observations.push(obs),
            Err(message) => {
                warn!(line, %message, "skipping CSV row");
                row_errors.push(RowError { line, message });
            }
        }
    }

    if observations.is_empty() {
        return Err(AppError::new(
            3,
            format!("No valid rows found for columns `{date_column}` / `{value_column}`."),
        ));
    }

    let rows_used = observations.len();
    Ok(IngestedSeries {
        series: TimeSeries::new(value_column, observations),
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn require_column(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, AppError> {
    header_map
        .get(&normalize_header_name(name))
        .copied()
        .ok_or_else(|| AppError::new(2, format!("Missing required column: `{name}`")))
}

fn parse_row(
    record: &StringRecord,
    date_idx: usize,
    value_idx: usize,
) -> Result<Observation, String> {
    let date = parse_date(get_required(record, date_idx, "date")?)?;
    let raw = get_required(record, value_idx, "value")?;
    let value = raw
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Invalid value '{raw}' (must be a finite number)."))?;
    Ok(Observation::new(date, value))
}

fn get_required<'a>(record: &'a StringRecord, idx: usize, what: &str) -> Result<&'a str, String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required {what}."))
}

/// Parse a calendar date.
///
/// Full dates accept ISO and a few common export formats. Coarse labels are
/// anchored to the start of their period: `YYYY-MM` is the 1st of the month and
/// `YYYY` is January 1st.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }

    // chrono refuses to parse a date without a day, so pin one on.
    if s.len() == 7 {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
            return Ok(d);
        }
    }
    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        if let Some(d) = s.parse::<i32>().ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)) {
            return Ok(d);
        }
    }

    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY, YYYY/MM/DD, YYYY-MM, YYYY."
    ))
}
