//! Export a series to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts:
//! one `date` column (ISO) and one column named after the series' value column.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::TimeSeries;
use crate::error::AppError;

/// Write a series to a CSV file.
pub fn write_series_csv(path: &Path, series: &TimeSeries) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;
    write_series(file, series)
}

/// Same as [`write_series_csv`] over any writer.
pub fn write_series<W: Write>(out: W, series: &TimeSeries) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);

    writer
        .write_record(["date", series.value_column.as_str()])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for obs in &series.observations {
        writer
            .write_record([obs.date.to_string(), format!("{:.10}", obs.value)])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;
    use crate::io::ingest::read_series_csv;
    use chrono::NaiveDate;

    #[test]
    fn export_is_readable_by_ingest() {
        let series = TimeSeries::new(
            "cpi",
            vec![
                Observation::new(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), 100.0),
                Observation::new(NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(), 100.25),
            ],
        );

        let mut buf = Vec::new();
        write_series(&mut buf, &series).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("date,cpi\n2020-01-01,100.0000000000\n"));

        let back = read_series_csv(buf.as_slice(), "date", "cpi").unwrap();
        assert_eq!(back.series, series);
    }
}
