//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the engine stays free of presentation concerns
//! - output changes are localized

use chrono::NaiveDate;

use crate::app::pipeline::RunOutput;
use crate::domain::{Observation, OperationSpec, RunConfig, TimeSeries, TimeUnit};
use crate::impute::Gap;

/// Span and range of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub n_points: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub min: f64,
    pub max: f64,
}

pub fn compute_stats(series: &TimeSeries) -> Option<SeriesStats> {
    let first = series.first()?;
    let last = series.last()?;
    let (min, max) = series
        .observations
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), o| (lo.min(o.value), hi.max(o.value)));

    Some(SeriesStats {
        n_points: series.len(),
        first_date: first.date,
        last_date: last.date,
        min,
        max,
    })
}

/// Format the run summary (input, parameters, output span).
pub fn format_run_summary(run: &RunOutput, config: &RunConfig) -> String {
    let mut out = String::new();
    let operation = config.spec.operation();

    out.push_str(&format!("=== tempute - {} ===\n", operation.display_name()));
    out.push_str(&format!(
        "Input: {} | column={} | rows read={} used={} skipped={}\n",
        config.input_path.display(),
        run.input.series.value_column,
        run.input.rows_read,
        run.input.rows_used,
        run.input.row_errors.len(),
    ));
    for e in run.input.row_errors.iter().take(5) {
        out.push_str(&format!("  line {}: {}\n", e.line, e.message));
    }
    if run.input.row_errors.len() > 5 {
        out.push_str(&format!("  ... {} more\n", run.input.row_errors.len() - 5));
    }

    match &config.spec {
        OperationSpec::Fill { unit } => {
            out.push_str(&format!("Model: {} | unit: {}\n", config.rate_model, unit));
        }
        OperationSpec::Resample { target_unit } => {
            let native = target_unit.coarser().map(|u| u.as_str()).unwrap_or("-");
            out.push_str(&format!(
                "Model: {} | {} -> {}\n",
                config.rate_model, native, target_unit
            ));
        }
        OperationSpec::Extrapolate {
            unit,
            start_date,
            future_timesteps,
            past_timesteps,
        } => {
            out.push_str(&format!(
                "Model: {} | unit: {} | anchor: {} | past={} future={}\n",
                config.rate_model, unit, start_date, past_timesteps, future_timesteps
            ));
            if let Some(rate) = run.rate {
                out.push_str(&format!("Mean rate: {}\n", fmt_value(rate)));
            }
        }
        OperationSpec::Check { unit } => {
            out.push_str(&format!("Unit: {unit}\n"));
        }
    }

    if let Some(stats) = compute_stats(&run.output) {
        out.push_str(&format!(
            "Output: n={} | {} .. {} | value=[{}, {}]\n",
            stats.n_points,
            stats.first_date,
            stats.last_date,
            fmt_value(stats.min).trim(),
            fmt_value(stats.max).trim(),
        ));
    }

    out
}

/// List the gaps found by a check run.
pub fn format_gaps(gaps: &[Gap], unit: TimeUnit) -> String {
    if gaps.is_empty() {
        return format!("No gaps at {unit} cadence.\n");
    }

    let mut out = String::new();
    out.push_str(&format!("{} gap(s) at {unit} cadence:\n", gaps.len()));
    out.push_str(&format!("{:<12} {:<12} {:>8}\n", "from", "to", "missing"));
    out.push_str(&format!("{:-<12} {:-<12} {:-<8}\n", "", "", ""));
    for g in gaps {
        out.push_str(&format!("{:<12} {:<12} {:>8}\n", g.from, g.to, g.missing_periods()));
    }
    out
}

/// Format the series rows, eliding the middle past `max_rows`.
pub fn format_table(series: &TimeSeries, max_rows: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<12} {:>18}\n", "date", truncate(&series.value_column, 18)));
    out.push_str(&format!("{:-<12} {:-<18}\n", "", ""));

    let rows = &series.observations;
    if max_rows == 0 || rows.len() <= max_rows {
        push_rows(&mut out, rows);
        return out;
    }

    let head = max_rows.div_ceil(2);
    let tail = max_rows - head;
    push_rows(&mut out, &rows[..head]);
    out.push_str(&format!("{:<12} ({} rows omitted)\n", "...", rows.len() - head - tail));
    push_rows(&mut out, &rows[rows.len() - tail..]);
    out
}

fn push_rows(out: &mut String, rows: &[Observation]) {
    for r in rows {
        out.push_str(&format!("{:<12} {:>18}\n", r.date, fmt_value(r.value)));
    }
}

fn fmt_value(v: f64) -> String {
    if v != 0.0 && (v.abs() >= 1e9 || v.abs() < 1e-4) {
        format!("{v:>18.6e}")
    } else {
        format!("{v:>18.4}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: u32) -> TimeSeries {
        TimeSeries::new(
            "value",
            (1..=n)
                .map(|day| {
                    Observation::new(NaiveDate::from_ymd_opt(2020, 1, day).unwrap(), day as f64)
                })
                .collect(),
        )
    }

    #[test]
    fn stats_cover_span_and_range() {
        let stats = compute_stats(&series(10)).unwrap();
        assert_eq!(stats.n_points, 10);
        assert_eq!(stats.first_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(stats.last_date, NaiveDate::from_ymd_opt(2020, 1, 10).unwrap());
        assert_eq!((stats.min, stats.max), (1.0, 10.0));

        assert!(compute_stats(&TimeSeries::new("x", Vec::new())).is_none());
    }

    #[test]
    fn table_elides_middle_rows() {
        let text = format_table(&series(10), 4);
        assert!(text.contains("2020-01-01"));
        assert!(text.contains("2020-01-02"));
        assert!(!text.contains("2020-01-05"));
        assert!(text.contains("(6 rows omitted)"));
        assert!(text.contains("2020-01-10"));
    }

    #[test]
    fn table_shows_everything_when_small() {
        let text = format_table(&series(3), 40);
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn truncate_long_column_names() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
