//! Shared run pipeline.
//!
//! Keeping this in one place keeps the workflow identical for every subcommand:
//! load input -> run the engine operation -> collect what the report needs.
//!
//! The binary can then focus on presentation and exports.

use std::path::Path;

use tracing::debug;

use crate::domain::{OperationSpec, RunConfig, TimeSeries};
use crate::error::AppError;
use crate::impute::segments::validate_order;
use crate::impute::{self, Gap};
use crate::io::{IngestedSeries, load_series_csv, read_series_json};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub input: IngestedSeries,
    pub output: TimeSeries,
    /// Gaps found at the requested unit (check runs only).
    pub gaps: Vec<Gap>,
    /// Mean rate used for projection (extrapolate runs only).
    pub rate: Option<f64>,
}

/// Load the input series and execute the configured operation.
pub fn run(config: &RunConfig) -> Result<RunOutput, AppError> {
    let input = load_input(config)?;
    run_with_input(config, input)
}

/// Load the input named by `config`, as CSV or as a saved series JSON.
pub fn load_input(config: &RunConfig) -> Result<IngestedSeries, AppError> {
    if is_json(&config.input_path) {
        let doc = read_series_json(&config.input_path)?;
        debug!(operation = ?doc.operation, unit = %doc.unit, "loaded series JSON");
        let series = TimeSeries::from(doc);
        let n = series.len();
        return Ok(IngestedSeries {
            series,
            row_errors: Vec::new(),
            rows_read: n,
            rows_used: n,
        });
    }

    load_series_csv(&config.input_path, &config.date_column, &config.value_column)
}

/// Execute the configured operation on an already-loaded series.
pub fn run_with_input(config: &RunConfig, input: IngestedSeries) -> Result<RunOutput, AppError> {
    let series = &input.series;
    let model = config.rate_model;

    let (output, gaps, rate) = match config.spec {
        OperationSpec::Fill { unit } => (impute::fill_gaps(series, model, unit)?, Vec::new(), None),
        OperationSpec::Resample { target_unit } => {
            (impute::resample(series, model, target_unit)?, Vec::new(), None)
        }
        OperationSpec::Extrapolate {
            unit,
            start_date,
            future_timesteps,
            past_timesteps,
        } => {
            let projection =
                impute::project(series, model, unit, start_date, future_timesteps, past_timesteps)?;
            (projection.series, Vec::new(), Some(projection.rate))
        }
        OperationSpec::Check { unit } => {
            validate_order(&series.observations)?;
            (series.clone(), impute::find_gaps(&series.observations, unit), None)
        }
    };

    Ok(RunOutput {
        input,
        output,
        gaps,
        rate,
    })
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}
