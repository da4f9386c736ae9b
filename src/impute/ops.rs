//! User-facing operations: fill gaps, resample, extrapolate.
//!
//! Every operation borrows its input and returns a new series carrying the same
//! value column name.

use chrono::NaiveDate;
use tracing::info;

use crate::calendar::advance;
use crate::domain::{Observation, RateModel, TimeSeries, TimeUnit};
use crate::error::ImputeError;
use crate::impute::flatten::flatten;
use crate::impute::gaps::{check_gaps, native_unit};
use crate::impute::rate::mean_rate;
use crate::impute::segments::{build_segments, validate_order};
use crate::impute::sequence::{interpolate_segment, project_forward};

/// Interpolate between every pair of neighbouring observations at `unit` cadence.
///
/// The input must be one row per period at its own cadence (`unit` or coarser,
/// see [`native_unit`]). A missing period there is `ImputeError::Gap`.
pub fn fill_gaps(
    series: &TimeSeries,
    model: RateModel,
    unit: TimeUnit,
) -> Result<TimeSeries, ImputeError> {
    validate_order(&series.observations)?;
    let native = native_unit(&series.observations, unit);
    check_gaps(&series.observations, native)?;

    let filled = subdivide(&series.observations, model, unit)?;
    info!(
        column = %series.value_column,
        %model,
        from = %native,
        to = %unit,
        rows_in = series.len(),
        rows_out = filled.len(),
        "filled gaps"
    );
    Ok(TimeSeries::new(series.value_column.clone(), filled))
}

/// Resample a contiguous series to the finer `target_unit`.
///
/// The input must be contiguous at its native cadence (`target_unit.coarser()`):
/// years for a monthly target, months for a daily target.
pub fn resample(
    series: &TimeSeries,
    model: RateModel,
    target_unit: TimeUnit,
) -> Result<TimeSeries, ImputeError> {
    let native = target_unit.coarser().ok_or_else(|| ImputeError::UnsupportedUnit {
        name: format!("{target_unit} (no coarser cadence to resample from)"),
    })?;

    validate_order(&series.observations)?;
    check_gaps(&series.observations, native)?;

    let resampled = subdivide(&series.observations, model, target_unit)?;
    info!(
        column = %series.value_column,
        %model,
        from = %native,
        to = %target_unit,
        rows_in = series.len(),
        rows_out = resampled.len(),
        "resampled series"
    );
    Ok(TimeSeries::new(series.value_column.clone(), resampled))
}

pub fn yearly_to_monthly(series: &TimeSeries, model: RateModel) -> Result<TimeSeries, ImputeError> {
    resample(series, model, TimeUnit::Months)
}

pub fn monthly_to_daily(series: &TimeSeries, model: RateModel) -> Result<TimeSeries, ImputeError> {
    resample(series, model, TimeUnit::Days)
}

/// Forward projection plus the quantities that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub series: TimeSeries,
    /// Mean per-step rate over the lookback window.
    pub rate: f64,
    /// Observations that fell inside the lookback window (anchor included).
    pub window_len: usize,
}

/// Project `future_timesteps` periods past `start_date` at the mean rate observed
/// over the `past_timesteps` periods ending at `start_date`.
pub fn extrapolate(
    series: &TimeSeries,
    model: RateModel,
    unit: TimeUnit,
    start_date: NaiveDate,
    future_timesteps: usize,
    past_timesteps: usize,
) -> Result<TimeSeries, ImputeError> {
    project(series, model, unit, start_date, future_timesteps, past_timesteps).map(|p| p.series)
}

/// Same as [`extrapolate`], keeping the estimated rate and window size.
pub fn project(
    series: &TimeSeries,
    model: RateModel,
    unit: TimeUnit,
    start_date: NaiveDate,
    future_timesteps: usize,
    past_timesteps: usize,
) -> Result<Projection, ImputeError> {
    validate_order(&series.observations)?;

    let anchor_value = series
        .value_at(start_date)
        .ok_or(ImputeError::AnchorNotFound { date: start_date })?;
    let anchor = Observation::new(start_date, anchor_value);

    let lookback = i64::try_from(past_timesteps).map_err(|_| ImputeError::DateOutOfRange {
        date: start_date,
        steps: i64::MAX,
        unit,
    })?;
    let window_start = advance(start_date, unit, -lookback)?;
    let window = series.window(window_start, start_date);

    check_gaps(&window.observations, unit)?;
    if window.len() < 2 {
        return Err(ImputeError::InsufficientHistory {
            required: 2,
            available: window.len(),
        });
    }

    let segments = build_segments(&window.observations)?;
    let rate = mean_rate(&segments, model)?;
    let rows = project_forward(anchor, rate, model, unit, future_timesteps)?;

    info!(
        column = %series.value_column,
        %model,
        %unit,
        anchor = %start_date,
        window = window.len(),
        rate,
        rows_out = rows.len(),
        "extrapolated series"
    );

    Ok(Projection {
        series: TimeSeries::new(series.value_column.clone(), rows),
        rate,
        window_len: window.len(),
    })
}

/// Segment → rate → sequence → flatten, then verify contiguity at `unit`.
fn subdivide(
    observations: &[Observation],
    model: RateModel,
    unit: TimeUnit,
) -> Result<Vec<Observation>, ImputeError> {
    let segments = build_segments(observations)?;
    let last = *observations.last().ok_or(ImputeError::EmptySeries)?;

    let sequences = segments
        .iter()
        .map(|segment| interpolate_segment(segment, unit, model))
        .collect::<Result<Vec<_>, _>>()?;

    let flat = flatten(sequences, last);
    check_gaps(&flat, unit)?;
    Ok(flat)
}
