//! Sequence generation.
//!
//! Interpolation fills `[start, end)` of a segment; the end value is never
//! emitted here. Extrapolation emits `future_timesteps + 1` rows, the first of
//! which reproduces the anchor.

use tracing::debug;

use crate::calendar::{interpolation_range, projection_range};
use crate::domain::{InterpolatedSequence, Observation, RateModel, Segment, TimeUnit};
use crate::error::ImputeError;
use crate::impute::rate::estimate_rate;

/// `step_count` values starting at `segment.start.value`.
pub fn interpolate_values(segment: &Segment, rate: f64, model: RateModel) -> Vec<f64> {
    let law = model.law();
    (0..segment.step_count)
        .map(|n| law.project(segment.start.value, rate, n))
        .collect()
}

/// Subdivide `segment` into `unit` steps, estimate its rate, and generate its rows.
///
/// The segment's `step_count` is replaced by the number of generated dates.
pub fn interpolate_segment(
    segment: &Segment,
    unit: TimeUnit,
    model: RateModel,
) -> Result<InterpolatedSequence, ImputeError> {
    let dates = interpolation_range(segment.start.date, segment.end.date, unit)?;
    let segment = Segment {
        step_count: dates.len(),
        ..*segment
    };
    let rate = estimate_rate(&segment, model)?;
    debug!(
        start = %segment.start.date,
        end = %segment.end.date,
        steps = segment.step_count,
        rate,
        "interpolating segment"
    );

    let points = dates
        .into_iter()
        .zip(interpolate_values(&segment, rate, model))
        .map(|(date, value)| Observation::new(date, value))
        .collect();

    Ok(InterpolatedSequence {
        segment,
        rate,
        points,
    })
}

/// `future_timesteps + 1` values starting at `anchor_value`.
pub fn extrapolate_values(
    anchor_value: f64,
    rate: f64,
    model: RateModel,
    future_timesteps: usize,
) -> Vec<f64> {
    let law = model.law();
    (0..=future_timesteps)
        .map(|n| law.project(anchor_value, rate, n))
        .collect()
}

/// Forward rows from `anchor` at a fixed `rate`, anchor included.
pub fn project_forward(
    anchor: Observation,
    rate: f64,
    model: RateModel,
    unit: TimeUnit,
    future_timesteps: usize,
) -> Result<Vec<Observation>, ImputeError> {
    let dates = projection_range(anchor.date, unit, future_timesteps)?;
    Ok(dates
        .into_iter()
        .zip(extrapolate_values(anchor.value, rate, model, future_timesteps))
        .map(|(date, value)| Observation::new(date, value))
        .collect())
}
