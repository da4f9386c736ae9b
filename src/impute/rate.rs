//! Per-step rate estimation for the linear and exponential growth laws.
//!
//! Both laws expose the same two primitives:
//! - estimate the per-step rate that explains a segment
//! - project a base value `n` steps forward at a given rate
//!
//! `RateModel::law` maps the enum onto its implementation, so the rest of the
//! engine never branches on the model itself.

use tracing::debug;

use crate::domain::{RateModel, Segment};
use crate::error::ImputeError;

/// A constant-rate growth law.
pub trait GrowthLaw: Sync {
    /// Per-step rate that carries `segment.start.value` to `segment.end.value`
    /// in `segment.step_count` steps.
    fn estimate(&self, segment: &Segment) -> Result<f64, ImputeError>;

    /// Value `n` steps after `base`. `project(base, rate, 0)` is `base` exactly.
    fn project(&self, base: f64, rate: f64, n: usize) -> f64;
}

/// Constant additive increment per step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Additive;

/// Constant multiplicative factor per step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compound;

impl GrowthLaw for Additive {
    fn estimate(&self, segment: &Segment) -> Result<f64, ImputeError> {
        debug_assert!(segment.step_count > 0);
        Ok((segment.end.value - segment.start.value) / segment.step_count as f64)
    }

    fn project(&self, base: f64, rate: f64, n: usize) -> f64 {
        if n == 0 {
            return base;
        }
        base + rate * n as f64
    }
}

impl GrowthLaw for Compound {
    /// # Errors
    /// `DegenerateRate` when the start value is zero, the end/start ratio is
    /// negative, or the root is not finite.
    fn estimate(&self, segment: &Segment) -> Result<f64, ImputeError> {
        debug_assert!(segment.step_count > 0);
        let start = segment.start.value;
        let end = segment.end.value;
        let degenerate = || ImputeError::DegenerateRate {
            date: segment.start.date,
            start,
            end,
        };

        if start == 0.0 {
            return Err(degenerate());
        }
        let ratio = end / start;
        if ratio.is_nan() || ratio < 0.0 {
            return Err(degenerate());
        }
        let rate = ratio.powf(1.0 / segment.step_count as f64);
        if !rate.is_finite() {
            return Err(degenerate());
        }
        Ok(rate)
    }

    fn project(&self, base: f64, rate: f64, n: usize) -> f64 {
        if n == 0 {
            return base;
        }
        match i32::try_from(n) {
            Ok(n) => base * rate.powi(n),
            Err(_) => base * rate.powf(n as f64),
        }
    }
}

static ADDITIVE: Additive = Additive;
static COMPOUND: Compound = Compound;

impl RateModel {
    pub fn law(self) -> &'static dyn GrowthLaw {
        match self {
            RateModel::Linear => &ADDITIVE,
            RateModel::Exponential => &COMPOUND,
        }
    }
}

/// Rate for a single segment under `model`.
pub fn estimate_rate(segment: &Segment, model: RateModel) -> Result<f64, ImputeError> {
    model.law().estimate(segment)
}

/// Arithmetic mean of the per-segment rates.
///
/// No outlier rejection: every segment in the window counts equally.
pub fn mean_rate(segments: &[Segment], model: RateModel) -> Result<f64, ImputeError> {
    if segments.is_empty() {
        return Err(ImputeError::InsufficientHistory {
            required: 2,
            available: 0,
        });
    }

    let mut sum = 0.0;
    for segment in segments {
        let rate = estimate_rate(segment, model)?;
        debug!(start = %segment.start.date, end = %segment.end.date, rate, "segment rate");
        sum += rate;
    }
    Ok(sum / segments.len() as f64)
}
