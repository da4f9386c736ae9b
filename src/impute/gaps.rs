//! Gap detection.
//!
//! A series is contiguous at a unit when every consecutive pair of observations
//! is at most one calendar period apart. Duplicate or decreasing dates are not
//! this module's concern (see `segments::validate_order`).

use chrono::NaiveDate;

use crate::calendar::periods_between;
use crate::domain::{Observation, TimeUnit};
use crate::error::ImputeError;

/// A run of missing periods between two observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Calendar periods between `from` and `to` (always > 1).
    pub periods: i64,
}

impl Gap {
    pub fn missing_periods(&self) -> i64 {
        self.periods - 1
    }
}

/// All gaps wider than one `unit`, in date order.
pub fn find_gaps(observations: &[Observation], unit: TimeUnit) -> Vec<Gap> {
    observations
        .windows(2)
        .filter_map(|pair| {
            let periods = periods_between(pair[0].date, pair[1].date, unit);
            (periods > 1).then_some(Gap {
                from: pair[0].date,
                to: pair[1].date,
                periods,
            })
        })
        .collect()
}

/// Cadence the series is recorded at, never finer than `unit`.
///
/// This is the first unit, walking from `unit` towards coarser ones, whose
/// shortest step between observations is exactly one period. Falls back to
/// `unit` when there is none (or fewer than two observations).
pub fn native_unit(observations: &[Observation], unit: TimeUnit) -> TimeUnit {
    let shortest_step = |u: TimeUnit| {
        observations
            .windows(2)
            .map(|pair| periods_between(pair[0].date, pair[1].date, u))
            .min()
    };
    std::iter::successors(Some(unit), |u| u.coarser())
        .find(|&u| shortest_step(u) == Some(1))
        .unwrap_or(unit)
}

/// Fail with `ImputeError::Gap` on the first gap wider than one `unit`.
pub fn check_gaps(observations: &[Observation], unit: TimeUnit) -> Result<(), ImputeError> {
    match find_gaps(observations, unit).first() {
        Some(gap) => Err(ImputeError::Gap {
            from: gap.from,
            to: gap.to,
            periods: gap.periods,
            unit,
        }),
        None => Ok(()),
    }
}
