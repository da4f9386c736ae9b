//! Calendar arithmetic.
//!
//! Two primitives drive everything else:
//! - `advance`: shift a date by `n` whole units (days, calendar months, calendar years)
//! - `periods_between`: count calendar periods between two dates
//!
//! The two range builders differ on purpose. Interpolation ranges are half-open
//! (the segment end arrives with the next segment), projection ranges are inclusive
//! and start on the anchor itself.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::domain::TimeUnit;
use crate::error::ImputeError;

/// Shift `date` by `n` units. Negative `n` moves backwards.
///
/// Month and year shifts clamp to the last valid day of the target month.
pub fn advance(date: NaiveDate, unit: TimeUnit, n: i64) -> Result<NaiveDate, ImputeError> {
    let out_of_range = || ImputeError::DateOutOfRange {
        date,
        steps: n,
        unit,
    };

    let magnitude = n.unsigned_abs();
    let shifted = match unit {
        TimeUnit::Days => {
            let days = Days::new(magnitude);
            if n >= 0 {
                date.checked_add_days(days)
            } else {
                date.checked_sub_days(days)
            }
        }
        TimeUnit::Months | TimeUnit::Years => {
            let per_unit = if unit == TimeUnit::Years { 12 } else { 1 };
            let months = magnitude
                .checked_mul(per_unit)
                .and_then(|m| u32::try_from(m).ok())
                .ok_or_else(out_of_range)?;
            if n >= 0 {
                date.checked_add_months(Months::new(months))
            } else {
                date.checked_sub_months(Months::new(months))
            }
        }
    };

    shifted.ok_or_else(out_of_range)
}

/// Number of calendar periods from `from` to `to` (negative when `to` is earlier).
///
/// Months and years compare period labels, not elapsed days:
/// 2020-01-31 → 2020-02-01 is one month.
pub fn periods_between(from: NaiveDate, to: NaiveDate, unit: TimeUnit) -> i64 {
    match unit {
        TimeUnit::Days => (to - from).num_days(),
        TimeUnit::Months => month_index(to) - month_index(from),
        TimeUnit::Years => i64::from(to.year()) - i64::from(from.year()),
    }
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// Dates `start + n·unit` for `n = 0, 1, …` strictly before `end`.
///
/// Each date is computed from `start` directly so month-end clamping never drifts.
/// Returns an empty range when `end <= start`.
pub fn interpolation_range(
    start: NaiveDate,
    end: NaiveDate,
    unit: TimeUnit,
) -> Result<Vec<NaiveDate>, ImputeError> {
    let mut out = Vec::new();
    let mut n = 0i64;
    loop {
        let date = advance(start, unit, n)?;
        if date >= end {
            break;
        }
        out.push(date);
        n += 1;
    }
    Ok(out)
}

/// Dates `anchor + n·unit` for `n = 0..=future_timesteps`.
pub fn projection_range(
    anchor: NaiveDate,
    unit: TimeUnit,
    future_timesteps: usize,
) -> Result<Vec<NaiveDate>, ImputeError> {
    (0..=future_timesteps)
        .map(|n| advance(anchor, unit, n as i64))
        .collect()
}
