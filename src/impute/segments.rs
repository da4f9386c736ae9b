//! Segment building.
//!
//! Each observation is paired with its successor. The final observation has no
//! successor and never becomes a segment start; callers re-attach it at the end.

use crate::domain::{Observation, Segment};
use crate::error::ImputeError;

/// Reject empty input and dates that are not strictly increasing.
pub fn validate_order(observations: &[Observation]) -> Result<(), ImputeError> {
    if observations.is_empty() {
        return Err(ImputeError::EmptySeries);
    }
    for pair in observations.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(ImputeError::UnorderedSeries {
                previous: pair[0].date,
                next: pair[1].date,
            });
        }
    }
    Ok(())
}

/// One segment per adjacent pair, each with `step_count = 1`.
///
/// Resampling later widens `step_count` to the number of generated sub-periods;
/// rate estimation over a lookback window keeps it at one elementary period.
pub fn build_segments(observations: &[Observation]) -> Result<Vec<Segment>, ImputeError> {
    validate_order(observations)?;
    Ok(observations
        .windows(2)
        .map(|pair| Segment {
            start: pair[0],
            end: pair[1],
            step_count: 1,
        })
        .collect())
}
