//! Unpivot per-segment sequences into one flat, date-ordered table.

use crate::domain::{InterpolatedSequence, Observation};

/// Concatenate `sequences` in segment order and append `last` once.
///
/// Segments come from a strictly increasing series and each covers a half-open
/// interval, so the output is strictly increasing with no duplicate dates.
pub fn flatten(sequences: Vec<InterpolatedSequence>, last: Observation) -> Vec<Observation> {
    let total = sequences.iter().map(|s| s.points.len()).sum::<usize>() + 1;
    let mut out = Vec::with_capacity(total);
    for sequence in sequences {
        out.extend(sequence.points);
    }
    out.push(last);

    debug_assert!(out.windows(2).all(|w| w[0].date < w[1].date));
    out
}
