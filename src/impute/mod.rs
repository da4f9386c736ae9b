//! Interpolation and extrapolation engine.
//!
//! Pipeline (leaf to root):
//! gap check -> segments -> per-segment rate -> sequences -> flatten
//!
//! `ops` composes these into `fill_gaps`, `resample` and `extrapolate`.

pub mod flatten;
pub mod gaps;
pub mod ops;
pub mod rate;
pub mod segments;
pub mod sequence;

pub use gaps::{Gap, check_gaps, find_gaps, native_unit};
pub use ops::*;
pub use rate::{GrowthLaw, estimate_rate, mean_rate};
