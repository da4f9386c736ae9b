//! `tempute` library crate.
//!
//! Fills gaps in, resamples, and extrapolates dated numeric series under a
//! linear (constant increment) or exponential (constant factor) growth model.
//!
//! The binary (`tempute`) is a thin wrapper around this library so that:
//!
//! - the engine is testable without spawning processes
//! - the operations are reusable from other Rust code directly

pub mod app;
pub mod calendar;
pub mod cli;
pub mod domain;
pub mod error;
pub mod impute;
pub mod io;
pub mod report;

pub use domain::{Observation, RateModel, TimeSeries, TimeUnit};
pub use error::ImputeError;
pub use impute::{extrapolate, fill_gaps, monthly_to_daily, resample, yearly_to_monthly};
