//! Error types.
//!
//! - `ImputeError`: typed failures of the interpolation/extrapolation engine.
//! - `AppError`: what the binary reports (message + process exit code).

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::TimeUnit;

/// Errors raised by the imputation engine.
///
/// Every variant is a precondition failure detected before any output is
/// produced; no partial results are ever returned alongside one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImputeError {
    /// Consecutive observations are more than one period apart.
    #[error(
        "There are gaps in your data: {periods} {unit} between {from} and {to}. \
         Please use fill_gaps to make your dataset complete before proceeding."
    )]
    Gap {
        from: NaiveDate,
        to: NaiveDate,
        periods: i64,
        unit: TimeUnit,
    },

    #[error("Unsupported time unit '{name}'. Choose from 'days', 'months', or 'years'.")]
    UnsupportedUnit { name: String },

    #[error("Unsupported rate model '{name}'. Choose from 'linear' or 'exponential'.")]
    UnsupportedRateModel { name: String },

    #[error("No observation found at anchor date {date}.")]
    AnchorNotFound { date: NaiveDate },

    /// Exponential rate estimation over a zero or sign-changing start value.
    #[error("Exponential rate is undefined for the segment starting {date}: start={start}, end={end}.")]
    DegenerateRate { date: NaiveDate, start: f64, end: f64 },

    #[error("The series has no observations.")]
    EmptySeries,

    #[error("Dates must be strictly increasing: {next} follows {previous}.")]
    UnorderedSeries { previous: NaiveDate, next: NaiveDate },

    #[error("Need at least {required} observations in the lookback window, found {available}.")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Date arithmetic out of range: {date} shifted by {steps} {unit}.")]
    DateOutOfRange {
        date: NaiveDate,
        steps: i64,
        unit: TimeUnit,
    },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ImputeError> for AppError {
    fn from(err: ImputeError) -> Self {
        let exit_code = match err {
            ImputeError::UnsupportedUnit { .. } | ImputeError::UnsupportedRateModel { .. } => 2,
            ImputeError::DegenerateRate { .. } | ImputeError::DateOutOfRange { .. } => 4,
            _ => 3,
        };
        AppError::new(exit_code, err.to_string())
    }
}
