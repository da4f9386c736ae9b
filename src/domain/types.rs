//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while interpolating/extrapolating
//! - exported to JSON/CSV
//! - reloaded later as the input of another run

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ImputeError;

/// Calendar granularity used both for gap validation and for generated steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Days,
    Months,
    Years,
}

impl TimeUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Days => "days",
            TimeUnit::Months => "months",
            TimeUnit::Years => "years",
        }
    }

    /// The native cadence a series must have before it can be resampled to `self`.
    ///
    /// `Years` has no coarser cadence.
    pub fn coarser(self) -> Option<TimeUnit> {
        match self {
            TimeUnit::Days => Some(TimeUnit::Months),
            TimeUnit::Months => Some(TimeUnit::Years),
            TimeUnit::Years => None,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = ImputeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "days" => Ok(TimeUnit::Days),
            "months" => Ok(TimeUnit::Months),
            "years" => Ok(TimeUnit::Years),
            _ => Err(ImputeError::UnsupportedUnit { name: s.to_string() }),
        }
    }
}

/// Growth law explaining the change across a segment.
///
/// - `Linear`: constant additive increment per step.
/// - `Exponential`: constant multiplicative factor per step (compound growth).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RateModel {
    Linear,
    Exponential,
}

impl RateModel {
    pub fn as_str(self) -> &'static str {
        match self {
            RateModel::Linear => "linear",
            RateModel::Exponential => "exponential",
        }
    }
}

impl fmt::Display for RateModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RateModel {
    type Err = ImputeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(RateModel::Linear),
            "exponential" => Ok(RateModel::Exponential),
            _ => Err(ImputeError::UnsupportedRateModel { name: s.to_string() }),
        }
    }
}

/// A single `(date, value)` data point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// A date-indexed table with one named value column.
///
/// Observations are expected in strictly increasing date order; the engine
/// reports (never repairs) violations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub value_column: String,
    pub observations: Vec<Observation>,
}

impl TimeSeries {
    pub fn new(value_column: impl Into<String>, observations: Vec<Observation>) -> Self {
        Self {
            value_column: value_column.into(),
            observations,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// Value recorded on exactly `date`, if any.
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.observations
            .iter()
            .find(|o| o.date == date)
            .map(|o| o.value)
    }

    /// Copy of the observations dated within `[start, end]`.
    pub fn window(&self, start: NaiveDate, end: NaiveDate) -> TimeSeries {
        TimeSeries {
            value_column: self.value_column.clone(),
            observations: self
                .observations
                .iter()
                .filter(|o| o.date >= start && o.date <= end)
                .copied()
                .collect(),
        }
    }
}

/// Two chronologically adjacent observations and the number of steps between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Observation,
    pub end: Observation,
    pub step_count: usize,
}

/// The generated `(date, value)` rows covering `[segment.start.date, segment.end.date)`.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedSequence {
    pub segment: Segment,
    pub rate: f64,
    pub points: Vec<Observation>,
}

/// Which engine entry point a run used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Fill,
    Resample,
    Extrapolate,
    Check,
}

impl Operation {
    pub fn display_name(self) -> &'static str {
        match self {
            Operation::Fill => "fill gaps",
            Operation::Resample => "resample",
            Operation::Extrapolate => "extrapolate",
            Operation::Check => "gap check",
        }
    }
}

/// Parameters specific to each operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationSpec {
    Fill {
        unit: TimeUnit,
    },
    Resample {
        target_unit: TimeUnit,
    },
    Extrapolate {
        unit: TimeUnit,
        start_date: NaiveDate,
        future_timesteps: usize,
        past_timesteps: usize,
    },
    Check {
        unit: TimeUnit,
    },
}

impl OperationSpec {
    pub fn operation(&self) -> Operation {
        match self {
            OperationSpec::Fill { .. } => Operation::Fill,
            OperationSpec::Resample { .. } => Operation::Resample,
            OperationSpec::Extrapolate { .. } => Operation::Extrapolate,
            OperationSpec::Check { .. } => Operation::Check,
        }
    }

    /// Cadence of the rows the operation produces.
    pub fn output_unit(&self) -> TimeUnit {
        match *self {
            OperationSpec::Fill { unit }
            | OperationSpec::Extrapolate { unit, .. }
            | OperationSpec::Check { unit } => unit,
            OperationSpec::Resample { target_unit } => target_unit,
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and `.env`).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub date_column: String,
    pub value_column: String,
    pub rate_model: RateModel,
    pub spec: OperationSpec,

    pub print_table: bool,
    pub max_rows: usize,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// A saved series file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesFile {
    pub tool: String,
    pub operation: Operation,
    pub rate_model: RateModel,
    pub unit: TimeUnit,
    pub value_column: String,
    pub points: Vec<Observation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_recognized_options() {
        assert_eq!("days".parse::<TimeUnit>().unwrap(), TimeUnit::Days);
        assert_eq!(" Years ".parse::<TimeUnit>().unwrap(), TimeUnit::Years);
        assert_eq!("exponential".parse::<RateModel>().unwrap(), RateModel::Exponential);
    }

    #[test]
    fn rejects_unknown_options() {
        assert!(matches!(
            "weeks".parse::<TimeUnit>(),
            Err(ImputeError::UnsupportedUnit { .. })
        ));
        assert!(matches!(
            "logistic".parse::<RateModel>(),
            Err(ImputeError::UnsupportedRateModel { .. })
        ));
    }

    #[test]
    fn window_keeps_both_endpoints() {
        let series = TimeSeries::new(
            "gdp",
            vec![
                Observation::new(d(2019, 1, 1), 0.0),
                Observation::new(d(2020, 1, 1), 1.0),
                Observation::new(d(2021, 1, 1), 2.0),
                Observation::new(d(2022, 1, 1), 3.0),
            ],
        );

        let window = series.window(d(2020, 1, 1), d(2021, 1, 1));
        assert_eq!(window.values(), vec![1.0, 2.0]);
        assert_eq!(window.value_column, "gdp");
    }

    #[test]
    fn coarser_unit_chain() {
        assert_eq!(TimeUnit::Days.coarser(), Some(TimeUnit::Months));
        assert_eq!(TimeUnit::Months.coarser(), Some(TimeUnit::Years));
        assert_eq!(TimeUnit::Years.coarser(), None);
    }
}
