//! Command-line parsing for the series imputation tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! interpolation engine. Arguments are turned into a `RunConfig` in `app`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{RateModel, TimeUnit};
use crate::io::parse_date;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "tempute",
    version,
    about = "Fill gaps in, resample, and extrapolate dated numeric series"
)]
pub struct Cli {
    /// Log engine decisions to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interpolate between neighbouring observations at a given cadence.
    Fill(FillArgs),
    /// Resample a contiguous series to a finer cadence (years->months, months->days).
    Resample(ResampleArgs),
    /// Project a series forward from an anchor date at its recent mean rate.
    Extrapolate(ExtrapolateArgs),
    /// Report missing periods without changing the series.
    Check(CheckArgs),
}

/// Where the series comes from.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Input series: CSV, or a JSON file written by `--export-json`.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Name of the date column in the CSV.
    #[arg(long, env = "TEMPUTE_DATE_COLUMN", default_value = "date")]
    pub date_column: String,

    /// Name of the value column in the CSV.
    #[arg(short = 'c', long, default_value = "value")]
    pub value_column: String,
}

/// What to do with the result.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Export the resulting series to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the resulting series (with run metadata) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Do not print the resulting rows.
    #[arg(long)]
    pub no_table: bool,

    /// Rows shown before the table is elided (head and tail halves).
    #[arg(long, default_value_t = 40)]
    pub max_rows: usize,
}

#[derive(Debug, Args, Clone)]
pub struct FillArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Growth law used between observations.
    #[arg(short, long, value_enum, default_value_t = RateModel::Linear)]
    pub rate: RateModel,

    /// Cadence of the generated rows.
    #[arg(short, long, value_enum)]
    pub unit: TimeUnit,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct ResampleArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Growth law used between observations.
    #[arg(short, long, value_enum, default_value_t = RateModel::Linear)]
    pub rate: RateModel,

    /// Target cadence (`months` for yearly input, `days` for monthly input).
    #[arg(long = "to", value_enum)]
    pub target_unit: TimeUnit,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct ExtrapolateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Growth law used to estimate and project the rate.
    #[arg(short, long, value_enum, default_value_t = RateModel::Linear)]
    pub rate: RateModel,

    /// Cadence of the series and of the projected rows.
    #[arg(short, long, value_enum)]
    pub unit: TimeUnit,

    /// Anchor date; must match an observation exactly.
    #[arg(long = "start", value_name = "DATE", value_parser = parse_date)]
    pub start_date: NaiveDate,

    /// Number of periods to project past the anchor.
    #[arg(long = "future", default_value_t = 12)]
    pub future_timesteps: usize,

    /// Number of periods before the anchor used to estimate the rate.
    #[arg(long = "past", default_value_t = 3)]
    pub past_timesteps: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Cadence the series is expected to have.
    #[arg(short, long, value_enum)]
    pub unit: TimeUnit,
}
