//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs logging
//! - parses CLI arguments into a `RunConfig`
//! - runs the engine operation
//! - prints reports
//! - writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, InputArgs, OutputArgs};
use crate::domain::{OperationSpec, RateModel, RunConfig};
use crate::error::{AppError, ImputeError};

pub mod pipeline;

/// Entry point for the `tempute` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` is fine; it only supplies defaults.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = run_config_from_command(&cli.command);
    execute(&config)
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // Only fails when a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn execute(config: &RunConfig) -> Result<(), AppError> {
    let run = pipeline::run(config)?;

    println!("{}", crate::report::format_run_summary(&run, config));

    if let OperationSpec::Check { unit } = config.spec {
        print!("{}", crate::report::format_gaps(&run.gaps, unit));
        if let Some(gap) = run.gaps.first() {
            return Err(ImputeError::Gap {
                from: gap.from,
                to: gap.to,
                periods: gap.periods,
                unit,
            }
            .into());
        }
        return Ok(());
    }

    if config.print_table {
        print!("{}", crate::report::format_table(&run.output, config.max_rows));
    }

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::write_series_csv(path, &run.output)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::write_series_json(
            path,
            &run.output,
            config.spec.operation(),
            config.rate_model,
            config.spec.output_unit(),
        )?;
    }

    Ok(())
}

pub fn run_config_from_command(command: &Command) -> RunConfig {
    match command {
        Command::Fill(args) => build_config(
            &args.input,
            Some(&args.output),
            args.rate,
            OperationSpec::Fill { unit: args.unit },
        ),
        Command::Resample(args) => build_config(
            &args.input,
            Some(&args.output),
            args.rate,
            OperationSpec::Resample {
                target_unit: args.target_unit,
            },
        ),
        Command::Extrapolate(args) => build_config(
            &args.input,
            Some(&args.output),
            args.rate,
            OperationSpec::Extrapolate {
                unit: args.unit,
                start_date: args.start_date,
                future_timesteps: args.future_timesteps,
                past_timesteps: args.past_timesteps,
            },
        ),
        // The rate model is irrelevant for a gap check.
        Command::Check(args) => build_config(
            &args.input,
            None,
            RateModel::Linear,
            OperationSpec::Check { unit: args.unit },
        ),
    }
}

fn build_config(
    input: &InputArgs,
    output: Option<&OutputArgs>,
    rate_model: RateModel,
    spec: OperationSpec,
) -> RunConfig {
    RunConfig {
        input_path: input.input.clone(),
        date_column: input.date_column.clone(),
        value_column: input.value_column.clone(),
        rate_model,
        spec,
        print_table: output.is_some_and(|o| !o.no_table),
        max_rows: output.map_or(0, |o| o.max_rows),
        export_csv: output.and_then(|o| o.export.clone()),
        export_json: output.and_then(|o| o.export_json.clone()),
    }
}
