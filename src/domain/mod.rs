//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - option enums (`TimeUnit`, `RateModel`, `Operation`)
//! - the series table (`Observation`, `TimeSeries`)
//! - transient engine entities (`Segment`, `InterpolatedSequence`)
//! - run configuration and the JSON file schema (`RunConfig`, `SeriesFile`)

pub mod types;

pub use types::*;
