//! Reporting utilities: run summary, gap listing and row tables.

pub mod format;

pub use format::*;
