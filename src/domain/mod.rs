//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the per-run spatial profile (`FlameProfile`)
//! - per-zone outputs (`CharacteristicPoint`) and the batch summary (`SummaryTable`)
//! - Markstein fit results (`Regime`, `MarksteinFit`)
//! - run configuration (`BatchConfig`, `MarksteinConfig`)

pub mod config;
pub mod types;

pub use config::*;
pub use types::*;
