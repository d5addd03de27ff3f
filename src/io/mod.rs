//! Input/output helpers.
//!
//! - profile CSV discovery, ingest and validation (`ingest`)
//! - summary and diagnostics CSV (`export`)
//! - Markstein fit JSON (`markstein`)

pub mod export;
pub mod ingest;
pub mod markstein;

pub use export::*;
pub use ingest::*;
pub use markstein::*;
