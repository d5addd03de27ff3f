//! `flame-stretch` library crate.
//!
//! Extracts flame speeds and stretch rates from 1-D counter-flow premixed
//! flame profiles and fits Markstein numbers over the resulting table.
//!
//! The binary (`stretch`) is a thin wrapper around this library so the
//! analysis is testable without spawning processes.

pub mod analysis;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod report;
