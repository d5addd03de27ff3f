//! External reference data consumed by the fits.

pub mod properties;

pub use properties::*;
