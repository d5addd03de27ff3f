//! Terminal reports for batch runs and Markstein fits.

pub mod format;

pub use format::*;
