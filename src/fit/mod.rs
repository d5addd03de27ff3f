//! Markstein-number fitting.
//!
//! - `markstein`: threshold prefix scan + least-squares line for one `(Ka, S/Sl_o)` series
//! - `regimes`: turns a summary table into the burnt-gas, unburnt-gas and
//!   consumption-speed series and fits each one independently

pub mod markstein;
pub mod regimes;

pub use markstein::*;
pub use regimes::*;
