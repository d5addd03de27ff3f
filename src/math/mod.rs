//! Numerical kernels shared by the analyzers and the Markstein fit.
//!
//! Everything here is a pure function over slices. Degenerate inputs (too few
//! samples, empty ranges) come back as `None` so callers can decide whether
//! that means NaN or an error.

pub mod gradient;
pub mod integrate;
pub mod ols;
pub mod search;

pub use gradient::*;
pub use integrate::*;
pub use ols::*;
pub use search::*;
