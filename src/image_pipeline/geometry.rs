//! Image geometry module
//!
//! Reconciles the requested width, height and sample count with the amount
//! of data actually available in the input.

mod resolver;
pub mod types;

pub use resolver::resolve;
pub use types::{GeometryRequest, ResolvedGeometry, MAX_PIXELS};
