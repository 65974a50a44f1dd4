//! Indicator time-series engine.
//!
//! Data flows leaf-first:
//!
//! - `classify`: pick a category's records by code tags
//! - `filter`: restrict to a year range / indicator / keyword
//! - `align`: inner-join several indicators on year
//! - `correlate`: Pearson correlation of two aligned indicators
//! - `forecast`: per-indicator linear trend, one year ahead
//!
//! Every function is pure over borrowed input; nothing is cached between calls.

pub mod align;
pub mod classify;
pub mod correlate;
pub mod filter;
pub mod forecast;

pub use align::*;
pub use classify::*;
pub use correlate::*;
pub use filter::*;
pub use forecast::*;
