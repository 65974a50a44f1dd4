//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - the indicator table (`Record`, `Table`)
//! - classification inputs (`Category`, `CategoryKind`)
//! - engine outputs (`AlignedSeries`, `TrendLine`, `ForecastPoint`)
//! - run configuration (`RunConfig`, `DedupePolicy`)

pub mod types;

pub use types::*;
