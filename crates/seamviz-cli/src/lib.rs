//! # Seamviz CLI
//!
//! Pipeline orchestration for the seamviz binary: one invocation loads the
//! delivery table, aggregates per-bowler deviations and renders the
//! quadrant chart.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod pipeline;

pub use pipeline::*;
