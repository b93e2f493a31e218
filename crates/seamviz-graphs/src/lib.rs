//! # Seamviz Graphs
//!
//! Deviation aggregation and quadrant chart rendering for seamviz.
//!
//! This crate holds the two halves of the pipeline: the [`aggregator`]
//! turns raw deliveries into per-bowler mean deviations, and the
//! [`renderer`] draws those summaries as a quadrant-annotated scatter
//! chart using plotters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod renderer;
pub mod types;

pub use aggregator::*;
pub use renderer::*;
pub use types::*;
