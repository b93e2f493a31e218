//! # Seamviz Data
//!
//! Delivery table ingestion for seamviz.
//!
//! Reads the delivery CSV, validates that the required columns are present
//! and hands the typed rows to the aggregation pipeline.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod loader;

pub use loader::*;
