//! # Seamviz Common
//!
//! Shared types, errors, and common functionality for seamviz.
//!
//! This crate provides the foundational domain types used across
//! all other crates in the seamviz workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

pub use error::*;
pub use types::*;
