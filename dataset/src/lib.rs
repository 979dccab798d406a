//! In-memory columnar dataset engine for the multimodal data pipeline.
//!
//! This crate provides the tabular container that every pipeline operator
//! receives and returns: an ordered collection of named, typed, nullable
//! columns. Datasets are immutable by convention - every transformation
//! produces a derived copy and never mutates its input in place.
//!
//! # Architecture
//!
//! The `dataset` crate sits at the bottom of the dependency hierarchy:
//! - Has NO dependencies on other workspace crates
//! - `column` defines the typed column storage ([`Column`], [`DataType`], [`Value`])
//! - `dataset` defines the table itself and its contract surface
//!   (select, filter-by-mask, add-column, materialize-to-rows)
//! - `io` holds the file readers/writers the source/sink operators delegate to
//!   (CSV, JSONL, the columnar directory format, image/audio directory scans)

pub mod column;
pub mod dataset;
pub mod error;
pub mod io;

pub use column::{Column, DataType, Value};
pub use dataset::Dataset;
pub use error::{DatasetError, Result};
