//! Court Service Search - Nearby facility queries
//!
//! This crate implements the nearby-search use case: it obtains candidate
//! facilities through a configurable source, measures great-circle distance
//! and returns the facilities inside the radius nearest first.

pub mod engine;
pub mod source;

pub use engine::SpatialQueryEngine;
pub use source::{candidate_source, FullScanSource, SpatialCandidateSource, StorePredicateSource};
