//! Court Service Core - Facility model, request validation, and configuration
//!
//! This crate contains the domain types shared by the store adapters, the
//! spatial query engine, and the HTTP layer.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

pub use error::{CourtsError, Result};
