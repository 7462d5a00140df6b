//! Court Service Store - Persistence ports and adapters
//!
//! This crate defines the facility storage port and provides an in-memory
//! adapter for development and tests plus a PostgreSQL/PostGIS adapter.

pub mod memory;
pub mod ports;
pub mod postgres;

pub use memory::MemoryFacilityStore;
pub use ports::FacilityStore;
pub use postgres::{PostgresConfig, PostgresStore};
