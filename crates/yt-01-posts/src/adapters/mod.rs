//! # Adapters Module
//!
//! Adapter implementations for the posts subsystem.
//!
//! ## Modules
//!
//! - `memory`: In-memory entity store
//! - `time`: System clock
//! - `seed`: JSON fixture loader for users and groups

pub mod memory;
pub mod seed;
pub mod time;

pub use memory::InMemoryEntityStore;
pub use seed::{load_fixture, SeedError, SeedFixture, SeedReport};
pub use time::SystemTimeSource;
