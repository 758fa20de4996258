//! Service Layer
//!
//! Application services that orchestrate domain logic and coordinate with
//! the store and clock through ports.

pub mod feed;
pub mod lifecycle;

pub use feed::FeedAssembler;
pub use lifecycle::PostLifecycleService;
