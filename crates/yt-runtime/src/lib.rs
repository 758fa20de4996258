//! # Yatube Runtime
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then environment)
//! 2. Validate configuration
//! 3. Seed users and groups from the fixture file, if configured
//! 4. Wire store → lifecycle service / feed assembler → HTTP gateway
//! 5. Serve until Ctrl+C, then shut down gracefully

pub mod config;
pub mod runtime;

pub use config::RuntimeConfig;
pub use runtime::YatubeRuntime;
