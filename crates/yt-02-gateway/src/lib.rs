//! # Yatube HTTP Gateway (yt-02)
//!
//! axum front end for the posts core. Reads are JSON, writes are
//! form-urlencoded, and access denials become `302` redirects.
//!
//! ## Request Flow
//!
//! ```text
//! request → TraceLayer → body limit → timeout → CallerLayer → handler
//!                                                  │             │
//!                                     trusted header → Caller    └→ PostLifecycleApi / FeedApi
//! ```
//!
//! ## Crate Structure
//!
//! - `domain/` - Configuration, error mapping, wire types
//! - `middleware/` - Caller identity layer and extractor
//! - `handlers` - Route handlers
//! - `router` - Route table and middleware stack
//! - `service` - Server lifecycle with graceful shutdown

pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;

pub use domain::{ApiError, ConfigError, GatewayConfig, GatewayError};
pub use handlers::AppState;
pub use middleware::{CallerLayer, CurrentCaller};
pub use router::build_router;
pub use service::GatewayService;
