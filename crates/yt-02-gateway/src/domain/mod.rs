//! Gateway domain: configuration, error mapping and wire types.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConfigError, GatewayConfig, HttpConfig, IdentityConfig, LimitsConfig, TimeoutConfig};
pub use error::{ApiError, ApiResult, GatewayError};
pub use types::{GroupFeedView, PageQuery, PageView, PostFormBody, ProfileFeedView};
