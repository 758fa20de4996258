//! Runtime configuration.
//!
//! Defaults come from the crate configs; environment variables override:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `YT_HTTP_HOST` | `gateway.http.host` |
//! | `YT_HTTP_PORT` | `gateway.http.port` |
//! | `YT_CALLER_HEADER` | `gateway.identity.caller_header` |
//! | `YT_PAGE_SIZE` | `posts.page_size` |
//! | `YT_SEED_FILE` | `seed_file` |

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::warn;
use yt_01_posts::PostsConfig;
use yt_02_gateway::GatewayConfig;

/// Complete runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub gateway: GatewayConfig,
    pub posts: PostsConfig,
    /// JSON fixture with users and groups loaded at startup
    pub seed_file: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from `lookup`; unparsable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = lookup("YT_HTTP_HOST") {
            match host.parse() {
                Ok(h) => config.gateway.http.host = h,
                Err(_) => warn!(value = %host, "YT_HTTP_HOST is not an IP address"),
            }
        }
        if let Some(port) = lookup("YT_HTTP_PORT") {
            match port.parse() {
                Ok(p) => config.gateway.http.port = p,
                Err(_) => warn!(value = %port, "YT_HTTP_PORT is not a port number"),
            }
        }
        if let Some(header) = lookup("YT_CALLER_HEADER") {
            config.gateway.identity.caller_header = header.trim().to_ascii_lowercase();
        }
        if let Some(size) = lookup("YT_PAGE_SIZE") {
            match size.parse() {
                Ok(s) => config.posts.page_size = s,
                Err(_) => warn!(value = %size, "YT_PAGE_SIZE is not a number"),
            }
        }
        config.seed_file = lookup("YT_SEED_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        config
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.gateway
            .validate()
            .context("invalid gateway configuration")?;
        self.posts.validate().context("invalid posts configuration")?;
        Ok(())
    }
}
