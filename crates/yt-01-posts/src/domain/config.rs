//! Posts subsystem configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use yt_01_posts::domain::PostsConfigBuilder;
//!
//! let config = PostsConfigBuilder::new()
//!     .page_size(10)
//!     .build()
//!     .expect("Valid config");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::pagination::PAGE_SIZE;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: usize = 100;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("page_size must be between 1 and {max}, got {got}")]
    InvalidPageSize { got: usize, max: usize },
}

/// Posts configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostsConfig {
    /// Items per feed page
    pub page_size: usize,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
        }
    }
}

impl PostsConfig {
    /// Validate configuration bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidPageSize {
                got: self.page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(())
    }

    /// Builder-style method to set the page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Builder for PostsConfig with validation
#[derive(Default)]
pub struct PostsConfigBuilder {
    page_size: Option<usize>,
}

impl PostsConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set items per feed page
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Build the PostsConfig, validating all parameters
    pub fn build(self) -> Result<PostsConfig, ConfigError> {
        let defaults = PostsConfig::default();
        let config = PostsConfig {
            page_size: self.page_size.unwrap_or(defaults.page_size),
        };
        config.validate()?;
        Ok(config)
    }
}
