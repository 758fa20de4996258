//! # Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Users, groups and posts
//! - The access guard and its redirect policy
//! - Post form validation
//! - Pagination
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod access;
pub mod config;
pub mod entities;
pub mod errors;
pub mod pagination;
pub mod paths;
pub mod validation;
pub mod value_objects;

pub use access::{AccessGuard, Action, Decision, Denial};
pub use config::{ConfigError, PostsConfig, PostsConfigBuilder};
pub use entities::*;
pub use errors::*;
pub use pagination::{Page, PageNumber, Window, PAGE_SIZE};
pub use validation::{validate_post_form, GroupChoice, PostForm};
pub use value_objects::*;
