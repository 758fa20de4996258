//! # Yatube Posts (yt-01)
//!
//! Core of the Yatube blogging platform: who may publish and edit posts,
//! and how posts are assembled into the public feeds.
//!
//! ## Components
//!
//! ```text
//!                  ┌──────────────┐
//!   create/edit ──→│ AccessGuard  │──→ PostLifecycleService ──┐
//!                  └──────────────┘                           ├──→ EntityStore
//!   feed reads ──────────────────────→ FeedAssembler ─────────┘
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Authorship | `author` and `created_at` never change after creation |
//! | Owner-only edit | Only the author may edit a post |
//! | Authenticated create | Anonymous callers never insert a post |
//! | Feed order | Newest first; later insert wins a timestamp tie |
//! | Lenient paging | A page past the end is empty, never an error |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, value objects, access guard, validation, pagination
//! - `ports/` - Inbound APIs and outbound store/clock traits
//! - `service/` - Lifecycle service and feed assembler
//! - `adapters/` - In-memory store, system clock, seed fixture loader
//! - `metrics` - Operation counters
//!
//! ## Usage
//!
//! ```ignore
//! use yt_01_posts::{FeedAssembler, InMemoryEntityStore, PostLifecycleService, SystemTimeSource};
//!
//! let store = Arc::new(InMemoryEntityStore::new());
//! let lifecycle = PostLifecycleService::new(store.clone(), Arc::new(SystemTimeSource));
//! let feed = FeedAssembler::new(store);
//!
//! let post = lifecycle.create(&caller, PostForm::new("hello", None)).await?;
//! let page = feed.index_feed(&caller, PageNumber::FIRST).await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export key types for convenience
pub use adapters::{load_fixture, InMemoryEntityStore, SeedError, SeedFixture, SystemTimeSource};
pub use domain::{
    AccessGuard, Action, Caller, ConfigError, Decision, Denial, Group, GroupChoice, GroupId,
    NotFoundError,
    Page, PageNumber, Post, PostError, PostForm, PostId, PostSummary, PostsConfig,
    PostsConfigBuilder, Slug, StoreError, User, UserId, Username, ValidationError,
};
pub use metrics::{MetricsRecorder, MetricsSnapshot, NoOpMetrics, PostsMetrics};
pub use ports::inbound::{FeedApi, GroupFeed, PostFormContext, PostLifecycleApi, ProfileFeed};
pub use ports::outbound::{EntityStore, PostFilter, TimeSource};
pub use service::{FeedAssembler, PostLifecycleService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
