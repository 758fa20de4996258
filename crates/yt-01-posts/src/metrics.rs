//! Metrics hooks for posts operations
//!
//! Counters for writes, denials and feed reads.
//!
//! ## Usage
//!
//! ```ignore
//! use yt_01_posts::metrics::{PostsMetrics, MetricsRecorder};
//!
//! let metrics = Arc::new(PostsMetrics::new());
//! let lifecycle = PostLifecycleService::new(store, clock).with_metrics(metrics.clone());
//! // ...
//! println!("{:?}", metrics.snapshot());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Feed kind, for per-feed read counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedKind {
    Index,
    Group,
    Profile,
    Detail,
}

/// Thread-safe counters for posts operations
#[derive(Default)]
pub struct PostsMetrics {
    pub posts_created: AtomicU64,
    pub posts_edited: AtomicU64,
    pub denials: AtomicU64,
    pub validation_failures: AtomicU64,
    pub index_reads: AtomicU64,
    pub group_reads: AtomicU64,
    pub profile_reads: AtomicU64,
    pub detail_reads: AtomicU64,
}

impl PostsMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_created(&self) {
        self.posts_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_edited(&self) {
        self.posts_edited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_denied(&self) {
        self.denials.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalid(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_feed_read(&self, kind: FeedKind) {
        let counter = match kind {
            FeedKind::Index => &self.index_reads,
            FeedKind::Group => &self.group_reads,
            FeedKind::Profile => &self.profile_reads,
            FeedKind::Detail => &self.detail_reads,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            posts_created: self.posts_created.load(Ordering::Relaxed),
            posts_edited: self.posts_edited.load(Ordering::Relaxed),
            denials: self.denials.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            feed_reads: self.index_reads.load(Ordering::Relaxed)
                + self.group_reads.load(Ordering::Relaxed)
                + self.profile_reads.load(Ordering::Relaxed)
                + self.detail_reads.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub posts_created: u64,
    pub posts_edited: u64,
    pub denials: u64,
    pub validation_failures: u64,
    pub feed_reads: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to forward counters to an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    fn record_created(&self);
    fn record_edited(&self);
    fn record_denied(&self);
    fn record_invalid(&self);
    fn record_feed_read(&self, kind: FeedKind);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_created(&self) {}
    fn record_edited(&self) {}
    fn record_denied(&self) {}
    fn record_invalid(&self) {}
    fn record_feed_read(&self, _: FeedKind) {}
}

impl MetricsRecorder for PostsMetrics {
    fn record_created(&self) {
        PostsMetrics::record_created(self);
    }

    fn record_edited(&self) {
        PostsMetrics::record_edited(self);
    }

    fn record_denied(&self) {
        PostsMetrics::record_denied(self);
    }

    fn record_invalid(&self) {
        PostsMetrics::record_invalid(self);
    }

    fn record_feed_read(&self, kind: FeedKind) {
        PostsMetrics::record_feed_read(self, kind);
    }
}
