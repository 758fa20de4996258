//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the posts subsystem needs from the outside world: the
//! entity store and a clock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Group, GroupId, NewGroup, NewPost, Post, PostDraft, PostId, StoreError, User, UserId,
    Username, Window,
};

/// Scope of a post listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Group(GroupId),
    Author(UserId),
}

impl PostFilter {
    /// Whether `post` falls within this scope.
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            PostFilter::All => true,
            PostFilter::Group(id) => post.group == Some(*id),
            PostFilter::Author(id) => post.author == *id,
        }
    }
}

/// Entity store (Driven Port)
///
/// Holds users, groups and posts. Implementations must serialize
/// concurrent writes to the same row; no version check is performed, so
/// concurrent updates of one post are last-write-wins.
///
/// ## Ordering contract
///
/// `list_posts` returns posts newest first: `created_at` descending, ties
/// broken by insertion order (the later-inserted post first).
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Register a user. Fails with `Conflict` on a taken username.
    async fn insert_user(&self, username: Username) -> Result<User, StoreError>;

    async fn find_group(&self, id: GroupId) -> Result<Option<Group>, StoreError>;

    async fn find_group_by_slug(&self, slug: &str) -> Result<Option<Group>, StoreError>;

    /// All groups ordered by id.
    async fn list_groups(&self) -> Result<Vec<Group>, StoreError>;

    /// Create a group. Fails with `Conflict` on a taken slug.
    async fn insert_group(&self, group: NewGroup) -> Result<Group, StoreError>;

    async fn find_post(&self, id: PostId) -> Result<Option<Post>, StoreError>;

    /// Insert a post and assign its id.
    async fn insert_post(&self, post: NewPost) -> Result<Post, StoreError>;

    /// Replace the editable fields of a post. Author and creation time are kept.
    async fn update_post(&self, id: PostId, draft: PostDraft) -> Result<Post, StoreError>;

    async fn count_posts(&self, filter: PostFilter) -> Result<usize, StoreError>;

    /// One window of the ordered listing for `filter`.
    async fn list_posts(&self, filter: PostFilter, window: Window) -> Result<Vec<Post>, StoreError>;
}

/// Time source (Driven Port)
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
