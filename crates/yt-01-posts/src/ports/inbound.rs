//! Inbound Ports (Driving Ports)
//!
//! The API the presentation layer uses. Every call takes the caller
//! explicitly; there is no ambient "current user".

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{
    Caller, Group, GroupId, Page, PageNumber, Post, PostError, PostForm, PostId, PostSummary,
    User,
};

/// Data needed to show the create or edit form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostFormContext {
    /// Selectable groups, ordered by id.
    pub groups: Vec<Group>,
    /// Current text (empty for a new post).
    pub text: String,
    /// Current group.
    pub group: Option<GroupId>,
    /// Post being edited, `None` for the create form.
    pub editing: Option<PostId>,
}

/// Group page: the group and its posts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupFeed {
    pub group: Group,
    pub page: Page<PostSummary>,
}

/// Profile page: the author and their posts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProfileFeed {
    pub author: User,
    pub page: Page<PostSummary>,
}

/// Post creation and editing (Driving Port)
#[async_trait]
pub trait PostLifecycleApi: Send + Sync {
    /// Publish a post as `caller`.
    ///
    /// # Errors
    /// - `Denied(NotAuthenticated)` for an anonymous caller; nothing is stored
    /// - `Validation(EmptyText | UnknownGroup)`
    async fn create(&self, caller: &Caller, form: PostForm) -> Result<Post, PostError>;

    /// Replace text and group of a post written by `caller`.
    ///
    /// # Errors
    /// - `NotFound(Post)`
    /// - `Denied(NotAuthenticated | NotOwner)`; the post is left untouched
    /// - `Validation(EmptyText | UnknownGroup)`
    async fn edit(&self, caller: &Caller, post_id: PostId, form: PostForm)
        -> Result<Post, PostError>;

    /// Form data for a new post, under the same access rule as `create`.
    async fn prepare_create(&self, caller: &Caller) -> Result<PostFormContext, PostError>;

    /// Form data prefilled from the post, under the same access rule as `edit`.
    async fn prepare_edit(
        &self,
        caller: &Caller,
        post_id: PostId,
    ) -> Result<PostFormContext, PostError>;
}

/// Feed reads (Driving Port)
///
/// All operations are public; anonymous callers are allowed.
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// Every post, newest first.
    async fn index_feed(
        &self,
        caller: &Caller,
        page: PageNumber,
    ) -> Result<Page<PostSummary>, PostError>;

    /// Posts of the group with `slug`; `NotFound(Group)` for an unknown slug.
    async fn group_feed(
        &self,
        caller: &Caller,
        slug: &str,
        page: PageNumber,
    ) -> Result<GroupFeed, PostError>;

    /// Posts written by `username`; `NotFound(User)` for an unknown user.
    async fn profile_feed(
        &self,
        caller: &Caller,
        username: &str,
        page: PageNumber,
    ) -> Result<ProfileFeed, PostError>;

    /// A single post; `NotFound(Post)` for an unknown id.
    async fn post_detail(&self, caller: &Caller, post_id: PostId)
        -> Result<PostSummary, PostError>;

    /// All groups, ordered by id.
    async fn list_groups(&self) -> Result<Vec<Group>, PostError>;
}
