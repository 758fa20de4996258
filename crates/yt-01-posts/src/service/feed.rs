//! Feed Assembler
//!
//! Read-only paginated views over the post set. Authors and groups are
//! resolved into [`PostSummary`] values with a per-request lookup cache, so a
//! page of ten posts by the same author costs one user lookup.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::domain::paths::{group_path, post_detail_path, profile_path, INDEX_PATH};
use crate::domain::{
    AccessGuard, Action, Caller, Group, GroupId, NotFoundError, Page, PageNumber, Post,
    PostError, PostId, PostSummary, PostsConfig, StoreError, User, UserId, Window,
};
use crate::metrics::{FeedKind, MetricsRecorder, NoOpMetrics};
use crate::ports::{EntityStore, FeedApi, GroupFeed, PostFilter, ProfileFeed};

/// Feed Assembler implementation
///
/// Implements the `FeedApi` port using injected dependencies.
pub struct FeedAssembler<S: EntityStore> {
    store: Arc<S>,
    config: PostsConfig,
    guard: AccessGuard,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<S: EntityStore> FeedAssembler<S> {
    /// Create a new assembler with default configuration
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, PostsConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(store: Arc<S>, config: PostsConfig) -> Self {
        Self {
            store,
            config,
            guard: AccessGuard::new(),
            metrics: Arc::new(NoOpMetrics),
        }
    }

    /// Record counters through `metrics`
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = metrics;
        self
    }

    fn view(&self, caller: &Caller, target: &str, kind: FeedKind) -> Result<(), PostError> {
        self.guard
            .authorize(caller, Action::ViewFeed, target)
            .into_result()?;
        self.metrics.record_feed_read(kind);
        Ok(())
    }

    /// Count, slice and resolve one page of `filter`.
    async fn page(
        &self,
        filter: PostFilter,
        page: PageNumber,
        mut resolver: Resolver<'_, S>,
    ) -> Result<Page<PostSummary>, PostError> {
        let total = self.store.count_posts(filter).await?;
        let window = Window::for_page(page, self.config.page_size);
        let posts = self.store.list_posts(filter, window).await?;

        debug!(
            ?filter,
            page = page.get(),
            total,
            returned = posts.len(),
            "[yt-01] Feed page assembled"
        );

        let mut items = Vec::with_capacity(posts.len());
        for post in posts {
            items.push(resolver.summarize(post).await?);
        }

        Ok(Page::new(items, page, total, self.config.page_size))
    }
}

/// Per-request author and group cache.
struct Resolver<'a, S: EntityStore> {
    store: &'a S,
    users: HashMap<UserId, User>,
    groups: HashMap<GroupId, Group>,
}

impl<'a, S: EntityStore> Resolver<'a, S> {
    fn new(store: &'a S) -> Self {
        Self {
            store,
            users: HashMap::new(),
            groups: HashMap::new(),
        }
    }

    /// Seed the cache with an entity the caller already loaded.
    fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id, user);
        self
    }

    fn with_group(mut self, group: Group) -> Self {
        self.groups.insert(group.id, group);
        self
    }

    async fn user(&mut self, id: UserId) -> Result<User, StoreError> {
        if let Some(user) = self.users.get(&id) {
            return Ok(user.clone());
        }
        let user = self
            .store
            .find_user(id)
            .await?
            .ok_or_else(|| StoreError::MissingRow(format!("user {id}")))?;
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn group(&mut self, id: GroupId) -> Result<Group, StoreError> {
        if let Some(group) = self.groups.get(&id) {
            return Ok(group.clone());
        }
        let group = self
            .store
            .find_group(id)
            .await?
            .ok_or_else(|| StoreError::MissingRow(format!("group {id}")))?;
        self.groups.insert(id, group.clone());
        Ok(group)
    }

    async fn summarize(&mut self, post: Post) -> Result<PostSummary, StoreError> {
        let author = self.user(post.author).await?;
        let group = match post.group {
            Some(id) => Some(self.group(id).await?),
            None => None,
        };
        Ok(PostSummary {
            id: post.id,
            text: post.text,
            author,
            group,
            created_at: post.created_at,
        })
    }
}

#[async_trait]
impl<S: EntityStore + 'static> FeedApi for FeedAssembler<S> {
    async fn index_feed(
        &self,
        caller: &Caller,
        page: PageNumber,
    ) -> Result<Page<PostSummary>, PostError> {
        self.view(caller, INDEX_PATH, FeedKind::Index)?;
        self.page(PostFilter::All, page, Resolver::new(self.store.as_ref()))
            .await
    }

    async fn group_feed(
        &self,
        caller: &Caller,
        slug: &str,
        page: PageNumber,
    ) -> Result<GroupFeed, PostError> {
        let group = self
            .store
            .find_group_by_slug(slug)
            .await?
            .ok_or_else(|| NotFoundError::Group(slug.to_string()))?;
        self.view(caller, &group_path(&group.slug), FeedKind::Group)?;

        let resolver = Resolver::new(self.store.as_ref()).with_group(group.clone());
        let page = self.page(PostFilter::Group(group.id), page, resolver).await?;
        Ok(GroupFeed { group, page })
    }

    async fn profile_feed(
        &self,
        caller: &Caller,
        username: &str,
        page: PageNumber,
    ) -> Result<ProfileFeed, PostError> {
        let author = self
            .store
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| NotFoundError::User(username.to_string()))?;
        self.view(caller, &profile_path(&author.username), FeedKind::Profile)?;

        let resolver = Resolver::new(self.store.as_ref()).with_user(author.clone());
        let page = self.page(PostFilter::Author(author.id), page, resolver).await?;
        Ok(ProfileFeed { author, page })
    }

    async fn post_detail(
        &self,
        caller: &Caller,
        post_id: PostId,
    ) -> Result<PostSummary, PostError> {
        self.view(caller, &post_detail_path(post_id), FeedKind::Detail)?;
        let post = self
            .store
            .find_post(post_id)
            .await?
            .ok_or(NotFoundError::Post(post_id))?;

        Ok(Resolver::new(self.store.as_ref()).summarize(post).await?)
    }

    async fn list_groups(&self) -> Result<Vec<Group>, PostError> {
        Ok(self.store.list_groups().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::Fixture;

    #[tokio::test]
    async fn test_index_feed_newest_first() {
        let fx = Fixture::new().await;
        let first = fx.create_post("first", None).await;
        fx.clock.advance_secs(1);
        let second = fx.create_post("second", None).await;

        let feed = FeedAssembler::new(fx.store.clone());
        let page = feed
            .index_feed(&Caller::Anonymous, PageNumber::FIRST)
            .await
            .unwrap();

        let ids: Vec<_> = page.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_same_timestamp_later_insert_first() {
        let fx = Fixture::new().await;
        let first = fx.create_post("first", None).await;
        let second = fx.create_post("second", None).await;
        assert_eq!(first.created_at, second.created_at);

        let feed = FeedAssembler::new(fx.store.clone());
        let page = feed
            .index_feed(&Caller::Anonymous, PageNumber::FIRST)
            .await
            .unwrap();
        assert_eq!(page.items[0].id, second.id);
    }

    #[tokio::test]
    async fn test_summary_resolves_author_and_group() {
        let fx = Fixture::new().await;
        let post = fx.create_post("hello", Some(fx.group.id)).await;

        let feed = FeedAssembler::new(fx.store.clone());
        let summary = feed
            .post_detail(&Caller::Anonymous, post.id)
            .await
            .unwrap();
        assert_eq!(summary.author, fx.author);
        assert_eq!(summary.group, Some(fx.group.clone()));
    }

    #[tokio::test]
    async fn test_configured_page_size() {
        let fx = Fixture::new().await;
        for i in 0..5 {
            fx.create_post(&format!("post {i}"), None).await;
        }

        let config = PostsConfig::default().with_page_size(2);
        let feed = FeedAssembler::with_config(fx.store.clone(), config);
        let page = feed
            .index_feed(&Caller::Anonymous, PageNumber::new(3))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.num_pages(), 3);
        assert!(!page.has_next());
    }

    #[tokio::test]
    async fn test_list_groups_ordered_by_id() {
        let fx = Fixture::new().await;
        let second = fx.add_group("second").await;

        let feed = FeedAssembler::new(fx.store.clone());
        let groups = feed.list_groups().await.unwrap();
        assert_eq!(groups, vec![fx.group.clone(), second]);
    }

    #[tokio::test]
    async fn test_unknown_profile_is_not_found() {
        let fx = Fixture::new().await;
        let feed = FeedAssembler::new(fx.store.clone());

        let err = feed
            .profile_feed(&Caller::Anonymous, "ghost", PageNumber::FIRST)
            .await
            .unwrap_err();
        assert_eq!(err, PostError::NotFound(NotFoundError::User("ghost".into())));
    }

    #[tokio::test]
    async fn test_profile_feed_total_counts_author_posts() {
        let fx = Fixture::new().await;
        fx.create_post("mine", None).await;
        fx.create_post_as(&fx.non_author, "theirs", None).await;

        let feed = FeedAssembler::new(fx.store.clone());
        let profile = feed
            .profile_feed(&Caller::Anonymous, "test_author", PageNumber::FIRST)
            .await
            .unwrap();
        assert_eq!(profile.author, fx.author);
        assert_eq!(profile.page.total_items, 1);
    }
}
