//! Post Lifecycle Service
//!
//! Creates and edits posts. Every write is gated by the access guard and
//! fully validated before the single store call.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::paths::{login_redirect, post_edit_path, CREATE_PATH};
use crate::domain::{
    validate_post_form, AccessGuard, Action, Caller, Denial, Group, GroupId, NewPost,
    NotFoundError, Post, PostDraft, PostError, PostForm, PostId, StoreError, User,
};
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::{EntityStore, PostFormContext, PostLifecycleApi, TimeSource};

/// Post Lifecycle Service implementation
///
/// Implements the `PostLifecycleApi` port using injected dependencies.
pub struct PostLifecycleService<S: EntityStore, T: TimeSource> {
    /// Entity store (driven port)
    store: Arc<S>,
    /// Clock for `created_at` (driven port)
    clock: Arc<T>,
    guard: AccessGuard,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<S: EntityStore, T: TimeSource> PostLifecycleService<S, T> {
    /// Create a new service with the given store and clock
    pub fn new(store: Arc<S>, clock: Arc<T>) -> Self {
        Self {
            store,
            clock,
            guard: AccessGuard::new(),
            metrics: Arc::new(NoOpMetrics),
        }
    }

    /// Record counters through `metrics`
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = metrics;
        self
    }

    fn deny(&self, denial: Denial) -> PostError {
        self.metrics.record_denied();
        warn!(redirect = %denial.redirect_to(), "[yt-01] {}", denial);
        PostError::Denied(denial)
    }

    /// Authorize `Create` and return the acting user.
    fn authorize_create<'c>(&self, caller: &'c Caller) -> Result<&'c User, PostError> {
        self.guard
            .authorize(caller, Action::Create, CREATE_PATH)
            .into_result()
            .map_err(|denial| self.deny(denial))?;

        // An allowed Create always has an authenticated caller.
        caller.user().ok_or_else(|| {
            self.deny(Denial::NotAuthenticated {
                login_redirect: login_redirect(CREATE_PATH),
            })
        })
    }

    /// Load the post and authorize `Edit` on it.
    async fn authorize_edit(&self, caller: &Caller, post_id: PostId) -> Result<Post, PostError> {
        let post = self
            .store
            .find_post(post_id)
            .await?
            .ok_or(NotFoundError::Post(post_id))?;

        let author = self.store.find_user(post.author).await?.ok_or_else(|| {
            StoreError::MissingRow(format!("author {} of post {}", post.author, post.id))
        })?;

        self.guard
            .authorize(
                caller,
                Action::Edit {
                    post: &post,
                    author: &author,
                },
                &post_edit_path(post_id),
            )
            .into_result()
            .map_err(|denial| self.deny(denial))?;

        Ok(post)
    }

    /// Resolve the form's group and run the field rules.
    async fn validate(&self, form: &PostForm) -> Result<PostDraft, PostError> {
        let resolved: Option<Group> = match form.requested_group() {
            Some(id) => self.store.find_group(id).await?,
            None => None,
        };

        validate_post_form(form, resolved.as_ref()).map_err(|err| {
            self.metrics.record_invalid();
            PostError::Validation(err)
        })
    }

    async fn form_context(
        &self,
        text: String,
        group: Option<GroupId>,
        editing: Option<PostId>,
    ) -> Result<PostFormContext, PostError> {
        Ok(PostFormContext {
            groups: self.store.list_groups().await?,
            text,
            group,
            editing,
        })
    }
}

#[async_trait]
impl<S: EntityStore + 'static, T: TimeSource + 'static> PostLifecycleApi
    for PostLifecycleService<S, T>
{
    async fn create(&self, caller: &Caller, form: PostForm) -> Result<Post, PostError> {
        let author = self.authorize_create(caller)?;
        let draft = self.validate(&form).await?;

        let post = self
            .store
            .insert_post(NewPost {
                text: draft.text,
                author: author.id,
                group: draft.group,
                created_at: self.clock.now(),
            })
            .await?;

        self.metrics.record_created();
        info!(
            post_id = %post.id,
            author = %author.username,
            group = ?post.group,
            "[yt-01] Post created"
        );
        Ok(post)
    }

    async fn edit(
        &self,
        caller: &Caller,
        post_id: PostId,
        form: PostForm,
    ) -> Result<Post, PostError> {
        self.authorize_edit(caller, post_id).await?;
        let draft = self.validate(&form).await?;

        let post = self.store.update_post(post_id, draft).await?;

        self.metrics.record_edited();
        info!(post_id = %post.id, group = ?post.group, "[yt-01] Post edited");
        Ok(post)
    }

    async fn prepare_create(&self, caller: &Caller) -> Result<PostFormContext, PostError> {
        self.authorize_create(caller)?;
        self.form_context(String::new(), None, None).await
    }

    async fn prepare_edit(
        &self,
        caller: &Caller,
        post_id: PostId,
    ) -> Result<PostFormContext, PostError> {
        let post = self.authorize_edit(caller, post_id).await?;
        self.form_context(post.text, post.group, Some(post.id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryEntityStore;
    use crate::domain::ValidationError;
    use crate::metrics::PostsMetrics;
    use crate::ports::PostFilter;
    use crate::test_utils::{Fixture, ManualTimeSource};

    fn service(fx: &Fixture) -> PostLifecycleService<InMemoryEntityStore, ManualTimeSource> {
        PostLifecycleService::new(fx.store.clone(), fx.clock.clone())
    }

    #[tokio::test]
    async fn test_create_stores_post_for_caller() {
        let fx = Fixture::new().await;
        let svc = service(&fx);

        let post = svc
            .create(&fx.author_caller(), PostForm::new("Новый пост", Some(fx.group.id)))
            .await
            .unwrap();

        assert_eq!(post.author, fx.author.id);
        assert_eq!(post.group, Some(fx.group.id));
        assert_eq!(post.created_at, fx.clock.now());
        assert_eq!(fx.store.find_post(post.id).await.unwrap(), Some(post));
    }

    #[tokio::test]
    async fn test_anonymous_create_is_redirected_to_login() {
        let fx = Fixture::new().await;
        let svc = service(&fx);

        let err = svc
            .create(&Caller::Anonymous, PostForm::new("text", None))
            .await
            .unwrap_err();

        assert_eq!(err.redirect_target(), Some("/auth/login/?next=/create/"));
        assert_eq!(
            fx.store.count_posts(PostFilter::All).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_denial_checked_before_validation() {
        let fx = Fixture::new().await;
        let svc = service(&fx);

        let err = svc
            .create(&Caller::Anonymous, PostForm::new("", Some(GroupId(404))))
            .await
            .unwrap_err();
        assert!(matches!(err, PostError::Denied(Denial::NotAuthenticated { .. })));
    }

    #[tokio::test]
    async fn test_invalid_group_choice_checked_after_guard() {
        let fx = Fixture::new().await;
        let svc = service(&fx);

        let err = svc
            .create(&Caller::Anonymous, PostForm::from_raw("text", "abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, PostError::Denied(Denial::NotAuthenticated { .. })));

        let err = svc
            .create(&fx.author_caller(), PostForm::from_raw("text", "abc"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PostError::Validation(ValidationError::InvalidGroupChoice("abc".into()))
        );
        assert_eq!(fx.store.count_posts(PostFilter::All).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_group() {
        let fx = Fixture::new().await;
        let svc = service(&fx);

        let err = svc
            .create(&fx.author_caller(), PostForm::new("text", Some(GroupId(404))))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PostError::Validation(ValidationError::UnknownGroup(GroupId(404)))
        );
    }

    #[tokio::test]
    async fn test_edit_keeps_author_and_timestamp() {
        let fx = Fixture::new().await;
        let svc = service(&fx);
        let original = fx.create_post("Тестовый пост", Some(fx.group.id)).await;

        fx.clock.advance_secs(60);
        let edited = svc
            .edit(&fx.author_caller(), original.id, PostForm::new("Изменённый", None))
            .await
            .unwrap();

        assert_eq!(edited.text, "Изменённый");
        assert_eq!(edited.group, None);
        assert_eq!(edited.author, original.author);
        assert_eq!(edited.created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_edit_missing_post_is_not_found() {
        let fx = Fixture::new().await;
        let svc = service(&fx);

        let err = svc
            .edit(&fx.author_caller(), PostId(999), PostForm::new("text", None))
            .await
            .unwrap_err();
        assert_eq!(err, PostError::NotFound(NotFoundError::Post(PostId(999))));
    }

    #[tokio::test]
    async fn test_prepare_edit_prefills_current_values() {
        let fx = Fixture::new().await;
        let svc = service(&fx);
        let post = fx.create_post("Тестовый пост", Some(fx.group.id)).await;

        let ctx = svc.prepare_edit(&fx.author_caller(), post.id).await.unwrap();
        assert_eq!(ctx.text, "Тестовый пост");
        assert_eq!(ctx.group, Some(fx.group.id));
        assert_eq!(ctx.editing, Some(post.id));
        assert_eq!(ctx.groups, vec![fx.group.clone()]);
    }

    #[tokio::test]
    async fn test_prepare_edit_by_non_author_is_denied() {
        let fx = Fixture::new().await;
        let svc = service(&fx);
        let post = fx.create_post("Тестовый пост", None).await;

        let err = svc
            .prepare_edit(&fx.non_author_caller(), post.id)
            .await
            .unwrap_err();
        assert_eq!(err.redirect_target(), Some("/profile/test_author/"));
    }

    #[tokio::test]
    async fn test_prepare_create_for_anonymous_is_denied() {
        let fx = Fixture::new().await;
        let svc = service(&fx);

        let err = svc.prepare_create(&Caller::Anonymous).await.unwrap_err();
        assert_eq!(err.redirect_target(), Some("/auth/login/?next=/create/"));
    }

    #[tokio::test]
    async fn test_metrics_recorded() {
        let fx = Fixture::new().await;
        let metrics = Arc::new(PostsMetrics::new());
        let svc = service(&fx).with_metrics(metrics.clone());

        let post = svc
            .create(&fx.author_caller(), PostForm::new("text", None))
            .await
            .unwrap();
        let _ = svc
            .edit(&fx.non_author_caller(), post.id, PostForm::new("hijack", None))
            .await;
        let _ = svc.create(&fx.author_caller(), PostForm::new("  ", None)).await;
        svc.edit(&fx.author_caller(), post.id, PostForm::new("fixed", None))
            .await
            .unwrap();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.posts_created, 1);
        assert_eq!(snapshot.posts_edited, 1);
        assert_eq!(snapshot.denials, 1);
        assert_eq!(snapshot.validation_failures, 1);
    }
}
