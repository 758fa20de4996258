//! # Post Lifecycle Tests (yt-01)
//!
//! End-to-end behaviour of the lifecycle service and feed assembler over the
//! in-memory store.
//!
//! ## Test Categories
//!
//! 1. **Access Control** - Anonymous create, non-author edit
//! 2. **Authorship** - Author and timestamp survive edits
//! 3. **Feeds** - Ordering, pagination, group and profile membership
//! 4. **Round Trip** - Create then read back

use std::sync::Arc;

use yt_01_posts::test_utils::{Fixture, ManualTimeSource};
use yt_01_posts::{
    Caller, Denial, FeedApi, FeedAssembler, GroupId, InMemoryEntityStore, NotFoundError,
    PageNumber, PostError, PostFilter, PostForm, PostId, PostLifecycleApi, PostLifecycleService,
    EntityStore, ValidationError,
};

// =============================================================================
// TEST HELPERS
// =============================================================================

struct Services {
    fx: Fixture,
    lifecycle: PostLifecycleService<InMemoryEntityStore, ManualTimeSource>,
    feed: FeedAssembler<InMemoryEntityStore>,
}

async fn services() -> Services {
    let fx = Fixture::new().await;
    let lifecycle = PostLifecycleService::new(fx.store.clone(), fx.clock.clone());
    let feed = FeedAssembler::new(fx.store.clone());
    Services {
        fx,
        lifecycle,
        feed,
    }
}

/// Create `n` posts one second apart through the lifecycle service.
async fn publish_many(s: &Services, n: usize, group: Option<GroupId>) -> Vec<PostId> {
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        s.fx.clock.advance_secs(1);
        let post = s
            .lifecycle
            .create(&s.fx.author_caller(), PostForm::new(format!("Пост {i}"), group))
            .await
            .unwrap();
        ids.push(post.id);
    }
    ids
}

// =============================================================================
// ACCESS CONTROL
// =============================================================================

#[tokio::test]
async fn test_anonymous_create_never_inserts() {
    let s = services().await;

    for text in ["hello", "", "   "] {
        let err = s
            .lifecycle
            .create(&Caller::Anonymous, PostForm::new(text, Some(s.fx.group.id)))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PostError::Denied(Denial::NotAuthenticated {
                login_redirect: "/auth/login/?next=/create/".into()
            })
        );
    }

    assert_eq!(s.fx.store.count_posts(PostFilter::All).await.unwrap(), 0);
}

#[tokio::test]
async fn test_non_author_edit_never_mutates() {
    let s = services().await;
    let post = s.fx.create_post("Тестовый пост", Some(s.fx.group.id)).await;

    let err = s
        .lifecycle
        .edit(
            &s.fx.non_author_caller(),
            post.id,
            PostForm::new("Взлом", None),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        PostError::Denied(Denial::NotOwner {
            owner_profile: "/profile/test_author/".into()
        })
    );
    assert_eq!(s.fx.store.find_post(post.id).await.unwrap(), Some(post));
}

#[tokio::test]
async fn test_anonymous_edit_redirects_to_login_with_edit_path() {
    let s = services().await;
    let post = s.fx.create_post("Тестовый пост", None).await;

    let err = s
        .lifecycle
        .edit(&Caller::Anonymous, post.id, PostForm::new("x", None))
        .await
        .unwrap_err();

    let expected = format!("/auth/login/?next=/posts/{}/edit/", post.id);
    assert_eq!(err.redirect_target(), Some(expected.as_str()));
}

#[tokio::test]
async fn test_non_author_denial_precedes_validation() {
    let s = services().await;
    let post = s.fx.create_post("Тестовый пост", None).await;

    let err = s
        .lifecycle
        .edit(&s.fx.non_author_caller(), post.id, PostForm::new("", None))
        .await
        .unwrap_err();
    assert!(matches!(err, PostError::Denied(Denial::NotOwner { .. })));
}

// =============================================================================
// AUTHORSHIP
// =============================================================================

#[tokio::test]
async fn test_author_unchanged_after_many_edits() {
    let s = services().await;
    let post = s
        .lifecycle
        .create(&s.fx.author_caller(), PostForm::new("v0", None))
        .await
        .unwrap();

    for i in 1..=5 {
        s.fx.clock.advance_secs(10);
        let group = if i % 2 == 0 { Some(s.fx.group.id) } else { None };
        let edited = s
            .lifecycle
            .edit(
                &s.fx.author_caller(),
                post.id,
                PostForm::new(format!("v{i}"), group),
            )
            .await
            .unwrap();
        assert_eq!(edited.author, post.author);
        assert_eq!(edited.created_at, post.created_at);
        assert_eq!(edited.group, group);
    }

    let stored = s.fx.store.find_post(post.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "v5");
    assert_eq!(stored.author, s.fx.author.id);
}

#[tokio::test]
async fn test_failed_edit_validation_leaves_post_intact() {
    let s = services().await;
    let post = s.fx.create_post("Тестовый пост", None).await;

    let err = s
        .lifecycle
        .edit(
            &s.fx.author_caller(),
            post.id,
            PostForm::new("new text", Some(GroupId(404))),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        PostError::Validation(ValidationError::UnknownGroup(GroupId(404)))
    );
    assert_eq!(s.fx.store.find_post(post.id).await.unwrap(), Some(post));
}

#[tokio::test]
async fn test_created_text_is_trimmed() {
    let s = services().await;
    let post = s
        .lifecycle
        .create(&s.fx.author_caller(), PostForm::new("  Новый пост \n", None))
        .await
        .unwrap();
    assert_eq!(post.text, "Новый пост");
}

// =============================================================================
// FEEDS
// =============================================================================

#[tokio::test]
async fn test_index_pages_of_thirteen() {
    let s = services().await;
    let ids = publish_many(&s, 13, Some(s.fx.group.id)).await;

    let first = s
        .feed
        .index_feed(&Caller::Anonymous, PageNumber::FIRST)
        .await
        .unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(first.total_items, 13);
    assert!(first.has_next());
    assert_eq!(first.items[0].id, ids[12]);

    let second = s
        .feed
        .index_feed(&Caller::Anonymous, PageNumber::new(2))
        .await
        .unwrap();
    assert_eq!(second.len(), 3);
    assert!(!second.has_next());
    assert!(second.has_previous());
    assert_eq!(second.items.last().map(|p| p.id), Some(ids[0]));
}

#[tokio::test]
async fn test_index_with_fewer_than_a_page() {
    let s = services().await;
    publish_many(&s, 4, None).await;

    let page = s
        .feed
        .index_feed(&s.fx.author_caller(), PageNumber::FIRST)
        .await
        .unwrap();
    assert_eq!(page.len(), 4);
    assert_eq!(page.num_pages(), 1);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let s = services().await;
    publish_many(&s, 3, None).await;

    let page = s
        .feed
        .index_feed(&Caller::Anonymous, PageNumber::new(50))
        .await
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total_items, 3);
}

#[tokio::test]
async fn test_new_post_appears_in_all_three_feeds() {
    let s = services().await;
    let other_group = s.fx.add_group("other").await;
    s.fx
        .create_post_as(&s.fx.non_author, "чужой", Some(other_group.id))
        .await;

    s.fx.clock.advance_secs(5);
    let post = s
        .lifecycle
        .create(
            &s.fx.author_caller(),
            PostForm::new("Новый пост", Some(s.fx.group.id)),
        )
        .await
        .unwrap();

    let index = s
        .feed
        .index_feed(&Caller::Anonymous, PageNumber::FIRST)
        .await
        .unwrap();
    assert_eq!(index.items[0].id, post.id);

    let group = s
        .feed
        .group_feed(&Caller::Anonymous, "slug", PageNumber::FIRST)
        .await
        .unwrap();
    assert_eq!(group.page.items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![post.id]);

    let profile = s
        .feed
        .profile_feed(&Caller::Anonymous, "test_author", PageNumber::FIRST)
        .await
        .unwrap();
    assert!(profile.page.items.iter().any(|p| p.id == post.id));

    let other = s
        .feed
        .group_feed(&Caller::Anonymous, "other", PageNumber::FIRST)
        .await
        .unwrap();
    assert!(other.page.items.iter().all(|p| p.id != post.id));
}

#[tokio::test]
async fn test_group_feed_is_index_restricted_to_group() {
    let s = services().await;
    let other_group = s.fx.add_group("other").await;
    publish_many(&s, 3, Some(s.fx.group.id)).await;
    publish_many(&s, 2, Some(other_group.id)).await;
    publish_many(&s, 2, None).await;

    let index = s
        .feed
        .index_feed(&Caller::Anonymous, PageNumber::FIRST)
        .await
        .unwrap();
    let expected: Vec<_> = index
        .items
        .iter()
        .filter(|p| p.group.as_ref().map(|g| g.id) == Some(s.fx.group.id))
        .map(|p| p.id)
        .collect();

    let group = s
        .feed
        .group_feed(&Caller::Anonymous, "slug", PageNumber::FIRST)
        .await
        .unwrap();
    let actual: Vec<_> = group.page.items.iter().map(|p| p.id).collect();

    assert_eq!(actual, expected);
    assert_eq!(group.group, s.fx.group);
}

#[tokio::test]
async fn test_unknown_group_is_not_found() {
    let s = services().await;
    let err = s
        .feed
        .group_feed(&Caller::Anonymous, "nonexistent-slug", PageNumber::FIRST)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PostError::NotFound(NotFoundError::Group("nonexistent-slug".into()))
    );
}

#[tokio::test]
async fn test_unknown_post_detail_is_not_found() {
    let s = services().await;
    let err = s
        .feed
        .post_detail(&Caller::Anonymous, PostId(12345))
        .await
        .unwrap_err();
    assert_eq!(err, PostError::NotFound(NotFoundError::Post(PostId(12345))));
}

// =============================================================================
// ROUND TRIP
// =============================================================================

#[tokio::test]
async fn test_create_then_detail() {
    let s = services().await;
    let post = s
        .lifecycle
        .create(
            &s.fx.author_caller(),
            PostForm::new("hello", Some(s.fx.group.id)),
        )
        .await
        .unwrap();

    let detail = s
        .feed
        .post_detail(&Caller::Anonymous, post.id)
        .await
        .unwrap();
    assert_eq!(detail.text, "hello");
    assert_eq!(detail.author, s.fx.author);
    assert_eq!(detail.group, Some(s.fx.group.clone()));
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let s = Arc::new(services().await);

    let mut handles = Vec::new();
    for i in 0..8 {
        let s = s.clone();
        handles.push(tokio::spawn(async move {
            s.lifecycle
                .create(&s.fx.author_caller(), PostForm::new(format!("#{i}"), None))
                .await
                .unwrap()
                .id
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
}
