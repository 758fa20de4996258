//! Shared fixtures for unit and integration tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::adapters::InMemoryEntityStore;
use crate::domain::{Caller, Group, GroupId, NewGroup, NewPost, Post, Slug, User, Username};
use crate::ports::outbound::{EntityStore, TimeSource};

/// Clock that only moves when told to.
pub struct ManualTimeSource {
    now: Mutex<DateTime<Utc>>,
}

impl ManualTimeSource {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        *self.now.lock() += Duration::seconds(secs);
    }
}

impl Default for ManualTimeSource {
    fn default() -> Self {
        Self::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).single().unwrap_or_default())
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// A store seeded with an author, a second user and one group.
pub struct Fixture {
    pub store: Arc<InMemoryEntityStore>,
    pub clock: Arc<ManualTimeSource>,
    pub author: User,
    pub non_author: User,
    pub group: Group,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryEntityStore::new());
        let author = store
            .insert_user(Username::parse("test_author").expect("valid username"))
            .await
            .expect("insert author");
        let non_author = store
            .insert_user(Username::parse("test_non_author").expect("valid username"))
            .await
            .expect("insert non-author");
        let group = store
            .insert_group(NewGroup {
                title: "Тестовая группа".into(),
                slug: Slug::parse("slug").expect("valid slug"),
                description: "Тестовое описание".into(),
            })
            .await
            .expect("insert group");

        Self {
            store,
            clock: Arc::new(ManualTimeSource::default()),
            author,
            non_author,
            group,
        }
    }

    pub fn author_caller(&self) -> Caller {
        Caller::from(self.author.clone())
    }

    pub fn non_author_caller(&self) -> Caller {
        Caller::from(self.non_author.clone())
    }

    /// Add another group with `slug`.
    pub async fn add_group(&self, slug: &str) -> Group {
        self.store
            .insert_group(NewGroup {
                title: format!("Группа {slug}"),
                slug: Slug::parse(slug).expect("valid slug"),
                description: String::new(),
            })
            .await
            .expect("insert group")
    }

    /// Store a post by the fixture author at the current clock time.
    pub async fn create_post(&self, text: &str, group: Option<GroupId>) -> Post {
        self.create_post_as(&self.author, text, group).await
    }

    pub async fn create_post_as(&self, author: &User, text: &str, group: Option<GroupId>) -> Post {
        self.store
            .insert_post(NewPost {
                text: text.to_string(),
                author: author.id,
                group,
                created_at: self.clock.now(),
            })
            .await
            .expect("insert post")
    }
}
