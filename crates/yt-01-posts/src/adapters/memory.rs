use async_trait::async_trait;
use parking_lot::RwLock;
use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::domain::{
    Group, GroupId, NewGroup, NewPost, Post, PostDraft, PostId, StoreError, User, UserId,
    Username, Window,
};
use crate::ports::outbound::{EntityStore, PostFilter};

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    groups: BTreeMap<GroupId, Group>,
    posts: BTreeMap<PostId, Post>,
    next_user: u64,
    next_group: u64,
    next_post: u64,
}

fn next_id(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

/// In-memory entity store.
///
/// A single `RwLock` guards all tables, so every write is serialized and
/// readers never observe a half-applied update. Ids start at 1 and are
/// never reused.
#[derive(Default)]
pub struct InMemoryEntityStore {
    tables: RwLock<Tables>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|u| u.username.as_str() == username)
            .cloned())
    }

    async fn insert_user(&self, username: Username) -> Result<User, StoreError> {
        let mut tables = self.tables.write();
        if tables.users.values().any(|u| u.username == username) {
            return Err(StoreError::Conflict(format!("username {username} is taken")));
        }
        let user = User {
            id: UserId(next_id(&mut tables.next_user)),
            username,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_group(&self, id: GroupId) -> Result<Option<Group>, StoreError> {
        Ok(self.tables.read().groups.get(&id).cloned())
    }

    async fn find_group_by_slug(&self, slug: &str) -> Result<Option<Group>, StoreError> {
        Ok(self
            .tables
            .read()
            .groups
            .values()
            .find(|g| g.slug.as_str() == slug)
            .cloned())
    }

    async fn list_groups(&self) -> Result<Vec<Group>, StoreError> {
        Ok(self.tables.read().groups.values().cloned().collect())
    }

    async fn insert_group(&self, group: NewGroup) -> Result<Group, StoreError> {
        let mut tables = self.tables.write();
        if tables.groups.values().any(|g| g.slug == group.slug) {
            return Err(StoreError::Conflict(format!(
                "slug {} is taken",
                group.slug.as_str()
            )));
        }
        let group = Group {
            id: GroupId(next_id(&mut tables.next_group)),
            title: group.title,
            slug: group.slug,
            description: group.description,
        };
        tables.groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn find_post(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        Ok(self.tables.read().posts.get(&id).cloned())
    }

    async fn insert_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut tables = self.tables.write();
        if !tables.users.contains_key(&post.author) {
            return Err(StoreError::MissingRow(format!("user {}", post.author)));
        }
        if let Some(group) = post.group {
            if !tables.groups.contains_key(&group) {
                return Err(StoreError::MissingRow(format!("group {group}")));
            }
        }
        let post = Post {
            id: PostId(next_id(&mut tables.next_post)),
            text: post.text,
            author: post.author,
            group: post.group,
            created_at: post.created_at,
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: PostId, draft: PostDraft) -> Result<Post, StoreError> {
        let mut tables = self.tables.write();
        if let Some(group) = draft.group {
            if !tables.groups.contains_key(&group) {
                return Err(StoreError::MissingRow(format!("group {group}")));
            }
        }
        let post = tables
            .posts
            .get_mut(&id)
            .ok_or_else(|| StoreError::MissingRow(format!("post {id}")))?;
        post.text = draft.text;
        post.group = draft.group;
        Ok(post.clone())
    }

    async fn count_posts(&self, filter: PostFilter) -> Result<usize, StoreError> {
        Ok(self
            .tables
            .read()
            .posts
            .values()
            .filter(|p| filter.matches(p))
            .count())
    }

    async fn list_posts(&self, filter: PostFilter, window: Window) -> Result<Vec<Post>, StoreError> {
        let tables = self.tables.read();
        let mut matching: Vec<&Post> = tables.posts.values().filter(|p| filter.matches(p)).collect();
        // Newest first; ids grow with insertion so they break timestamp ties.
        matching.sort_by_key(|p| (Reverse(p.created_at), Reverse(p.id)));
        Ok(window.slice(matching.into_iter().cloned()))
    }
}
