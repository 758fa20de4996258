//! # Domain Entities
//!
//! Users, groups and posts as stored, plus the resolved summary handed to
//! presentation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{GroupId, PostId, Slug, UserId, Username};

/// Registered user. Owned by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: Username,
}

/// Thematic group a post may be tagged with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub title: String,
    pub slug: Slug,
    pub description: String,
}

/// Stored post row.
///
/// `author` and `created_at` are fixed at insertion; only `text` and
/// `group` change afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub text: String,
    pub author: UserId,
    pub group: Option<GroupId>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Whether `user` wrote this post.
    pub fn is_authored_by(&self, user: &User) -> bool {
        self.author == user.id
    }
}

/// Fields for a post that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPost {
    pub text: String,
    pub author: UserId,
    pub group: Option<GroupId>,
    pub created_at: DateTime<Utc>,
}

/// Validated editable fields of a post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostDraft {
    pub text: String,
    pub group: Option<GroupId>,
}

/// Fields for a group created out of band.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewGroup {
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub description: String,
}

/// Post with author and group resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub id: PostId,
    pub text: String,
    pub author: User,
    pub group: Option<Group>,
    pub created_at: DateTime<Utc>,
}

/// Identity making a request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Caller {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Caller {
    /// Authenticated user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Caller::Anonymous => None,
            Caller::Authenticated(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Caller::Authenticated(_))
    }
}

impl From<User> for Caller {
    fn from(user: User) -> Self {
        Caller::Authenticated(user)
    }
}
