//! # Access Guard
//!
//! Central authorization check shared by the lifecycle service and the
//! HTTP routing layer.
//!
//! | Action | Anonymous | Authenticated | Author |
//! |--------|-----------|---------------|--------|
//! | ViewFeed | allowed | allowed | allowed |
//! | Create | login redirect | allowed | allowed |
//! | Edit | login redirect | owner profile redirect | allowed |
//!
//! Denials never surface as a bare error: each carries the page the caller
//! should be sent to.

use thiserror::Error;

use super::entities::{Caller, Post, User};
use super::paths::{login_redirect, profile_path};

/// Intent being authorized.
#[derive(Clone, Copy, Debug)]
pub enum Action<'a> {
    /// Publish a new post.
    Create,
    /// Change an existing post written by `author`.
    ///
    /// `author` must be the user `post.author` refers to.
    Edit { post: &'a Post, author: &'a User },
    /// Read any feed or post page.
    ViewFeed,
}

/// Why access was refused, with the redirect the caller should follow.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Denial {
    /// Caller must log in, then resume at the original target.
    #[error("authentication required (redirect to {login_redirect})")]
    NotAuthenticated { login_redirect: String },

    /// Caller is not the post's author; sent to the author's profile feed.
    #[error("caller is not the post owner (redirect to {owner_profile})")]
    NotOwner { owner_profile: String },
}

impl Denial {
    /// Path the presentation layer redirects to.
    pub fn redirect_to(&self) -> &str {
        match self {
            Denial::NotAuthenticated { login_redirect } => login_redirect,
            Denial::NotOwner { owner_profile } => owner_profile,
        }
    }
}

/// Authorization verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied(Denial),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    /// `Ok(())` when allowed, the denial otherwise.
    pub fn into_result(self) -> Result<(), Denial> {
        match self {
            Decision::Allowed => Ok(()),
            Decision::Denied(denial) => Err(denial),
        }
    }
}

/// Stateless authorization policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct AccessGuard;

impl AccessGuard {
    pub fn new() -> Self {
        Self
    }

    /// Decide whether `caller` may perform `action`.
    ///
    /// `target` is the path the caller originally requested; it becomes the
    /// `next` parameter of the login redirect.
    pub fn authorize(&self, caller: &Caller, action: Action<'_>, target: &str) -> Decision {
        match action {
            Action::ViewFeed => Decision::Allowed,
            Action::Create => match caller {
                Caller::Authenticated(_) => Decision::Allowed,
                Caller::Anonymous => Decision::Denied(Denial::NotAuthenticated {
                    login_redirect: login_redirect(target),
                }),
            },
            Action::Edit { post, author } => {
                debug_assert_eq!(author.id, post.author, "author does not match post {}", post.id);
                match caller {
                    Caller::Anonymous => Decision::Denied(Denial::NotAuthenticated {
                        login_redirect: login_redirect(target),
                    }),
                    Caller::Authenticated(user) if post.is_authored_by(user) => Decision::Allowed,
                    Caller::Authenticated(_) => Decision::Denied(Denial::NotOwner {
                        owner_profile: profile_path(&author.username),
                    }),
                }
            }
        }
    }
}
