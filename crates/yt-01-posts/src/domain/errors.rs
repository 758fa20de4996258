//! # Domain Errors
//!
//! Every expected failure of the posts subsystem is a modeled outcome:
//! access denials carry a redirect target, validation failures name the
//! offending field, missing entities name what was looked up.

use thiserror::Error;

use super::access::Denial;
use super::value_objects::{GroupId, PostId};

/// Rejected identifier or name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("slug cannot be empty")]
    EmptySlug,

    #[error("slug too long: {len} > {max}")]
    SlugTooLong { len: usize, max: usize },

    #[error("invalid slug character: {0:?}")]
    InvalidSlugChar(char),

    #[error("username cannot be empty")]
    EmptyUsername,

    #[error("username too long: {len} > {max}")]
    UsernameTooLong { len: usize, max: usize },

    #[error("invalid username character: {0:?}")]
    InvalidUsernameChar(char),
}

/// Post form field rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Text is empty once surrounding whitespace is removed.
    #[error("post text cannot be empty")]
    EmptyText,

    /// Selected group does not exist.
    #[error("unknown group: {0}")]
    UnknownGroup(GroupId),

    /// Group field is neither empty nor a group id.
    #[error("select a valid group: {0:?} is not a choice")]
    InvalidGroupChoice(String),
}

impl ValidationError {
    /// Form field the rule belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyText => "text",
            ValidationError::UnknownGroup(_) | ValidationError::InvalidGroupChoice(_) => "group",
        }
    }
}

/// Lookup misses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    #[error("group not found: {0}")]
    Group(String),

    #[error("user not found: {0}")]
    User(String),

    #[error("post not found: {0}")]
    Post(PostId),
}

/// Entity store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Unique constraint violated (username, slug).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Row referenced by a write does not exist.
    #[error("missing row: {0}")]
    MissingRow(String),

    /// Backend failure (connection, serialization, I/O).
    #[error("backend error: {0}")]
    Backend(String),
}

/// Outcome of a failed posts operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
    #[error("access denied: {0}")]
    Denied(Denial),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<Denial> for PostError {
    fn from(denial: Denial) -> Self {
        PostError::Denied(denial)
    }
}

impl PostError {
    /// Redirect target when the error is an access denial.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            PostError::Denied(denial) => Some(denial.redirect_to()),
            _ => None,
        }
    }
}
