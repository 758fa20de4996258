//! Path templates for the posts pages.
//!
//! The access guard and the gateway both build redirect targets from
//! these, so the two can never disagree on where a page lives.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::value_objects::{PostId, Slug, Username};

/// Login page of the identity provider.
pub const LOGIN_PATH: &str = "/auth/login/";

/// Index feed.
pub const INDEX_PATH: &str = "/";

/// Post creation form.
pub const CREATE_PATH: &str = "/create/";

/// Characters left as-is in the `next` query value: unreserved plus `/`.
const NEXT_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

pub fn group_path(slug: &Slug) -> String {
    format!("/group/{}/", slug)
}

pub fn profile_path(username: &Username) -> String {
    let encoded = utf8_percent_encode(username.as_str(), NEXT_VALUE);
    format!("/profile/{}/", encoded)
}

pub fn post_detail_path(id: PostId) -> String {
    format!("/posts/{}/", id)
}

pub fn post_edit_path(id: PostId) -> String {
    format!("/posts/{}/edit/", id)
}

/// Login redirect that resumes at `next` after authentication.
pub fn login_redirect(next: &str) -> String {
    format!(
        "{}?next={}",
        LOGIN_PATH,
        utf8_percent_encode(next, NEXT_VALUE)
    )
}
