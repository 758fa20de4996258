//! Wire types for the HTTP surface.

use serde::{Deserialize, Serialize};
use yt_01_posts::{Group, GroupFeed, Page, PageNumber, PostForm, PostSummary, ProfileFeed, User};

/// `?page=N` query. Values that are not positive integers read as page 1.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page_number(&self) -> PageNumber {
        PageNumber::parse_lenient(self.page.as_deref())
    }
}

/// Form-urlencoded body of the create and edit forms.
///
/// Fields are passed through unjudged; the posts core validates them after
/// the access check.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostFormBody {
    pub text: String,
    /// Group id; empty means no group.
    pub group: String,
}

impl From<PostFormBody> for PostForm {
    fn from(body: PostFormBody) -> Self {
        PostForm::from_raw(body.text, &body.group)
    }
}

/// A page of results with navigation fields spelled out.
#[derive(Debug, Clone, Serialize)]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub num_pages: usize,
    pub total_items: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> From<Page<T>> for PageView<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            page: page.page_number.get(),
            num_pages: page.num_pages(),
            total_items: page.total_items,
            has_next: page.has_next(),
            has_previous: page.has_previous(),
            items: page.items,
        }
    }
}

/// Body of `GET /group/{slug}/`.
#[derive(Debug, Clone, Serialize)]
pub struct GroupFeedView {
    pub group: Group,
    pub posts: PageView<PostSummary>,
}

impl From<GroupFeed> for GroupFeedView {
    fn from(feed: GroupFeed) -> Self {
        Self {
            group: feed.group,
            posts: feed.page.into(),
        }
    }
}

/// Body of `GET /profile/{username}/`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileFeedView {
    pub author: User,
    /// Total number of posts by the author.
    pub post_count: usize,
    pub posts: PageView<PostSummary>,
}

impl From<ProfileFeed> for ProfileFeedView {
    fn from(feed: ProfileFeed) -> Self {
        Self {
            author: feed.author,
            post_count: feed.page.total_items,
            posts: feed.page.into(),
        }
    }
}
