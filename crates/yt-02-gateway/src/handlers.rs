//! Route handlers.
//!
//! Every handler takes the caller from [`CurrentCaller`] and delegates to the
//! posts core; failures render through [`ApiError`].

use axum::{
    extract::{rejection::FormRejection, Path, Query, State},
    http::Uri,
    response::Response,
    Form, Json,
};
use std::sync::Arc;
use tracing::debug;
use yt_01_posts::domain::paths::{post_detail_path, profile_path, INDEX_PATH};
use yt_01_posts::{FeedApi, PostForm, PostFormContext, PostId, PostLifecycleApi, PostSummary};

use crate::domain::error::found;
use crate::domain::{
    ApiError, ApiResult, GroupFeedView, PageQuery, PageView, PostFormBody, ProfileFeedView,
};
use crate::middleware::CurrentCaller;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub lifecycle: Arc<dyn PostLifecycleApi>,
    pub feed: Arc<dyn FeedApi>,
}

/// Path segments that are not a post id match no route.
fn parse_post_id(raw: &str) -> ApiResult<PostId> {
    raw.parse::<PostId>()
        .map_err(|_| ApiError::RouteNotFound(format!("/posts/{raw}/")))
}

/// Read a submitted post form. An unreadable body counts as an empty form,
/// so access is still decided before anything is rejected.
fn read_form(body: Result<Form<PostFormBody>, FormRejection>) -> PostForm {
    match body {
        Ok(Form(body)) => body.into(),
        Err(rejection) => {
            debug!(%rejection, "[yt-02] Unreadable form body");
            PostForm::default()
        }
    }
}

/// `GET /`
pub async fn index(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<PageView<PostSummary>>> {
    let page = state.feed.index_feed(&caller, query.page_number()).await?;
    Ok(Json(page.into()))
}

/// `GET /group/{slug}/`
pub async fn group_posts(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<GroupFeedView>> {
    let feed = state
        .feed
        .group_feed(&caller, &slug, query.page_number())
        .await?;
    Ok(Json(feed.into()))
}

/// `GET /profile/{username}/`
pub async fn profile(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<ProfileFeedView>> {
    let feed = state
        .feed
        .profile_feed(&caller, &username, query.page_number())
        .await?;
    Ok(Json(feed.into()))
}

/// `GET /posts/{post_id}/`
pub async fn post_detail(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<PostSummary>> {
    let post_id = parse_post_id(&raw_id)?;
    let post = state.feed.post_detail(&caller, post_id).await?;
    Ok(Json(post))
}

/// `GET /create/`
pub async fn create_form(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
) -> ApiResult<Json<PostFormContext>> {
    Ok(Json(state.lifecycle.prepare_create(&caller).await?))
}

/// `POST /create/`; redirects to the author's profile.
pub async fn create(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    body: Result<Form<PostFormBody>, FormRejection>,
) -> ApiResult<Response> {
    state.lifecycle.create(&caller, read_form(body)).await?;

    // create() only succeeds for an authenticated caller
    let target = caller
        .user()
        .map(|author| profile_path(&author.username))
        .unwrap_or_else(|| INDEX_PATH.to_string());
    Ok(found(&target))
}

/// `GET /posts/{post_id}/edit/`
pub async fn edit_form(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<PostFormContext>> {
    let post_id = parse_post_id(&raw_id)?;
    Ok(Json(state.lifecycle.prepare_edit(&caller, post_id).await?))
}

/// `POST /posts/{post_id}/edit/`; redirects to the post page.
pub async fn edit(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(raw_id): Path<String>,
    body: Result<Form<PostFormBody>, FormRejection>,
) -> ApiResult<Response> {
    let post_id = parse_post_id(&raw_id)?;
    let post = state.lifecycle.edit(&caller, post_id, read_form(body)).await?;
    Ok(found(&post_detail_path(post.id)))
}

/// Any path without a route.
pub async fn fallback(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
