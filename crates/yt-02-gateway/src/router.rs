//! Route table and middleware stack.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/` | index feed |
//! | GET | `/group/{slug}/` | group feed |
//! | GET | `/profile/{username}/` | profile feed |
//! | GET | `/posts/{post_id}/` | post detail |
//! | GET, POST | `/create/` | create form, create |
//! | GET, POST | `/posts/{post_id}/edit/` | edit form, edit |
//! | any | anything else | 404 |

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::domain::GatewayConfig;
use crate::handlers::{self, AppState};
use crate::middleware::CallerLayer;

/// Build the HTTP router
pub fn build_router(state: AppState, identity: CallerLayer, config: &GatewayConfig) -> Router {
    // Outermost first; the identity layer sits next to the routes.
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(identity);

    Router::new()
        .route("/", get(handlers::index))
        .route("/group/:slug/", get(handlers::group_posts))
        .route("/profile/:username/", get(handlers::profile))
        .route("/posts/:post_id/", get(handlers::post_detail))
        .route(
            "/create/",
            get(handlers::create_form).post(handlers::create),
        )
        .route(
            "/posts/:post_id/edit/",
            get(handlers::edit_form).post(handlers::edit),
        )
        .fallback(handlers::fallback)
        .layer(middleware)
        .with_state(state)
}
