//! Caller identity middleware.
//!
//! The upstream identity provider authenticates users and forwards the
//! username in a trusted header. This layer resolves that username against
//! the store and attaches the resulting [`Caller`] to the request; a missing
//! header or an unknown username yields `Caller::Anonymous`.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderName, Request},
};
use std::convert::Infallible;
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::{debug, warn};
use yt_01_posts::{Caller, EntityStore};

/// Identity layer
#[derive(Clone)]
pub struct CallerLayer {
    header: HeaderName,
    store: Arc<dyn EntityStore>,
}

impl CallerLayer {
    pub fn new(header: HeaderName, store: Arc<dyn EntityStore>) -> Self {
        Self { header, store }
    }
}

impl<S> Layer<S> for CallerLayer {
    type Service = CallerService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CallerService {
            inner,
            header: self.header.clone(),
            store: Arc::clone(&self.store),
        }
    }
}

/// Identity service
#[derive(Clone)]
pub struct CallerService<S> {
    inner: S,
    header: HeaderName,
    store: Arc<dyn EntityStore>,
}

impl<S, B> Service<Request<B>> for CallerService<S>
where
    S: Service<Request<B>> + Clone + Send + 'static,
    S::Future: Send,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let store = Arc::clone(&self.store);
        let username = req
            .headers()
            .get(&self.header)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        // Take the service that was driven to readiness, leave a fresh clone.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let caller = match username {
                Some(username) => resolve(store.as_ref(), &username).await,
                None => Caller::Anonymous,
            };
            req.extensions_mut().insert(caller);
            inner.call(req).await
        })
    }
}

async fn resolve(store: &dyn EntityStore, username: &str) -> Caller {
    match store.find_user_by_username(username).await {
        Ok(Some(user)) => {
            debug!(username, "[yt-02] Caller resolved");
            Caller::Authenticated(user)
        }
        Ok(None) => {
            debug!(username, "[yt-02] Unknown caller, treating as anonymous");
            Caller::Anonymous
        }
        Err(e) => {
            warn!(username, error = %e, "[yt-02] Caller lookup failed, treating as anonymous");
            Caller::Anonymous
        }
    }
}

/// Extractor for the caller attached by [`CallerLayer`].
///
/// Requests that did not pass through the layer are anonymous.
#[derive(Debug, Clone)]
pub struct CurrentCaller(pub Caller);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentCaller {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentCaller(
            parts.extensions.get::<Caller>().cloned().unwrap_or_default(),
        ))
    }
}
