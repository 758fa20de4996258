//! Gateway service: owns the HTTP server lifecycle.

use axum::http::HeaderName;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};
use yt_01_posts::{EntityStore, FeedApi, PostLifecycleApi};

use crate::domain::{GatewayConfig, GatewayError};
use crate::handlers::AppState;
use crate::middleware::CallerLayer;
use crate::router::build_router;

/// HTTP gateway service state
pub struct GatewayService {
    config: GatewayConfig,
    state: AppState,
    identity: CallerLayer,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server: Option<JoinHandle<std::io::Result<()>>>,
}

impl GatewayService {
    /// Create a new gateway over the posts services
    ///
    /// `identity_store` resolves the trusted caller header to users.
    pub fn new(
        config: GatewayConfig,
        lifecycle: Arc<dyn PostLifecycleApi>,
        feed: Arc<dyn FeedApi>,
        identity_store: Arc<dyn EntityStore>,
    ) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let header = HeaderName::from_bytes(config.identity.caller_header.as_bytes())
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        Ok(Self {
            config,
            state: AppState { lifecycle, feed },
            identity: CallerLayer::new(header, identity_store),
            shutdown_tx: None,
            server: None,
        })
    }

    /// Router with the full middleware stack
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), self.identity.clone(), &self.config)
    }

    /// Bind the listener and serve in the background
    ///
    /// Returns the bound address (useful when the configured port is 0).
    pub async fn start(&mut self) -> Result<SocketAddr, GatewayError> {
        let listener = tokio::net::TcpListener::bind(self.config.http_addr())
            .await
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        let addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let router = self.router();
        let server = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.server = Some(server);
        info!(%addr, "[yt-02] HTTP server listening");
        Ok(addr)
    }

    /// Trigger graceful shutdown and wait for in-flight requests
    pub async fn shutdown(&mut self) -> Result<(), GatewayError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(server) = self.server.take() {
            match server.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(error = %e, "[yt-02] HTTP server error");
                    return Err(GatewayError::Server(e.to_string()));
                }
                Err(e) => return Err(GatewayError::Server(e.to_string())),
            }
        }

        info!("[yt-02] HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
