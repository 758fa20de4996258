//! Wiring of store, services and gateway.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use yt_01_posts::{
    load_fixture, FeedAssembler, InMemoryEntityStore, MetricsSnapshot, PostLifecycleService,
    PostsMetrics, SeedFixture, SystemTimeSource,
};
use yt_02_gateway::GatewayService;

use crate::config::RuntimeConfig;

/// Running application: the shared store, metrics and the HTTP gateway.
pub struct YatubeRuntime {
    store: Arc<InMemoryEntityStore>,
    metrics: Arc<PostsMetrics>,
    gateway: GatewayService,
}

impl YatubeRuntime {
    /// Validate `config`, seed the store and build the services.
    pub async fn new(config: RuntimeConfig) -> Result<Self> {
        config.validate()?;

        let store = Arc::new(InMemoryEntityStore::new());
        if let Some(path) = &config.seed_file {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading seed fixture {}", path.display()))?;
            let fixture = SeedFixture::from_json(&raw)
                .with_context(|| format!("parsing seed fixture {}", path.display()))?;
            load_fixture(store.as_ref(), fixture)
                .await
                .context("loading seed fixture")?;
        }

        let metrics = Arc::new(PostsMetrics::new());
        let lifecycle = PostLifecycleService::new(store.clone(), Arc::new(SystemTimeSource))
            .with_metrics(metrics.clone());
        let feed = FeedAssembler::with_config(store.clone(), config.posts.clone())
            .with_metrics(metrics.clone());

        let gateway = GatewayService::new(
            config.gateway,
            Arc::new(lifecycle),
            Arc::new(feed),
            store.clone(),
        )
        .context("building HTTP gateway")?;

        Ok(Self {
            store,
            metrics,
            gateway,
        })
    }

    /// Start serving; returns the bound address.
    pub async fn start(&mut self) -> Result<SocketAddr> {
        let addr = self.gateway.start().await.context("starting HTTP gateway")?;
        info!(%addr, "Yatube is running");
        Ok(addr)
    }

    /// Stop the gateway and log final counters.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.gateway.shutdown().await?;
        info!(metrics = ?self.metrics.snapshot(), "Yatube stopped");
        Ok(())
    }

    pub fn store(&self) -> Arc<InMemoryEntityStore> {
        Arc::clone(&self.store)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
