use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router, GatewayState};
use crate::config::GatewayConfig;

pub struct GatewayServer {
    state: Arc<GatewayState>,
    router: Router,
}

impl GatewayServer {
    /// Create a new gateway server
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let state = Arc::new(GatewayState::new(config)?);
        let router = create_router(Arc::clone(&state));
        Ok(Self { state, router })
    }

    /// Bind the configured address and serve until `shutdown` resolves
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self
            .state
            .config
            .listen_addr()
            .parse()
            .context("Invalid listen address")?;

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {}", addr))?;

        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener
            .local_addr()
            .context("failed to read bound address")?;
        info!(
            %local_addr,
            mode = %self.state.engine.policy().mode(),
            keywords = self.state.engine.policy().keywords().len(),
            "redaction gateway listening"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await
            .context("server encountered an unrecoverable error")?;

        info!("redaction gateway stopped accepting connections");
        Ok(())
    }
}
