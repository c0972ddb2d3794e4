//! Dashboard HTTP server.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use dockdash_common::config::DashboardConfig;
use dockdash_common::error::{DashError, Result};
use dockdash_runtime::backend::SharedBackend;
use dockdash_runtime::engine::Engine;
use tokio::net::TcpListener;

use crate::api::create_router;

/// Dashboard server: owns the engine and serves the API and UI.
#[derive(Debug)]
pub struct DashboardServer {
    config: DashboardConfig,
    engine: Arc<Engine>,
}

impl DashboardServer {
    /// Creates a server from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::Config`] if the configuration is invalid.
    pub fn new(config: DashboardConfig, backend: SharedBackend) -> Result<Self> {
        config.validate()?;
        let engine = Engine::new(backend, config.idle_budget()).with_log_tail(config.log_tail);
        Ok(Self {
            config,
            engine: Arc::new(engine),
        })
    }

    /// Returns the engine shared with request handlers.
    #[must_use]
    pub const fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    /// Returns the server configuration.
    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Builds the router for this server.
    #[must_use]
    pub fn router(&self) -> Router {
        create_router(Arc::clone(&self.engine), &self.config.static_dir)
    }

    /// Binds the configured address and serves until Ctrl-C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::Network`] if the address cannot be bound or the
    /// listener fails.
    pub async fn run(self) -> Result<()> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| DashError::Network { addr, source })?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serves on `listener` until `shutdown` resolves, then cancels every
    /// pending auto-stop timer.
    ///
    /// # Errors
    ///
    /// Returns [`DashError::Network`] if the listener fails.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener
            .local_addr()
            .map_err(|source| DashError::Network {
                addr: self.config.socket_addr(),
                source,
            })?;
        tracing::info!(
            addr = %addr,
            idle_budget_secs = self.config.idle_budget_secs,
            static_dir = %self.config.static_dir.display(),
            "dashboard listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|source| DashError::Network { addr, source })?;

        let canceled = self.engine.autostop().cancel_all();
        tracing::info!(canceled, "dashboard stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C, or on SIGTERM where available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                let _ = signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
