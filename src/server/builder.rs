//! ServerBuilder for fluent API to build HTTP servers

use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::handlers::AppState;
use super::registry::Registry;
use super::router::build_router;
use crate::config::ServerConfig;
use crate::core::resource::ResourceDescriptor;

/// Builder for creating HTTP servers with auto-registered routes
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_config(ServerConfig::from_yaml_file("burrow.yaml")?)
///     .register(Resource::<Book>::new(book_accessors))?
///     .register(Resource::<Library>::new(library_accessors))?
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder {
    registry: Registry,
    config: ServerConfig,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            config: ServerConfig::default(),
        }
    }

    /// Replace the server configuration
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Register a resource
    ///
    /// Fails on malformed shapes and duplicate names.
    pub fn register(mut self, resource: impl ResourceDescriptor + 'static) -> Result<Self> {
        self.registry.register(resource)?;
        Ok(self)
    }

    /// Freeze the registry and build the router
    pub fn build(self) -> Result<Router> {
        for unresolved in self.registry.unresolved_references() {
            tracing::warn!(
                resource = %unresolved.resource,
                field = %unresolved.field,
                target = %unresolved.target,
                "reference names an unregistered resource; its links will fail"
            );
        }

        let state = AppState::new(Arc::new(self.registry), self.config.default_host());
        Ok(build_router(state).layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds `host:port` from the configuration and stops on SIGTERM or Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.addr();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
