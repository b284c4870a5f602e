//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the mock registry from configuration
//! - Create the Axum Router with a single catch-all handler
//! - Wire up middleware (tracing, request ID, timeout)
//! - Serve until the shutdown broadcast fires
//! - Spawn an in-process server for tests

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::Response,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use url::Url;

use crate::config::MockConfig;
use crate::http::request::{propagate_request_id, RequestIdExt};
use crate::lifecycle::shutdown::{self, Shutdown};
use crate::routing::{MockRegistry, RegistryError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<MockRegistry>,
}

/// HTTP server answering from the mock registry.
pub struct HttpServer {
    router: Router,
    registry: Arc<MockRegistry>,
    config: MockConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: MockConfig) -> Result<Self, RegistryError> {
        let registry = Arc::new(MockRegistry::from_config(&config)?);
        let state = AppState {
            registry: registry.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            registry,
            config,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &MockConfig, state: AppState) -> Router {
        Router::new()
            .fallback(intercept_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(middleware::from_fn(propagate_request_id))
            .layer(TraceLayer::new_for_http())
    }

    pub fn registry(&self) -> &Arc<MockRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// The fully layered router, for in-process use.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            host = %self.registry.host(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: every request goes through the registry.
async fn intercept_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    tracing::debug!(
        request_id = request.request_id().map(|id| id.as_str()).unwrap_or("unknown"),
        method = %request.method(),
        uri = %request.uri(),
        "Dispatching request"
    );

    state.registry.respond(&request)
}

/// A server running on a background task.
pub struct MockServerHandle {
    addr: SocketAddr,
    host: Url,
    shutdown: Shutdown,
    task: JoinHandle<Result<(), io::Error>>,
}

impl MockServerHandle {
    /// The bound socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// URL to configure as the client's HTTP proxy.
    pub fn proxy_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The intercepted base URL.
    pub fn base_url(&self) -> &Url {
        &self.host
    }

    /// Absolute URL for `path_and_query` on the intercepted host.
    pub fn url(&self, path_and_query: &str) -> String {
        format!(
            "{}{}",
            self.host.as_str().trim_end_matches('/'),
            path_and_query
        )
    }

    /// URL for `path_and_query` addressed straight at the bound socket.
    pub fn direct_url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }

    /// Stop the server and wait for it to finish.
    pub async fn shutdown(self) -> Result<(), io::Error> {
        self.shutdown.trigger();
        self.task.await.map_err(io::Error::other)?
    }
}

/// Bind `config.server.bind_address` and serve on a background task.
pub async fn spawn_mock_server(config: MockConfig) -> Result<MockServerHandle, ServerError> {
    let server = HttpServer::new(config)?;
    let listener = TcpListener::bind(&server.config().server.bind_address).await?;
    let addr = listener.local_addr()?;
    let host = server.registry().host().clone();

    let shutdown = Shutdown::new();
    let task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    Ok(MockServerHandle {
        addr,
        host,
        shutdown,
        task,
    })
}
