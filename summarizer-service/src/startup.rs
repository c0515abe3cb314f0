//! Application startup and lifecycle management.

use crate::config::{CorsConfig, SummarizerConfig};
use crate::handlers;
use crate::services::init_metrics;
use crate::services::providers::chat_completions::ChatCompletionsProvider;
use crate::services::providers::TextProvider;
use crate::services::Summarizer;
use axum::http::HeaderValue;
use axum::middleware::from_fn;
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{http_trace_layer, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub summarizer: Summarizer,
}

/// Build the HTTP router with request-id, tracing and CORS layers.
pub fn build_router(state: AppState, cors: &CorsConfig) -> Result<Router, AppError> {
    let router = Router::new()
        .route("/summarize", post(handlers::summarize))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .layer(cors_layer(cors)?)
        .with_state(state);

    Ok(router)
}

/// Credentialed CORS for the configured origins. Methods and headers are
/// mirrored from the preflight, as wildcards cannot be combined with credentials.
fn cors_layer(cors: &CorsConfig) -> Result<CorsLayer, AppError> {
    let origins = cors
        .allowed_origins
        .iter()
        .map(|origin| {
            if origin == "*" {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "Wildcard CORS origin cannot be used with credentials"
                )));
            }
            origin.parse::<HeaderValue>().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid CORS origin '{}': {}", origin, e))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application against the configured upstream API.
    pub async fn build(config: SummarizerConfig) -> Result<Self, AppError> {
        let provider = ChatCompletionsProvider::new(config.upstream.clone()).map_err(|e| {
            tracing::error!("Failed to create upstream HTTP client: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;

        tracing::info!(
            upstream_host = config.upstream.api_url.host_str().unwrap_or("-"),
            timeout_secs = config.upstream.timeout.as_secs(),
            "Initialized upstream provider"
        );

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application around an explicit provider.
    pub async fn build_with_provider(
        config: SummarizerConfig,
        provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        init_metrics();

        let state = AppState {
            summarizer: Summarizer::new(provider),
        };
        let router = build_router(state, &config.cors)?;

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Summarizer service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
