//! # Hook-Relay Gateway
//!
//! HTTP surface of the hook-relay webhook fan-in gateway.
//!
//! The gateway serves `POST /hook/{fingerprint}`: the fingerprint resolves
//! a registered endpoint, the endpoint's source adapter authenticates and
//! normalizes the request, and the resulting canonical update is forwarded
//! to the downstream notification API. The response relayed to the caller
//! mirrors the downstream's status.

pub mod config;
pub mod notifier;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use hook_relay_core::{
    sources::{self, HookRequest, SourceError},
    HookRegistry,
};
use notifier::{Notifier, NotifyError};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state.
///
/// The registry is populated before serving begins and never mutated
/// afterwards, so concurrent request handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Fingerprint-keyed hook registry.
    pub registry: Arc<HookRegistry>,

    /// Forwarding client for canonical updates.
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Create new application state.
    pub fn new(registry: Arc<HookRegistry>, notifier: Arc<dyn Notifier>) -> Self {
        Self { registry, notifier }
    }
}

// ============================================================================
// HTTP Server
// ============================================================================

/// Create the HTTP router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/hook/{fingerprint}", post(handle_hook))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server with graceful shutdown on SIGINT/SIGTERM.
///
/// In-flight requests get `server_config.shutdown_timeout_seconds` to
/// drain after the signal; connections still open past the deadline are
/// dropped.
///
/// # Errors
///
/// Returns [`ServiceError::BindFailed`] when the listen address cannot be
/// bound and [`ServiceError::ServerFailed`] when serving fails afterwards.
pub async fn start_server(
    server_config: &config::ServerConfig,
    state: AppState,
) -> Result<(), ServiceError> {
    let app = create_router(state);

    let address = format!("{}:{}", server_config.host, server_config.port);
    let listener =
        tokio::net::TcpListener::bind(&address)
            .await
            .map_err(|e| ServiceError::BindFailed {
                address: address.clone(),
                message: e.to_string(),
            })?;

    info!(address = %address, "Starting HTTP server");

    serve_with_shutdown(
        listener,
        app,
        shutdown_signal(),
        Duration::from_secs(server_config.shutdown_timeout_seconds),
    )
    .await
}

/// Resolves when SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}

/// Serve until `signal` resolves, then drain for at most `drain_timeout`.
async fn serve_with_shutdown(
    listener: tokio::net::TcpListener,
    app: Router,
    signal: impl std::future::Future<Output = ()> + Send + 'static,
    drain_timeout: Duration,
) -> Result<(), ServiceError> {
    let (signaled_tx, signaled_rx) = tokio::sync::oneshot::channel();
    let graceful = async move {
        signal.await;
        let _ = signaled_tx.send(());
    };

    let server = axum::serve(listener, app).with_graceful_shutdown(graceful);

    tokio::select! {
        result = server => {
            result.map_err(|e| ServiceError::ServerFailed {
                message: e.to_string(),
            })?;
            info!("HTTP server shutdown complete");
        }
        _ = async {
            let _ = signaled_rx.await;
            tokio::time::sleep(drain_timeout).await;
        } => {
            warn!(
                timeout_seconds = drain_timeout.as_secs(),
                "Graceful shutdown deadline passed, dropping remaining connections"
            );
        }
    }

    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// Handle one inbound hook delivery.
///
/// Per-request state machine: resolve the fingerprint, run the endpoint's
/// source adapter against the raw headers and body, forward the canonical
/// update, relay the downstream status. Each terminal failure maps to its
/// own HTTP outcome via [`HookHandlerError`].
#[instrument(skip_all)]
async fn handle_hook(
    State(state): State<AppState>,
    Path(fingerprint): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HookHandlerError> {
    let hook = state
        .registry
        .resolve(&fingerprint)
        .ok_or(HookHandlerError::UnknownHook)?;

    // Non-UTF-8 header values cannot carry any of the tokens or event names
    // the adapters look for, so they are dropped rather than rejected.
    let header_pairs = headers.iter().filter_map(|(name, value)| {
        value
            .to_str()
            .ok()
            .map(|v| (name.as_str().to_string(), v.to_string()))
    });
    let request = HookRequest::new(header_pairs, body);

    let update = sources::normalize(hook.endpoint().source, &request, hook.secret())
        .map_err(|err| HookHandlerError::Source {
            source_kind: hook.endpoint().source.as_str(),
            err,
        })?;

    let downstream_status = state.notifier.notify(&update).await?;

    info!(
        source = hook.endpoint().source.as_str(),
        downstream_status,
        "forwarded update downstream"
    );

    let status =
        StatusCode::from_u16(downstream_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Ok((status, Json(serde_json::json!({"status": "forwarded"}))).into_response())
}

/// Liveness endpoint.
async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ============================================================================
// Error Types
// ============================================================================

/// Hook handler errors with HTTP status code mapping.
///
/// - `404 Not Found`: unknown fingerprint; no provider-specific logic
///   applies, and the response must not hint at which fingerprints exist.
/// - `401 Unauthorized`: signature or token mismatch.
/// - `400 Bad Request`: malformed payload or unsupported event kind.
/// - `502 Bad Gateway`: the downstream could not be reached. Not retried;
///   the provider's own redelivery is the retry mechanism.
#[derive(Debug, thiserror::Error)]
pub enum HookHandlerError {
    /// The request path does not name a registered hook.
    #[error("no hook registered for this path")]
    UnknownHook,

    /// The source adapter rejected the request.
    #[error("{source_kind} hook rejected: {err}")]
    Source {
        source_kind: &'static str,
        #[source]
        err: SourceError,
    },

    /// The update could not be delivered downstream.
    #[error("forwarding failed: {0}")]
    Forward(#[from] NotifyError),
}

impl IntoResponse for HookHandlerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UnknownHook => StatusCode::NOT_FOUND,
            Self::Source { err, .. } => match err {
                SourceError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
                SourceError::MalformedPayload { .. } | SourceError::UnsupportedEvent { .. } => {
                    StatusCode::BAD_REQUEST
                }
            },
            Self::Forward(_) => StatusCode::BAD_GATEWAY,
        };

        warn!(status = status.as_u16(), error = %self, "hook request rejected");

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}

/// Service-level errors.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("failed to bind to address {address}: {message}")]
    BindFailed { address: String, message: String },

    #[error("server failed: {message}")]
    ServerFailed { message: String },
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
