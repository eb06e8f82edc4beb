//! Health check endpoints for container orchestration.
//!
//! `/healthz` is the liveness probe: it returns 200 OK whenever the process can
//! answer HTTP at all, and never touches the cluster. `/k8shealth` checks that
//! the Kubernetes API server is reachable with the configured credentials.

use axum::{extract::State, http::StatusCode};
use tracing::instrument;

use crate::state::AppState;

/// Liveness handler. Answers every request with `200 ok`.
pub async fn healthz() -> &'static str {
    "ok"
}

/// Kubernetes API reachability check.
///
/// Lists namespaces through the shared client; any failure is reported as a
/// 500 with the underlying error in the body.
#[instrument(name = "health::k8s_health", skip(state))]
pub async fn k8s_health(State(state): State<AppState>) -> (StatusCode, String) {
    match state.cluster.list_namespaces().await {
        Ok(namespaces) => {
            tracing::debug!(namespaces = namespaces.len(), "Kubernetes API server reachable");
            (
                StatusCode::OK,
                "Kubernetes API server is reachable".to_string(),
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "Kubernetes API server unreachable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to connect to Kubernetes API server: {}", e),
            )
        }
    }
}
