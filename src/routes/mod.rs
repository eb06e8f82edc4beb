//! HTTP route handlers.
//!
//! The liveness probe is served on any method and carries no extra headers.
//! Cluster-facing routes reflect live state, so their responses are marked
//! `no-store`.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod deployments;
pub mod health;

use axum::{
    middleware,
    routing::{any, get},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_NO_STORE;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Liveness - answers every method, never touches the cluster
    let health_routes = Router::new().route("/healthz", any(health::healthz));

    // Cluster status - always fetched fresh
    let cluster_routes = Router::new()
        .route("/k8shealth", get(health::k8s_health))
        .route("/deployments", get(deployments::list))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ));

    Router::new()
        .merge(health_routes)
        .merge(cluster_routes)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
