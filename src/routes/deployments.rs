//! Deployment replica report.
//!
//! Emits one JSON object per deployment, newline separated, comparing the
//! desired replica count with the number of healthy pods.

use axum::{
    extract::{Query, State},
    http::header::CONTENT_TYPE,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::kubernetes::{deployment_statuses, DeploymentStatus};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeploymentsParams {
    /// Namespace to inspect; falls back to the configured namespace
    pub namespace: Option<String>,
}

/// Lists deployments and their health as newline-delimited JSON.
#[instrument(name = "deployments::list", skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<DeploymentsParams>,
) -> Result<impl IntoResponse, AppError> {
    let namespace = params
        .namespace
        .filter(|ns| !ns.is_empty())
        .unwrap_or_else(|| state.config.kubernetes.namespace.clone());

    let statuses = deployment_statuses(state.cluster.as_ref(), &namespace).await?;
    let body = to_ndjson(&statuses)?;

    Ok(([(CONTENT_TYPE, "application/json")], body))
}

/// Serialize each status on its own line, without a trailing newline.
fn to_ndjson(statuses: &[DeploymentStatus]) -> Result<String, serde_json::Error> {
    let lines = statuses
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}
