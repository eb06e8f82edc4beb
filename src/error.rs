use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::kubernetes::K8sError;

/// Body returned when the cluster cannot be queried; details go to the log only.
pub const KUBERNETES_UNAVAILABLE_MESSAGE: &str = "Kubernetes API server unavailable";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Kubernetes error: {0}")]
    Kubernetes(#[from] K8sError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Kubernetes(e) => {
                tracing::warn!(error = %e, "Kubernetes API request failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    KUBERNETES_UNAVAILABLE_MESSAGE,
                )
            }
            AppError::Serialization(_) => {
                tracing::error!("Internal error: {:?}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, message).into_response()
    }
}
