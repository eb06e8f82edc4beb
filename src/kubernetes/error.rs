//! Kubernetes error types.

use thiserror::Error;

/// Kubernetes-specific errors
#[derive(Debug, Error)]
pub enum K8sError {
    /// Error from kube-rs client
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    /// Kubeconfig or in-cluster configuration could not be loaded
    #[error("Invalid kubeconfig: {0}")]
    InvalidKubeconfig(String),
}

pub type K8sResult<T> = Result<T, K8sError>;
