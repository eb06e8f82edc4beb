//! Kubernetes access for the probe endpoints.
//!
//! The routes never talk to kube-rs directly. They go through two traits:
//! - [`Discovery`] - fetches the API server's self-reported version
//! - [`ClusterApi`] - the list operations used by the health and deployment routes
//!
//! [`K8sClient`] implements both against a live cluster; tests substitute fakes.

mod client;
mod deployments;
mod error;
mod version;

pub use client::K8sClient;
pub use deployments::{
    count_healthy_pods, deployment_statuses, is_pod_healthy, label_selector, DeploymentStatus,
    HealthStatus,
};
pub use error::{K8sError, K8sResult};
pub use version::get_kubernetes_version;

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::apimachinery::pkg::version::Info;

/// Source of cluster version metadata.
#[async_trait]
pub trait Discovery: Send + Sync {
    /// Query the API server's `/version` endpoint.
    async fn server_version(&self) -> K8sResult<Info>;
}

/// Read-only cluster operations used by the HTTP routes.
#[async_trait]
pub trait ClusterApi: Discovery {
    /// Names of all namespaces visible to the client.
    async fn list_namespaces(&self) -> K8sResult<Vec<String>>;

    /// Deployments in `namespace`.
    async fn list_deployments(&self, namespace: &str) -> K8sResult<Vec<Deployment>>;

    /// Pods in `namespace` matching `label_selector` (`key=value,...`).
    async fn list_pods(&self, namespace: &str, label_selector: &str) -> K8sResult<Vec<Pod>>;
}
