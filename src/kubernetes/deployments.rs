//! Deployment health reporting
//!
//! Compares each deployment's desired replica count with the number of its
//! pods that are actually up and running.

use futures::stream::{self, StreamExt};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Pod;
use serde::Serialize;

use crate::config::{DEFAULT_DESIRED_REPLICAS, MAX_CONCURRENT_POD_QUERIES};

use super::error::K8sResult;
use super::ClusterApi;

/// Whether a deployment has as many healthy pods as it asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "NOK")]
    NotOk,
}

/// Replica summary for a single deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentStatus {
    pub name: String,
    pub namespace: String,
    pub desired_replicas: i32,
    pub current_replicas: i32,
    pub status: HealthStatus,
}

impl DeploymentStatus {
    fn new(name: String, namespace: String, desired_replicas: i32, current_replicas: i32) -> Self {
        let status = if desired_replicas == current_replicas {
            HealthStatus::Ok
        } else {
            HealthStatus::NotOk
        };

        Self {
            name,
            namespace,
            desired_replicas,
            current_replicas,
            status,
        }
    }
}

/// A pod is healthy when it is in the `Running` phase and every one of its
/// containers is running with a recorded start time.
pub fn is_pod_healthy(pod: &Pod) -> bool {
    let Some(status) = pod.status.as_ref() else {
        return false;
    };

    if status.phase.as_deref() != Some("Running") {
        return false;
    }

    match status.container_statuses.as_deref() {
        None | Some([]) => false,
        Some(containers) => containers.iter().all(|container| {
            container
                .state
                .as_ref()
                .and_then(|state| state.running.as_ref())
                .and_then(|running| running.started_at.as_ref())
                .is_some()
        }),
    }
}

/// Builds a `key=value,...` selector from the deployment's `matchLabels`.
///
/// Returns `None` when there are no match labels, since an empty selector
/// would match every pod in the namespace.
pub fn label_selector(deployment: &Deployment) -> Option<String> {
    let labels = deployment
        .spec
        .as_ref()?
        .selector
        .match_labels
        .as_ref()
        .filter(|labels| !labels.is_empty())?;

    Some(
        labels
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Number of healthy pods matching `selector`. Listing failures count as zero.
pub async fn count_healthy_pods<C>(client: &C, namespace: &str, selector: &str) -> i32
where
    C: ClusterApi + ?Sized,
{
    match client.list_pods(namespace, selector).await {
        Ok(pods) => {
            let healthy = pods.iter().filter(|pod| is_pod_healthy(pod)).count();
            i32::try_from(healthy).unwrap_or(i32::MAX)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                namespace = %namespace,
                selector = %selector,
                "Failed to list pods"
            );
            0
        }
    }
}

/// Collects a [`DeploymentStatus`] for every deployment in `namespace`.
///
/// Pods are counted concurrently, at most [`MAX_CONCURRENT_POD_QUERIES`]
/// deployments at a time, and results keep the listing order. Only a failure
/// to list the deployments themselves is returned as an error.
pub async fn deployment_statuses<C>(client: &C, namespace: &str) -> K8sResult<Vec<DeploymentStatus>>
where
    C: ClusterApi + ?Sized,
{
    let deployments = client.list_deployments(namespace).await?;
    tracing::debug!(
        namespace = %namespace,
        count = deployments.len(),
        "Listed deployments"
    );

    let statuses = deployments.into_iter().map(|deployment| async move {
        let name = deployment.metadata.name.clone().unwrap_or_default();
        let deployment_namespace = deployment
            .metadata
            .namespace
            .clone()
            .unwrap_or_else(|| namespace.to_string());
        let desired = deployment
            .spec
            .as_ref()
            .and_then(|spec| spec.replicas)
            .unwrap_or(DEFAULT_DESIRED_REPLICAS);

        let current = match label_selector(&deployment) {
            Some(selector) => count_healthy_pods(client, &deployment_namespace, &selector).await,
            None => {
                tracing::warn!(deployment = %name, "Deployment has no matchLabels selector");
                0
            }
        };

        DeploymentStatus::new(name, deployment_namespace, desired, current)
    });

    Ok(stream::iter(statuses)
        .buffered(MAX_CONCURRENT_POD_QUERIES)
        .collect::<Vec<_>>()
        .await)
}
