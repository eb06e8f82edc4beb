//! Kubernetes client wrapper
//!
//! Wraps the kube-rs Client and implements the probe's cluster traits on top of it.

use std::path::Path;

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, Pod};
use k8s_openapi::apimachinery::pkg::version::Info;
use kube::api::{Api, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};

use super::error::{K8sError, K8sResult};
use super::{ClusterApi, Discovery};

/// Wrapper around kube-rs Client with the API server it talks to
#[derive(Clone)]
pub struct K8sClient {
    inner: Client,
    api_server: String,
}

impl K8sClient {
    /// Create a client from a kubeconfig file, or from the in-cluster
    /// service account when no path is given.
    pub async fn connect(kubeconfig: Option<&Path>) -> K8sResult<Self> {
        let config = match kubeconfig {
            Some(path) => Self::config_from_file(path).await?,
            None => Config::incluster().map_err(|e| {
                K8sError::InvalidKubeconfig(format!("Failed to get in-cluster config: {}", e))
            })?,
        };

        let api_server = config.cluster_url.to_string();

        let client = Client::try_from(config)
            .map_err(|e| K8sError::InvalidKubeconfig(format!("Failed to create client: {}", e)))?;

        tracing::debug!(api_server = %api_server, "Created Kubernetes client");

        Ok(Self {
            inner: client,
            api_server,
        })
    }

    async fn config_from_file(path: &Path) -> K8sResult<Config> {
        let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
            K8sError::InvalidKubeconfig(format!(
                "Failed to read kubeconfig '{}': {}",
                path.display(),
                e
            ))
        })?;

        Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| K8sError::InvalidKubeconfig(format!("Failed to create config: {}", e)))
    }

    /// Get API server URL
    pub fn api_server(&self) -> &str {
        &self.api_server
    }
}

#[async_trait]
impl Discovery for K8sClient {
    async fn server_version(&self) -> K8sResult<Info> {
        Ok(self.inner.apiserver_version().await?)
    }
}

#[async_trait]
impl ClusterApi for K8sClient {
    async fn list_namespaces(&self) -> K8sResult<Vec<String>> {
        let namespaces: Api<Namespace> = Api::all(self.inner.clone());
        let list = namespaces.list(&ListParams::default()).await?;

        Ok(list
            .items
            .into_iter()
            .filter_map(|ns| ns.metadata.name)
            .collect())
    }

    async fn list_deployments(&self, namespace: &str) -> K8sResult<Vec<Deployment>> {
        let deployments: Api<Deployment> = Api::namespaced(self.inner.clone(), namespace);
        let list = deployments.list(&ListParams::default()).await?;

        Ok(list.items)
    }

    async fn list_pods(&self, namespace: &str, label_selector: &str) -> K8sResult<Vec<Pod>> {
        let pods: Api<Pod> = Api::namespaced(self.inner.clone(), namespace);
        let list = pods
            .list(&ListParams::default().labels(label_selector))
            .await?;

        Ok(list.items)
    }
}

impl std::fmt::Debug for K8sClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("K8sClient")
            .field("api_server", &self.api_server)
            .finish()
    }
}
