//! Cluster version lookup.

use super::error::K8sResult;
use super::Discovery;

/// Returns the `gitVersion` reported by the API server behind `client`.
///
/// A cluster that reports no version yields an empty string rather than an
/// error. Failures of the discovery call itself are returned unchanged.
pub async fn get_kubernetes_version<D>(client: &D) -> K8sResult<String>
where
    D: Discovery + ?Sized,
{
    let info = client.server_version().await?;

    if info.git_version.is_empty() {
        tracing::debug!("API server did not report a gitVersion");
    }

    Ok(info.git_version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kubernetes::K8sError;
    use async_trait::async_trait;
    use k8s_openapi::apimachinery::pkg::version::Info;
    use kube::core::ErrorResponse;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Discovery double returning a canned version or an API error.
    struct FakeDiscovery {
        version: Option<Info>,
        calls: AtomicUsize,
    }

    impl FakeDiscovery {
        fn with_version(info: Info) -> Self {
            Self {
                version: Some(info),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                version: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Discovery for FakeDiscovery {
        async fn server_version(&self) -> K8sResult<Info> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.version {
                Some(info) => Ok(info.clone()),
                None => Err(K8sError::KubeError(kube::Error::Api(ErrorResponse {
                    status: "Failure".to_string(),
                    message: "Unauthorized".to_string(),
                    reason: "Unauthorized".to_string(),
                    code: 401,
                }))),
            }
        }
    }

    #[tokio::test]
    async fn test_returns_git_version() {
        let client = FakeDiscovery::with_version(Info {
            git_version: "1.25.0-fake".to_string(),
            major: "1".to_string(),
            minor: "25".to_string(),
            ..Default::default()
        });

        let version = get_kubernetes_version(&client).await.unwrap();
        assert_eq!(version, "1.25.0-fake");
    }

    #[tokio::test]
    async fn test_empty_git_version_is_not_an_error() {
        let client = FakeDiscovery::with_version(Info::default());

        let version = get_kubernetes_version(&client).await.unwrap();
        assert_eq!(version, "");
    }

    #[tokio::test]
    async fn test_discovery_failure_is_propagated() {
        let client = FakeDiscovery::failing();

        let err = get_kubernetes_version(&client).await.unwrap_err();
        match err {
            K8sError::KubeError(kube::Error::Api(response)) => {
                assert_eq!(response.code, 401);
                assert_eq!(response.message, "Unauthorized");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_queries_discovery_exactly_once() {
        let client = FakeDiscovery::with_version(Info::default());
        get_kubernetes_version(&client).await.unwrap();
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);

        let client = FakeDiscovery::failing();
        let _ = get_kubernetes_version(&client).await;
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let client: Box<dyn Discovery> = Box::new(FakeDiscovery::with_version(Info {
            git_version: "v1.32.1".to_string(),
            ..Default::default()
        }));

        let version = get_kubernetes_version(client.as_ref()).await.unwrap();
        assert_eq!(version, "v1.32.1");
    }
}
