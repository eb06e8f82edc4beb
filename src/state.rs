//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::kubernetes::ClusterApi;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the application configuration and the cluster client used by the
/// Kubernetes-facing routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub cluster: Arc<dyn ClusterApi>,
}

impl AppState {
    /// Creates a new application state from the given configuration and cluster client.
    pub fn new(config: AppConfig, cluster: Arc<dyn ClusterApi>) -> Self {
        Self {
            config: Arc::new(config),
            cluster,
        }
    }
}
