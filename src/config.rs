//! Configuration loading and constants.
//!
//! Loads application configuration from an optional TOML file, applies command
//! line overrides, and defines constants for the listen address, Kubernetes
//! defaults, response headers and logging. `AppConfig` is the root
//! configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

// =============================================================================
// HTTP Server Constants
// =============================================================================

/// Default HTTP listen port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default listen address; an empty host binds all interfaces
pub const DEFAULT_LISTEN_ADDRESS: &str = formatcp!(":{}", DEFAULT_HTTP_PORT);

/// Seconds to wait for in-flight requests after a shutdown signal
pub const SHUTDOWN_GRACE_PERIOD_SECS: u64 = 30;

/// Cluster status responses reflect live state and must never be cached
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

// =============================================================================
// Kubernetes Constants
// =============================================================================

/// Namespace inspected by the deployments report when none is given
pub const DEFAULT_NAMESPACE: &str = "default";

/// Replica count Kubernetes assumes when a deployment leaves it unset
pub const DEFAULT_DESIRED_REPLICAS: i32 = 1;

/// Upper bound on pod list requests in flight for a single deployments report
pub const MAX_CONCURRENT_POD_QUERIES: usize = 8;

// =============================================================================
// Logging Constants
// =============================================================================

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "cluster_probe=debug,tower_http=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Kubernetes connection settings
    #[serde(default)]
    pub kubernetes: KubernetesConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    /// Listen address in `host:port` form
    #[serde(default = "HttpServerConfig::default_address")]
    pub address: String,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            address: Self::default_address(),
        }
    }
}

impl HttpServerConfig {
    fn default_address() -> String {
        DEFAULT_LISTEN_ADDRESS.to_string()
    }

    /// Resolve the configured address into a bindable socket address
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_listen_address(&self.address)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct KubernetesConfig {
    /// Path to a kubeconfig file. Unset means in-cluster configuration.
    pub kubeconfig: Option<PathBuf>,
    #[serde(default = "KubernetesConfig::default_namespace")]
    pub namespace: String,
}

impl Default for KubernetesConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            namespace: Self::default_namespace(),
        }
    }
}

impl KubernetesConfig {
    fn default_namespace() -> String {
        DEFAULT_NAMESPACE.to_string()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

/// Command line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub kubeconfig: Option<String>,
    pub address: Option<String>,
    pub namespace: Option<String>,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command line overrides. An empty kubeconfig selects in-cluster mode.
    pub fn apply_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(kubeconfig) = overrides.kubeconfig {
            self.kubernetes.kubeconfig = if kubeconfig.is_empty() {
                None
            } else {
                Some(PathBuf::from(kubeconfig))
            };
        }
        if let Some(address) = overrides.address {
            self.http.address = address;
        }
        if let Some(namespace) = overrides.namespace {
            self.kubernetes.namespace = namespace;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.http.socket_addr()?;

        if self.kubernetes.namespace.is_empty() {
            return Err(ConfigError::Validation(
                "kubernetes.namespace must not be empty".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::Validation(format!(
                "Unknown logging.format '{}', expected \"text\" or \"json\"",
                self.logging.format
            )));
        }

        Ok(())
    }
}

/// Parse a `host:port` listen address. An empty host binds all interfaces.
pub fn parse_listen_address(address: &str) -> Result<SocketAddr, ConfigError> {
    let invalid = || ConfigError::Validation(format!("Invalid listen address '{}'", address));

    let (host, port) = address.rsplit_once(':').ok_or_else(invalid)?;
    let port: u16 = port.parse().map_err(|_| invalid())?;

    let ip: IpAddr = match host {
        "" => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        "localhost" => IpAddr::V4(Ipv4Addr::LOCALHOST),
        host => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse()
            .map_err(|_| invalid())?,
    };

    Ok(SocketAddr::new(ip, port))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
