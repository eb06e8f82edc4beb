//! cluster-probe: Kubernetes cluster health reporting service.
//!
//! This is the application entry point. It parses the command line, loads
//! configuration, initializes tracing, connects to the cluster and reports its
//! version, then serves the HTTP routes until a shutdown signal arrives.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cluster_probe::config::{AppConfig, LoggingConfig, Overrides, DEFAULT_LOG_FILTER};
use cluster_probe::http::start_server;
use cluster_probe::kubernetes::{get_kubernetes_version, K8sClient};
use cluster_probe::routes::create_router;
use cluster_probe::state::AppState;

/// cluster-probe: health reporting for a Kubernetes cluster
#[derive(Parser, Debug)]
#[command(name = "cluster-probe", version, about)]
struct Args {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Path to kubeconfig, leave empty for in-cluster
    #[arg(short, long)]
    kubeconfig: Option<String>,

    /// HTTP server listen address (host:port, empty host binds all interfaces)
    #[arg(short, long)]
    address: Option<String>,

    /// Namespace inspected by /deployments
    #[arg(short, long)]
    namespace: Option<String>,

    /// Log level filter (e.g., "cluster_probe=debug,kube=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

fn init_tracing(log_filter: &str, logging: &LoggingConfig) {
    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(log_filter));

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration, then let the command line override it
    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let config = config.apply_overrides(Overrides {
        kubeconfig: args.kubeconfig,
        address: args.address,
        namespace: args.namespace,
    })?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, &config.logging);

    tracing::info!(
        kubeconfig = ?config.kubernetes.kubeconfig,
        namespace = %config.kubernetes.namespace,
        address = %config.http.address,
        "Loaded configuration"
    );

    let client = K8sClient::connect(config.kubernetes.kubeconfig.as_deref()).await?;

    let version = match get_kubernetes_version(&client).await {
        Ok(version) => version,
        Err(e) => {
            tracing::error!(error = %e, api_server = %client.api_server(), "Failed to query Kubernetes version");
            return Ok(ExitCode::FAILURE);
        }
    };
    tracing::info!(api_server = %client.api_server(), "Connected to Kubernetes {}", version);

    let addr = config.http.socket_addr()?;
    let state = AppState::new(config, Arc::new(client));
    let app = create_router(state);

    start_server(app, addr).await?;

    Ok(ExitCode::SUCCESS)
}
