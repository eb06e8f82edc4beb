//! cluster-probe: a small HTTP service reporting on a Kubernetes cluster.
//!
//! Connects to the cluster at startup and reports its version, then serves a
//! liveness probe, an API reachability check and a deployment replica report.

pub mod config;
pub mod error;
pub mod http;
pub mod kubernetes;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::*;
