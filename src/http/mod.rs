//! HTTP server module.
//!
//! Serves the router over plain HTTP with graceful shutdown on SIGTERM/SIGINT.
//! TLS is expected to be terminated in front of the service (ingress or mesh).

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
