//! HTTP server module.
//!
//! The server includes:
//! - Plain HTTP listener on the configured address (TLS terminates upstream)
//! - Graceful shutdown on SIGTERM/SIGINT with a configurable drain window

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
