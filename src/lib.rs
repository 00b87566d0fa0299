//! Vitals: a health-check service for liveness and readiness probes.
//!
//! Reports process memory pressure and uptime over `GET`/`HEAD /health`.

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::EvaluationError;
pub use health::{HealthReport, HealthReporter};
