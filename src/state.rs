//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::health::memory::SysinfoSampler;
use crate::health::HealthReporter;

/// Shared application state, cloneable across handlers.
///
/// Holds the health reporter that both probe routes evaluate against.
#[derive(Clone)]
pub struct AppState {
    pub reporter: HealthReporter,
}

impl AppState {
    /// Creates application state around an existing reporter.
    pub fn new(reporter: HealthReporter) -> Self {
        Self { reporter }
    }

    /// Creates application state sampling the running process with the
    /// memory budget from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        let sampler = SysinfoSampler::new(config.memory.limit_bytes());
        Self::new(HealthReporter::new(Arc::new(sampler)))
    }
}
