//! Errors raised while evaluating process health.
//!
//! These never reach the transport layer: the health handlers convert every
//! variant into an `unhealthy` report or a bare 503.

#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("Failed to resolve current process id: {0}")]
    ProcessId(String),

    #[error("Process {0} is not visible to the telemetry source")]
    ProcessNotFound(u32),

    #[error("Memory budget reported as zero bytes")]
    ZeroBudget,

    #[error("Telemetry sampling failed: {0}")]
    Sampling(String),
}
