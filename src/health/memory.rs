//! Process memory telemetry.
//!
//! A `MemorySampler` reports how much memory the process is using against the
//! budget it is allowed. The production sampler reads resident set size via
//! `sysinfo` and resolves the budget from configuration, the cgroup limit, or
//! host memory, in that order.

use sysinfo::{Pid, ProcessRefreshKind, System};

use crate::config::{BYTES_PER_MB, MEMORY_THRESHOLD_PERCENT};
use crate::error::EvaluationError;

/// A single memory reading in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySample {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl MemorySample {
    pub fn new(used_bytes: u64, total_bytes: u64) -> Self {
        Self {
            used_bytes,
            total_bytes,
        }
    }

    /// Usage as a whole percentage of the budget, rounded half up.
    pub fn percentage(&self) -> Result<u64, EvaluationError> {
        if self.total_bytes == 0 {
            return Err(EvaluationError::ZeroBudget);
        }
        let ratio = self.used_bytes as f64 / self.total_bytes as f64;
        Ok((ratio * 100.0).round() as u64)
    }

    /// Whether this reading passes the fixed memory threshold.
    pub fn passes(&self) -> Result<bool, EvaluationError> {
        Ok(self.percentage()? < MEMORY_THRESHOLD_PERCENT)
    }
}

/// Convert a byte count to whole megabytes, rounded half up.
pub fn bytes_to_mb(bytes: u64) -> u64 {
    (bytes as f64 / BYTES_PER_MB as f64).round() as u64
}

/// Source of memory readings for the health reporter.
pub trait MemorySampler: Send + Sync {
    fn sample(&self) -> Result<MemorySample, EvaluationError>;
}

/// Per-process refresh: memory counters only.
fn process_refresh_kind() -> ProcessRefreshKind {
    ProcessRefreshKind::new().with_memory()
}

/// Samples the current process through `sysinfo`.
///
/// A fresh `System` is created per sample so concurrent probes share nothing.
/// Only the process memory counters are read, plus host and cgroup memory
/// when no budget is configured.
#[derive(Debug, Clone, Default)]
pub struct SysinfoSampler {
    limit_bytes: Option<u64>,
}

impl SysinfoSampler {
    pub fn new(limit_bytes: Option<u64>) -> Self {
        Self { limit_bytes }
    }

    fn budget(&self, sys: &mut System) -> u64 {
        if let Some(limit) = self.limit_bytes {
            return limit;
        }
        sys.refresh_memory();
        sys.cgroup_limits()
            .map(|limits| limits.total_memory)
            .filter(|total| *total > 0)
            .unwrap_or_else(|| sys.total_memory())
    }
}

impl MemorySampler for SysinfoSampler {
    fn sample(&self) -> Result<MemorySample, EvaluationError> {
        let pid: Pid =
            sysinfo::get_current_pid().map_err(|e| EvaluationError::ProcessId(e.to_string()))?;

        let mut sys = System::new();
        if !sys.refresh_process_specifics(pid, process_refresh_kind()) {
            return Err(EvaluationError::ProcessNotFound(pid.as_u32()));
        }

        let used_bytes = sys
            .process(pid)
            .map(|process| process.memory())
            .ok_or(EvaluationError::ProcessNotFound(pid.as_u32()))?;

        Ok(MemorySample::new(used_bytes, self.budget(&mut sys)))
    }
}
