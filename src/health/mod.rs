//! Process health evaluation.
//!
//! The `HealthReporter` samples process memory, compares usage against the
//! fixed threshold and produces a `HealthReport`. Evaluation failures are
//! recovered here into an `unhealthy` report, so callers always get a
//! well-formed result.
//!
//! Status semantics:
//! - **healthy**: the memory check passed
//! - **degraded**: the process answered but memory is at or above the threshold
//! - **unhealthy**: telemetry could not be read at all

pub mod memory;
pub mod settings;
pub mod uptime;

use std::sync::Arc;
use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::error::EvaluationError;
use memory::{bytes_to_mb, MemorySample, MemorySampler};
use settings::{process_env, resolve, Lookup, Setting};

/// Overall verdict of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    Degraded,
}

/// Verdict of an individual check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl CheckStatus {
    fn from_passed(passed: bool) -> Self {
        if passed {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        }
    }
}

/// Memory check figures, in megabytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryCheck {
    pub status: CheckStatus,
    pub used: u64,
    pub total: u64,
    pub percentage: u64,
}

impl MemoryCheck {
    fn from_sample(sample: &MemorySample) -> Result<Self, EvaluationError> {
        Ok(Self {
            status: CheckStatus::from_passed(sample.passes()?),
            used: bytes_to_mb(sample.used_bytes),
            total: bytes_to_mb(sample.total_bytes),
            percentage: sample.percentage()?,
        })
    }

    fn zeroed() -> Self {
        Self {
            status: CheckStatus::Fail,
            used: 0,
            total: 0,
            percentage: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checks {
    pub memory: MemoryCheck,
}

/// Health report served to probes as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// ISO-8601 UTC with millisecond precision
    pub timestamp: String,
    pub version: String,
    pub environment: String,
    /// Whole seconds since process start
    pub uptime: u64,
    pub checks: Checks,
}

/// Outcome of a full evaluation.
#[derive(Debug, Clone)]
pub enum Evaluation {
    /// Telemetry was read; the report is healthy or degraded.
    Completed(HealthReport),
    /// Evaluation failed; the report is unhealthy and zeroed.
    Failed(HealthReport),
}

impl Evaluation {
    pub fn report(&self) -> &HealthReport {
        match self {
            Evaluation::Completed(report) | Evaluation::Failed(report) => report,
        }
    }

    pub fn into_report(self) -> HealthReport {
        match self {
            Evaluation::Completed(report) | Evaluation::Failed(report) => report,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.report().status == HealthStatus::Healthy
    }
}

/// Evaluates process health on demand. Cheap to clone and share.
#[derive(Clone)]
pub struct HealthReporter {
    sampler: Arc<dyn MemorySampler>,
    started: Instant,
    lookup: Lookup,
}

impl HealthReporter {
    /// Creates a reporter measuring uptime from the recorded process start and
    /// reading settings from the process environment.
    pub fn new(sampler: Arc<dyn MemorySampler>) -> Self {
        Self {
            sampler,
            started: uptime::process_start(),
            lookup: process_env,
        }
    }

    /// Measure uptime from `started` instead of the process start.
    pub fn with_start(mut self, started: Instant) -> Self {
        self.started = started;
        self
    }

    /// Resolve version and environment through `lookup`.
    pub fn with_lookup(mut self, lookup: Lookup) -> Self {
        self.lookup = lookup;
        self
    }

    /// Full check: never fails, any error becomes an `unhealthy` report.
    pub fn evaluate(&self) -> Evaluation {
        match self.try_evaluate() {
            Ok(report) => {
                if report.status != HealthStatus::Healthy {
                    tracing::warn!(
                        percentage = report.checks.memory.percentage,
                        used_mb = report.checks.memory.used,
                        total_mb = report.checks.memory.total,
                        "Memory check failed, reporting degraded"
                    );
                }
                Evaluation::Completed(report)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Health evaluation failed");
                Evaluation::Failed(self.failure_report())
            }
        }
    }

    /// Lightweight check: only the memory verdict, no report assembly.
    pub fn probe(&self) -> Result<CheckStatus, EvaluationError> {
        let sample = self.sampler.sample()?;
        Ok(CheckStatus::from_passed(sample.passes()?))
    }

    fn try_evaluate(&self) -> Result<HealthReport, EvaluationError> {
        let uptime = uptime::uptime_secs(self.started);
        let sample = self.sampler.sample()?;
        let memory = MemoryCheck::from_sample(&sample)?;

        let status = match memory.status {
            CheckStatus::Pass => HealthStatus::Healthy,
            CheckStatus::Fail => HealthStatus::Degraded,
        };

        Ok(self.report(status, uptime, memory))
    }

    fn failure_report(&self) -> HealthReport {
        let uptime = uptime::uptime_secs(self.started);
        self.report(HealthStatus::Unhealthy, uptime, MemoryCheck::zeroed())
    }

    fn report(&self, status: HealthStatus, uptime: u64, memory: MemoryCheck) -> HealthReport {
        HealthReport {
            status,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: resolve(Setting::Version, self.lookup),
            environment: resolve(Setting::Environment, self.lookup),
            uptime,
            checks: Checks { memory },
        }
    }
}
