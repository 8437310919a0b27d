//! Verification runner.
//!
//! Consumes a recorded trace plus the reference series and renders the
//! four named verdicts {Overshoot, Rms_error, Settling_time,
//! Fault_latency}. A measurement that is undefined (`None`) fails its
//! verdict — it never slips past a threshold comparison.

use serde::Serialize;

use servotwin_common::consts::SETTLING_TOLERANCE;
use servotwin_common::state::SafetyState;
use servotwin_core::sim::trace::SimulationTrace;

use crate::metrics::{overshoot_percent, rms_error, settling_time};
use crate::requirements::Requirements;

// ─── Fault Latency ──────────────────────────────────────────────────

/// Elapsed time until the safety state first leaves Normal.
///
/// `Some(0.0)` (a fault at the very first sample) is distinct from
/// `None` (no fault over the entire run); index 0 is never treated as
/// "not found".
pub fn fault_latency(states: &[SafetyState], dt: f64) -> Option<f64> {
    states
        .iter()
        .position(|s| *s != SafetyState::Normal)
        .map(|i| i as f64 * dt)
}

// ─── Error Type ─────────────────────────────────────────────────────

/// Verification input error.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// Trace and time series must share one length.
    #[error("trace length {trace} does not match time vector length {time}")]
    LengthMismatch { trace: usize, time: usize },
    /// A verdict needs at least one sample.
    #[error("empty run")]
    EmptyRun,
    /// Overshoot is a percentage of the first reference sample.
    #[error("reference starts at zero; overshoot is undefined")]
    ZeroReferenceStart,
    /// Thresholds failed validation.
    #[error("invalid requirements: {0}")]
    InvalidRequirements(String),
}

// ─── Report Types ───────────────────────────────────────────────────

/// Measured run characteristics. `None` marks an undefined measurement
/// (e.g. no fault was ever detected).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Measurements {
    pub overshoot_percent: Option<f64>,
    pub rms_error_rad: Option<f64>,
    pub settling_time_s: Option<f64>,
    pub fault_latency_s: Option<f64>,
}

/// Named pass/fail verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdicts {
    pub overshoot: bool,
    pub rms_error: bool,
    pub settling_time: bool,
    pub fault_latency: bool,
}

impl Verdicts {
    /// Stable (key, verdict) pairs for report rendering.
    pub fn entries(&self) -> [(&'static str, bool); 4] {
        [
            ("Overshoot", self.overshoot),
            ("Rms_error", self.rms_error),
            ("Settling_time", self.settling_time),
            ("Fault_latency", self.fault_latency),
        ]
    }

    pub fn all_pass(&self) -> bool {
        self.overshoot && self.rms_error && self.settling_time && self.fault_latency
    }
}

/// Complete verification output: measured values plus verdicts.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub measured: Measurements,
    pub verdicts: Verdicts,
}

// ─── Runner ─────────────────────────────────────────────────────────

/// Compares a run's measured characteristics against fixed thresholds.
pub struct VerificationRunner {
    requirements: Requirements,
}

impl VerificationRunner {
    /// Create a runner; thresholds are validated up front.
    pub fn new(requirements: Requirements) -> Result<Self, VerifyError> {
        requirements
            .validate()
            .map_err(VerifyError::InvalidRequirements)?;
        Ok(Self { requirements })
    }

    /// Evaluate one run.
    ///
    /// `trace` is consumed read-only; `reference` and `t` are the
    /// series the run was driven with, `dt` its sample period.
    pub fn evaluate(
        &self,
        trace: &SimulationTrace,
        reference: &[f64],
        t: &[f64],
        dt: f64,
    ) -> Result<VerificationReport, VerifyError> {
        if t.is_empty() {
            return Err(VerifyError::EmptyRun);
        }
        if trace.len() != t.len() {
            return Err(VerifyError::LengthMismatch {
                trace: trace.len(),
                time: t.len(),
            });
        }
        if reference.len() != t.len() {
            return Err(VerifyError::LengthMismatch {
                trace: reference.len(),
                time: t.len(),
            });
        }
        if reference[0] == 0.0 {
            return Err(VerifyError::ZeroReferenceStart);
        }

        let measured = Measurements {
            overshoot_percent: overshoot_percent(reference, &trace.real_position),
            rms_error_rad: rms_error(reference, &trace.real_position),
            settling_time_s: settling_time(
                reference,
                &trace.real_position,
                t,
                SETTLING_TOLERANCE,
            ),
            fault_latency_s: fault_latency(&trace.safety_state, dt),
        };

        let within = |value: Option<f64>, limit: f64| value.is_some_and(|v| v <= limit);
        let verdicts = Verdicts {
            overshoot: within(
                measured.overshoot_percent,
                self.requirements.max_overshoot_percent,
            ),
            rms_error: within(measured.rms_error_rad, self.requirements.max_rms_error_rad),
            settling_time: within(
                measured.settling_time_s,
                self.requirements.max_settling_time_s,
            ),
            fault_latency: within(
                measured.fault_latency_s,
                self.requirements.max_fault_latency_s,
            ),
        };

        Ok(VerificationReport { measured, verdicts })
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
