//! Acceptance thresholds for a verification run.

use serde::{Deserialize, Serialize};

/// Fixed thresholds a run's measured characteristics are compared
/// against. Each verdict passes when its measurement is defined and
/// does not exceed the threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Requirements {
    /// Maximum overshoot [% of the reference base].
    pub max_overshoot_percent: f64,
    /// Maximum RMS tracking error [rad].
    pub max_rms_error_rad: f64,
    /// Maximum settling time [s].
    pub max_settling_time_s: f64,
    /// Maximum fault-detection latency [s].
    pub max_fault_latency_s: f64,
}

impl Default for Requirements {
    fn default() -> Self {
        Self {
            max_overshoot_percent: 10.0,
            max_rms_error_rad: 17.15_f64.to_radians(),
            max_settling_time_s: 1.0,
            max_fault_latency_s: 0.2,
        }
    }
}

impl Requirements {
    /// Check that every threshold is positive and finite.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("max_overshoot_percent", self.max_overshoot_percent),
            ("max_rms_error_rad", self.max_rms_error_rad),
            ("max_settling_time_s", self.max_settling_time_s),
            ("max_fault_latency_s", self.max_fault_latency_s),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be positive, got {value}"));
            }
        }
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
