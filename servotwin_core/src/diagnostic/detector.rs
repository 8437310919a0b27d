//! Threshold-based fault classification.
//!
//! Compares absolute residual magnitudes against fixed position and
//! velocity thresholds. Stateless across calls; purely a function of
//! the two residual values.

use servotwin_common::config::DetectionConfig;
use servotwin_common::state::FaultCategory;

/// Classifies residual pairs into a [`FaultCategory`].
///
/// Tie-break: both magnitudes exceeding → `Severe`, which takes
/// priority over either single-axis classification.
#[derive(Debug, Clone)]
pub struct FaultDetector {
    /// Position residual threshold [rad].
    position_threshold: f64,
    /// Velocity residual threshold [rad/s].
    velocity_threshold: f64,
}

impl FaultDetector {
    /// Create a detector with explicit thresholds [rad, rad/s].
    pub fn new(position_threshold: f64, velocity_threshold: f64) -> Self {
        Self {
            position_threshold,
            velocity_threshold,
        }
    }

    /// Create a detector from a configuration section.
    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(config.position_threshold(), config.velocity_threshold())
    }

    /// Classify one residual pair. Total and mutually exclusive.
    pub fn detect(&self, pos_residual: f64, vel_residual: f64) -> FaultCategory {
        let pos_fault = pos_residual.abs() > self.position_threshold;
        let vel_fault = vel_residual.abs() > self.velocity_threshold;

        match (pos_fault, vel_fault) {
            (true, true) => FaultCategory::Severe,
            (true, false) => FaultCategory::Position,
            (false, true) => FaultCategory::Velocity,
            (false, false) => FaultCategory::NoFault,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
