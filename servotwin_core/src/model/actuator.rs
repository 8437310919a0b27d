//! Real actuator model.

use servotwin_common::config::ActuatorConfig;

use super::{AxisParams, AxisState, RotationalModel, integrate_axis};

/// Single-axis rotational actuator driven by a commanded motor current.
///
/// Owns its angular state exclusively; only [`RotationalModel::step`]
/// mutates it.
#[derive(Debug, Clone)]
pub struct ActuatorModel {
    params: AxisParams,
    state: AxisState,
}

impl ActuatorModel {
    /// Create a model at rest with the given physical parameters.
    pub fn new(params: AxisParams) -> Self {
        Self {
            params,
            state: AxisState::default(),
        }
    }

    /// Create a model from a configuration section.
    pub fn from_config(config: &ActuatorConfig) -> Self {
        Self::new(AxisParams::from(*config))
    }

    /// Snapshot of the current angular state.
    pub const fn state(&self) -> AxisState {
        self.state
    }
}

impl RotationalModel for ActuatorModel {
    fn reset(&mut self) {
        self.state.reset();
    }

    fn step(&mut self, current: f64, dt: f64) -> (f64, f64) {
        integrate_axis(&mut self.state, &self.params, current, dt)
    }

    fn position(&self) -> f64 {
        self.state.theta
    }

    fn velocity(&self) -> f64 {
        self.state.omega
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
