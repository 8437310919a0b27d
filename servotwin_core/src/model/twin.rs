//! Digital twin model.
//!
//! Implements the same contract and dynamics as the real actuator with
//! an independently configured parameter set and independent state. The
//! twin is deliberately mismatched from the real model to represent
//! model uncertainty and is driven with the same current each sample,
//! providing the fault-free reference for residual comparison.

use servotwin_common::config::ActuatorConfig;

use super::{AxisParams, AxisState, RotationalModel, integrate_axis};

/// Fault-free reference model running in parallel with the real axis.
#[derive(Debug, Clone)]
pub struct DigitalTwinModel {
    params: AxisParams,
    state: AxisState,
}

impl DigitalTwinModel {
    /// Create a twin at rest with the given physical parameters.
    pub fn new(params: AxisParams) -> Self {
        Self {
            params,
            state: AxisState::default(),
        }
    }

    /// Create a twin from a configuration section.
    pub fn from_config(config: &ActuatorConfig) -> Self {
        Self::new(AxisParams::from(*config))
    }

    /// Snapshot of the current angular state.
    pub const fn state(&self) -> AxisState {
        self.state
    }
}

impl RotationalModel for DigitalTwinModel {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActuatorModel;

    #[test]
    fn identical_parameters_track_exactly() {
        let config = ActuatorConfig::default();
        let mut real = ActuatorModel::from_config(&config);
        let mut twin = DigitalTwinModel::from_config(&config);

        for i in 0..500 {
            let current = (i as f64 * 0.01).sin();
            let (theta_r, omega_r) = real.step(current, 0.001);
            let (theta_t, omega_t) = twin.step(current, 0.001);
            assert_eq!(theta_r, theta_t);
            assert_eq!(omega_r, omega_t);
        }
    }

    #[test]
    fn mismatched_parameters_diverge() {
        let mut real = ActuatorModel::from_config(&ActuatorConfig::default());
        let mut twin = DigitalTwinModel::from_config(&ActuatorConfig {
            inertia: 0.0033,
            damping: 0.022,
            torque_constant: 0.047,
            load_torque: 0.0,
        });

        for _ in 0..100 {
            real.step(1.0, 0.001);
            twin.step(1.0, 0.001);
        }
        assert!(real.position() != twin.position());
        assert!(real.velocity() != twin.velocity());
    }

    #[test]
    fn reset_restores_rest_state() {
        let mut twin = DigitalTwinModel::from_config(&ActuatorConfig::default());
        for _ in 0..100 {
            twin.step(1.0, 0.001);
        }
        twin.reset();
        assert_eq!(twin.state(), AxisState::default());
    }
}
