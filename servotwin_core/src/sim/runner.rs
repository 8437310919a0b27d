//! Closed-loop simulation runners.
//!
//! [`ClosedLoopSimulator`] is the orchestration core: it wires the
//! controller, both models, fault injection, residual classification,
//! and the safety state machine into one strict sequential recurrence.
//! The safety state read to scale a sample's current is the state
//! decided at the end of the *previous* sample — detection reaches
//! actuation exactly one sample late, and that delay is part of the
//! observable safety behavior, not an artifact of loop ordering.
//!
//! [`StepSimulator`] runs a single model under the same controller
//! without diagnostics, for step-response characterization.

use servotwin_common::config::SimConfig;
use servotwin_common::state::SafetyState;

use crate::control::pid::{PidGains, PidState, pid_compute};
use crate::diagnostic::detector::FaultDetector;
use crate::diagnostic::injection::FaultInjector;
use crate::diagnostic::residual::{position_residual, velocity_residual};
use crate::error::SimError;
use crate::model::{ActuatorModel, DigitalTwinModel, RotationalModel};
use crate::safety::{SafetyMonitor, authority_scale};

use super::trace::SimulationTrace;

// ─── Input Validation ───────────────────────────────────────────────

fn validate_dt(dt: f64) -> Result<f64, SimError> {
    // `!(dt > 0.0)` also rejects NaN.
    if !(dt > 0.0) || !dt.is_finite() {
        return Err(SimError::InvalidTimeStep(dt));
    }
    Ok(dt)
}

fn validate_signals(reference: &[f64], t: &[f64]) -> Result<(), SimError> {
    if t.is_empty() {
        return Err(SimError::EmptyTimeVector);
    }
    if reference.len() != t.len() {
        return Err(SimError::LengthMismatch {
            reference: reference.len(),
            time: t.len(),
        });
    }
    for (index, &value) in reference.iter().enumerate() {
        if !value.is_finite() {
            return Err(SimError::NonFinite {
                signal: "reference",
                index,
            });
        }
    }
    Ok(())
}

// ─── Closed-Loop Safety Simulator ───────────────────────────────────

/// Drives the full detection-and-degradation loop over one time series.
///
/// Owns every stateful component for the duration of a run; ownership
/// is exclusive, and a run is a strict sequential recurrence (each
/// sample depends on integrator, bias, and safety state from the
/// previous one). Independent simulators may run in parallel; one
/// simulator must never be stepped concurrently.
pub struct ClosedLoopSimulator<R: RotationalModel, T: RotationalModel> {
    real: R,
    twin: T,
    gains: PidGains,
    pid: PidState,
    injector: FaultInjector,
    detector: FaultDetector,
    safety: SafetyMonitor,
    dt: f64,
}

impl ClosedLoopSimulator<ActuatorModel, DigitalTwinModel> {
    /// Assemble the reference wiring from a validated configuration.
    pub fn from_config(config: &SimConfig) -> Result<Self, SimError> {
        Self::new(
            ActuatorModel::from_config(&config.real),
            DigitalTwinModel::from_config(&config.twin),
            PidGains::from(config.controller),
            FaultInjector::new(config.injection.drift_rate()),
            FaultDetector::from_config(&config.detection),
            config.run.dt,
        )
    }
}

impl<R: RotationalModel, T: RotationalModel> ClosedLoopSimulator<R, T> {
    /// Wire a simulator. Fails fast on an invalid time step — the loop
    /// must never start with a dt that would divide by zero.
    pub fn new(
        real: R,
        twin: T,
        gains: PidGains,
        injector: FaultInjector,
        detector: FaultDetector,
        dt: f64,
    ) -> Result<Self, SimError> {
        Ok(Self {
            real,
            twin,
            gains,
            pid: PidState::default(),
            injector,
            detector,
            safety: SafetyMonitor::new(),
            dt: validate_dt(dt)?,
        })
    }

    /// Run the closed loop over `reference` / `t` and return the trace.
    ///
    /// All owned component state is reset first, so identical inputs
    /// always reproduce identical traces. Sample 0 keeps its initial
    /// values; samples 1.. are produced by the loop.
    pub fn run(&mut self, reference: &[f64], t: &[f64]) -> Result<SimulationTrace, SimError> {
        validate_signals(reference, t)?;

        self.real.reset();
        self.twin.reset();
        self.pid.reset();
        self.injector.reset();
        self.safety = SafetyMonitor::new();

        let samples = t.len();
        let mut trace = SimulationTrace::with_len(samples);

        for i in 1..samples {
            // 1. Tracking error against the real (un-injected) position.
            let error = reference[i] - self.real.position();

            // 2. Nominal current from the controller.
            let nominal = pid_compute(&mut self.pid, &self.gains, error, self.dt);

            // 3. Authority gate: the state decided at the end of sample
            //    i−1 scales sample i's current (one-sample delay).
            let current = nominal * authority_scale(self.safety.state());

            // 4. Both models receive the same scaled current.
            let (theta_real, omega_real) = self.real.step(current, self.dt);
            let (theta_twin, omega_twin) = self.twin.step(current, self.dt);

            // 5. Drift fault corrupts only the measured real position.
            let measured = self.injector.apply(theta_real, self.dt);

            // 6-7. Residuals → classification → safety update. The
            //      returned state gates sample i+1.
            let fault = self.detector.detect(
                position_residual(measured, theta_twin),
                velocity_residual(omega_real, omega_twin),
            );
            let state = self.safety.check(fault);

            // 8. Record the sample.
            trace.record(i, measured, theta_twin, state, current, fault);
        }

        Ok(trace)
    }

    /// Safety state after the last processed sample.
    pub const fn safety_state(&self) -> SafetyState {
        self.safety.state()
    }
}

// ─── Step-Response Simulator ────────────────────────────────────────

/// Position and velocity series from a diagnostics-free run.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResponse {
    /// Position [rad] per sample.
    pub position: Vec<f64>,
    /// Velocity [rad/s] per sample.
    pub velocity: Vec<f64>,
}

/// Closed-loop runner for a single model with no fault path.
///
/// Used for step-response characterization and controller tuning.
pub struct StepSimulator<M: RotationalModel> {
    model: M,
    gains: PidGains,
    pid: PidState,
    dt: f64,
}

impl<M: RotationalModel> StepSimulator<M> {
    /// Wire a runner. Fails fast on an invalid time step.
    pub fn new(model: M, gains: PidGains, dt: f64) -> Result<Self, SimError> {
        Ok(Self {
            model,
            gains,
            pid: PidState::default(),
            dt: validate_dt(dt)?,
        })
    }

    /// Run the loop over `reference` / `t` and return the response.
    pub fn run(&mut self, reference: &[f64], t: &[f64]) -> Result<StepResponse, SimError> {
        validate_signals(reference, t)?;

        self.model.reset();
        self.pid.reset();

        let samples = t.len();
        let mut response = StepResponse {
            position: vec![0.0; samples],
            velocity: vec![0.0; samples],
        };

        for i in 1..samples {
            let error = reference[i] - self.model.position();
            let current = pid_compute(&mut self.pid, &self.gains, error, self.dt);
            let (theta, omega) = self.model.step(current, self.dt);
            response.position[i] = theta;
            response.velocity[i] = omega;
        }

        Ok(response)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use servotwin_common::state::{FaultCategory, SafetyState};

    fn scenario() -> SimConfig {
        SimConfig::default()
    }

    fn time_and_reference(config: &SimConfig) -> (Vec<f64>, Vec<f64>) {
        (config.run.time_vector(), config.run.reference())
    }

    #[test]
    fn rejects_invalid_dt() {
        let config = scenario();
        for dt in [0.0, -0.001, f64::NAN, f64::INFINITY] {
            let result = ClosedLoopSimulator::new(
                ActuatorModel::from_config(&config.real),
                DigitalTwinModel::from_config(&config.twin),
                PidGains::from(config.controller),
                FaultInjector::new(0.0),
                FaultDetector::from_config(&config.detection),
                dt,
            );
            assert!(matches!(result, Err(SimError::InvalidTimeStep(_))), "dt={dt}");
        }
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let mut sim = ClosedLoopSimulator::from_config(&scenario()).unwrap();
        let err = sim.run(&[0.0; 10], &[0.0; 20]).unwrap_err();
        assert!(matches!(err, SimError::LengthMismatch { .. }));
    }

    #[test]
    fn rejects_empty_time_vector() {
        let mut sim = ClosedLoopSimulator::from_config(&scenario()).unwrap();
        let err = sim.run(&[], &[]).unwrap_err();
        assert!(matches!(err, SimError::EmptyTimeVector));
    }

    #[test]
    fn rejects_non_finite_reference() {
        let mut sim = ClosedLoopSimulator::from_config(&scenario()).unwrap();
        let mut reference = vec![1.0; 10];
        reference[3] = f64::NAN;
        let err = sim.run(&reference, &[0.0; 10]).unwrap_err();
        assert!(matches!(
            err,
            SimError::NonFinite {
                signal: "reference",
                index: 3
            }
        ));
    }

    #[test]
    fn trace_length_matches_time_vector() {
        let config = scenario();
        let (t, reference) = time_and_reference(&config);
        let mut sim = ClosedLoopSimulator::from_config(&config).unwrap();
        let trace = sim.run(&reference, &t).unwrap();
        assert_eq!(trace.len(), t.len());
    }

    #[test]
    fn sample_zero_keeps_initial_values() {
        let config = scenario();
        let (t, reference) = time_and_reference(&config);
        let mut sim = ClosedLoopSimulator::from_config(&config).unwrap();
        let trace = sim.run(&reference, &t).unwrap();
        assert_eq!(trace.real_position[0], 0.0);
        assert_eq!(trace.applied_current[0], 0.0);
        assert_eq!(trace.safety_state[0], SafetyState::Normal);
        assert_eq!(trace.fault_category[0], FaultCategory::NoFault);
    }

    #[test]
    fn detection_reaches_actuation_one_sample_late() {
        // Thresholds of −1 make every residual pair Severe, so sample 1
        // decides Shutdown. Sample 1's current must still be gated by
        // the initial Normal state; sample 2's current must be zero.
        let config = scenario();
        let mut sim = ClosedLoopSimulator::new(
            ActuatorModel::from_config(&config.real),
            DigitalTwinModel::from_config(&config.twin),
            PidGains::from(config.controller),
            FaultInjector::new(0.0),
            FaultDetector::new(-1.0, -1.0),
            config.run.dt,
        )
        .unwrap();

        let (t, reference) = time_and_reference(&config);
        let trace = sim.run(&reference, &t).unwrap();

        assert_eq!(trace.safety_state[1], SafetyState::Shutdown);
        assert!(trace.applied_current[1] != 0.0);
        for i in 2..trace.len() {
            assert_eq!(trace.applied_current[i], 0.0, "sample {i}");
        }
    }

    #[test]
    fn reruns_are_deterministic() {
        let config = scenario();
        let (t, reference) = time_and_reference(&config);
        let mut sim = ClosedLoopSimulator::from_config(&config).unwrap();
        let first = sim.run(&reference, &t).unwrap();
        let second = sim.run(&reference, &t).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn step_simulator_tracks_the_reference() {
        let config = scenario();
        let (t, reference) = time_and_reference(&config);
        let mut sim = StepSimulator::new(
            ActuatorModel::from_config(&config.real),
            PidGains::from(config.controller),
            config.run.dt,
        )
        .unwrap();
        let response = sim.run(&reference, &t).unwrap();

        assert_eq!(response.position.len(), t.len());
        // By the end of a 2 s run the loop has pulled the axis close to
        // the 60° reference.
        let target = 60.0_f64.to_radians();
        let final_error = (response.position[t.len() - 1] - target).abs();
        assert!(final_error < 0.1 * target, "final error {final_error}");
    }

    #[test]
    fn step_simulator_rejects_invalid_dt() {
        let config = scenario();
        let result = StepSimulator::new(
            ActuatorModel::from_config(&config.real),
            PidGains::from(config.controller),
            0.0,
        );
        assert!(matches!(result, Err(SimError::InvalidTimeStep(_))));
    }
}
