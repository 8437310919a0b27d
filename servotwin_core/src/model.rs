//! Rotational axis models.
//!
//! Defines the capability contract shared by the real actuator and its
//! digital twin, the angular state value type, and the semi-implicit
//! Euler integration both concrete models use. The position increment
//! is driven by the pre-update velocity; the velocity then advances
//! with the new acceleration.

use servotwin_common::config::ActuatorConfig;

pub mod actuator;
pub mod twin;

pub use actuator::ActuatorModel;
pub use twin::DigitalTwinModel;

// ─── Axis State ─────────────────────────────────────────────────────

/// Angular state of a single rotational axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisState {
    /// Angular position θ [rad].
    pub theta: f64,
    /// Angular velocity ω [rad/s].
    pub omega: f64,
}

impl Default for AxisState {
    fn default() -> Self {
        Self {
            theta: 0.0,
            omega: 0.0,
        }
    }
}

impl AxisState {
    /// Reset to the rest state (0, 0).
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ─── Axis Parameters ────────────────────────────────────────────────

/// Physical parameters of a rotational axis drive.
#[derive(Debug, Clone, Copy)]
pub struct AxisParams {
    /// Rotor inertia J [kg·m²]. Must be positive (validated at config load).
    pub inertia: f64,
    /// Viscous damping b [N·m·s/rad].
    pub damping: f64,
    /// Torque constant Kt [N·m/A].
    pub torque_constant: f64,
    /// Constant external load torque [N·m].
    pub load_torque: f64,
}

impl From<ActuatorConfig> for AxisParams {
    fn from(config: ActuatorConfig) -> Self {
        Self {
            inertia: config.inertia,
            damping: config.damping,
            torque_constant: config.torque_constant,
            load_torque: config.load_torque,
        }
    }
}

// ─── Model Contract ─────────────────────────────────────────────────

/// Contract shared by the real actuator and the digital twin.
///
/// The orchestrator depends only on this contract, never on a concrete
/// model type. Both models are driven with the same commanded current
/// each sample; each mutates only its own state.
pub trait RotationalModel {
    /// Zero the angular state.
    fn reset(&mut self);

    /// Advance one sample. Returns the new (θ, ω).
    fn step(&mut self, current: f64, dt: f64) -> (f64, f64);

    /// Current angular position θ [rad].
    fn position(&self) -> f64;

    /// Current angular velocity ω [rad/s].
    fn velocity(&self) -> f64;
}

// ─── Integration ────────────────────────────────────────────────────

/// One semi-implicit Euler step of the rotational dynamics.
///
/// dω/dt = (Kt·i − b·ω − τ_load) / J, evaluated at the pre-update ω.
/// θ advances with the pre-update ω; ω then advances with dω/dt.
#[inline]
pub(crate) fn integrate_axis(
    state: &mut AxisState,
    params: &AxisParams,
    current: f64,
    dt: f64,
) -> (f64, f64) {
    let domega = (params.torque_constant * current
        - params.damping * state.omega
        - params.load_torque)
        / params.inertia;

    state.theta += state.omega * dt;
    state.omega += domega * dt;

    (state.theta, state.omega)
}

// ─── Tests ──────────────────────────────────────────────────────────
