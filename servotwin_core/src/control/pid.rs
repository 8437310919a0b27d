//! PID controller with backward-difference derivative.
//!
//! The integral accumulates `error·dt`; the derivative is the backward
//! difference `(error − prev_error) / dt`. dt is validated positive
//! before any run starts, so the compute guard only keeps the math
//! finite if a caller bypasses that validation.

use servotwin_common::config::PidConfig;

/// Internal state of the PID controller.
///
/// Preserves the integral accumulator and previous error across
/// samples. Must be reset at run start.
#[derive(Debug, Clone, Copy)]
pub struct PidState {
    /// Integral accumulator.
    integral: f64,
    /// Previous tracking error (for the derivative).
    prev_error: f64,
}

impl Default for PidState {
    fn default() -> Self {
        Self {
            integral: 0.0,
            prev_error: 0.0,
        }
    }
}

impl PidState {
    /// Reset all internal state to zero.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// PID gains.
#[derive(Debug, Clone, Copy)]
pub struct PidGains {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
}

impl From<PidConfig> for PidGains {
    fn from(config: PidConfig) -> Self {
        Self {
            kp: config.kp,
            ki: config.ki,
            kd: config.kd,
        }
    }
}

/// Compute one PID sample. Returns the commanded current [A].
///
/// # Arguments
/// - `state`: Mutable PID internal state (integral, previous error).
/// - `gains`: Controller gains.
/// - `error`: Tracking error (reference − actual position) [rad].
/// - `dt`: Sample period [s].
#[inline]
pub fn pid_compute(state: &mut PidState, gains: &PidGains, error: f64, dt: f64) -> f64 {
    if dt <= 0.0 {
        return 0.0;
    }

    state.integral += error * dt;
    let derivative = (error - state.prev_error) / dt;
    state.prev_error = error;

    gains.kp * error + gains.ki * state.integral + gains.kd * derivative
}

// ─── Tests ──────────────────────────────────────────────────────────
