//! Safety state machine gating control authority.
//!
//! Monotonic 3-state overlay: Normal → Degraded → Shutdown, with a
//! direct Normal → Shutdown path on a severe fault. No transition ever
//! relaxes restriction; Shutdown is absorbing.

use servotwin_common::consts::DEGRADED_AUTHORITY;
use servotwin_common::state::{FaultCategory, SafetyState};

/// Owns the run's safety state and applies the transition table.
#[derive(Debug, Clone)]
pub struct SafetyMonitor {
    state: SafetyState,
}

impl SafetyMonitor {
    pub const fn new() -> Self {
        Self {
            state: SafetyState::Normal,
        }
    }

    /// State decided at the end of the last processed sample.
    #[inline]
    pub const fn state(&self) -> SafetyState {
        self.state
    }

    /// Apply one fault classification.
    ///
    /// Mutates the owned state per the monotonic transition table and
    /// returns the (possibly unchanged) new state — the value the
    /// simulator records for the sample and uses to gate the *next*
    /// sample's current.
    pub fn check(&mut self, fault: FaultCategory) -> SafetyState {
        use FaultCategory as F;
        use SafetyState as S;

        let next = match (self.state, fault) {
            (S::Normal, F::Position | F::Velocity) => S::Degraded,
            (S::Normal | S::Degraded, F::Severe) => S::Shutdown,
            // NoFault never relaxes restriction; Shutdown is absorbing.
            (current, _) => current,
        };

        self.state = next;
        next
    }

    /// Whether all control authority has been cut.
    #[inline]
    pub const fn is_shutdown(&self) -> bool {
        matches!(self.state, SafetyState::Shutdown)
    }
}

impl Default for SafetyMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Current scale factor permitted by a safety state.
///
/// Normal passes the commanded current through, Degraded throttles it,
/// Shutdown forces it to zero.
#[inline]
pub fn authority_scale(state: SafetyState) -> f64 {
    match state {
        SafetyState::Normal => 1.0,
        SafetyState::Degraded => DEGRADED_AUTHORITY,
        SafetyState::Shutdown => 0.0,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
