//! Safety and fault classification enums.
//!
//! All enums use `#[repr(u8)]` for compact memory layout inside the
//! per-sample trace arrays. `SafetyState` values are ordered by
//! restriction: a transition may never decrease the numeric value.

use serde::{Deserialize, Serialize};

// ─── Safety State ───────────────────────────────────────────────────

/// Run-wide safety classification gating control authority.
///
/// Transitions only move Normal → Degraded → Shutdown (or Normal →
/// Shutdown directly) and never backward; Shutdown is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SafetyState {
    /// Full control authority.
    Normal = 0,
    /// Reduced control authority (current throttled).
    Degraded = 1,
    /// Control authority cut entirely.
    Shutdown = 2,
}

impl SafetyState {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Normal),
            1 => Some(Self::Degraded),
            2 => Some(Self::Shutdown),
            _ => None,
        }
    }

    /// Label used in exported traces and log lines.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Degraded => "degraded",
            Self::Shutdown => "shutdown",
        }
    }
}

impl Default for SafetyState {
    fn default() -> Self {
        Self::Normal
    }
}

impl std::fmt::Display for SafetyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ─── Fault Category ─────────────────────────────────────────────────

/// Per-sample fault classification produced from residual magnitudes.
///
/// Total and mutually exclusive: every residual pair maps to exactly
/// one category. `Severe` means both residual magnitudes exceed their
/// thresholds and takes priority over either single-axis category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FaultCategory {
    /// Neither residual exceeds its threshold.
    NoFault = 0,
    /// Only the position residual exceeds its threshold.
    Position = 1,
    /// Only the velocity residual exceeds its threshold.
    Velocity = 2,
    /// Both residuals exceed their thresholds.
    Severe = 3,
}

impl FaultCategory {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::NoFault),
            1 => Some(Self::Position),
            2 => Some(Self::Velocity),
            3 => Some(Self::Severe),
            _ => None,
        }
    }

    /// Label used in exported traces and log lines.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NoFault => "no_fault",
            Self::Position => "position_fault",
            Self::Velocity => "velocity_fault",
            Self::Severe => "severe_fault",
        }
    }
}

impl Default for FaultCategory {
    fn default() -> Self {
        Self::NoFault
    }
}

impl std::fmt::Display for FaultCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
