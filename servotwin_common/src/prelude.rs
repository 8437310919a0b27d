//! Prelude module for common re-exports.
//!
//! Re-exports the types consumers need most so that crates can do
//! `use servotwin_common::prelude::*;` without listing individual
//! paths.

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    ActuatorConfig, ConfigError, DetectionConfig, InjectionConfig, PidConfig, RunConfig,
    SimConfig,
};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{DEGRADED_AUTHORITY, DEFAULT_DT, SETTLING_TOLERANCE};

// ─── Classification ─────────────────────────────────────────────────
pub use crate::state::{FaultCategory, SafetyState};
