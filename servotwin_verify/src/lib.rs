//! # Servotwin Verify
//!
//! External collaborator of the simulation core: consumes a recorded
//! trace plus the reference series and renders pass/fail verdicts
//! against fixed requirement thresholds. Also carries the FMEA risk
//! register.
//!
//! The core depends on nothing here; this crate depends on the core
//! only through the shape of [`servotwin_core::sim::trace::SimulationTrace`].
//!
//! # Module Structure
//!
//! - [`metrics`] - Stateless performance metrics (overshoot, RMS, settling)
//! - [`requirements`] - Acceptance thresholds
//! - [`runner`] - Verification runner producing named verdicts
//! - [`fmea`] - FMEA risk register

pub mod fmea;
pub mod metrics;
pub mod requirements;
pub mod runner;
