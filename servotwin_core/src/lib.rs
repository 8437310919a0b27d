//! # Servotwin Core
//!
//! Closed-loop safety simulation for a single-axis rotational actuator.
//! A PID-controlled actuator model runs against a deliberately
//! mismatched digital twin; a drift fault injected into the measured
//! position drives residual-based fault classification, and a monotonic
//! safety state machine feeds back into control authority with a strict
//! one-sample detection-to-actuation delay.
//!
//! ## Per-Sample Data Flow
//!
//! reference → tracking error (vs. real model) → PID → safety-scaled
//! current → {real step, twin step} → fault injection on the measured
//! position → residuals → fault classification → safety-state update →
//! trace append. The state that scales the current of sample *i* is the
//! state decided at the end of sample *i − 1*.
//!
//! ## Determinism
//!
//! Every run resets all owned component state first; identical inputs
//! reproduce identical traces. Within one run the loop is a strict
//! sequential recurrence and must never be parallelized; independent
//! runs may execute concurrently.

pub mod control;
pub mod diagnostic;
pub mod error;
pub mod model;
pub mod safety;
pub mod sim;
