//! Simulation error types.
//!
//! Every malformed input is rejected before the stepping loop starts;
//! no error is recovered silently inside the loop.

/// Errors raised while constructing or starting a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// dt must be positive and finite (it divides the derivative term).
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    /// Reference and time vectors must have equal lengths.
    #[error("reference length {reference} does not match time vector length {time}")]
    LengthMismatch { reference: usize, time: usize },
    /// A run needs at least one time sample.
    #[error("time vector is empty")]
    EmptyTimeVector,
    /// Input signals must be finite throughout.
    #[error("non-finite sample in {signal} at index {index}")]
    NonFinite {
        signal: &'static str,
        index: usize,
    },
}
