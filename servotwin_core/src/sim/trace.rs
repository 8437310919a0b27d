//! Per-run simulation trace.
//!
//! All series are preallocated to the time-vector length and indexed by
//! sample — the output-length contract (output length == input time
//! length) is structural, not incidental. Sample 0 carries the initial
//! values: positions at rest, zero current, no fault, Normal state.

use serde::Serialize;

use servotwin_common::state::{FaultCategory, SafetyState};

/// Fixed-length record of one closed-loop safety run.
///
/// Built incrementally by the simulator; consumed, never mutated, by
/// the verification runner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationTrace {
    /// Measured (fault-injected) real position [rad] per sample.
    pub real_position: Vec<f64>,
    /// Twin position [rad] per sample.
    pub twin_position: Vec<f64>,
    /// Safety state decided at the end of each sample.
    pub safety_state: Vec<SafetyState>,
    /// Current actually applied to both models [A] per sample.
    pub applied_current: Vec<f64>,
    /// Fault classification produced at each sample.
    pub fault_category: Vec<FaultCategory>,
}

impl SimulationTrace {
    /// Preallocate all series at the given sample count, filled with
    /// initial-sample values.
    pub fn with_len(samples: usize) -> Self {
        Self {
            real_position: vec![0.0; samples],
            twin_position: vec![0.0; samples],
            safety_state: vec![SafetyState::Normal; samples],
            applied_current: vec![0.0; samples],
            fault_category: vec![FaultCategory::NoFault; samples],
        }
    }

    /// Number of samples in the trace.
    pub fn len(&self) -> usize {
        self.real_position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.real_position.is_empty()
    }

    /// Write one sample's results.
    #[inline]
    pub(crate) fn record(
        &mut self,
        index: usize,
        real_position: f64,
        twin_position: f64,
        state: SafetyState,
        applied_current: f64,
        fault: FaultCategory,
    ) {
        self.real_position[index] = real_position;
        self.twin_position[index] = twin_position;
        self.safety_state[index] = state;
        self.applied_current[index] = applied_current;
        self.fault_category[index] = fault;
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_len_fills_initial_values() {
        let trace = SimulationTrace::with_len(10);
        assert_eq!(trace.len(), 10);
        assert!(trace.real_position.iter().all(|&v| v == 0.0));
        assert!(trace.applied_current.iter().all(|&v| v == 0.0));
        assert!(trace.safety_state.iter().all(|&s| s == SafetyState::Normal));
        assert!(
            trace
                .fault_category
                .iter()
                .all(|&c| c == FaultCategory::NoFault)
        );
    }

    #[test]
    fn all_series_share_the_length() {
        let trace = SimulationTrace::with_len(17);
        assert_eq!(trace.twin_position.len(), 17);
        assert_eq!(trace.safety_state.len(), 17);
        assert_eq!(trace.applied_current.len(), 17);
        assert_eq!(trace.fault_category.len(), 17);
    }

    #[test]
    fn record_writes_one_sample() {
        let mut trace = SimulationTrace::with_len(3);
        trace.record(
            1,
            0.5,
            0.4,
            SafetyState::Degraded,
            1.2,
            FaultCategory::Position,
        );
        assert_eq!(trace.real_position, vec![0.0, 0.5, 0.0]);
        assert_eq!(trace.twin_position[1], 0.4);
        assert_eq!(trace.safety_state[1], SafetyState::Degraded);
        assert_eq!(trace.applied_current[1], 1.2);
        assert_eq!(trace.fault_category[1], FaultCategory::Position);
    }
}
