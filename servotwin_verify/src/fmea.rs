//! FMEA risk register.
//!
//! Failure Mode and Effects Analysis records with severity, occurrence,
//! and detection ratings (each 1..=10) and the resulting risk priority
//! number RPN = S·O·D. The report is sorted highest risk first.

use serde::Serialize;

/// One failure-mode record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FmeaRecord {
    /// Affected component.
    pub component: String,
    /// Failure mode description.
    pub failure_mode: String,
    /// Severity rating (1..=10).
    pub severity: u8,
    /// Occurrence rating (1..=10).
    pub occurrence: u8,
    /// Detection rating (1..=10, higher = harder to detect).
    pub detection: u8,
    /// Risk priority number: severity · occurrence · detection.
    pub rpn: u16,
}

/// Rating validation error.
#[derive(Debug, thiserror::Error)]
pub enum FmeaError {
    #[error("{field} rating must be in 1..=10, got {value}")]
    RatingOutOfRange { field: &'static str, value: u8 },
}

/// Collection of FMEA records for one system.
#[derive(Debug, Clone, Default)]
pub struct FmeaRegister {
    records: Vec<FmeaRecord>,
}

impl FmeaRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one record; all three ratings must be in 1..=10.
    pub fn add_record(
        &mut self,
        component: &str,
        failure_mode: &str,
        severity: u8,
        occurrence: u8,
        detection: u8,
    ) -> Result<(), FmeaError> {
        for (field, value) in [
            ("severity", severity),
            ("occurrence", occurrence),
            ("detection", detection),
        ] {
            if !(1..=10).contains(&value) {
                return Err(FmeaError::RatingOutOfRange { field, value });
            }
        }

        self.records.push(FmeaRecord {
            component: component.to_string(),
            failure_mode: failure_mode.to_string(),
            severity,
            occurrence,
            detection,
            rpn: severity as u16 * occurrence as u16 * detection as u16,
        });
        Ok(())
    }

    /// Records sorted by RPN, highest risk first. Ties keep insertion
    /// order.
    pub fn report(&self) -> Vec<FmeaRecord> {
        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| b.rpn.cmp(&a.rpn));
        sorted
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
