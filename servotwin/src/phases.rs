//! Simulation phase drivers.
//!
//! Each phase assembles its components from the loaded configuration,
//! runs one simulation, and logs a summary. The `verify` phase
//! additionally renders verdicts, fills the FMEA register, and
//! optionally exports JSON artifacts.

use std::path::Path;

use tracing::{info, warn};

use servotwin_common::config::SimConfig;
use servotwin_common::consts::SETTLING_TOLERANCE;
use servotwin_common::state::{FaultCategory, SafetyState};
use servotwin_core::control::pid::PidGains;
use servotwin_core::model::ActuatorModel;
use servotwin_core::sim::runner::{ClosedLoopSimulator, StepSimulator};
use servotwin_core::sim::trace::SimulationTrace;
use servotwin_verify::fmea::FmeaRegister;
use servotwin_verify::metrics::{overshoot_percent, rms_error, settling_time};
use servotwin_verify::requirements::Requirements;
use servotwin_verify::runner::VerificationRunner;

use crate::export::{TraceDocument, write_json};

// ─── Trace Queries ──────────────────────────────────────────────────

/// Time of the first sample classified as `category`.
fn first_fault_time(trace: &SimulationTrace, t: &[f64], category: FaultCategory) -> Option<f64> {
    trace
        .fault_category
        .iter()
        .position(|&c| c == category)
        .map(|i| t[i])
}

/// Time of the first sample in `state`.
fn first_state_time(trace: &SimulationTrace, t: &[f64], state: SafetyState) -> Option<f64> {
    trace
        .safety_state
        .iter()
        .position(|&s| s == state)
        .map(|i| t[i])
}

fn log_optional_time(label: &str, time: Option<f64>) {
    match time {
        Some(value) => info!("{label}: {value:.3} s"),
        None => info!("{label}: not reached within the run"),
    }
}

// ─── Phase: step ────────────────────────────────────────────────────

/// Step-response characterization of the real actuator alone.
pub fn run_step(config: &SimConfig) -> Result<(), Box<dyn std::error::Error>> {
    let t = config.run.time_vector();
    let reference = config.run.reference();

    let mut sim = StepSimulator::new(
        ActuatorModel::from_config(&config.real),
        PidGains::from(config.controller),
        config.run.dt,
    )?;
    let response = sim.run(&reference, &t)?;

    info!(
        "Step response complete: {} samples over {:.3} s",
        t.len(),
        config.run.duration
    );
    match overshoot_percent(&reference, &response.position) {
        Some(value) => info!("Overshoot:     {value:.1} %"),
        None => warn!("Overshoot:     undefined (zero reference base)"),
    }
    if let Some(value) = rms_error(&reference, &response.position) {
        info!("RMS error:     {:.2} deg", value.to_degrees());
    }
    log_optional_time(
        "Settling time",
        settling_time(&reference, &response.position, &t, SETTLING_TOLERANCE),
    );

    Ok(())
}

// ─── Phase: fault ───────────────────────────────────────────────────

/// Full closed-loop safety run with drift injection; logs the fault
/// and safety-state timeline.
pub fn run_fault(config: &SimConfig) -> Result<(), Box<dyn std::error::Error>> {
    let t = config.run.time_vector();
    let reference = config.run.reference();

    let mut sim = ClosedLoopSimulator::from_config(config)?;
    let trace = sim.run(&reference, &t)?;

    let position_fault = first_fault_time(&trace, &t, FaultCategory::Position);
    let velocity_fault = first_fault_time(&trace, &t, FaultCategory::Velocity);
    let detection = match (position_fault, velocity_fault) {
        (Some(p), Some(v)) => Some(p.min(v)),
        (p, v) => p.or(v),
    };
    let degraded = first_state_time(&trace, &t, SafetyState::Degraded);
    let shutdown = first_state_time(&trace, &t, SafetyState::Shutdown);

    info!(
        "Closed-loop run complete: {} samples, drift {:.2} deg/s",
        t.len(),
        config.injection.drift_rate_deg
    );
    log_optional_time("Position fault first occurs at", position_fault);
    log_optional_time("Velocity fault first occurs at", velocity_fault);
    log_optional_time("Detection latency", detection);
    log_optional_time("Degraded state begins at", degraded);
    log_optional_time("Shutdown state begins at", shutdown);
    if let (Some(d), Some(s)) = (degraded, shutdown) {
        info!("Time spent in degraded mode: {:.3} s", s - d);
    }

    Ok(())
}

// ─── Phase: verify ──────────────────────────────────────────────────

/// Reference FMEA records for the simulated system.
fn build_fmea() -> Result<FmeaRegister, Box<dyn std::error::Error>> {
    let mut register = FmeaRegister::new();
    register.add_record("Position sensor", "Drift", 8, 4, 3)?;
    register.add_record("Actuator", "Torque loss", 7, 2, 3)?;
    register.add_record("Controller", "Integral windup", 9, 2, 4)?;
    Ok(register)
}

/// Full run, requirement verdicts, FMEA report, optional JSON export.
pub fn run_verify(
    config: &SimConfig,
    out: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let t = config.run.time_vector();
    let reference = config.run.reference();

    let mut sim = ClosedLoopSimulator::from_config(config)?;
    let trace = sim.run(&reference, &t)?;

    let runner = VerificationRunner::new(Requirements::default())?;
    let report = runner.evaluate(&trace, &reference, &t, config.run.dt)?;

    info!("Verification results");
    for (key, pass) in report.verdicts.entries() {
        info!("{key}: {}", if pass { "Pass" } else { "Fail" });
    }

    let register = build_fmea()?;
    info!("FMEA report (highest risk first)");
    for record in register.report() {
        info!(
            "{} / {}: S={} O={} D={} RPN={}",
            record.component,
            record.failure_mode,
            record.severity,
            record.occurrence,
            record.detection,
            record.rpn
        );
    }

    if let Some(dir) = out {
        let document = TraceDocument {
            time: &t,
            trace: &trace,
        };
        write_json(dir, "trace.json", &document)?;
        write_json(dir, "verification_report.json", &report)?;
        write_json(dir, "fmea.json", &register.report())?;
        info!("Artifacts written to {}", dir.display());
    }

    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────
