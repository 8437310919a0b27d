//! JSON export of run artifacts.
//!
//! Writes the recorded trace, the verification report, and the FMEA
//! register as pretty-printed JSON files into an output directory.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;

use servotwin_core::sim::trace::SimulationTrace;

/// Trace document: the time vector alongside the per-sample series.
#[derive(Debug, Serialize)]
pub struct TraceDocument<'a> {
    /// Time [s] per sample.
    pub time: &'a [f64],
    #[serde(flatten)]
    pub trace: &'a SimulationTrace,
}

/// Serialize `value` as pretty JSON into `dir/name`.
///
/// Creates the directory if needed and returns the written path.
pub fn write_json<T: Serialize>(
    dir: &Path,
    name: &str,
    value: &T,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(name);
    let file = File::create(&path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    Ok(path)
}

// ─── Tests ──────────────────────────────────────────────────────────
