//! Full closed-loop benchmark.
//!
//! Measures one complete reference-scenario run (2000 samples at 1 kHz)
//! including fault injection, residual classification, and safety-state
//! updates.

use criterion::{Criterion, criterion_group, criterion_main};

use servotwin_common::config::SimConfig;
use servotwin_core::sim::runner::ClosedLoopSimulator;

fn bench_reference_run(c: &mut Criterion) {
    let config = SimConfig::default();
    let t = config.run.time_vector();
    let reference = config.run.reference();
    let mut sim = ClosedLoopSimulator::from_config(&config).unwrap();

    c.bench_function("closed_loop_reference_run", |b| {
        b.iter(|| sim.run(&reference, &t).unwrap())
    });
}

criterion_group!(benches, bench_reference_run);
criterion_main!(benches);
