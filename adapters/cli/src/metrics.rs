//! Per-operation timing reported through the log facade.

use std::time::{Duration, Instant};

use log::info;
use maze_wave_core::{Operation, OperationReport};
use maze_wave_world::MazeObserver;

/// Observer that times every maze operation and logs a metrics line for it.
#[derive(Debug, Default)]
pub(crate) struct MetricsObserver {
    started: Option<(Operation, Instant)>,
    operations: u64,
}

impl MetricsObserver {
    #[cfg(test)]
    pub(crate) fn operations(&self) -> u64 {
        self.operations
    }
}

impl MazeObserver for MetricsObserver {
    fn operation_started(&mut self, operation: Operation) {
        self.started = Some((operation, Instant::now()));
    }

    fn operation_finished(&mut self, report: OperationReport) {
        let elapsed = match self.started.take() {
            Some((operation, at)) if operation == report.operation => at.elapsed(),
            _ => Duration::ZERO,
        };
        self.operations += 1;

        let outcome = if report.succeeded { "ok" } else { "rejected" };
        info!(
            "{}: {outcome} in {} ns, {} steps (operation #{})",
            report.operation,
            elapsed.as_nanos(),
            report.steps,
            self.operations
        );
    }
}
