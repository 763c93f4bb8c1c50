//! Optional instrumentation hook invoked around maze operations.

use maze_wave_core::{Operation, OperationReport};

/// Receives notifications about notable maze operations.
///
/// Observers carry no functional weight: a maze behaves identically with or
/// without one installed.
pub trait MazeObserver {
    /// Called before `operation` begins.
    fn operation_started(&mut self, operation: Operation) {
        let _ = operation;
    }

    /// Called once `report.operation` has finished, successfully or not.
    fn operation_finished(&mut self, report: OperationReport);
}
