#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze state: grid storage, adjacency, the breadth-first wave
//! and shortest path reconstruction.
//!
//! Adapters mutate a [`Maze`] through its methods or through [`apply`], run
//! [`Maze::compute_wave`], and then request the route with
//! [`Maze::reconstruct_path`]. Every structural mutation invalidates the last
//! wave, so a path can never be read from a stale distance field.

mod grid;
mod observer;
mod path;
mod topology;
mod wave;

use std::fmt;

use log::{debug, trace};
use maze_wave_core::{
    CellCoord, CellState, Dimensions, EndpointRejection, MazeCommand, MazeError, Operation,
    OperationReport, WallModel, WallSlot, WaveState,
};

pub use grid::Grid;
pub use observer::MazeObserver;
pub use topology::Topology;
pub use wave::{DistanceField, UNREACHED};

/// Rectangular maze with start/end markers and the result of the last wave.
pub struct Maze {
    grid: Grid,
    start: Option<CellCoord>,
    end: Option<CellCoord>,
    wave_state: WaveState,
    field: DistanceField,
    path: Vec<CellCoord>,
    observer: Option<Box<dyn MazeObserver>>,
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Maze")
            .field("grid", &self.grid)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("wave_state", &self.wave_state)
            .field("observed", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl Maze {
    /// Creates an open maze without walls or endpoints.
    #[must_use]
    pub fn new(dimensions: Dimensions, model: WallModel) -> Self {
        Self::from_grid(Grid::new(dimensions, model))
    }

    /// Adopts a prepared grid, picking the endpoints up from its markers.
    #[must_use]
    pub fn from_grid(grid: Grid) -> Self {
        let start = grid.find(CellState::Start);
        let end = grid.find(CellState::End);
        Self {
            grid,
            start,
            end,
            wave_state: WaveState::Fresh,
            field: DistanceField::default(),
            path: Vec::new(),
            observer: None,
        }
    }

    /// Installs an observer, returning the one it replaces.
    pub fn set_observer(
        &mut self,
        observer: Box<dyn MazeObserver>,
    ) -> Option<Box<dyn MazeObserver>> {
        self.observer.replace(observer)
    }

    /// Removes the installed observer.
    pub fn take_observer(&mut self) -> Option<Box<dyn MazeObserver>> {
        self.observer.take()
    }

    /// Writes a cell state.
    ///
    /// `Start` and `End` are placed through [`Maze::set_start`] and
    /// [`Maze::set_end`] rules. Overwriting an endpoint with `Empty` or `Wall`
    /// unsets that endpoint.
    pub fn set_cell(&mut self, cell: CellCoord, state: CellState) -> Result<(), MazeError> {
        self.run(Operation::SetCell, |maze| maze.write_cell(cell, state))
            .map(drop)
    }

    /// Raises or clears a wall.
    pub fn set_wall(&mut self, slot: WallSlot, present: bool) -> Result<(), MazeError> {
        self.run(Operation::SetWall, |maze| maze.write_wall(slot, present))
            .map(drop)
    }

    /// Moves the start marker to `cell`.
    ///
    /// Rejected without side effects when `cell` is a wall or holds the end.
    pub fn set_start(&mut self, cell: CellCoord) -> Result<(), MazeError> {
        self.run(Operation::SetStart, |maze| {
            maze.place_endpoint(Endpoint::Start, cell)
        })
        .map(drop)
    }

    /// Moves the end marker to `cell`.
    ///
    /// Rejected without side effects when `cell` is a wall or holds the start.
    pub fn set_end(&mut self, cell: CellCoord) -> Result<(), MazeError> {
        self.run(Operation::SetEnd, |maze| maze.place_endpoint(Endpoint::End, cell))
            .map(drop)
    }

    /// Replaces the whole layout, adopting the endpoints marked in `grid`.
    pub fn replace_grid(&mut self, grid: Grid) {
        self.notify_started(Operation::ReplaceLayout);
        let steps = grid.cells().len() as u64;
        self.start = grid.find(CellState::Start);
        self.end = grid.find(CellState::End);
        self.grid = grid;
        self.wave_state = WaveState::Fresh;
        self.field.clear();
        self.path.clear();
        debug!(
            "layout replaced with a {}x{} {} grid",
            self.grid.width(),
            self.grid.height(),
            self.grid.model()
        );
        self.notify_finished(OperationReport {
            operation: Operation::ReplaceLayout,
            steps,
            succeeded: true,
        });
    }

    /// Computes the hop distance from the start to every reachable cell.
    pub fn compute_wave(&mut self) -> Result<&DistanceField, MazeError> {
        let _ = self.run(Operation::ComputeWave, Self::propagate_wave)?;
        Ok(&self.field)
    }

    /// Recovers one shortest route from start to end, in that order.
    ///
    /// Ties between equally short routes are broken toward North, East,
    /// South, West as seen from the end cell.
    pub fn reconstruct_path(&mut self) -> Result<&[CellCoord], MazeError> {
        let _ = self.run(Operation::ReconstructPath, Self::trace_path)?;
        Ok(&self.path)
    }

    /// Marks the shortest path on the grid for the duration of `display`.
    ///
    /// Interior path cells read as [`CellState::Path`] inside the closure and
    /// are restored to their previous states before this method returns.
    pub fn with_path_marked<T, F>(&mut self, display: F) -> Result<T, MazeError>
    where
        F: FnOnce(&Grid) -> T,
    {
        let path = self.reconstruct_path()?.to_vec();
        let interior = path.len().saturating_sub(1);

        let mut previous = Vec::with_capacity(interior);
        for &cell in path.iter().take(interior).skip(1) {
            if let Some(state) = self.grid.overwrite(cell, CellState::Path) {
                previous.push((cell, state));
            }
        }

        let output = display(&self.grid);

        for (cell, state) in previous.into_iter().rev() {
            let _ = self.grid.overwrite(cell, state);
        }

        Ok(output)
    }

    fn write_cell(&mut self, cell: CellCoord, state: CellState) -> Result<u64, MazeError> {
        match state {
            CellState::Start => return self.place_endpoint(Endpoint::Start, cell),
            CellState::End => return self.place_endpoint(Endpoint::End, cell),
            CellState::Empty | CellState::Wall | CellState::Path => {}
        }

        self.grid.set_cell(cell, state)?;
        self.forget_endpoint_at(cell);
        self.invalidate();
        Ok(1)
    }

    fn write_wall(&mut self, slot: WallSlot, present: bool) -> Result<u64, MazeError> {
        self.grid.set_wall(slot, present)?;
        if let (WallSlot::Cell(cell), true) = (slot, present) {
            self.forget_endpoint_at(cell);
        }
        self.invalidate();
        Ok(1)
    }

    fn place_endpoint(&mut self, endpoint: Endpoint, cell: CellCoord) -> Result<u64, MazeError> {
        if self.grid.cell_at(cell)? == CellState::Wall {
            return Err(endpoint.rejected(EndpointRejection::Wall));
        }

        let other = match endpoint {
            Endpoint::Start => self.end,
            Endpoint::End => self.start,
        };
        if other == Some(cell) {
            return Err(endpoint.rejected(EndpointRejection::CoincidesWithOther));
        }

        self.grid.set_cell(cell, endpoint.marker())?;
        match endpoint {
            Endpoint::Start => self.start = Some(cell),
            Endpoint::End => self.end = Some(cell),
        }
        self.invalidate();
        Ok(1)
    }

    fn forget_endpoint_at(&mut self, cell: CellCoord) {
        if self.start == Some(cell) {
            self.start = None;
        }
        if self.end == Some(cell) {
            self.end = None;
        }
    }

    fn propagate_wave(&mut self) -> Result<u64, MazeError> {
        let start = self.start.ok_or(MazeError::InvalidStart {
            reason: EndpointRejection::Unset,
        })?;
        if !self.grid.cell_at(start)?.is_passable() {
            return Err(MazeError::InvalidStart {
                reason: EndpointRejection::Wall,
            });
        }

        self.path.clear();
        let visited = self.field.propagate(Topology::new(&self.grid), start);
        self.wave_state = WaveState::Computed;
        Ok(visited)
    }

    fn trace_path(&mut self) -> Result<u64, MazeError> {
        if !self.wave_state.is_valid() {
            return Err(MazeError::WaveNotComputed);
        }

        let start = self.start.ok_or(MazeError::InvalidStart {
            reason: EndpointRejection::Unset,
        })?;
        let end = self.end.ok_or(MazeError::InvalidEnd {
            reason: EndpointRejection::Unset,
        })?;
        if !self.grid.cell_at(end)?.is_passable() {
            return Err(MazeError::NoPathExists);
        }

        path::trace(
            Topology::new(&self.grid),
            &self.field,
            start,
            end,
            &mut self.path,
        )
    }

    fn invalidate(&mut self) {
        if self.wave_state == WaveState::Computed {
            self.wave_state = WaveState::Stale;
        }
        self.field.clear();
        self.path.clear();
    }

    fn run<F>(&mut self, operation: Operation, action: F) -> Result<u64, MazeError>
    where
        F: FnOnce(&mut Self) -> Result<u64, MazeError>,
    {
        self.notify_started(operation);
        let result = action(self);

        match &result {
            Ok(steps) => debug!("{operation} completed after {steps} steps"),
            Err(error) => trace!("{operation} rejected: {error}"),
        }

        self.notify_finished(OperationReport {
            operation,
            steps: *result.as_ref().unwrap_or(&0),
            succeeded: result.is_ok(),
        });
        result
    }

    fn notify_started(&mut self, operation: Operation) {
        if let Some(observer) = self.observer.as_mut() {
            observer.operation_started(operation);
        }
    }

    fn notify_finished(&mut self, report: OperationReport) {
        if let Some(observer) = self.observer.as_mut() {
            observer.operation_finished(report);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Endpoint {
    Start,
    End,
}

impl Endpoint {
    const fn marker(self) -> CellState {
        match self {
            Self::Start => CellState::Start,
            Self::End => CellState::End,
        }
    }

    const fn rejected(self, reason: EndpointRejection) -> MazeError {
        match self {
            Self::Start => MazeError::InvalidStart { reason },
            Self::End => MazeError::InvalidEnd { reason },
        }
    }
}

/// Applies the provided command to the maze.
///
/// Rejected commands leave the maze untouched.
pub fn apply(maze: &mut Maze, command: MazeCommand) -> Result<(), MazeError> {
    match command {
        MazeCommand::SetCell { cell, state } => maze.set_cell(cell, state),
        MazeCommand::SetWall { slot, present } => maze.set_wall(slot, present),
        MazeCommand::SetStart { cell } => maze.set_start(cell),
        MazeCommand::SetEnd { cell } => maze.set_end(cell),
    }
}

/// Query functions that provide read-only access to the maze state.
pub mod query {
    use maze_wave_core::{
        CellCoord, CellState, Dimensions, MazeError, WallModel, WallSlot, WaveState,
    };

    use super::{DistanceField, Grid, Maze, Topology};

    /// Provides read-only access to the underlying grid.
    #[must_use]
    pub fn grid(maze: &Maze) -> &Grid {
        &maze.grid
    }

    /// Extent of the maze.
    #[must_use]
    pub fn dimensions(maze: &Maze) -> Dimensions {
        maze.grid.dimensions()
    }

    /// Wall representation chosen for the maze.
    #[must_use]
    pub fn wall_model(maze: &Maze) -> WallModel {
        maze.grid.model()
    }

    /// State stored at `cell`.
    pub fn cell_at(maze: &Maze, cell: CellCoord) -> Result<CellState, MazeError> {
        maze.grid.cell_at(cell)
    }

    /// Reports whether the wall at `slot` is raised.
    pub fn wall_at(maze: &Maze, slot: WallSlot) -> Result<bool, MazeError> {
        maze.grid.wall_at(slot)
    }

    /// Reports whether an agent may move from `from` to `to` in one step.
    #[must_use]
    pub fn can_step(maze: &Maze, from: CellCoord, to: CellCoord) -> bool {
        Topology::new(&maze.grid).can_step(from, to)
    }

    /// Current start cell, if placed.
    #[must_use]
    pub fn start(maze: &Maze) -> Option<CellCoord> {
        maze.start
    }

    /// Current end cell, if placed.
    #[must_use]
    pub fn end(maze: &Maze) -> Option<CellCoord> {
        maze.end
    }

    /// Lifecycle state of the distance field.
    #[must_use]
    pub fn wave_state(maze: &Maze) -> WaveState {
        maze.wave_state
    }

    /// Distance field of the last wave, while it still matches the layout.
    #[must_use]
    pub fn distance_field(maze: &Maze) -> Option<&DistanceField> {
        maze.wave_state.is_valid().then_some(&maze.field)
    }

    /// Hop distance from the start to `cell`; `Ok(None)` when unreached.
    pub fn distance(maze: &Maze, cell: CellCoord) -> Result<Option<u32>, MazeError> {
        let field = distance_field(maze).ok_or(MazeError::WaveNotComputed)?;
        if !maze.grid.in_bounds(cell) {
            return Err(MazeError::OutOfBounds { cell });
        }
        Ok(field.distance(cell))
    }

    /// Path produced by the last successful reconstruction, if still current.
    #[must_use]
    pub fn last_path(maze: &Maze) -> Option<&[CellCoord]> {
        (!maze.path.is_empty()).then_some(maze.path.as_slice())
    }
}
