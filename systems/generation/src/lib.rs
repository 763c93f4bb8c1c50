#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Random maze layout generation.
//!
//! Two policies are offered. The unconstrained policy raises each wall slot
//! independently and may disconnect the endpoints. The connected policy carves
//! a random spanning tree over the cell graph so every pair of cells, the
//! endpoints included, is joined by exactly one route.
//!
//! The random source is always supplied by the caller; generation never seeds
//! or reseeds on its own.

use std::{cmp::Reverse, collections::BinaryHeap};

use log::debug;
use maze_wave_core::{
    CellCoord, CellState, Dimensions, Direction, EndpointRejection, MazeError, WallModel,
    WallSlot,
};
use maze_wave_world::{Grid, Maze};
use rand::Rng;
use thiserror::Error;

/// Default chance that an unconstrained wall slot is raised.
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.3;

/// Tuning knobs for maze generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationConfig {
    /// Probability in `[0, 1]` that each wall slot is raised by the unconstrained policy.
    pub wall_probability: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            wall_probability: DEFAULT_WALL_PROBABILITY,
        }
    }
}

impl GenerationConfig {
    /// Checks that the configuration describes a valid distribution.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if (0.0..=1.0).contains(&self.wall_probability) {
            Ok(())
        } else {
            Err(GenerationError::InvalidWallProbability(self.wall_probability))
        }
    }
}

/// Errors reported while generating a layout.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerationError {
    /// The wall probability lies outside `[0, 1]` or is not a number.
    #[error("wall probability {0} must lie within [0, 1]")]
    InvalidWallProbability(f64),
    /// The layout violates a maze invariant.
    #[error(transparent)]
    Maze(#[from] MazeError),
}

/// Generation system producing fresh layouts from an injected random source.
#[derive(Debug)]
pub struct Generator<R> {
    rng: R,
    config: GenerationConfig,
}

impl<R: Rng> Generator<R> {
    /// Creates a generator drawing from `rng`.
    #[must_use]
    pub fn new(rng: R, config: GenerationConfig) -> Self {
        Self { rng, config }
    }

    /// Configuration applied by the unconstrained policy.
    #[must_use]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Builds an unconstrained random layout.
    ///
    /// Every wall slot of `model` is raised independently with the configured
    /// probability. The start is placed at the top-left corner and the end at
    /// the bottom-right corner; in cell-type grids those two cells are never
    /// walls. The endpoints may still be disconnected.
    pub fn random_grid(
        &mut self,
        dimensions: Dimensions,
        model: WallModel,
    ) -> Result<Grid, GenerationError> {
        self.config.validate()?;
        ensure_distinct_corners(dimensions)?;

        let probability = self.config.wall_probability;
        let mut grid = Grid::new(dimensions, model);
        let mut raised = 0_usize;

        for slot in wall_slots(dimensions, model) {
            if self.rng.gen_bool(probability) {
                grid.set_wall(slot, true)?;
                raised += 1;
            }
        }

        place_corner_endpoints(&mut grid)?;
        debug!("random {model} layout raised {raised} walls at p={probability}");
        Ok(grid)
    }

    /// Builds an edge-flag layout whose open edges form a random spanning tree.
    ///
    /// Carving starts from a random cell and repeatedly opens the frontier
    /// edge with the lowest random priority that leads to an unvisited cell.
    /// Every edge the tree does not use stays walled.
    pub fn connected_grid(&mut self, dimensions: Dimensions) -> Result<Grid, GenerationError> {
        ensure_distinct_corners(dimensions)?;

        let mut grid = Grid::new(dimensions, WallModel::EdgeFlag);
        for slot in wall_slots(dimensions, WallModel::EdgeFlag) {
            grid.set_wall(slot, true)?;
        }

        let width = dimensions.width() as usize;
        let index = |cell: CellCoord| cell.row() as usize * width + cell.column() as usize;
        let mut visited = vec![false; dimensions.cell_count()];
        let mut frontier = BinaryHeap::new();

        let origin = CellCoord::new(
            self.rng.gen_range(0..dimensions.width()),
            self.rng.gen_range(0..dimensions.height()),
        );
        visited[index(origin)] = true;
        let mut carved = 1_usize;
        self.push_frontier(&mut frontier, origin, dimensions, &visited, index);

        while let Some(Reverse((_, from, to))) = frontier.pop() {
            if visited[index(to)] {
                continue;
            }

            if let Some(slot) = WallSlot::between(from, to) {
                grid.set_wall(slot, false)?;
            }
            visited[index(to)] = true;
            carved += 1;
            self.push_frontier(&mut frontier, to, dimensions, &visited, index);
        }

        place_corner_endpoints(&mut grid)?;
        debug!("connected layout carved {carved} cells starting at {origin}");
        Ok(grid)
    }

    /// Replaces the layout of `maze` with an unconstrained random one.
    pub fn generate_random(
        &mut self,
        maze: &mut Maze,
        dimensions: Dimensions,
        model: WallModel,
    ) -> Result<(), GenerationError> {
        let grid = self.random_grid(dimensions, model)?;
        maze.replace_grid(grid);
        Ok(())
    }

    /// Replaces the layout of `maze` with a guaranteed-connected one.
    pub fn generate_connected(
        &mut self,
        maze: &mut Maze,
        dimensions: Dimensions,
    ) -> Result<(), GenerationError> {
        let grid = self.connected_grid(dimensions)?;
        maze.replace_grid(grid);
        Ok(())
    }

    fn push_frontier<F>(
        &mut self,
        frontier: &mut BinaryHeap<Reverse<(u32, CellCoord, CellCoord)>>,
        cell: CellCoord,
        dimensions: Dimensions,
        visited: &[bool],
        index: F,
    ) where
        F: Fn(CellCoord) -> usize,
    {
        for direction in Direction::ALL {
            let Some(neighbor) = cell.neighbor(direction, dimensions) else {
                continue;
            };
            if visited[index(neighbor)] {
                continue;
            }
            frontier.push(Reverse((self.rng.gen(), cell, neighbor)));
        }
    }
}

fn wall_slots(dimensions: Dimensions, model: WallModel) -> Vec<WallSlot> {
    let mut slots = Vec::new();
    for row in 0..dimensions.height() {
        for column in 0..dimensions.width() {
            let cell = CellCoord::new(column, row);
            match model {
                WallModel::CellType => slots.push(WallSlot::Cell(cell)),
                WallModel::EdgeFlag => {
                    if row + 1 < dimensions.height() {
                        slots.push(WallSlot::Horizontal(cell));
                    }
                    if column + 1 < dimensions.width() {
                        slots.push(WallSlot::Vertical(cell));
                    }
                }
            }
        }
    }
    slots
}

fn ensure_distinct_corners(dimensions: Dimensions) -> Result<(), MazeError> {
    if dimensions.last_cell() == CellCoord::new(0, 0) {
        return Err(MazeError::InvalidEnd {
            reason: EndpointRejection::CoincidesWithOther,
        });
    }
    Ok(())
}

fn place_corner_endpoints(grid: &mut Grid) -> Result<(), MazeError> {
    let last = grid.dimensions().last_cell();
    grid.set_cell(CellCoord::new(0, 0), CellState::Start)?;
    grid.set_cell(last, CellState::End)
}
