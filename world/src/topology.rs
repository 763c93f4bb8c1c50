//! Adjacency rules shared by the wave engine and the path reconstructor.

use maze_wave_core::{CellCoord, Dimensions, Direction, WallModel};

use crate::grid::Grid;

/// Movement predicate over a grid, dispatched on the grid's wall model.
#[derive(Clone, Copy, Debug)]
pub struct Topology<'a> {
    grid: &'a Grid,
}

impl<'a> Topology<'a> {
    /// Captures the adjacency rules of `grid`.
    #[must_use]
    pub const fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// Extent of the underlying grid.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    /// Reports whether an agent standing on `from` may step onto `to`.
    ///
    /// Non-adjacent or out-of-bounds pairs are simply not steppable.
    #[must_use]
    pub fn can_step(&self, from: CellCoord, to: CellCoord) -> bool {
        if !from.is_adjacent(to) || !self.grid.in_bounds(from) || !self.grid.in_bounds(to) {
            return false;
        }

        match self.grid.model() {
            WallModel::CellType => self
                .grid
                .cell_at(to)
                .map_or(false, |state| state.is_passable()),
            WallModel::EdgeFlag => !self.grid.edge_blocked(from, to),
        }
    }

    /// Cells reachable in one step from `cell`, in North, East, South, West order.
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + 'a {
        let topology = *self;
        let dimensions = self.dimensions();
        Direction::ALL.into_iter().filter_map(move |direction| {
            cell.neighbor(direction, dimensions)
                .filter(|neighbor| topology.can_step(cell, *neighbor))
        })
    }
}
