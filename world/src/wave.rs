//! Breadth-first wave propagation used by the maze.

use std::collections::VecDeque;

use maze_wave_core::CellCoord;

use crate::topology::Topology;

/// Sentinel stored for cells the wave never reached.
pub const UNREACHED: u32 = u32::MAX;

/// Dense hop-distance grid seeded from the start cell.
///
/// Distances default to [`UNREACHED`] so callers can distinguish walled-off
/// cells from traversable ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistanceField {
    width: u32,
    height: u32,
    distances: Vec<u32>,
}

impl DistanceField {
    /// Rebuilds the distances using a breadth-first search from `source`.
    ///
    /// Returns the number of cells dequeued during the pass.
    pub(crate) fn propagate(&mut self, topology: Topology<'_>, source: CellCoord) -> u64 {
        let dimensions = topology.dimensions();
        let cell_count = dimensions.cell_count();
        if self.distances.len() != cell_count {
            self.distances = vec![UNREACHED; cell_count];
        } else {
            self.distances.fill(UNREACHED);
        }

        self.width = dimensions.width();
        self.height = dimensions.height();

        let Some(source_index) = self.index(source) else {
            return 0;
        };
        self.distances[source_index] = 0;

        let mut queue = VecDeque::with_capacity(cell_count);
        queue.push_back(source);
        let mut visited = 0_u64;

        while let Some(cell) = queue.pop_front() {
            visited += 1;
            let Some(current_index) = self.index(cell) else {
                continue;
            };
            let next_distance = self.distances[current_index] + 1;

            for neighbor in topology.neighbors(cell) {
                let Some(neighbor_index) = self.index(neighbor) else {
                    continue;
                };

                if self.distances[neighbor_index] != UNREACHED {
                    continue;
                }

                self.distances[neighbor_index] = next_distance;
                queue.push_back(neighbor);
            }
        }

        visited
    }

    /// Drops every stored distance.
    pub(crate) fn clear(&mut self) {
        self.distances.clear();
    }

    /// Width of the field in cells.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the field in cells.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dense distances stored in row-major order, [`UNREACHED`] where unreached.
    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.distances
    }

    /// Distance from the source to `cell`, or `None` when unreached or out of bounds.
    #[must_use]
    pub fn distance(&self, cell: CellCoord) -> Option<u32> {
        self.index(cell)
            .and_then(|index| self.distances.get(index).copied())
            .filter(|distance| *distance != UNREACHED)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() >= self.width || cell.row() >= self.height {
            return None;
        }
        Some(cell.row() as usize * self.width as usize + cell.column() as usize)
    }
}
