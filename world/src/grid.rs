//! Bounds-checked storage for cell states and edge walls.

use maze_wave_core::{CellCoord, CellState, Dimensions, MazeError, WallModel, WallSlot};

/// Dense row-major store of cell states plus the edge flags of edge-flag mazes.
///
/// Horizontal flags are laid out as `[height - 1][width]` and block movement
/// between `(x, y)` and `(x, y + 1)`. Vertical flags are laid out as
/// `[height][width - 1]` and block movement between `(x, y)` and `(x + 1, y)`.
/// Cell-type grids carry no edge flags at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    dimensions: Dimensions,
    model: WallModel,
    cells: Vec<CellState>,
    horizontal: Vec<bool>,
    vertical: Vec<bool>,
}

impl Grid {
    /// Creates an open grid with every cell empty and no walls.
    #[must_use]
    pub fn new(dimensions: Dimensions, model: WallModel) -> Self {
        let width = dimensions.width() as usize;
        let height = dimensions.height() as usize;
        let (horizontal, vertical) = match model {
            WallModel::CellType => (Vec::new(), Vec::new()),
            WallModel::EdgeFlag => (
                vec![false; (height - 1) * width],
                vec![false; height * (width - 1)],
            ),
        };

        Self {
            dimensions,
            model,
            cells: vec![CellState::Empty; dimensions.cell_count()],
            horizontal,
            vertical,
        }
    }

    /// Extent of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.dimensions.width()
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.dimensions.height()
    }

    /// Wall representation used by the grid.
    #[must_use]
    pub const fn model(&self) -> WallModel {
        self.model
    }

    /// Reports whether `cell` addresses a position inside the grid.
    #[must_use]
    pub const fn in_bounds(&self, cell: CellCoord) -> bool {
        self.dimensions.contains(cell)
    }

    /// State stored at `cell`.
    pub fn cell_at(&self, cell: CellCoord) -> Result<CellState, MazeError> {
        self.index(cell)
            .map(|index| self.cells[index])
            .ok_or(MazeError::OutOfBounds { cell })
    }

    /// Writes `state` into `cell`.
    ///
    /// Writing `Start` or `End` first clears the marker wherever it currently
    /// sits so the grid never holds two of either. `Path` is transient and
    /// cannot be written, and `Wall` cells only exist in cell-type grids.
    pub fn set_cell(&mut self, cell: CellCoord, state: CellState) -> Result<(), MazeError> {
        let index = self.index(cell).ok_or(MazeError::OutOfBounds { cell })?;

        let supported = match state {
            CellState::Path => false,
            CellState::Wall => self.model == WallModel::CellType,
            CellState::Empty | CellState::Start | CellState::End => true,
        };
        if !supported {
            return Err(MazeError::UnsupportedCellState { cell, state });
        }

        if matches!(state, CellState::Start | CellState::End) {
            for existing in self.cells.iter_mut().filter(|existing| **existing == state) {
                *existing = CellState::Empty;
            }
        }

        self.cells[index] = state;
        Ok(())
    }

    /// Reports whether the wall at `slot` is raised.
    pub fn wall_at(&self, slot: WallSlot) -> Result<bool, MazeError> {
        if slot.model() != self.model {
            return Err(MazeError::WallModelMismatch { model: self.model });
        }

        match slot {
            WallSlot::Cell(cell) => self.cell_at(cell).map(|state| state == CellState::Wall),
            WallSlot::Horizontal(cell) => self
                .horizontal_index(cell)
                .map(|index| self.horizontal[index])
                .ok_or(MazeError::OutOfBounds { cell }),
            WallSlot::Vertical(cell) => self
                .vertical_index(cell)
                .map(|index| self.vertical[index])
                .ok_or(MazeError::OutOfBounds { cell }),
        }
    }

    /// Raises or clears the wall at `slot`.
    ///
    /// Raising a cell wall overwrites whatever the cell held. Clearing a cell
    /// wall only touches cells that currently are walls.
    pub fn set_wall(&mut self, slot: WallSlot, present: bool) -> Result<(), MazeError> {
        if slot.model() != self.model {
            return Err(MazeError::WallModelMismatch { model: self.model });
        }

        match slot {
            WallSlot::Cell(cell) => {
                let index = self.index(cell).ok_or(MazeError::OutOfBounds { cell })?;
                if present {
                    self.cells[index] = CellState::Wall;
                } else if self.cells[index] == CellState::Wall {
                    self.cells[index] = CellState::Empty;
                }
            }
            WallSlot::Horizontal(cell) => {
                let index = self
                    .horizontal_index(cell)
                    .ok_or(MazeError::OutOfBounds { cell })?;
                self.horizontal[index] = present;
            }
            WallSlot::Vertical(cell) => {
                let index = self
                    .vertical_index(cell)
                    .ok_or(MazeError::OutOfBounds { cell })?;
                self.vertical[index] = present;
            }
        }

        Ok(())
    }

    /// Dense cell states in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Horizontal edge flags in row-major `[height - 1][width]` order.
    #[must_use]
    pub fn horizontal_walls(&self) -> &[bool] {
        &self.horizontal
    }

    /// Vertical edge flags in row-major `[height][width - 1]` order.
    #[must_use]
    pub fn vertical_walls(&self) -> &[bool] {
        &self.vertical
    }

    /// First cell, in row-major order, holding `state`.
    #[must_use]
    pub fn find(&self, state: CellState) -> Option<CellCoord> {
        self.cells
            .iter()
            .position(|existing| *existing == state)
            .map(|index| self.coord(index))
    }

    /// Iterates every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> {
        let width = self.width();
        let height = self.height();
        (0..height).flat_map(move |row| (0..width).map(move |column| CellCoord::new(column, row)))
    }

    /// Reports whether an edge flag separates two adjacent cells.
    ///
    /// Returns `false` for cell-type grids and for cells that are not
    /// neighbours.
    pub(crate) fn edge_blocked(&self, from: CellCoord, to: CellCoord) -> bool {
        if self.model != WallModel::EdgeFlag {
            return false;
        }

        WallSlot::between(from, to)
            .and_then(|slot| self.wall_at(slot).ok())
            .unwrap_or(false)
    }

    /// Overwrites `cell` regardless of state rules, returning the previous state.
    pub(crate) fn overwrite(&mut self, cell: CellCoord, state: CellState) -> Option<CellState> {
        let index = self.index(cell)?;
        Some(std::mem::replace(&mut self.cells[index], state))
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(cell.row() as usize * self.width() as usize + cell.column() as usize)
    }

    fn coord(&self, index: usize) -> CellCoord {
        let width = self.width() as usize;
        CellCoord::new((index % width) as u32, (index / width) as u32)
    }

    fn horizontal_index(&self, cell: CellCoord) -> Option<usize> {
        if self.model != WallModel::EdgeFlag
            || cell.column() >= self.width()
            || cell.row() >= self.height() - 1
        {
            return None;
        }
        Some(cell.row() as usize * self.width() as usize + cell.column() as usize)
    }

    fn vertical_index(&self, cell: CellCoord) -> Option<usize> {
        if self.model != WallModel::EdgeFlag
            || cell.column() >= self.width() - 1
            || cell.row() >= self.height()
        {
            return None;
        }
        Some(cell.row() as usize * (self.width() as usize - 1) + cell.column() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimensions(width: u32, height: u32) -> Dimensions {
        Dimensions::new(width, height).expect("valid dimensions")
    }

    #[test]
    fn new_grid_is_open_and_sized_per_model() {
        let edge = Grid::new(dimensions(4, 3), WallModel::EdgeFlag);
        assert!(edge.cells().iter().all(|state| *state == CellState::Empty));
        assert_eq!(edge.horizontal_walls().len(), 2 * 4);
        assert_eq!(edge.vertical_walls().len(), 3 * 3);

        let cell = Grid::new(dimensions(4, 3), WallModel::CellType);
        assert!(cell.horizontal_walls().is_empty());
        assert!(cell.vertical_walls().is_empty());
    }

    #[test]
    fn single_row_grid_has_no_horizontal_walls() {
        let grid = Grid::new(dimensions(3, 1), WallModel::EdgeFlag);
        assert!(grid.horizontal_walls().is_empty());
        assert_eq!(
            grid.wall_at(WallSlot::Horizontal(CellCoord::new(0, 0))),
            Err(MazeError::OutOfBounds {
                cell: CellCoord::new(0, 0)
            })
        );
    }

    #[test]
    fn out_of_bounds_lookups_are_reported() {
        let grid = Grid::new(dimensions(2, 2), WallModel::CellType);
        let far = CellCoord::new(u32::MAX, 7);
        assert!(!grid.in_bounds(far));
        assert_eq!(
            grid.cell_at(far),
            Err(MazeError::OutOfBounds { cell: far })
        );
    }

    #[test]
    fn writing_a_marker_clears_the_previous_one() {
        let mut grid = Grid::new(dimensions(3, 3), WallModel::CellType);
        grid.set_cell(CellCoord::new(0, 0), CellState::Start)
            .expect("start placed");
        grid.set_cell(CellCoord::new(2, 1), CellState::Start)
            .expect("start moved");

        assert_eq!(grid.cell_at(CellCoord::new(0, 0)), Ok(CellState::Empty));
        assert_eq!(grid.find(CellState::Start), Some(CellCoord::new(2, 1)));
        assert_eq!(
            grid.cells()
                .iter()
                .filter(|state| **state == CellState::Start)
                .count(),
            1
        );
    }

    #[test]
    fn transient_and_foreign_states_are_rejected() {
        let mut edge = Grid::new(dimensions(2, 2), WallModel::EdgeFlag);
        let cell = CellCoord::new(1, 1);
        assert_eq!(
            edge.set_cell(cell, CellState::Wall),
            Err(MazeError::UnsupportedCellState {
                cell,
                state: CellState::Wall
            })
        );
        assert!(edge.set_cell(cell, CellState::Path).is_err());
        assert_eq!(
            edge.set_wall(WallSlot::Cell(cell), true),
            Err(MazeError::WallModelMismatch {
                model: WallModel::EdgeFlag
            })
        );
    }

    #[test]
    fn edge_flags_block_only_their_edge() {
        let mut grid = Grid::new(dimensions(3, 3), WallModel::EdgeFlag);
        grid.set_wall(WallSlot::Vertical(CellCoord::new(0, 1)), true)
            .expect("vertical wall");
        grid.set_wall(WallSlot::Horizontal(CellCoord::new(2, 0)), true)
            .expect("horizontal wall");

        assert!(grid.edge_blocked(CellCoord::new(0, 1), CellCoord::new(1, 1)));
        assert!(grid.edge_blocked(CellCoord::new(1, 1), CellCoord::new(0, 1)));
        assert!(grid.edge_blocked(CellCoord::new(2, 1), CellCoord::new(2, 0)));
        assert!(!grid.edge_blocked(CellCoord::new(0, 0), CellCoord::new(1, 0)));
        assert_eq!(
            grid.wall_at(WallSlot::Vertical(CellCoord::new(0, 1))),
            Ok(true)
        );
        assert_eq!(
            grid.set_wall(WallSlot::Vertical(CellCoord::new(2, 0)), true),
            Err(MazeError::OutOfBounds {
                cell: CellCoord::new(2, 0)
            })
        );
    }

    #[test]
    fn clearing_a_cell_wall_leaves_other_cells_alone() {
        let mut grid = Grid::new(dimensions(2, 1), WallModel::CellType);
        grid.set_cell(CellCoord::new(0, 0), CellState::End)
            .expect("end placed");
        grid.set_wall(WallSlot::Cell(CellCoord::new(0, 0)), false)
            .expect("clear is accepted");
        assert_eq!(grid.cell_at(CellCoord::new(0, 0)), Ok(CellState::End));

        grid.set_wall(WallSlot::Cell(CellCoord::new(1, 0)), true)
            .expect("wall raised");
        assert_eq!(grid.cell_at(CellCoord::new(1, 0)), Ok(CellState::Wall));
    }

    #[test]
    fn coords_iterate_in_row_major_order() {
        let grid = Grid::new(dimensions(2, 2), WallModel::CellType);
        let coords: Vec<_> = grid.coords().collect();
        assert_eq!(
            coords,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 1),
            ]
        );
    }
}
