#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze wave engine.
//!
//! This crate defines the value types that connect adapters, the authoritative
//! maze, and the generation system. Adapters submit [`MazeCommand`] values
//! describing desired mutations, the world executes them via its `apply` entry
//! point, and every rejection is reported as a [`MazeError`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single grid cell expressed as column and row coordinates.
///
/// The column grows eastward (`x`) and the row grows southward (`y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Reports whether `other` shares an edge with this cell.
    #[must_use]
    pub fn is_adjacent(self, other: CellCoord) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Returns the neighbouring cell in `direction` when it lies inside `dimensions`.
    #[must_use]
    pub fn neighbor(self, direction: Direction, dimensions: Dimensions) -> Option<CellCoord> {
        let candidate = match direction {
            Direction::North => CellCoord::new(self.column, self.row.checked_sub(1)?),
            Direction::East => CellCoord::new(self.column.checked_add(1)?, self.row),
            Direction::South => CellCoord::new(self.column, self.row.checked_add(1)?),
            Direction::West => CellCoord::new(self.column.checked_sub(1)?, self.row),
        };

        dimensions.contains(candidate).then_some(candidate)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Cardinal movement directions between adjacent cells.
///
/// The declaration order is the canonical expansion and tie-break order used
/// by the wave engine and the path reconstructor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in canonical order: North, East, South, West.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// Largest number of cells a maze may cover.
pub const MAX_CELLS: usize = 1 << 24;

/// Validated, non-zero extent of a maze measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    /// Creates a dimension descriptor, rejecting zero-sized extents and
    /// extents covering more than [`MAX_CELLS`] cells.
    pub fn new(width: u32, height: u32) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }

        let cells = u64::from(width) * u64::from(height);
        if cells > MAX_CELLS as u64 {
            return Err(MazeError::InvalidDimensions { width, height });
        }

        Ok(Self { width, height })
    }

    /// Number of columns in the maze.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the maze.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells covered by the dimensions.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reports whether `cell` lies within the dimensions.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Cell in the bottom-right corner.
    #[must_use]
    pub const fn last_cell(&self) -> CellCoord {
        CellCoord::new(self.width - 1, self.height - 1)
    }
}

/// State held by a single maze cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Open floor.
    #[default]
    Empty,
    /// The unique start marker.
    Start,
    /// The unique end marker.
    End,
    /// Impassable cell; only used in [`WallModel::CellType`] mazes.
    Wall,
    /// Transient display marker laid down while a path is shown.
    Path,
}

impl CellState {
    /// Reports whether an agent may occupy the cell.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, CellState::Wall)
    }
}

/// Representation used to express impassability in a maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallModel {
    /// Whole cells become walls.
    CellType,
    /// Cells stay open and walls sit on the edges between them.
    EdgeFlag,
}

impl fmt::Display for WallModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellType => write!(f, "cell-type"),
            Self::EdgeFlag => write!(f, "edge-flag"),
        }
    }
}

/// Addresses one wall position in either wall model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallSlot {
    /// A whole cell in a [`WallModel::CellType`] maze.
    Cell(CellCoord),
    /// Edge between `(x, y)` and `(x, y + 1)` in a [`WallModel::EdgeFlag`] maze.
    Horizontal(CellCoord),
    /// Edge between `(x, y)` and `(x + 1, y)` in a [`WallModel::EdgeFlag`] maze.
    Vertical(CellCoord),
}

impl WallSlot {
    /// Wall model the slot belongs to.
    #[must_use]
    pub const fn model(&self) -> WallModel {
        match self {
            Self::Cell(_) => WallModel::CellType,
            Self::Horizontal(_) | Self::Vertical(_) => WallModel::EdgeFlag,
        }
    }

    /// Edge slot separating two adjacent cells, if they are adjacent.
    #[must_use]
    pub fn between(a: CellCoord, b: CellCoord) -> Option<WallSlot> {
        if !a.is_adjacent(b) {
            return None;
        }

        if a.column() == b.column() {
            Some(WallSlot::Horizontal(CellCoord::new(
                a.column(),
                a.row().min(b.row()),
            )))
        } else {
            Some(WallSlot::Vertical(CellCoord::new(
                a.column().min(b.column()),
                a.row(),
            )))
        }
    }

    /// Anchor cell of the slot.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        match self {
            Self::Cell(cell) | Self::Horizontal(cell) | Self::Vertical(cell) => *cell,
        }
    }
}

/// Reason an endpoint placement or lookup was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointRejection {
    /// The endpoint has not been placed.
    Unset,
    /// The requested cell is a wall.
    Wall,
    /// The requested cell already holds the other endpoint.
    CoincidesWithOther,
}

impl fmt::Display for EndpointRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => write!(f, "it has not been set"),
            Self::Wall => write!(f, "the cell is a wall"),
            Self::CoincidesWithOther => write!(f, "the cell holds the other endpoint"),
        }
    }
}

/// Errors reported by maze operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    /// The requested maze extent is zero in at least one dimension or too large.
    #[error(
        "maze dimensions {width}x{height} must both be positive and cover at most {} cells",
        MAX_CELLS
    )]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The coordinate lies outside the grid.
    #[error("coordinate {cell} lies outside the maze")]
    OutOfBounds {
        /// Offending coordinate.
        cell: CellCoord,
    },
    /// The start marker cannot be used or placed.
    #[error("invalid start: {reason}")]
    InvalidStart {
        /// Why the start was refused.
        reason: EndpointRejection,
    },
    /// The end marker cannot be used or placed.
    #[error("invalid end: {reason}")]
    InvalidEnd {
        /// Why the end was refused.
        reason: EndpointRejection,
    },
    /// A path was requested before a wave over the current layout.
    #[error("the wave has not been computed for the current layout")]
    WaveNotComputed,
    /// The end cannot be reached from the start.
    #[error("no path exists between start and end")]
    NoPathExists,
    /// The distance field disagrees with the maze topology.
    #[error("distance field is inconsistent with the maze at {cell}")]
    PathReconstructionInconsistent {
        /// Cell from which no descending neighbour could be found.
        cell: CellCoord,
    },
    /// The operation addresses a wall kind the maze does not use.
    #[error("operation is not available in a {model} maze")]
    WallModelMismatch {
        /// Wall model of the maze.
        model: WallModel,
    },
    /// The cell state cannot be written directly.
    #[error("cell state {state:?} cannot be written at {cell}")]
    UnsupportedCellState {
        /// Target coordinate.
        cell: CellCoord,
        /// Rejected state.
        state: CellState,
    },
}

/// Commands that express all permissible maze mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MazeCommand {
    /// Writes a cell state.
    SetCell {
        /// Target cell.
        cell: CellCoord,
        /// State to store.
        state: CellState,
    },
    /// Raises or clears a wall.
    SetWall {
        /// Wall position.
        slot: WallSlot,
        /// Whether the wall should be present.
        present: bool,
    },
    /// Moves the start marker.
    SetStart {
        /// New start cell.
        cell: CellCoord,
    },
    /// Moves the end marker.
    SetEnd {
        /// New end cell.
        cell: CellCoord,
    },
}

/// Lifecycle of the distance field relative to the maze structure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WaveState {
    /// No wave has run since the layout was created or loaded.
    #[default]
    Fresh,
    /// The distance field matches the current structure.
    Computed,
    /// The structure changed after the last wave.
    Stale,
}

impl WaveState {
    /// Reports whether the distance field may be trusted.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, WaveState::Computed)
    }
}

/// Notable operations reported to maze observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A cell state write.
    SetCell,
    /// A wall edit.
    SetWall,
    /// A start placement.
    SetStart,
    /// An end placement.
    SetEnd,
    /// A breadth-first wave pass.
    ComputeWave,
    /// A shortest-path reconstruction.
    ReconstructPath,
    /// A whole-layout replacement from generation or loading.
    ReplaceLayout,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SetCell => "set cell",
            Self::SetWall => "set wall",
            Self::SetStart => "set start",
            Self::SetEnd => "set end",
            Self::ComputeWave => "compute wave",
            Self::ReconstructPath => "reconstruct path",
            Self::ReplaceLayout => "replace layout",
        };
        f.write_str(label)
    }
}

/// Summary of a finished operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperationReport {
    /// Operation that completed.
    pub operation: Operation,
    /// Elementary steps performed (cells visited, cells written).
    pub steps: u64,
    /// Whether the operation succeeded.
    pub succeeded: bool,
}
