#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared text presentation contracts for maze adapters.
//!
//! Frames are plain strings. Edge-flag grids are drawn as boxed cells with
//! `|` and `---` segments for raised walls; cell-type grids are drawn one
//! character per cell inside a frame.

use std::io::Write;

use anyhow::Result as AnyResult;
use maze_wave_core::{CellCoord, CellState, WallModel, WallSlot};
use maze_wave_world::{DistanceField, Grid, UNREACHED};

/// Characters used for each cell state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    /// Passable cell with no marker.
    pub empty: char,
    /// Cell-type wall.
    pub wall: char,
    /// Start marker.
    pub start: char,
    /// End marker.
    pub end: char,
    /// Cell on the reconstructed path.
    pub path: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            empty: ' ',
            wall: '#',
            start: 'S',
            end: 'E',
            path: '*',
        }
    }
}

impl Glyphs {
    /// Character drawn for `state`.
    #[must_use]
    pub const fn glyph(&self, state: CellState) -> char {
        match state {
            CellState::Empty => self.empty,
            CellState::Wall => self.wall,
            CellState::Start => self.start,
            CellState::End => self.end,
            CellState::Path => self.path,
        }
    }
}

/// Draws the layout of `grid`, including any path cells it currently holds.
#[must_use]
pub fn render_grid(grid: &Grid, glyphs: &Glyphs) -> String {
    match grid.model() {
        WallModel::CellType => render_cells(grid, glyphs),
        WallModel::EdgeFlag => render_edges(grid, glyphs),
    }
}

fn render_cells(grid: &Grid, glyphs: &Glyphs) -> String {
    let width = grid.width() as usize;
    let border = format!("+{}+\n", "-".repeat(width));

    let mut out = border.clone();
    for states in grid.cells().chunks(width) {
        out.push('|');
        out.extend(states.iter().map(|state| glyphs.glyph(*state)));
        out.push_str("|\n");
    }
    out.push_str(&border);
    out
}

fn render_edges(grid: &Grid, glyphs: &Glyphs) -> String {
    let width = grid.width();
    let height = grid.height();
    let border = format!("{}+\n", "+---".repeat(width as usize));
    let walled = |slot| grid.wall_at(slot).unwrap_or(false);

    let mut out = border.clone();
    for (row, states) in (0..height).zip(grid.cells().chunks(width as usize)) {
        out.push('|');
        for (column, state) in (0..width).zip(states) {
            out.push(' ');
            out.push(glyphs.glyph(*state));
            out.push(' ');
            if column + 1 < width {
                let vertical = WallSlot::Vertical(CellCoord::new(column, row));
                out.push(if walled(vertical) { '|' } else { ' ' });
            }
        }
        out.push_str("|\n");

        if row + 1 < height {
            out.push('+');
            for column in 0..width {
                let horizontal = WallSlot::Horizontal(CellCoord::new(column, row));
                out.push_str(if walled(horizontal) { "---" } else { "   " });
                out.push('+');
            }
            out.push('\n');
        }
    }
    out.push_str(&border);
    out
}

/// Draws a distance field as a right-aligned table; unreached cells show `-`.
#[must_use]
pub fn render_distances(field: &DistanceField) -> String {
    let width = field.width() as usize;
    if width == 0 {
        return String::new();
    }

    let label = |distance: &u32| {
        if *distance == UNREACHED {
            "-".to_owned()
        } else {
            distance.to_string()
        }
    };
    let column_width = field
        .cells()
        .iter()
        .map(|distance| label(distance).len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for row in field.cells().chunks(width) {
        let cells: Vec<String> = row
            .iter()
            .map(|distance| format!("{:>column_width$}", label(distance)))
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

/// Destination for rendered frames.
pub trait Presenter {
    /// Shows one rendered frame.
    fn present(&mut self, frame: &str) -> AnyResult<()>;
}

/// Presenter that writes frames to any byte sink.
#[derive(Debug)]
pub struct WriterPresenter<W> {
    sink: W,
}

impl<W: Write> WriterPresenter<W> {
    /// Wraps `sink`.
    #[must_use]
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Returns the wrapped sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> Presenter for WriterPresenter<W> {
    fn present(&mut self, frame: &str) -> AnyResult<()> {
        self.sink.write_all(frame.as_bytes())?;
        self.sink.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_wave_core::{Dimensions, WallModel};
    use maze_wave_world::Maze;

    fn dimensions(width: u32, height: u32) -> Dimensions {
        Dimensions::new(width, height).expect("valid dimensions")
    }

    #[test]
    fn edge_grids_draw_boxed_cells() {
        let mut grid = Grid::new(dimensions(2, 2), WallModel::EdgeFlag);
        grid.set_cell(CellCoord::new(0, 0), CellState::Start)
            .expect("start placed");
        grid.set_cell(CellCoord::new(1, 1), CellState::End)
            .expect("end placed");
        grid.set_wall(WallSlot::Vertical(CellCoord::new(0, 0)), true)
            .expect("wall raised");
        grid.set_wall(WallSlot::Horizontal(CellCoord::new(1, 0)), true)
            .expect("wall raised");

        let expected = "\
+---+---+
| S |   |
+   +---+
|     E |
+---+---+
";
        assert_eq!(render_grid(&grid, &Glyphs::default()), expected);
    }

    #[test]
    fn cell_grids_draw_one_character_per_cell() {
        let mut grid = Grid::new(dimensions(3, 2), WallModel::CellType);
        grid.set_cell(CellCoord::new(0, 0), CellState::Start)
            .expect("start placed");
        grid.set_wall(WallSlot::Cell(CellCoord::new(1, 0)), true)
            .expect("wall raised");
        grid.set_cell(CellCoord::new(2, 1), CellState::End)
            .expect("end placed");

        assert_eq!(
            render_grid(&grid, &Glyphs::default()),
            "+---+\n|S# |\n|  E|\n+---+\n"
        );
    }

    #[test]
    fn path_overlay_uses_the_path_glyph() {
        let mut maze = Maze::new(dimensions(3, 1), WallModel::EdgeFlag);
        maze.set_start(CellCoord::new(0, 0)).expect("start placed");
        maze.set_end(CellCoord::new(2, 0)).expect("end placed");
        let _ = maze.compute_wave().expect("wave computes");
        let _ = maze.reconstruct_path().expect("path found");

        let frame = maze
            .with_path_marked(|grid| render_grid(grid, &Glyphs::default()))
            .expect("path marked");
        assert_eq!(frame, "+---+---+---+\n| S   *   E |\n+---+---+---+\n");
    }

    #[test]
    fn distances_are_right_aligned_with_unreached_cells_dashed() {
        let mut maze = Maze::new(dimensions(4, 3), WallModel::CellType);
        maze.set_start(CellCoord::new(0, 0)).expect("start placed");
        for row in 0..3 {
            maze.set_wall(WallSlot::Cell(CellCoord::new(2, row)), true)
                .expect("wall raised");
        }
        let field = maze.compute_wave().expect("wave computes");

        assert_eq!(render_distances(field), "0 1 - -\n1 2 - -\n2 3 - -\n");
    }

    #[test]
    fn writer_presenter_forwards_frames() {
        let mut presenter = WriterPresenter::new(Vec::new());
        presenter.present("frame\n").expect("frame written");
        assert_eq!(presenter.into_inner(), b"frame\n");
    }
}
