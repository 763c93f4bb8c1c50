//! Character-per-cell encoding for cell-type mazes.

use maze_wave_core::{CellCoord, CellState, Dimensions, WallModel, WallSlot};
use maze_wave_world::{query, Maze};

use crate::{Line, TextFormatError};

const WALL: char = '#';
const EMPTY: char = '.';
const START: char = 'S';
const END: char = 'E';

pub(crate) fn encode(maze: &Maze) -> Result<String, TextFormatError> {
    if query::start(maze).is_none() {
        return Err(TextFormatError::MissingEndpoint { marker: START });
    }
    if query::end(maze).is_none() {
        return Err(TextFormatError::MissingEndpoint { marker: END });
    }

    let grid = query::grid(maze);
    let width = grid.width() as usize;
    let mut out = String::with_capacity((width + 1) * grid.height() as usize);
    for row in grid.cells().chunks(width) {
        out.extend(row.iter().map(|state| symbol(*state)));
        out.push('\n');
    }
    Ok(out)
}

pub(crate) fn decode(text: &str) -> Result<Maze, TextFormatError> {
    let mut rows: Vec<Line<'_>> = text
        .lines()
        .enumerate()
        .map(|(index, text)| Line {
            number: index + 1,
            text: text.trim_end_matches('\r'),
        })
        .collect();
    while rows.last().map_or(false, |row| row.text.trim().is_empty()) {
        let _ = rows.pop();
    }

    let Some(first) = rows.first() else {
        return Err(TextFormatError::Empty);
    };
    let width = first.text.chars().count();
    let dimensions = Dimensions::new(
        u32::try_from(width).unwrap_or(u32::MAX),
        u32::try_from(rows.len()).unwrap_or(u32::MAX),
    )?;

    let mut maze = Maze::new(dimensions, WallModel::CellType);
    let mut start = None;
    let mut end = None;

    for (row, line) in rows.iter().enumerate() {
        for (column, character) in line.chars_exactly(width)? {
            let cell = CellCoord::new(column as u32, row as u32);
            match character {
                WALL => maze.set_wall(WallSlot::Cell(cell), true)?,
                EMPTY => {}
                START => record(&mut start, START, cell)?,
                END => record(&mut end, END, cell)?,
                other => return Err(line.unexpected(column, other)),
            }
        }
    }

    let start = start.ok_or(TextFormatError::MissingMarker { marker: START })?;
    let end = end.ok_or(TextFormatError::MissingMarker { marker: END })?;
    maze.set_start(start)?;
    maze.set_end(end)?;
    Ok(maze)
}

fn symbol(state: CellState) -> char {
    match state {
        CellState::Wall => WALL,
        CellState::Start => START,
        CellState::End => END,
        CellState::Empty | CellState::Path => EMPTY,
    }
}

fn record(
    slot: &mut Option<CellCoord>,
    marker: char,
    cell: CellCoord,
) -> Result<(), TextFormatError> {
    if let Some(first) = *slot {
        return Err(TextFormatError::DuplicateMarker {
            marker,
            first,
            second: cell,
        });
    }
    *slot = Some(cell);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Encoding;
    use maze_wave_core::{EndpointRejection, MazeError, WaveState};

    const SAMPLE: &str = "S.#.\n.##.\n...E\n";

    #[test]
    fn decodes_walls_and_markers() {
        let maze = Encoding::CellGrid.decode(SAMPLE).expect("maze decodes");
        assert_eq!(query::dimensions(&maze).width(), 4);
        assert_eq!(query::dimensions(&maze).height(), 3);
        assert_eq!(query::start(&maze), Some(CellCoord::new(0, 0)));
        assert_eq!(query::end(&maze), Some(CellCoord::new(3, 2)));
        assert_eq!(
            query::cell_at(&maze, CellCoord::new(2, 1)),
            Ok(CellState::Wall)
        );
        assert_eq!(query::wave_state(&maze), WaveState::Fresh);
    }

    #[test]
    fn encode_reproduces_the_source_text() {
        let maze = Encoding::CellGrid.decode(SAMPLE).expect("maze decodes");
        assert_eq!(Encoding::CellGrid.encode(&maze).as_deref(), Ok(SAMPLE));
    }

    #[test]
    fn windows_line_endings_and_trailing_blank_lines_are_accepted() {
        let maze = Encoding::CellGrid
            .decode("S#\r\n.E\r\n\r\n")
            .expect("maze decodes");
        assert_eq!(query::end(&maze), Some(CellCoord::new(1, 1)));
    }

    #[test]
    fn duplicate_markers_are_rejected() {
        assert_eq!(
            Encoding::CellGrid.decode("S.S\n..E\n").err(),
            Some(TextFormatError::DuplicateMarker {
                marker: 'S',
                first: CellCoord::new(0, 0),
                second: CellCoord::new(2, 0),
            })
        );
    }

    #[test]
    fn missing_markers_are_rejected() {
        assert_eq!(
            Encoding::CellGrid.decode("S..\n...\n").err(),
            Some(TextFormatError::MissingMarker { marker: 'E' })
        );
    }

    #[test]
    fn ragged_rows_and_foreign_characters_are_rejected() {
        assert_eq!(
            Encoding::CellGrid.decode("S..\n.E\n").err(),
            Some(TextFormatError::LineLength {
                line: 2,
                expected: 3,
                found: 2,
            })
        );
        assert_eq!(
            Encoding::CellGrid.decode("S.x\n..E\n").err(),
            Some(TextFormatError::UnexpectedCharacter {
                line: 1,
                column: 3,
                character: 'x',
            })
        );
        assert_eq!(
            Encoding::CellGrid.decode("\n\n").err(),
            Some(TextFormatError::Empty)
        );
    }

    #[test]
    fn single_cell_cannot_hold_both_markers() {
        assert!(matches!(
            Encoding::CellGrid.decode("S\n").err(),
            Some(TextFormatError::MissingMarker { marker: 'E' })
        ));
        let mut maze = Encoding::CellGrid.decode("SE\n").expect("maze decodes");
        assert_eq!(
            maze.set_end(CellCoord::new(0, 0)),
            Err(MazeError::InvalidEnd {
                reason: EndpointRejection::CoincidesWithOther
            })
        );
    }

    #[test]
    fn saving_requires_both_endpoints() {
        let maze = Maze::new(Dimensions::new(2, 2).expect("valid"), WallModel::CellType);
        assert_eq!(
            Encoding::CellGrid.encode(&maze),
            Err(TextFormatError::MissingEndpoint { marker: 'S' })
        );
    }
}
