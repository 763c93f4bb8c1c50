//! Flag-matrix encoding for edge-flag mazes.

use maze_wave_core::{CellCoord, Dimensions, WallModel, WallSlot};
use maze_wave_world::{query, Maze};

use crate::{Line, LineReader, TextFormatError};

const OPEN: char = '0';
const WALLED: char = '1';

pub(crate) fn encode(maze: &Maze) -> Result<String, TextFormatError> {
    let start = query::start(maze).ok_or(TextFormatError::MissingEndpoint { marker: 'S' })?;
    let end = query::end(maze).ok_or(TextFormatError::MissingEndpoint { marker: 'E' })?;

    let grid = query::grid(maze);
    let width = grid.width() as usize;
    let height = grid.height() as usize;

    let mut out = format!("{width}\n{height}\n");
    write_rows(&mut out, grid.horizontal_walls(), height - 1, width);
    write_rows(&mut out, grid.vertical_walls(), height, width - 1);
    out.push_str(&format!("{} {}\n", start.column(), start.row()));
    out.push_str(&format!("{} {}\n", end.column(), end.row()));
    Ok(out)
}

pub(crate) fn decode(text: &str) -> Result<Maze, TextFormatError> {
    if text.trim().is_empty() {
        return Err(TextFormatError::Empty);
    }

    let mut reader = LineReader::new(text);
    let width = parse_number(&reader.next("width line")?, "a width")?;
    let height = parse_number(&reader.next("height line")?, "a height")?;
    let dimensions = Dimensions::new(width, height)?;
    let mut raised = Vec::new();

    for row in 0..height - 1 {
        let line = reader.next("horizontal wall rows")?;
        for (column, character) in line.chars_exactly(width as usize)? {
            if parse_flag(&line, column, character)? {
                raised.push(WallSlot::Horizontal(CellCoord::new(column as u32, row)));
            }
        }
    }

    for row in 0..height {
        let line = reader.next("vertical wall rows")?;
        for (column, character) in line.chars_exactly(width as usize - 1)? {
            if parse_flag(&line, column, character)? {
                raised.push(WallSlot::Vertical(CellCoord::new(column as u32, row)));
            }
        }
    }

    let start = parse_coord(&reader.next("start coordinates")?, "start coordinates")?;
    let end = parse_coord(&reader.next("end coordinates")?, "end coordinates")?;
    reader.finish()?;

    let mut maze = Maze::new(dimensions, WallModel::EdgeFlag);
    for slot in raised {
        maze.set_wall(slot, true)?;
    }
    maze.set_start(start)?;
    maze.set_end(end)?;
    Ok(maze)
}

fn write_rows(out: &mut String, flags: &[bool], rows: usize, width: usize) {
    for row in 0..rows {
        let slice = &flags[row * width..(row + 1) * width];
        out.extend(slice.iter().map(|walled| if *walled { WALLED } else { OPEN }));
        out.push('\n');
    }
}

fn parse_flag(
    line: &Line<'_>,
    column: usize,
    character: char,
) -> Result<bool, TextFormatError> {
    match character {
        OPEN => Ok(false),
        WALLED => Ok(true),
        other => Err(line.unexpected(column, other)),
    }
}

fn parse_number(line: &Line<'_>, expected: &'static str) -> Result<u32, TextFormatError> {
    let value = line.text.trim();
    value
        .parse::<u32>()
        .map_err(|_| TextFormatError::InvalidNumber {
            line: line.number,
            value: value.to_owned(),
            expected,
        })
}

fn parse_coord(line: &Line<'_>, expected: &'static str) -> Result<CellCoord, TextFormatError> {
    let invalid = || TextFormatError::InvalidNumber {
        line: line.number,
        value: line.text.trim().to_owned(),
        expected,
    };

    let mut parts = line.text.split_whitespace();
    let column = parts.next().and_then(|part| part.parse::<u32>().ok());
    let row = parts.next().and_then(|part| part.parse::<u32>().ok());
    match (column, row, parts.next()) {
        (Some(column), Some(row), None) => Ok(CellCoord::new(column, row)),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Encoding;
    use maze_wave_core::{EndpointRejection, MazeError};

    const SAMPLE: &str = "3\n2\n010\n10\n01\n0 0\n2 1\n";

    #[test]
    fn decodes_flags_and_endpoints() {
        let maze = Encoding::EdgeFlags.decode(SAMPLE).expect("maze decodes");
        assert_eq!(
            query::wall_at(&maze, WallSlot::Horizontal(CellCoord::new(1, 0))),
            Ok(true)
        );
        assert_eq!(
            query::wall_at(&maze, WallSlot::Horizontal(CellCoord::new(0, 0))),
            Ok(false)
        );
        assert_eq!(
            query::wall_at(&maze, WallSlot::Vertical(CellCoord::new(0, 0))),
            Ok(true)
        );
        assert_eq!(
            query::wall_at(&maze, WallSlot::Vertical(CellCoord::new(1, 1))),
            Ok(true)
        );
        assert_eq!(query::start(&maze), Some(CellCoord::new(0, 0)));
        assert_eq!(query::end(&maze), Some(CellCoord::new(2, 1)));
    }

    #[test]
    fn encode_reproduces_the_source_text() {
        let maze = Encoding::EdgeFlags.decode(SAMPLE).expect("maze decodes");
        assert_eq!(Encoding::EdgeFlags.encode(&maze).as_deref(), Ok(SAMPLE));
    }

    #[test]
    fn single_column_mazes_use_empty_vertical_rows() {
        let text = "1\n3\n1\n0\n\n\n\n0 0\n0 2\n";
        let maze = Encoding::EdgeFlags.decode(text).expect("maze decodes");
        assert_eq!(
            query::wall_at(&maze, WallSlot::Horizontal(CellCoord::new(0, 0))),
            Ok(true)
        );
        assert_eq!(Encoding::EdgeFlags.encode(&maze).as_deref(), Ok(text));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Encoding::EdgeFlags.decode("0\n3\n").err(),
            Some(TextFormatError::Maze(MazeError::InvalidDimensions {
                width: 0,
                height: 3
            }))
        );
    }

    #[test]
    fn oversized_headers_are_rejected_without_allocating() {
        assert_eq!(
            Encoding::EdgeFlags.decode("4294967295\n4294967295\n").err(),
            Some(TextFormatError::Maze(MazeError::InvalidDimensions {
                width: u32::MAX,
                height: u32::MAX
            }))
        );
    }

    #[test]
    fn short_files_are_truncated_before_the_maze_is_built() {
        assert_eq!(
            Encoding::EdgeFlags.decode("4000\n4000\n").err(),
            Some(TextFormatError::Truncated {
                expected: "horizontal wall rows"
            })
        );
        assert_eq!(
            Encoding::EdgeFlags.decode("3\n2\n010\n10\n01\n0 0\n").err(),
            Some(TextFormatError::Truncated {
                expected: "end coordinates"
            })
        );
    }

    #[test]
    fn malformed_lines_are_reported() {
        assert_eq!(
            Encoding::EdgeFlags.decode("three\n2\n").err(),
            Some(TextFormatError::InvalidNumber {
                line: 1,
                value: "three".to_owned(),
                expected: "a width",
            })
        );
        assert_eq!(
            Encoding::EdgeFlags.decode("2\n2\n02\n0\n0\n0 0\n1 1\n").err(),
            Some(TextFormatError::UnexpectedCharacter {
                line: 3,
                column: 2,
                character: '2',
            })
        );
        assert_eq!(
            Encoding::EdgeFlags.decode("2\n2\n00\n0\n").err(),
            Some(TextFormatError::Truncated {
                expected: "vertical wall rows"
            })
        );
        assert_eq!(
            Encoding::EdgeFlags.decode("2\n1\n0\n0 0\n1\n").err(),
            Some(TextFormatError::InvalidNumber {
                line: 5,
                value: "1".to_owned(),
                expected: "end coordinates",
            })
        );
        assert_eq!(
            Encoding::EdgeFlags.decode("2\n1\n0\n0 0\n1 0\nextra\n").err(),
            Some(TextFormatError::TrailingContent { line: 6 })
        );
    }

    #[test]
    fn coinciding_endpoints_are_rejected() {
        assert_eq!(
            Encoding::EdgeFlags.decode("2\n1\n0\n1 0\n1 0\n").err(),
            Some(TextFormatError::Maze(MazeError::InvalidEnd {
                reason: EndpointRejection::CoincidesWithOther
            }))
        );
    }

    #[test]
    fn out_of_bounds_endpoints_are_rejected() {
        assert_eq!(
            Encoding::EdgeFlags.decode("2\n1\n0\n0 0\n5 0\n").err(),
            Some(TextFormatError::Maze(MazeError::OutOfBounds {
                cell: CellCoord::new(5, 0)
            }))
        );
    }

    #[test]
    fn cell_grid_mazes_cannot_be_written_as_flags() {
        let maze = Encoding::CellGrid.decode("SE\n").expect("maze decodes");
        assert_eq!(
            Encoding::EdgeFlags.encode(&maze),
            Err(TextFormatError::ModelMismatch {
                encoding: Encoding::EdgeFlags,
                model: WallModel::CellType,
            })
        );
    }
}
