#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Plain-text persistence for mazes.
//!
//! Two encodings exist, one per wall model:
//!
//! * the cell grid: one line per row, `#` wall, `.` empty, `S` start, `E` end;
//! * the edge flags: width, height, `height - 1` lines of horizontal flags,
//!   `height` lines of vertical flags, then the `x y` of the start and end.
//!
//! Decoding always yields a maze with no computed wave.

mod cell_grid;
mod edge_flags;

use std::{fmt, iter::Enumerate, str::Lines};

use maze_wave_core::{CellCoord, MazeError, WallModel};
use maze_wave_world::{query, Maze};
use thiserror::Error;

/// Text layout used to persist a maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Character-per-cell layout for cell-type mazes.
    CellGrid,
    /// Flag matrices for edge-flag mazes.
    EdgeFlags,
}

impl Encoding {
    /// Encoding that matches the wall model of a maze.
    #[must_use]
    pub const fn for_model(model: WallModel) -> Self {
        match model {
            WallModel::CellType => Self::CellGrid,
            WallModel::EdgeFlag => Self::EdgeFlags,
        }
    }

    /// Wall model the encoding describes.
    #[must_use]
    pub const fn model(self) -> WallModel {
        match self {
            Self::CellGrid => WallModel::CellType,
            Self::EdgeFlags => WallModel::EdgeFlag,
        }
    }

    /// Serialises the structural state of `maze`.
    ///
    /// Transient path markings and the distance field are never written.
    pub fn encode(self, maze: &Maze) -> Result<String, TextFormatError> {
        let model = query::wall_model(maze);
        if model != self.model() {
            return Err(TextFormatError::ModelMismatch {
                encoding: self,
                model,
            });
        }

        match self {
            Self::CellGrid => cell_grid::encode(maze),
            Self::EdgeFlags => edge_flags::encode(maze),
        }
    }

    /// Parses a maze previously written with this encoding.
    pub fn decode(self, text: &str) -> Result<Maze, TextFormatError> {
        match self {
            Self::CellGrid => cell_grid::decode(text),
            Self::EdgeFlags => edge_flags::decode(text),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellGrid => write!(f, "cell grid"),
            Self::EdgeFlags => write!(f, "edge flags"),
        }
    }
}

/// Serialises `maze` with the encoding matching its wall model.
pub fn encode(maze: &Maze) -> Result<String, TextFormatError> {
    Encoding::for_model(query::wall_model(maze)).encode(maze)
}

/// Errors that can occur while reading or writing maze text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TextFormatError {
    /// The maze uses a wall model the encoding cannot express.
    #[error("the {encoding} encoding cannot store a {model} maze")]
    ModelMismatch {
        /// Requested encoding.
        encoding: Encoding,
        /// Wall model of the maze.
        model: WallModel,
    },
    /// The maze lacks an endpoint, so the text could not be read back.
    #[error("cannot save a maze without its '{marker}' marker")]
    MissingEndpoint {
        /// Marker character of the missing endpoint.
        marker: char,
    },
    /// The input contained no maze rows.
    #[error("maze text is empty")]
    Empty,
    /// The input ended before a required line.
    #[error("maze text ended before the {expected}")]
    Truncated {
        /// Description of the missing line.
        expected: &'static str,
    },
    /// A numeric field could not be parsed.
    #[error("line {line}: could not parse '{value}' as {expected}")]
    InvalidNumber {
        /// One-based line number.
        line: usize,
        /// Offending text.
        value: String,
        /// Description of the expected field.
        expected: &'static str,
    },
    /// A row had the wrong number of characters.
    #[error("line {line}: expected {expected} characters, found {found}")]
    LineLength {
        /// One-based line number.
        line: usize,
        /// Required character count.
        expected: usize,
        /// Character count present.
        found: usize,
    },
    /// A row contained a character outside the encoding's alphabet.
    #[error("line {line}, column {column}: unexpected character '{character}'")]
    UnexpectedCharacter {
        /// One-based line number.
        line: usize,
        /// One-based column number.
        column: usize,
        /// Offending character.
        character: char,
    },
    /// A marker appeared more than once.
    #[error("marker '{marker}' appears at both {first} and {second}")]
    DuplicateMarker {
        /// Marker character.
        marker: char,
        /// First occurrence.
        first: CellCoord,
        /// Second occurrence.
        second: CellCoord,
    },
    /// A required marker never appeared.
    #[error("marker '{marker}' is missing")]
    MissingMarker {
        /// Marker character.
        marker: char,
    },
    /// Non-blank content followed the last expected line.
    #[error("line {line}: unexpected trailing content")]
    TrailingContent {
        /// One-based line number.
        line: usize,
    },
    /// The decoded layout violates a maze invariant.
    #[error(transparent)]
    Maze(#[from] MazeError),
}

/// Sequential line cursor that tracks one-based line numbers.
struct LineReader<'a> {
    lines: Enumerate<Lines<'a>>,
}

struct Line<'a> {
    number: usize,
    text: &'a str,
}

impl<'a> LineReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
        }
    }

    fn next(&mut self, expected: &'static str) -> Result<Line<'a>, TextFormatError> {
        self.lines
            .next()
            .map(|(index, text)| Line {
                number: index + 1,
                text: text.trim_end_matches('\r'),
            })
            .ok_or(TextFormatError::Truncated { expected })
    }

    fn finish(self) -> Result<(), TextFormatError> {
        for (index, text) in self.lines {
            if !text.trim().is_empty() {
                return Err(TextFormatError::TrailingContent { line: index + 1 });
            }
        }
        Ok(())
    }
}

impl Line<'_> {
    fn chars_exactly(
        &self,
        expected: usize,
    ) -> Result<impl Iterator<Item = (usize, char)> + '_, TextFormatError> {
        let found = self.text.chars().count();
        if found != expected {
            return Err(TextFormatError::LineLength {
                line: self.number,
                expected,
                found,
            });
        }
        Ok(self.text.chars().enumerate())
    }

    fn unexpected(&self, column: usize, character: char) -> TextFormatError {
        TextFormatError::UnexpectedCharacter {
            line: self.number,
            column: column + 1,
            character,
        }
    }
}
