//! Line-oriented commands accepted by the interactive session.

use std::path::PathBuf;

use maze_wave_core::{CellCoord, WallSlot};
use thiserror::Error;

pub(crate) const HELP: &str = "\
commands:
  load FILE        replace the maze with the one stored in FILE
  save FILE        write the maze to FILE
  generate W H     random layout of W x H cells
  connected W H    random layout where start and end are always joined
  start X Y        move the start
  end X Y          move the end
  hwall X Y 0|1    clear or raise the wall below cell (X, Y)
  vwall X Y 0|1    clear or raise the wall right of cell (X, Y)
  wall X Y 0|1     clear or raise the wall cell (X, Y)
  wave             compute distances from the start
  path             show the shortest path
  show             show the maze
  distances        show the last computed distances
  help             show this list
  quit             leave
";

/// Parsed menu input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum MenuCommand {
    Load(PathBuf),
    Save(PathBuf),
    Generate { width: u32, height: u32 },
    Connected { width: u32, height: u32 },
    Start(CellCoord),
    End(CellCoord),
    Wall { slot: WallSlot, present: bool },
    Wave,
    Path,
    Show,
    Distances,
    Help,
    Quit,
}

/// Reasons a menu line could not be understood.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub(crate) enum MenuParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', type 'help' for the list")]
    Unknown(String),
    #[error("'{command}' takes {expected} argument(s), got {found}")]
    Arity {
        command: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("'{command}': '{value}' is not a non-negative integer")]
    InvalidNumber { command: &'static str, value: String },
    #[error("'{command}': wall flag must be 0 or 1, got '{value}'")]
    InvalidFlag { command: &'static str, value: String },
}

impl MenuCommand {
    pub(crate) fn parse(line: &str) -> Result<Self, MenuParseError> {
        let mut words = line.split_whitespace();
        let keyword = words.next().ok_or(MenuParseError::Empty)?;
        let args: Vec<&str> = words.collect();

        let command = match keyword.to_ascii_lowercase().as_str() {
            "load" => Self::Load(file("load", &args)?),
            "save" => Self::Save(file("save", &args)?),
            "generate" => {
                let (width, height) = pair("generate", &args)?;
                Self::Generate { width, height }
            }
            "connected" => {
                let (width, height) = pair("connected", &args)?;
                Self::Connected { width, height }
            }
            "start" => {
                let (column, row) = pair("start", &args)?;
                Self::Start(CellCoord::new(column, row))
            }
            "end" => {
                let (column, row) = pair("end", &args)?;
                Self::End(CellCoord::new(column, row))
            }
            "hwall" => wall("hwall", &args, WallSlot::Horizontal)?,
            "vwall" => wall("vwall", &args, WallSlot::Vertical)?,
            "wall" => wall("wall", &args, WallSlot::Cell)?,
            "wave" => bare("wave", &args, Self::Wave)?,
            "path" => bare("path", &args, Self::Path)?,
            "show" => bare("show", &args, Self::Show)?,
            "distances" => bare("distances", &args, Self::Distances)?,
            "help" | "?" => bare("help", &args, Self::Help)?,
            "quit" | "exit" => bare("quit", &args, Self::Quit)?,
            _ => return Err(MenuParseError::Unknown(keyword.to_owned())),
        };
        Ok(command)
    }
}

fn arity(command: &'static str, args: &[&str], expected: usize) -> Result<(), MenuParseError> {
    if args.len() != expected {
        return Err(MenuParseError::Arity {
            command,
            expected,
            found: args.len(),
        });
    }
    Ok(())
}

fn bare(
    command: &'static str,
    args: &[&str],
    parsed: MenuCommand,
) -> Result<MenuCommand, MenuParseError> {
    arity(command, args, 0)?;
    Ok(parsed)
}

fn file(command: &'static str, args: &[&str]) -> Result<PathBuf, MenuParseError> {
    arity(command, args, 1)?;
    Ok(PathBuf::from(args[0]))
}

fn number(command: &'static str, value: &str) -> Result<u32, MenuParseError> {
    value.parse().map_err(|_| MenuParseError::InvalidNumber {
        command,
        value: value.to_owned(),
    })
}

fn pair(command: &'static str, args: &[&str]) -> Result<(u32, u32), MenuParseError> {
    arity(command, args, 2)?;
    Ok((number(command, args[0])?, number(command, args[1])?))
}

fn wall(
    command: &'static str,
    args: &[&str],
    slot: fn(CellCoord) -> WallSlot,
) -> Result<MenuCommand, MenuParseError> {
    arity(command, args, 3)?;
    let cell = CellCoord::new(number(command, args[0])?, number(command, args[1])?);
    let present = match args[2] {
        "0" => false,
        "1" => true,
        other => {
            return Err(MenuParseError::InvalidFlag {
                command,
                value: other.to_owned(),
            })
        }
    };
    Ok(MenuCommand::Wall {
        slot: slot(cell),
        present,
    })
}
