//! Interactive editing session driven by menu commands.

use std::{fs, io::BufRead};

use anyhow::{Context, Result as AnyResult};
use log::{info, warn};
use maze_wave_core::{Dimensions, MazeError};
use maze_wave_rendering::{render_distances, render_grid, Glyphs, Presenter};
use maze_wave_system_generation::Generator;
use maze_wave_text_format::{encode, Encoding};
use maze_wave_world::{query, Maze};
use rand::Rng;

use crate::menu::{MenuCommand, HELP};

/// Outcome of one executed menu command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Reply {
    Frame(String),
    Quit,
}

/// Owns the maze being edited and the collaborators the menu drives.
pub(crate) struct Session<R, P> {
    maze: Maze,
    generator: Generator<R>,
    presenter: P,
    glyphs: Glyphs,
}

impl<R: Rng, P: Presenter> Session<R, P> {
    pub(crate) fn new(maze: Maze, generator: Generator<R>, presenter: P) -> Self {
        Self {
            maze,
            generator,
            presenter,
            glyphs: Glyphs::default(),
        }
    }

    /// Reads commands from `input` until `quit` or end of input.
    ///
    /// Rejected commands are reported and the loop carries on; only
    /// presentation and input failures end the session early.
    pub(crate) fn run<B: BufRead>(&mut self, input: B) -> AnyResult<()> {
        let banner = format!("{}{HELP}", self.show_frame());
        self.presenter.present(&banner)?;

        for line in input.lines() {
            let line = line.context("failed to read menu input")?;
            if line.trim().is_empty() {
                continue;
            }

            let reply = MenuCommand::parse(&line)
                .map_err(anyhow::Error::from)
                .and_then(|command| self.execute(command));
            match reply {
                Ok(Reply::Quit) => break,
                Ok(Reply::Frame(frame)) => self.presenter.present(&frame)?,
                Err(error) => {
                    warn!("command '{}' failed: {error:#}", line.trim());
                    self.presenter.present(&format!("error: {error:#}\n"))?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn execute(&mut self, command: MenuCommand) -> AnyResult<Reply> {
        let reply = match command {
            MenuCommand::Load(path) => {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let encoding = Encoding::for_model(query::wall_model(&self.maze));
                let loaded = encoding
                    .decode(&text)
                    .with_context(|| format!("failed to parse {} as {encoding}", path.display()))?;
                self.maze.replace_grid(query::grid(&loaded).clone());
                info!("loaded maze from {}", path.display());
                self.show()
            }
            MenuCommand::Save(path) => {
                let text = encode(&self.maze)?;
                fs::write(&path, text)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("saved maze to {}", path.display());
                Reply::Frame(format!("saved to {}\n", path.display()))
            }
            MenuCommand::Generate { width, height } => {
                let dimensions = Dimensions::new(width, height)?;
                let model = query::wall_model(&self.maze);
                self.generator
                    .generate_random(&mut self.maze, dimensions, model)?;
                self.show()
            }
            MenuCommand::Connected { width, height } => {
                let dimensions = Dimensions::new(width, height)?;
                self.generator
                    .generate_connected(&mut self.maze, dimensions)?;
                self.show()
            }
            MenuCommand::Start(cell) => {
                self.maze.set_start(cell)?;
                self.show()
            }
            MenuCommand::End(cell) => {
                self.maze.set_end(cell)?;
                self.show()
            }
            MenuCommand::Wall { slot, present } => {
                self.maze.set_wall(slot, present)?;
                self.show()
            }
            MenuCommand::Wave => Reply::Frame(render_distances(self.maze.compute_wave()?)),
            MenuCommand::Path => {
                let glyphs = self.glyphs;
                let frame = self
                    .maze
                    .with_path_marked(|grid| render_grid(grid, &glyphs))?;
                let steps = query::last_path(&self.maze).map_or(0, |path| path.len() - 1);
                Reply::Frame(format!("{frame}path length: {steps}\n"))
            }
            MenuCommand::Show => self.show(),
            MenuCommand::Distances => {
                let field =
                    query::distance_field(&self.maze).ok_or(MazeError::WaveNotComputed)?;
                Reply::Frame(render_distances(field))
            }
            MenuCommand::Help => Reply::Frame(HELP.to_owned()),
            MenuCommand::Quit => Reply::Quit,
        };
        Ok(reply)
    }

    fn show(&self) -> Reply {
        Reply::Frame(self.show_frame())
    }

    fn show_frame(&self) -> String {
        render_grid(query::grid(&self.maze), &self.glyphs)
    }

    #[cfg(test)]
    pub(crate) fn maze(&self) -> &Maze {
        &self.maze
    }

    #[cfg(test)]
    pub(crate) fn into_presenter(self) -> P {
        self.presenter
    }
}
