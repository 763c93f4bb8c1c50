#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for generating, solving and editing grid mazes.

mod menu;
mod metrics;
mod session;

use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result as AnyResult};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{info, warn};
use maze_wave_core::{CellCoord, Dimensions, WallModel};
use maze_wave_rendering::{render_grid, Glyphs, Presenter, WriterPresenter};
use maze_wave_system_generation::{GenerationConfig, Generator, DEFAULT_WALL_PROBABILITY};
use maze_wave_text_format::{encode, Encoding};
use maze_wave_world::{query, Maze};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{metrics::MetricsObserver, session::Session};

/// Grid maze editor and shortest-path demonstrator.
#[derive(Debug, Parser)]
#[command(name = "maze-wave", version)]
struct Cli {
    /// Seed for the layout generator; drawn from entropy when omitted.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a layout, print it and optionally save it.
    Generate(GenerateArgs),
    /// Load a layout, run the wave and print the shortest path.
    Solve(SolveArgs),
    /// Edit a maze through the line-oriented menu on standard input.
    Interactive(InteractiveArgs),
}

/// Wall representation selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModelArg {
    /// Walls are whole cells.
    Cell,
    /// Walls sit on the edges between cells.
    Edge,
}

impl From<ModelArg> for WallModel {
    fn from(model: ModelArg) -> Self {
        match model {
            ModelArg::Cell => WallModel::CellType,
            ModelArg::Edge => WallModel::EdgeFlag,
        }
    }
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Number of columns.
    #[arg(long, default_value_t = 10)]
    width: u32,
    /// Number of rows.
    #[arg(long, default_value_t = 10)]
    height: u32,
    /// Carve a spanning tree so start and end are always joined (edge walls only).
    #[arg(long)]
    connected: bool,
    /// Wall representation of the unconstrained layout.
    #[arg(long, value_enum, default_value_t = ModelArg::Edge)]
    model: ModelArg,
    /// Chance that each wall slot is raised by the unconstrained policy.
    #[arg(long, default_value_t = DEFAULT_WALL_PROBABILITY)]
    wall_probability: f64,
    /// File receiving the layout in its text encoding.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct SolveArgs {
    /// Layout file to solve.
    #[arg(long)]
    input: PathBuf,
    /// Wall representation the file is encoded with.
    #[arg(long, value_enum, default_value_t = ModelArg::Edge)]
    model: ModelArg,
}

#[derive(Debug, Args)]
struct InteractiveArgs {
    /// Number of columns of the initial maze.
    #[arg(long, default_value_t = 5)]
    width: u32,
    /// Number of rows of the initial maze.
    #[arg(long, default_value_t = 5)]
    height: u32,
    /// Wall representation of the initial maze.
    #[arg(long, value_enum, default_value_t = ModelArg::Edge)]
    model: ModelArg,
}

/// Entry point for the maze-wave command-line interface.
fn main() -> AnyResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    match cli.command {
        Command::Generate(args) => generate(args, rng),
        Command::Solve(args) => solve(args),
        Command::Interactive(args) => interactive(args, rng),
    }
}

fn generate(args: GenerateArgs, rng: ChaCha8Rng) -> AnyResult<()> {
    let dimensions = Dimensions::new(args.width, args.height)?;
    let model = WallModel::from(args.model);
    let mut generator = Generator::new(
        rng,
        GenerationConfig {
            wall_probability: args.wall_probability,
        },
    );

    let mut maze = observed(Maze::new(dimensions, model));
    if args.connected {
        if model == WallModel::CellType {
            warn!("connected layouts always use edge walls; ignoring --model cell");
        }
        generator.generate_connected(&mut maze, dimensions)?;
    } else {
        generator.generate_random(&mut maze, dimensions, model)?;
    }

    let mut presenter = WriterPresenter::new(io::stdout());
    presenter.present(&render_grid(query::grid(&maze), &Glyphs::default()))?;

    if let Some(path) = args.output {
        fs::write(&path, encode(&maze)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("saved maze to {}", path.display());
    }
    Ok(())
}

fn solve(args: SolveArgs) -> AnyResult<()> {
    let encoding = Encoding::for_model(args.model.into());
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let loaded = encoding
        .decode(&text)
        .with_context(|| format!("failed to parse {} as {encoding}", args.input.display()))?;

    let mut maze = observed(loaded);
    let _ = maze.compute_wave()?;
    let frame = maze
        .with_path_marked(|grid| render_grid(grid, &Glyphs::default()))
        .context("could not solve the maze")?;

    let route: Vec<String> = query::last_path(&maze)
        .unwrap_or_default()
        .iter()
        .map(CellCoord::to_string)
        .collect();

    let mut presenter = WriterPresenter::new(io::stdout());
    presenter.present(&format!(
        "{frame}path length: {}\n{}\n",
        route.len().saturating_sub(1),
        route.join(" -> ")
    ))
}

fn interactive(args: InteractiveArgs, rng: ChaCha8Rng) -> AnyResult<()> {
    let dimensions = Dimensions::new(args.width, args.height)?;
    let mut maze = observed(Maze::new(dimensions, args.model.into()));
    maze.set_start(CellCoord::new(0, 0))?;
    maze.set_end(dimensions.last_cell())
        .context("the initial maze needs room for distinct start and end cells")?;

    let generator = Generator::new(rng, GenerationConfig::default());
    let mut session = Session::new(maze, generator, WriterPresenter::new(io::stdout()));
    session.run(io::stdin().lock())
}

fn observed(mut maze: Maze) -> Maze {
    let _ = maze.set_observer(Box::new(MetricsObserver::default()));
    maze
}
