use maze_wave_core::{
    CellCoord, CellState, Dimensions, EndpointRejection, MazeError, WallModel, WaveState,
};
use maze_wave_system_generation::{GenerationConfig, GenerationError, Generator};
use maze_wave_world::{query, Maze};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn generator(seed: u64, wall_probability: f64) -> Generator<ChaCha8Rng> {
    Generator::new(
        ChaCha8Rng::seed_from_u64(seed),
        GenerationConfig { wall_probability },
    )
}

fn dimensions(width: u32, height: u32) -> Dimensions {
    Dimensions::new(width, height).expect("valid dimensions")
}

#[test]
fn connected_layouts_always_join_start_and_end() {
    for seed in 0..48_u64 {
        let width = 1 + (seed % 9) as u32;
        let height = 2 + (seed % 7) as u32;
        let mut generator = generator(seed, 0.3);
        let mut maze = Maze::new(dimensions(2, 2), WallModel::CellType);

        generator
            .generate_connected(&mut maze, dimensions(width, height))
            .expect("layout generated");

        assert_eq!(query::wall_model(&maze), WallModel::EdgeFlag);
        assert_eq!(query::start(&maze), Some(CellCoord::new(0, 0)));
        assert_eq!(
            query::end(&maze),
            Some(CellCoord::new(width - 1, height - 1))
        );

        let field = maze.compute_wave().expect("wave computes");
        assert!(
            field.cells().iter().all(|distance| *distance != u32::MAX),
            "seed {seed}: every cell must be reachable"
        );
        assert!(maze.reconstruct_path().is_ok(), "seed {seed}");
    }
}

#[test]
fn connected_layouts_open_exactly_a_spanning_tree() {
    let mut generator = generator(11, 0.3);
    let grid = generator
        .connected_grid(dimensions(8, 6))
        .expect("layout generated");

    let open = grid
        .horizontal_walls()
        .iter()
        .chain(grid.vertical_walls())
        .filter(|walled| !**walled)
        .count();
    assert_eq!(open, 8 * 6 - 1);
}

#[test]
fn same_seed_produces_same_layout() {
    let first = generator(5, 0.4)
        .random_grid(dimensions(10, 7), WallModel::CellType)
        .expect("layout generated");
    let second = generator(5, 0.4)
        .random_grid(dimensions(10, 7), WallModel::CellType)
        .expect("layout generated");
    assert_eq!(first, second);

    let tree_a = generator(9, 0.3)
        .connected_grid(dimensions(6, 6))
        .expect("layout generated");
    let tree_b = generator(9, 0.3)
        .connected_grid(dimensions(6, 6))
        .expect("layout generated");
    assert_eq!(tree_a, tree_b);
}

#[test]
fn zero_probability_leaves_the_maze_open() {
    let grid = generator(1, 0.0)
        .random_grid(dimensions(5, 4), WallModel::EdgeFlag)
        .expect("layout generated");
    assert!(grid.horizontal_walls().iter().all(|walled| !walled));
    assert!(grid.vertical_walls().iter().all(|walled| !walled));
}

#[test]
fn full_probability_walls_everything_but_the_endpoints() {
    let grid = generator(1, 1.0)
        .random_grid(dimensions(4, 3), WallModel::CellType)
        .expect("layout generated");

    let walls = grid
        .cells()
        .iter()
        .filter(|state| **state == CellState::Wall)
        .count();
    assert_eq!(walls, 4 * 3 - 2);
    assert_eq!(grid.cell_at(CellCoord::new(0, 0)), Ok(CellState::Start));
    assert_eq!(grid.cell_at(CellCoord::new(3, 2)), Ok(CellState::End));

    let mut maze = Maze::from_grid(grid);
    let _ = maze.compute_wave().expect("wave computes");
    assert_eq!(maze.reconstruct_path(), Err(MazeError::NoPathExists));
}

#[test]
fn generation_resets_the_wave() {
    let mut maze = Maze::new(dimensions(3, 3), WallModel::EdgeFlag);
    maze.set_start(CellCoord::new(0, 0)).expect("start placed");
    maze.set_end(CellCoord::new(2, 2)).expect("end placed");
    let _ = maze.compute_wave().expect("wave computes");

    generator(3, 0.2)
        .generate_random(&mut maze, dimensions(6, 4), WallModel::EdgeFlag)
        .expect("layout generated");

    assert_eq!(query::wave_state(&maze), WaveState::Fresh);
    assert!(query::distance_field(&maze).is_none());
    assert_eq!(query::dimensions(&maze), dimensions(6, 4));
    assert_eq!(maze.reconstruct_path(), Err(MazeError::WaveNotComputed));
}

#[test]
fn single_cell_mazes_cannot_hold_both_endpoints() {
    assert_eq!(
        generator(0, 0.3).connected_grid(dimensions(1, 1)),
        Err(GenerationError::Maze(MazeError::InvalidEnd {
            reason: EndpointRejection::CoincidesWithOther
        }))
    );
}

#[test]
fn invalid_probability_is_reported_before_generation() {
    let mut maze = Maze::new(dimensions(2, 2), WallModel::CellType);
    let before = query::grid(&maze).clone();
    assert_eq!(
        generator(0, 1.2).generate_random(&mut maze, dimensions(4, 4), WallModel::CellType),
        Err(GenerationError::InvalidWallProbability(1.2))
    );
    assert_eq!(query::grid(&maze), &before);
}
