use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use maze_pathfinding::config::Config;
use maze_pathfinding::generator::MazeGenerator;
use maze_pathfinding::grid::{Grid, Position};
use maze_pathfinding::pathfinder::{self, PathFinder};
use maze_pathfinding::statistics::MazeStatistics;

fn main() {
    let config = Config::parse();

    let mut grid = match Grid::new(config.width, config.height) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Invalid grid size: {}", e);
            std::process::exit(1);
        }
    };

    let seed = config.seed.unwrap_or_else(rand::random);
    println!(
        "Generating {}x{} maze (seed: {} for reproducibility)",
        grid.width, grid.height, seed
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let generator = MazeGenerator::new();
    if let Err(e) = generator.generate(&mut grid, &mut rng) {
        eprintln!("Maze generation failed: {}", e);
        std::process::exit(1);
    }

    let stats = MazeStatistics::survey(&grid);
    println!("\n=== MAZE STRUCTURE ===");
    print!("{}", stats);

    let start = Position {
        x: config.start_x.unwrap_or(0),
        y: config.start_y.unwrap_or(0),
    };
    let goal = Position {
        x: config.goal_x.unwrap_or(grid.width - 1),
        y: config.goal_y.unwrap_or(grid.height - 1),
    };
    println!(
        "\nSearching from ({}, {}) to ({}, {})",
        start.x, start.y, goal.x, goal.y
    );

    let mut finder = PathFinder::new();
    match finder.find_path(&mut grid, start, goal) {
        Ok(path) if path.is_empty() => {
            println!("No path exists between the selected cells");
        }
        Ok(path) => {
            println!("\n=== PATH RESULT ===");
            println!("Path length: {} steps", path.len());

            // Cross-check against an independent A* over the same grid.
            match pathfinder::reference_path(&grid, start, goal) {
                // The reference path includes the start cell.
                Some(reference) if reference.len() - 1 == path.len() => {
                    println!("Reference A* agrees: {} steps", reference.len() - 1);
                }
                Some(reference) => {
                    println!(
                        "Warning: reference A* found {} steps, search returned {}",
                        reference.len() - 1,
                        path.len()
                    );
                }
                None => {
                    println!("Warning: reference A* found no path");
                }
            }

            if !config.no_visualization {
                println!();
                grid.print_grid(Some(start), Some(goal), &path);
            }
        }
        Err(e) => {
            eprintln!("Pathfinding failed: {}", e);
            std::process::exit(1);
        }
    }
}
