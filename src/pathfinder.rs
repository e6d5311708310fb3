use crate::grid::{Grid, Position};
use pathfinding::prelude::astar;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    OutOfBounds(Position),
    WallEndpoint(Position),
    MazeNotGenerated,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::OutOfBounds(pos) => {
                write!(f, "endpoint ({}, {}) is outside the grid", pos.x, pos.y)
            }
            PathError::WallEndpoint(pos) => {
                write!(f, "endpoint ({}, {}) is a wall cell", pos.x, pos.y)
            }
            PathError::MazeNotGenerated => {
                write!(f, "pathfinding requested before a maze was generated")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// A* over the carved grid with Manhattan costs. Both g and h are computed
/// from absolute positions rather than accumulated along the path, and
/// already-open cells are never re-evaluated; first discovery wins. On a
/// perfect maze exactly one route exists between any two open cells, so
/// this still returns the shortest path. It would not on a grid with
/// cycles or weighted edges.
pub struct PathFinder {
    open_nodes: Vec<Position>,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathFinder {
    pub fn new() -> Self {
        PathFinder {
            open_nodes: Vec::new(),
        }
    }

    /// Finds the shortest 4-connected route through open cells.
    ///
    /// The returned path runs from the cell after `start` through `goal`
    /// inclusive. `start == goal` yields a single-element path containing
    /// `goal`. An empty path means the open set was exhausted without
    /// reaching `goal`, which cannot happen on a fully generated maze but
    /// is the defined outcome for an unreachable goal.
    ///
    /// # Errors
    ///
    /// Returns `PathError` when no maze has been generated or when either
    /// endpoint is out of bounds or a wall.
    pub fn find_path(
        &mut self,
        grid: &mut Grid,
        start: Position,
        goal: Position,
    ) -> Result<Vec<Position>, PathError> {
        if !grid.generated {
            return Err(PathError::MazeNotGenerated);
        }
        for &endpoint in &[start, goal] {
            match grid.get(endpoint.x as i32, endpoint.y as i32) {
                None => return Err(PathError::OutOfBounds(endpoint)),
                Some(cell) if cell.is_wall => return Err(PathError::WallEndpoint(endpoint)),
                Some(_) => {}
            }
        }

        grid.reset_search_state();
        self.open_nodes.clear();

        if start == goal {
            return Ok(vec![goal]);
        }

        grid[start].h_cost = start.manhattan_distance(&goal);
        self.open_nodes.push(start);

        while !self.open_nodes.is_empty() {
            // Lowest f, then lowest h, then earliest inserted.
            let mut best_index = 0;
            for index in 1..self.open_nodes.len() {
                let candidate = &grid[self.open_nodes[index]];
                let best = &grid[self.open_nodes[best_index]];
                if candidate.f_cost() < best.f_cost()
                    || (candidate.f_cost() == best.f_cost() && candidate.h_cost < best.h_cost)
                {
                    best_index = index;
                }
            }
            let current = self.open_nodes.remove(best_index);
            grid[current].visited = true;

            if current == goal {
                return Ok(reconstruct_path(grid, start, goal));
            }

            for neighbor in grid.get_neighbors(&current) {
                let cell = &mut grid[neighbor];
                // came_from doubles as the open-set membership marker: it
                // is assigned exactly once, at first discovery.
                if cell.visited || cell.came_from.is_some() {
                    continue;
                }
                cell.came_from = Some(current);
                cell.g_cost = start.manhattan_distance(&neighbor);
                cell.h_cost = neighbor.manhattan_distance(&goal);
                self.open_nodes.push(neighbor);
            }
        }

        // Open set exhausted without reaching the goal.
        Ok(Vec::new())
    }
}

fn reconstruct_path(grid: &Grid, start: Position, goal: Position) -> Vec<Position> {
    let mut path = Vec::new();
    let mut current = goal;
    while current != start {
        path.push(current);
        match grid[current].came_from {
            Some(previous) => current = previous,
            None => break,
        }
    }
    path.reverse();
    path
}

/// Independent shortest path over the same grid via the `pathfinding`
/// crate, used to cross-check the hand-rolled search. Includes `start` as
/// its first element.
pub fn reference_path(grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>> {
    let result = astar(
        &start,
        |pos| {
            grid.get_neighbors(pos)
                .into_iter()
                .map(|neighbor| (neighbor, 1u32))
                .collect::<Vec<_>>()
        },
        |pos| pos.manhattan_distance(&goal) as u32,
        |pos| *pos == goal,
    );
    result.map(|(path, _)| path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::MazeGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generated(width: usize, height: usize, seed: u64) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        MazeGenerator::new().generate(&mut grid, &mut rng).unwrap();
        grid
    }

    #[test]
    fn path_length_matches_independent_search() {
        for seed in 0..10 {
            let mut grid = generated(11, 9, seed);
            let start = Position { x: 0, y: 0 };
            let goal = Position {
                x: grid.width - 1,
                y: grid.height - 1,
            };

            let path = PathFinder::new().find_path(&mut grid, start, goal).unwrap();
            assert!(!path.is_empty(), "seed {} produced no path", seed);

            // The reference path includes start, ours does not.
            let reference = reference_path(&grid, start, goal).unwrap();
            assert_eq!(path.len(), reference.len() - 1, "seed {}", seed);
        }
    }

    #[test]
    fn path_steps_are_adjacent_open_cells_ending_at_goal() {
        let mut grid = generated(9, 9, 3);
        let start = Position { x: 0, y: 0 };
        let goal = Position { x: 8, y: 8 };

        let path = PathFinder::new().find_path(&mut grid, start, goal).unwrap();
        assert_eq!(*path.last().unwrap(), goal);

        let mut previous = start;
        for &pos in &path {
            assert_eq!(previous.manhattan_distance(&pos), 1);
            assert!(!grid[pos].is_wall);
            previous = pos;
        }
    }

    #[test]
    fn start_equals_goal_returns_single_element_path() {
        let mut grid = generated(5, 5, 0);
        let start = Position { x: 2, y: 2 };
        // (2, 2) is a room cell, open in every generated maze.
        let path = PathFinder::new().find_path(&mut grid, start, start).unwrap();
        assert_eq!(path, vec![start]);
    }

    #[test]
    fn wall_endpoints_are_rejected() {
        let mut grid = generated(5, 5, 0);
        // Cells with both coordinates odd are never carved.
        let wall = Position { x: 1, y: 1 };
        let open = Position { x: 0, y: 0 };

        let mut finder = PathFinder::new();
        assert_eq!(
            finder.find_path(&mut grid, wall, open),
            Err(PathError::WallEndpoint(wall))
        );
        assert_eq!(
            finder.find_path(&mut grid, open, wall),
            Err(PathError::WallEndpoint(wall))
        );
    }

    #[test]
    fn out_of_bounds_endpoints_are_rejected() {
        let mut grid = generated(5, 5, 0);
        let outside = Position { x: 99, y: 0 };
        assert_eq!(
            PathFinder::new().find_path(&mut grid, outside, Position { x: 0, y: 0 }),
            Err(PathError::OutOfBounds(outside))
        );
    }

    #[test]
    fn searching_before_generation_is_rejected() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid[Position { x: 0, y: 0 }].is_wall = false;
        assert_eq!(
            PathFinder::new().find_path(
                &mut grid,
                Position { x: 0, y: 0 },
                Position { x: 0, y: 0 }
            ),
            Err(PathError::MazeNotGenerated)
        );
    }

    #[test]
    fn unreachable_goal_returns_empty_path() {
        // Two open cells with every wall between them intact.
        let mut grid = Grid::new(5, 5).unwrap();
        let start = Position { x: 0, y: 0 };
        let goal = Position { x: 4, y: 4 };
        grid[start].is_wall = false;
        grid[goal].is_wall = false;
        grid.generated = true;

        let path = PathFinder::new().find_path(&mut grid, start, goal).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn open_field_path_matches_manhattan_distance() {
        // With no interior walls the shortest route is the Manhattan
        // distance; the first-discovery search must still find it.
        let mut grid = Grid::new(5, 5).unwrap();
        for y in 0..grid.height {
            for x in 0..grid.width {
                grid[Position { x, y }].is_wall = false;
            }
        }
        grid.generated = true;

        let start = Position { x: 0, y: 0 };
        let goal = Position { x: 4, y: 4 };
        let path = PathFinder::new().find_path(&mut grid, start, goal).unwrap();
        assert_eq!(path.len() as i32, start.manhattan_distance(&goal));
    }
}
