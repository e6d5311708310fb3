use crate::grid::{Grid, Position};
use rand::Rng;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The walk backtracked into the origin room with rooms still unwalked.
    /// Unreachable for a connected half-lattice; reported instead of being
    /// silently treated as completion.
    Deadlock { walked: usize, total: usize },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Deadlock { walked, total } => {
                write!(
                    f,
                    "generation deadlocked at the origin after walking {} of {} rooms",
                    walked, total
                )
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// Carves a perfect maze with a randomized depth-first walk over the
/// half-lattice of rooms. The DFS stack is implicit: each room records the
/// half-lattice position it was first entered from, and a dead-ended walk
/// jumps back through those records. A room is walked on first entry and
/// never re-entered, so one backtrack slot per room is enough.
#[derive(Default)]
pub struct MazeGenerator;

impl MazeGenerator {
    pub fn new() -> Self {
        MazeGenerator
    }

    /// Resets the grid to solid walls and carves a perfect maze covering
    /// every room of the half-lattice. Neighbor choice is uniform over the
    /// eligible set, so a seeded RNG reproduces the maze exactly.
    pub fn generate<R: Rng>(&self, grid: &mut Grid, rng: &mut R) -> Result<(), GenerationError> {
        grid.reset_generation_state();
        grid.reset_search_state();

        let total_rooms = grid.total_rooms();
        let mut current = Position { x: 0, y: 0 };
        let origin = Grid::room_position(current);
        grid[origin].is_wall = false;
        grid[origin].walked = true;
        let mut walked_count = 1;

        while walked_count < total_rooms {
            let eligible = self.eligible_neighbors(grid, current);

            if eligible.is_empty() {
                // Dead end: seal the room and walk back to wherever it was
                // first entered from.
                let room = Grid::room_position(current);
                grid[room].blocked = true;
                match grid[room].backtrack {
                    Some(previous) => current = previous,
                    None => {
                        // Origin exhausted with rooms still unwalked.
                        return Err(GenerationError::Deadlock {
                            walked: walked_count,
                            total: total_rooms,
                        });
                    }
                }
                continue;
            }

            let next = eligible[rng.gen_range(0..eligible.len())];
            let next_room = Grid::room_position(next);
            {
                let cell = &mut grid[next_room];
                cell.backtrack = Some(current);
                cell.walked = true;
                cell.is_wall = false;
            }

            // Open the wall cell strictly between the two rooms.
            let here = Grid::room_position(current);
            let passage = Position {
                x: (here.x + next_room.x) / 2,
                y: (here.y + next_room.y) / 2,
            };
            grid[passage].is_wall = false;

            current = next;
            walked_count += 1;
        }

        grid.generated = true;
        Ok(())
    }

    /// Half-lattice neighbors of `half` that are in bounds and neither
    /// walked nor blocked.
    fn eligible_neighbors(&self, grid: &Grid, half: Position) -> Vec<Position> {
        let mut eligible = Vec::new();
        let (x, y) = (half.x as i32, half.y as i32);

        for (dx, dy) in &[(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 {
                continue;
            }
            let neighbor = Position {
                x: nx as usize,
                y: ny as usize,
            };
            if let Some(room) = grid.room(neighbor) {
                if !room.walked && !room.blocked {
                    eligible.push(neighbor);
                }
            }
        }
        eligible
    }
}
