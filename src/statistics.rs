use crate::grid::{Grid, Position};
use rustc_hash::FxHashSet;
use std::fmt;

/// Structural audit of a carved maze. A perfect maze is a spanning tree
/// over the rooms: every room open and reachable, and exactly one fewer
/// carved passage than rooms.
#[derive(Debug, Clone)]
pub struct MazeStatistics {
    pub total_rooms: usize,
    pub open_rooms: usize,
    pub carved_passages: usize,
    pub reachable_rooms: usize,
}

impl MazeStatistics {
    /// Surveys the grid: counts open rooms and carved passages, then flood
    /// fills the half-lattice from the origin room to count reachable rooms.
    pub fn survey(grid: &Grid) -> Self {
        let mut open_rooms = 0;
        let mut carved_passages = 0;
        for y in 0..grid.height {
            for x in 0..grid.width {
                if grid[Position { x, y }].is_wall {
                    continue;
                }
                match (x % 2, y % 2) {
                    // Even-even cells are rooms; cells with exactly one odd
                    // coordinate are the walls carved into passages.
                    (0, 0) => open_rooms += 1,
                    (1, 1) => {}
                    _ => carved_passages += 1,
                }
            }
        }

        let mut seen: FxHashSet<Position> = FxHashSet::default();
        let origin = Position { x: 0, y: 0 };
        let mut frontier = Vec::new();
        if grid.room(origin).is_some_and(|cell| !cell.is_wall) {
            seen.insert(origin);
            frontier.push(origin);
        }
        while let Some(half) = frontier.pop() {
            let room = Grid::room_position(half);
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
                if seen.contains(&neighbor) {
                    continue;
                }
                let open_room = grid
                    .room(neighbor)
                    .is_some_and(|cell| !cell.is_wall);
                // Two rooms connect only when the wall cell between them
                // was carved.
                let passage = Position {
                    x: (room.x as i32 + dx) as usize,
                    y: (room.y as i32 + dy) as usize,
                };
                if open_room && !grid[passage].is_wall {
                    seen.insert(neighbor);
                    frontier.push(neighbor);
                }
            }
        }

        MazeStatistics {
            total_rooms: grid.total_rooms(),
            open_rooms,
            carved_passages,
            reachable_rooms: seen.len(),
        }
    }

    /// True when the carved maze is a perfect maze: fully connected and
    /// acyclic over every room of the half-lattice.
    pub fn is_spanning_tree(&self) -> bool {
        self.open_rooms == self.total_rooms
            && self.reachable_rooms == self.total_rooms
            && self.carved_passages == self.total_rooms - 1
    }
}

impl fmt::Display for MazeStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rooms: {} of {} open", self.open_rooms, self.total_rooms)?;
        writeln!(f, "Carved passages: {}", self.carved_passages)?;
        writeln!(
            f,
            "Reachable from origin: {} of {}",
            self.reachable_rooms, self.total_rooms
        )?;
        writeln!(
            f,
            "Perfect maze: {}",
            if self.is_spanning_tree() { "yes" } else { "no" }
        )?;
        Ok(())
    }
}
