use std::fmt;
use std::ops::{Index, IndexMut};

/// Minimum grid side length. Rooms sit at even coordinates, so anything
/// smaller than 5x5 has no wall cells left to carve between them.
pub const MIN_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn manhattan_distance(&self, other: &Position) -> i32 {
        (self.x as i32 - other.x as i32).abs() + (self.y as i32 - other.y as i32).abs()
    }
}

/// One grid cell. The generator owns the wall flag and the generation
/// transients; the search owns the search transients. Back-pointers are
/// stored as positions into the grid arena, never as references, so the
/// came_from chain cannot form an ownership cycle.
#[derive(Debug, Clone)]
pub struct Cell {
    pub position: Position,
    pub is_wall: bool,
    // Generation state
    pub walked: bool,
    pub blocked: bool,
    pub backtrack: Option<Position>,
    // Search state
    pub visited: bool,
    pub g_cost: i32,
    pub h_cost: i32,
    pub came_from: Option<Position>,
}

impl Cell {
    fn new(position: Position) -> Self {
        Cell {
            position,
            is_wall: true,
            walked: false,
            blocked: false,
            backtrack: None,
            visited: false,
            g_cost: 0,
            h_cost: 0,
            came_from: None,
        }
    }

    /// A* priority score. Derived on demand, never stored.
    pub fn f_cost(&self) -> i32 {
        self.g_cost + self.h_cost
    }

    fn reset_generation_state(&mut self) {
        self.is_wall = true;
        self.walked = false;
        self.blocked = false;
        self.backtrack = None;
    }

    fn reset_search_state(&mut self) {
        self.visited = false;
        self.g_cost = 0;
        self.h_cost = 0;
        self.came_from = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    InvalidDimensions { width: usize, height: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidDimensions { width, height } => {
                write!(
                    f,
                    "grid must be at least {}x{}, requested {}x{}",
                    MIN_SIZE, MIN_SIZE, width, height
                )
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Rectangular cell arena. Sole owner of every cell; dimensions are forced
/// odd so rooms at even coordinates stay separated by removable walls.
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub generated: bool,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of solid walls. Sizes below the 5x5 floor are
    /// rejected; even sizes round up to the next odd value.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width < MIN_SIZE || height < MIN_SIZE {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let width = if width % 2 == 0 { width + 1 } else { width };
        let height = if height % 2 == 0 { height + 1 } else { height };

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(Position { x, y }));
            }
        }

        Ok(Grid {
            width,
            height,
            generated: false,
            cells,
        })
    }

    fn offset(&self, pos: Position) -> usize {
        pos.y * self.width + pos.x
    }

    /// Bounds-checked lookup with signed coordinates, for neighbor probes
    /// that may step off the edge.
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        let pos = Position {
            x: x as usize,
            y: y as usize,
        };
        Some(&self.cells[self.offset(pos)])
    }

    /// Full-grid cell position of a half-lattice room.
    pub fn room_position(half: Position) -> Position {
        Position {
            x: half.x * 2,
            y: half.y * 2,
        }
    }

    /// Room cell for a half-lattice position, or `None` when the half
    /// position falls outside the lattice.
    pub fn room(&self, half: Position) -> Option<&Cell> {
        let pos = Self::room_position(half);
        self.get(pos.x as i32, pos.y as i32)
    }

    /// Number of rooms in the half-lattice: ceil(w/2) * ceil(h/2).
    pub fn total_rooms(&self) -> usize {
        self.width.div_ceil(2) * self.height.div_ceil(2)
    }

    /// In-bounds, non-wall 4-directional neighbors.
    pub fn get_neighbors(&self, pos: &Position) -> Vec<Position> {
        let mut neighbors = Vec::new();
        let (x, y) = (pos.x as i32, pos.y as i32);

        for (dx, dy) in &[(-1, 0), (1, 0), (0, -1), (0, 1)] {
            if let Some(cell) = self.get(x + dx, y + dy) {
                if !cell.is_wall {
                    neighbors.push(cell.position);
                }
            }
        }
        neighbors
    }

    /// Returns every cell to solid wall and clears the generation
    /// transients. Called at the top of every generation pass so a
    /// regenerated maze never inherits state from the previous layout.
    pub fn reset_generation_state(&mut self) {
        for cell in &mut self.cells {
            cell.reset_generation_state();
        }
        self.generated = false;
    }

    /// Clears the search transients on every cell. Called at the top of
    /// every pathfinding pass.
    pub fn reset_search_state(&mut self) {
        for cell in &mut self.cells {
            cell.reset_search_state();
        }
    }

    /// Print a visual representation of the grid with the found path overlaid
    pub fn print_grid(&self, start: Option<Position>, goal: Option<Position>, path: &[Position]) {
        println!("Legend: S=Start, G=Goal, *=Path, #=Wall, .=Open");

        // Print column numbers header
        print!("   ");
        for x in 0..self.width {
            print!("{:2}", x % 10);
        }
        println!();

        for y in 0..self.height {
            print!("{:2} ", y);

            for x in 0..self.width {
                let pos = Position { x, y };
                let char = if Some(pos) == start {
                    'S'
                } else if Some(pos) == goal {
                    'G'
                } else if path.contains(&pos) {
                    '*'
                } else if self[pos].is_wall {
                    '#'
                } else {
                    '.'
                };
                print!("{} ", char);
            }
            println!();
        }
        println!();
    }
}

impl Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Cell {
        &self.cells[self.offset(pos)]
    }
}

impl IndexMut<Position> for Grid {
    fn index_mut(&mut self, pos: Position) -> &mut Cell {
        let offset = self.offset(pos);
        &mut self.cells[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_grids_below_minimum() {
        assert_eq!(
            Grid::new(4, 4).err(),
            Some(GridError::InvalidDimensions {
                width: 4,
                height: 4
            })
        );
        assert!(Grid::new(5, 4).is_err());
        assert!(Grid::new(4, 9).is_err());
    }

    #[test]
    fn rounds_even_sizes_up_to_odd() {
        let grid = Grid::new(6, 8).unwrap();
        assert_eq!(grid.width, 7);
        assert_eq!(grid.height, 9);
    }

    #[test]
    fn counts_rooms_on_the_half_lattice() {
        let grid = Grid::new(5, 5).unwrap();
        assert_eq!(grid.total_rooms(), 9);
        let grid = Grid::new(7, 5).unwrap();
        assert_eq!(grid.total_rooms(), 12);
    }

    #[test]
    fn new_grid_is_all_walls_and_ungenerated() {
        let grid = Grid::new(5, 5).unwrap();
        assert!(!grid.generated);
        for y in 0..grid.height {
            for x in 0..grid.width {
                assert!(grid[Position { x, y }].is_wall);
            }
        }
    }

    #[test]
    fn get_rejects_out_of_bounds_probes() {
        let grid = Grid::new(5, 5).unwrap();
        assert!(grid.get(-1, 0).is_none());
        assert!(grid.get(0, -1).is_none());
        assert!(grid.get(5, 0).is_none());
        assert!(grid.get(2, 2).is_some());
    }

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let mut grid = Grid::new(5, 5).unwrap();
        let center = Position { x: 2, y: 2 };
        assert!(grid.get_neighbors(&center).is_empty());

        grid[Position { x: 1, y: 2 }].is_wall = false;
        grid[Position { x: 2, y: 1 }].is_wall = false;
        let mut neighbors = grid.get_neighbors(&center);
        neighbors.sort();
        assert_eq!(
            neighbors,
            vec![Position { x: 1, y: 2 }, Position { x: 2, y: 1 }]
        );

        // Corner cell only probes inward.
        grid[Position { x: 1, y: 0 }].is_wall = false;
        assert_eq!(
            grid.get_neighbors(&Position { x: 0, y: 0 }),
            vec![Position { x: 1, y: 0 }]
        );
    }
}
