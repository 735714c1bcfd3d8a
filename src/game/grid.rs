use crate::error::RequestError;

/// Side length of the square battlefield.
pub const GRID_SIZE: usize = 8;
/// Length of the flattened state vector.
pub const STATE_SIZE: usize = GRID_SIZE * GRID_SIZE;
/// The defended base sits on the bottom row, centre column.
pub const BASE_POS: (usize, usize) = (GRID_SIZE - 1, GRID_SIZE / 2);

/// Contents of one grid cell. The discriminant is the value written into the
/// state vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty = 0,
    Tower = 1,
    Path = 2,
    Base = 3,
}

impl Cell {
    pub fn encoding(self) -> f32 {
        self as u8 as f32
    }
}

/// A tower coordinate as `(row, col)`.
pub type TowerPos = (usize, usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// Create an empty grid with only the base marked.
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; GRID_SIZE]; GRID_SIZE];
        cells[BASE_POS.0][BASE_POS.1] = Cell::Base;
        Grid { cells }
    }

    /// Build a grid from raw client coordinates, rejecting anything that is
    /// off the board or on top of the base.
    pub fn from_towers(towers: &[[i64; 2]]) -> Result<Self, RequestError> {
        let positions = towers
            .iter()
            .map(|&[row, col]| validate_tower(row, col))
            .collect::<Result<Vec<_>, _>>()?;
        let mut grid = Grid::new();
        grid.set_towers(&positions);
        Ok(grid)
    }

    /// Replace every tower on the board. Previous towers are discarded; the
    /// base is untouched.
    ///
    /// Callers must pass in-range positions that avoid the base.
    pub fn set_towers(&mut self, towers: &[TowerPos]) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                if *cell == Cell::Tower {
                    *cell = Cell::Empty;
                }
            }
        }
        for &(row, col) in towers {
            debug_assert!(row < GRID_SIZE && col < GRID_SIZE);
            debug_assert!((row, col) != BASE_POS);
            self.cells[row][col] = Cell::Tower;
        }
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Number of towers guarding `row`.
    pub fn towers_in_row(&self, row: usize) -> usize {
        self.cells[row]
            .iter()
            .filter(|&&cell| cell == Cell::Tower)
            .count()
    }

    /// Row with the fewest towers. Ties go to the lowest row.
    pub fn weakest_row(&self) -> usize {
        (0..GRID_SIZE)
            .min_by_key(|&row| self.towers_in_row(row))
            .unwrap_or(0)
    }

    /// Flatten the grid row-major into the estimator's input encoding.
    pub fn state(&self) -> [f32; STATE_SIZE] {
        let mut data = [0.0f32; STATE_SIZE];
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                data[row * GRID_SIZE + col] = self.cells[row][col].encoding();
            }
        }
        data
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_tower(row: i64, col: i64) -> Result<TowerPos, RequestError> {
    let in_range = |v: i64| v >= 0 && (v as usize) < GRID_SIZE;
    if !in_range(row) || !in_range(col) {
        return Err(RequestError::TowerOutOfBounds { row, col });
    }
    let pos = (row as usize, col as usize);
    if pos == BASE_POS {
        return Err(RequestError::TowerOnBase { row, col });
    }
    Ok(pos)
}
