//! Board state and collision detection
//!
//! A flat row-major grid of 10x22 cells. The top two rows are the hidden
//! spawn area and are cropped by the renderer, not by the board itself.

use arrayvec::ArrayVec;

use crate::core::pieces::PieceShape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some(y as usize * BOARD_WIDTH + x as usize)
    }

    pub fn get(&self, x: i8, y: i8) -> Cell {
        Self::index(x, y).and_then(|i| self.cells[i])
    }

    pub fn set(&mut self, x: i8, y: i8, cell: Cell) {
        if let Some(i) = Self::index(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        self.get(x, y).is_some()
    }

    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Collision test for a shape at (x, y). A mino collides when it is
    /// outside the horizontal bounds, below the floor, or overlaps a
    /// filled cell. Minos above the top of the grid (y < 0) only collide
    /// with the walls, never with content.
    pub fn collides(&self, shape: &PieceShape, x: i8, y: i8) -> bool {
        for &(dx, dy) in shape {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
                return true;
            }
            if py >= 0 && self.is_occupied(px, py) {
                return true;
            }
        }
        false
    }

    /// Write a piece into the grid. Out-of-bounds minos are ignored;
    /// callers lock only at non-colliding positions.
    pub fn lock(&mut self, shape: &PieceShape, x: i8, y: i8, kind: PieceKind) {
        for &(dx, dy) in shape {
            self.set(x + dx, y + dy, Some(kind));
        }
    }

    /// Row indices that are completely filled, ascending. At most four
    /// rows can complete from a single lock.
    pub fn completed_rows(&self) -> ArrayVec<usize, 4> {
        let mut rows = ArrayVec::new();
        for y in 0..BOARD_HEIGHT {
            let start = y * BOARD_WIDTH;
            if self.cells[start..start + BOARD_WIDTH]
                .iter()
                .all(|c| c.is_some())
            {
                // A lock touches at most 4 rows, so this cannot overflow.
                rows.push(y);
            }
        }
        rows
    }

    /// Remove the given rows (ascending indices) and shift everything
    /// above them down, keeping the grid height fixed.
    pub fn clear_rows(&mut self, rows: &[usize]) {
        for &row in rows {
            for y in (1..=row).rev() {
                let dst = y * BOARD_WIDTH;
                let src = (y - 1) * BOARD_WIDTH;
                self.cells.copy_within(src..src + BOARD_WIDTH, dst);
            }
            self.cells[..BOARD_WIDTH].fill(None);
        }
    }

    /// The lowest y at which the shape can rest from (x, y): the ghost /
    /// hard-drop position.
    pub fn ghost_y(&self, shape: &PieceShape, x: i8, y: i8) -> i8 {
        let mut gy = y;
        while !self.collides(shape, x, gy + 1) {
            gy += 1;
        }
        gy
    }

    /// Export the grid as u8 values (0 = empty, 1..=7 = piece kinds).
    pub fn to_grid(&self) -> [[u8; BOARD_WIDTH]; BOARD_HEIGHT] {
        let mut grid = [[0u8; BOARD_WIDTH]; BOARD_HEIGHT];
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                if let Some(kind) = self.cells[y * BOARD_WIDTH + x] {
                    grid[y][x] = kind.cell_value();
                }
            }
        }
        grid
    }

    /// Count of filled cells, mostly useful in tests and feature scans.
    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
