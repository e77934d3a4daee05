//! Grid module - the 10x6 field of numbered blocks
//!
//! Uses a flat row-major array for cache locality and zero allocation.
//! Coordinates: (row, col) where row 0 is the top (danger) row and
//! row 9 is the bottom spawn row.

use crate::types::{Block, Position, COLS, GRID_CELLS, ROWS};

/// A grid cell: a block or empty.
pub type Cell = Option<Block>;

/// The game grid - 10 rows x 6 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [Cell; GRID_CELLS],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_CELLS],
        }
    }

    #[inline(always)]
    fn index(row: usize, col: usize) -> Option<usize> {
        if row >= ROWS || col >= COLS {
            return None;
        }
        Some(row * COLS + col)
    }

    pub fn rows(&self) -> usize {
        ROWS
    }

    pub fn cols(&self) -> usize {
        COLS
    }

    /// Block at (row, col); None when empty or out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Block> {
        Self::index(row, col).and_then(|idx| self.cells[idx])
    }

    pub fn get_at(&self, pos: Position) -> Option<Block> {
        self.get(pos.row as usize, pos.col as usize)
    }

    /// Set cell at (row, col).
    /// Returns false if out of bounds
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Empty a cell, returning whatever block it held.
    pub fn take(&mut self, pos: Position) -> Option<Block> {
        pos.index().and_then(|idx| self.cells[idx].take())
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    /// True if any cell of `row` holds a block.
    pub fn row_occupied(&self, row: usize) -> bool {
        if row >= ROWS {
            return false;
        }
        let start = row * COLS;
        self.cells[start..start + COLS].iter().any(|c| c.is_some())
    }

    /// Number of blocks on the grid.
    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Blocks of one row, left to right.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row.min(ROWS - 1) * COLS;
        &self.cells[start..start + COLS]
    }

    /// Blocks of one column, top to bottom.
    pub fn column(&self, col: usize) -> [Cell; ROWS] {
        let mut out = [None; ROWS];
        if col < COLS {
            for (row, slot) in out.iter_mut().enumerate() {
                *slot = self.cells[row * COLS + col];
            }
        }
        out
    }

    /// Shift every row up by one and place `bottom` in the last row.
    ///
    /// Whatever occupied row 0 is discarded; callers check `row_occupied(0)`
    /// first.
    pub fn push_bottom_row(&mut self, bottom: [Block; COLS]) {
        // copy_within handles overlapping ranges safely
        self.cells.copy_within(COLS..GRID_CELLS, 0);
        let start = (ROWS - 1) * COLS;
        for (col, block) in bottom.into_iter().enumerate() {
            self.cells[start + col] = Some(block);
        }
    }

    /// Fill an entire row with the given blocks.
    pub fn fill_row(&mut self, row: usize, blocks: [Block; COLS]) -> bool {
        if row >= ROWS {
            return false;
        }
        let start = row * COLS;
        for (col, block) in blocks.into_iter().enumerate() {
            self.cells[start + col] = Some(block);
        }
        true
    }

    /// Column-local gravity: pack blocks toward the bottom of each column,
    /// preserving their vertical order. Returns the number of blocks moved.
    ///
    /// Two-pointer pass per column, zero allocation.
    pub fn compact_columns(&mut self) -> usize {
        let mut moved = 0;
        for col in 0..COLS {
            let mut write_row = ROWS;
            for read_row in (0..ROWS).rev() {
                let idx = read_row * COLS + col;
                let Some(block) = self.cells[idx] else {
                    continue;
                };
                write_row -= 1;
                if write_row != read_row {
                    self.cells[write_row * COLS + col] = Some(block);
                    self.cells[idx] = None;
                    moved += 1;
                }
            }
        }
        moved
    }

    /// Sum of values at the given positions (empty cells count as 0).
    pub fn sum_at(&self, positions: &[Position]) -> u32 {
        positions
            .iter()
            .filter_map(|&p| self.get_at(p))
            .map(|b| b.value as u32)
            .sum()
    }

    /// Clear all cells
    pub fn clear(&mut self) {
        self.cells = [None; GRID_CELLS];
    }

    /// Write block values into a `[[u8; COLS]; ROWS]` grid (0 = empty).
    pub fn write_value_grid(&self, out: &mut [[u8; COLS]; ROWS]) {
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, v) in out_row.iter_mut().enumerate() {
                *v = self.cells[row * COLS + col].map(|b| b.value).unwrap_or(0);
            }
        }
    }

    /// Iterate over (position, block) for every occupied cell, row-major.
    pub fn blocks(&self) -> impl Iterator<Item = (Position, Block)> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, cell)| {
            cell.map(|b| (Position::new((idx / COLS) as u8, (idx % COLS) as u8), b))
        })
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
