//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! Cells are only ever written by [`Board::merge_piece`] and only ever moved by
//! [`Board::remove_rows`].

use thiserror::Error;

use crate::types::{Cell, PieceKind, RowList, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Number of rows on the board
pub const BOARD_ROWS: usize = BOARD_HEIGHT as usize;

/// Errors from [`Board::from_rows`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("too many rows: {0} (board has 20)")]
    TooManyRows(usize),
    #[error("row {row} has width {width}, expected 10")]
    RowWidth { row: usize, width: usize },
    #[error("unknown cell character {0:?}")]
    UnknownCell(char),
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from an ASCII picture, aligned to the bottom row.
    ///
    /// `.` is empty; `i j l o s t z` (any case) are locked cells of that kind.
    ///
    /// ```
    /// use cheza_core::Board;
    /// use cheza_core::types::PieceKind;
    ///
    /// let board = Board::from_rows(&["ttt.......", "iiiiiiiii."]).unwrap();
    /// assert_eq!(board.get(0, 19), Some(Some(PieceKind::I)));
    /// assert_eq!(board.get(9, 19), Some(None));
    /// assert_eq!(board.get(2, 18), Some(Some(PieceKind::T)));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardParseError> {
        if rows.len() > BOARD_ROWS {
            return Err(BoardParseError::TooManyRows(rows.len()));
        }

        let mut board = Self::new();
        let top = BOARD_ROWS - rows.len();
        for (i, row) in rows.iter().enumerate() {
            let width = row.chars().count();
            if width != BOARD_WIDTH as usize {
                return Err(BoardParseError::RowWidth { row: i, width });
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    other => Some(
                        PieceKind::from_str(other.encode_utf8(&mut [0; 4]))
                            .ok_or(BoardParseError::UnknownCell(other))?,
                    ),
                };
                board.cells[(top + i) * BOARD_WIDTH as usize + x] = cell;
            }
        }
        Ok(board)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if Self::is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(x: i8, y: i8) -> bool {
        x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_ROWS {
            return false;
        }
        self.row(y).iter().all(Option::is_some)
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Indices of every full row, top to bottom
    pub fn full_rows(&self) -> RowList {
        (0..BOARD_ROWS)
            .filter(|&y| self.is_row_full(y))
            .map(|y| y as u8)
            .collect()
    }

    /// Merge piece cells (absolute coordinates) into the board.
    ///
    /// Cells above the board (`y < 0`) are dropped. Returns how many cells were
    /// written.
    pub fn merge_piece(&mut self, cells: &[(i8, i8)], kind: PieceKind) -> usize {
        let mut merged = 0;
        for &(x, y) in cells {
            if y < 0 {
                continue;
            }
            match Self::index(x, y) {
                Some(idx) => {
                    debug_assert!(
                        self.cells[idx].is_none(),
                        "merge onto occupied cell ({x}, {y})"
                    );
                    self.cells[idx] = Some(kind);
                    merged += 1;
                }
                None => debug_assert!(false, "merge outside the board ({x}, {y})"),
            }
        }
        merged
    }

    /// Remove the given full rows and shift every row above them down.
    ///
    /// The result equals the non-removed rows in their original order, prefixed
    /// by as many empty rows as were removed. Uses a two-pointer scan with
    /// `copy_within`, no allocation.
    pub fn remove_rows(&mut self, rows: &[u8]) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_ROWS;
        let mut removed = 0;

        // Scan from bottom to top
        for read_y in (0..BOARD_ROWS).rev() {
            if rows.contains(&(read_y as u8)) {
                debug_assert!(self.is_row_full(read_y), "removing non-full row {read_y}");
                removed += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        // Clear the remaining rows at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        removed
    }

    /// Clear all full rows, returning the removed indices (top to bottom)
    pub fn clear_full_rows(&mut self) -> RowList {
        let rows = self.full_rows();
        self.remove_rows(&rows);
        rows
    }

    /// Write color ids (0 = empty) into a row-major grid
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_ROWS]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[y * BOARD_WIDTH as usize + x].map_or(0, |k| k.color_id());
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Set a cell directly (unit tests only)
    #[cfg(test)]
    pub(crate) fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
