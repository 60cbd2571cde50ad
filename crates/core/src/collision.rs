//! Collision module - the validity predicate
//!
//! Every movement, rotation, spawn and hold goes through [`is_valid`]. Cells
//! above the visible board (`y < 0`) are always allowed; anything left, right or
//! below the board is not.

use crate::board::Board;
use crate::piece::Tetromino;
use crate::pieces::get_shape;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Whether a single absolute cell may hold a piece mino
#[inline]
pub fn cell_is_free(board: &Board, x: i8, y: i8) -> bool {
    if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
        return false;
    }
    y < 0 || !board.is_occupied(x, y)
}

/// Whether `piece` fits on `board`
pub fn is_valid(piece: &Tetromino, board: &Board) -> bool {
    fits(board, piece.kind, piece.rotation, piece.x, piece.y)
}

/// Whether a piece of `kind` in `rotation` with its box origin at `(x, y)` fits
pub fn fits(board: &Board, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> bool {
    get_shape(kind, rotation)
        .iter()
        .all(|&(dx, dy)| cell_is_free(board, x + dx, y + dy))
}
