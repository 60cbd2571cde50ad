//! Rotation module - SRS rotation with wall kicks
//!
//! Kick offsets are `(dx, dy)` with `y` growing downward, so they are the
//! tetris.wiki SRS tables with the vertical component negated.
//! Reference: https://tetris.wiki/Super_Rotation_System
//!
//! The unshifted position is always tried first; the tables hold only the four
//! fallback candidates per transition.

use crate::board::Board;
use crate::collision::{cell_is_free, is_valid};
use crate::piece::Tetromino;
use crate::types::{PieceKind, Rotation};

/// Fallback kick offsets for one transition
pub type KickList = [(i8, i8); 4];

/// Kick table for all 8 transitions, indexed by [`kick_index`]
pub type KickTable = [KickList; 8];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // 0->1 (N->E, clockwise)
    [(-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->3 (N->W, counter-clockwise)
    [(1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->0 (E->N, counter-clockwise)
    [(1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->2 (E->S, clockwise)
    [(1, 0), (1, 1), (0, -2), (1, -2)],
    // 2->1 (S->E, counter-clockwise)
    [(-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 2->3 (S->W, clockwise)
    [(1, 0), (1, -1), (0, 2), (1, 2)],
    // 3->2 (W->S, counter-clockwise)
    [(-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 3->0 (W->N, clockwise)
    [(-1, 0), (-1, 1), (0, -2), (-1, -2)],
];

/// I piece kick table (different from JLSTZ)
const I_KICKS: KickTable = [
    // 0->1 (N->E)
    [(-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 0->3 (N->W)
    [(-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 1->0 (E->N)
    [(2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 1->2 (E->S)
    [(-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 2->1 (S->E)
    [(1, 0), (-2, 0), (1, 2), (-2, -1)],
    // 2->3 (S->W)
    [(2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 3->2 (W->S)
    [(-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 3->0 (W->N)
    [(1, 0), (-2, 0), (1, 2), (-2, -1)],
];

/// Get the kick index for a rotation transition
fn kick_index(from: Rotation, clockwise: bool) -> usize {
    match (from, clockwise) {
        (Rotation::North, true) => 0,  // N->E
        (Rotation::North, false) => 1, // N->W
        (Rotation::East, false) => 2,  // E->N
        (Rotation::East, true) => 3,   // E->S
        (Rotation::South, false) => 4, // S->E
        (Rotation::South, true) => 5,  // S->W
        (Rotation::West, false) => 6,  // W->S
        (Rotation::West, true) => 7,   // W->N
    }
}

/// Fallback kicks for rotating `kind` out of `from`; `None` for the O piece
pub fn kick_offsets(kind: PieceKind, from: Rotation, clockwise: bool) -> Option<&'static KickList> {
    let table = match kind {
        PieceKind::O => return None,
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    };
    Some(&table[kick_index(from, clockwise)])
}

/// A committed rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotated {
    pub piece: Tetromino,
    /// Offset that was applied; `(0, 0)` when no kick was needed
    pub offset: (i8, i8),
}

impl Rotated {
    pub fn kicked(&self) -> bool {
        self.offset != (0, 0)
    }
}

/// Rotate `piece` one step, trying the in-place position and then each kick.
///
/// Returns `None` when no candidate fits, and always for the O piece. The input
/// piece is never modified.
pub fn try_rotate(piece: &Tetromino, board: &Board, clockwise: bool) -> Option<Rotated> {
    let kicks = kick_offsets(piece.kind, piece.rotation, clockwise)?;
    let rotated = Tetromino {
        rotation: if clockwise {
            piece.rotation.rotate_cw()
        } else {
            piece.rotation.rotate_ccw()
        },
        ..*piece
    };

    std::iter::once(&(0, 0))
        .chain(kicks.iter())
        .map(|&(dx, dy)| Rotated {
            piece: rotated.shifted(dx, dy),
            offset: (dx, dy),
        })
        .find(|candidate| is_valid(&candidate.piece, board))
}

/// T piece corners (relative to piece origin)
const T_CORNERS: [(i8, i8); 4] = [(0, 0), (2, 0), (0, 2), (2, 2)];

/// Number of the T box's diagonal corners that are occupied or out of bounds
pub fn blocked_corners(piece: &Tetromino, board: &Board) -> usize {
    T_CORNERS
        .iter()
        .filter(|&&(cx, cy)| !cell_is_free(board, piece.x + cx, piece.y + cy))
        .count()
}

/// Whether a T piece that just rotated into place qualifies as a T-spin
pub fn is_t_spin(piece: &Tetromino, board: &Board) -> bool {
    piece.kind == PieceKind::T && blocked_corners(piece, board) >= 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_board_rotation_needs_no_kick() {
        let board = Board::new();
        let piece = Tetromino::spawn(PieceKind::T);
        let result = try_rotate(&piece, &board, true).unwrap();
        assert_eq!(result.piece.rotation, Rotation::East);
        assert_eq!(result.offset, (0, 0));
        assert!(!result.kicked());
    }

    #[test]
    fn o_piece_never_rotates() {
        let board = Board::new();
        let piece = Tetromino::spawn(PieceKind::O);
        assert!(kick_offsets(PieceKind::O, Rotation::North, true).is_none());
        assert!(try_rotate(&piece, &board, true).is_none());
        assert!(try_rotate(&piece, &board, false).is_none());
    }

    #[test]
    fn t_kicks_off_the_left_wall() {
        let board = Board::new();
        let piece = Tetromino {
            kind: PieceKind::T,
            rotation: Rotation::East,
            x: -1,
            y: 5,
        };
        assert!(is_valid(&piece, &board));

        let result = try_rotate(&piece, &board, true).unwrap();
        assert_eq!(result.piece.rotation, Rotation::South);
        assert_eq!(result.offset, (1, 0));
        assert_eq!((result.piece.x, result.piece.y), (0, 5));
    }

    #[test]
    fn i_in_a_sealed_well_is_blocked() {
        let mut rows = vec![".........."; 8];
        rows.extend(std::iter::repeat(".iiiiiiiii").take(12));
        let board = Board::from_rows(&rows).unwrap();
        let piece = Tetromino {
            kind: PieceKind::I,
            rotation: Rotation::East,
            x: -2,
            y: 16,
        };
        assert!(is_valid(&piece, &board));
        assert!(try_rotate(&piece, &board, true).is_none());
        assert!(try_rotate(&piece, &board, false).is_none());
    }

    #[test]
    fn corners_count_walls_and_stack() {
        let board = Board::from_rows(&["t.t.......", "..........", "t........."]).unwrap();
        let piece = Tetromino {
            kind: PieceKind::T,
            rotation: Rotation::South,
            x: 0,
            y: 17,
        };
        assert_eq!(blocked_corners(&piece, &board), 3);
        assert!(is_t_spin(&piece, &board));

        // the same spot counts the floor as blocked
        let floor = Tetromino { y: 18, ..piece };
        assert_eq!(blocked_corners(&floor, &Board::new()), 2);
    }
}
