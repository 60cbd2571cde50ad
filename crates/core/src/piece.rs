//! Active piece and its ghost projection

use serde::Serialize;

use crate::board::Board;
use crate::collision::is_valid;
use crate::pieces::{get_shape, spawn_position, PieceShape};
use crate::types::{PieceKind, Rotation};

/// Falling piece: kind, rotation and bounding-box origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at its spawn position, rotation North
    pub fn spawn(kind: PieceKind) -> Self {
        let (x, y) = spawn_position(kind);
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four minos
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Rows the piece can fall before landing
    pub fn drop_distance(&self, board: &Board) -> u8 {
        let mut distance = 0u8;
        while is_valid(&self.shifted(0, distance as i8 + 1), board) {
            distance += 1;
        }
        distance
    }

    /// Landing position: same kind, rotation and column, lowest valid row
    pub fn ghost(&self, board: &Board) -> Self {
        self.shifted(0, self.drop_distance(board) as i8)
    }

    /// Whether the piece rests on the floor or a locked cell
    pub fn is_grounded(&self, board: &Board) -> bool {
        !is_valid(&self.shifted(0, 1), board)
    }
}
