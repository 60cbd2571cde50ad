//! Pieces module - Tetromino shape catalog
//!
//! Every layout sits in its SRS bounding box: 4x4 for I, 2x2 for O and 3x3 for
//! the rest. Offsets are `(x, y)` from the box origin with `y` growing downward.
//! Reference: https://tetris.wiki/SRS

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => O_SHAPE,
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// I piece shapes
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        // N: horizontal on row 1
        Rotation::North => [(0, 1), (1, 1), (2, 1), (3, 1)],
        // E: vertical in column 2
        Rotation::East => [(2, 0), (2, 1), (2, 2), (2, 3)],
        // S: horizontal on row 2
        Rotation::South => [(0, 2), (1, 2), (2, 2), (3, 2)],
        // W: vertical in column 1
        Rotation::West => [(1, 0), (1, 1), (1, 2), (1, 3)],
    }
}

/// O piece has a single orientation; every rotation aliases it
const O_SHAPE: PieceShape = [(0, 0), (1, 0), (0, 1), (1, 1)];

fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (2, 2)],
        Rotation::South => [(1, 1), (2, 1), (0, 2), (1, 2)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::East => [(2, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (1, 2), (2, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (0, 2)],
    }
}

fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
    }
}

fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (0, 2)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// Side length of the piece's bounding box
pub fn box_size(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::I => 4,
        PieceKind::O => 2,
        _ => 3,
    }
}

/// Boolean cell layout of one rotation state, sized to the bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    size: u8,
    cells: [[bool; 4]; 4],
}

impl Layout {
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the cell at `(x, y)` of the box is filled; false outside the box
    pub fn is_filled(&self, x: u8, y: u8) -> bool {
        x < self.size && y < self.size && self.cells[y as usize][x as usize]
    }

    /// Rows of the box, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells[..self.size as usize]
            .iter()
            .map(move |row| &row[..self.size as usize])
    }
}

/// 2-D layout for a piece kind and rotation
pub fn layout(kind: PieceKind, rotation: Rotation) -> Layout {
    let mut cells = [[false; 4]; 4];
    for (x, y) in get_shape(kind, rotation) {
        cells[y as usize][x as usize] = true;
    }
    Layout {
        size: box_size(kind),
        cells,
    }
}

/// Spawn position `(x, y)` of the bounding-box origin for a piece kind
///
/// Pieces spawn horizontally centered on row 0. The I piece's cells live on row 1
/// of its box, so it spawns one row higher to land on row 0 as well.
pub fn spawn_position(kind: PieceKind) -> (i8, i8) {
    match kind {
        PieceKind::I => (3, -1),
        PieceKind::O => (4, 0),
        _ => (3, 0),
    }
}

/// Get initial shape for a new piece at spawn position
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    get_shape(kind, Rotation::North)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_has_four_distinct_cells_inside_its_box() {
        for kind in PieceKind::ALL {
            let size = box_size(kind) as i8;
            for rotation in Rotation::ALL {
                let shape = get_shape(kind, rotation);
                for (i, &(x, y)) in shape.iter().enumerate() {
                    assert!((0..size).contains(&x) && (0..size).contains(&y));
                    assert!(!shape[i + 1..].contains(&(x, y)), "{kind:?} {rotation:?}");
                }
            }
        }
    }

    #[test]
    fn o_piece_aliases_all_rotations() {
        let north = layout(PieceKind::O, Rotation::North);
        assert_eq!(north.size(), 2);
        for rotation in Rotation::ALL {
            assert_eq!(layout(PieceKind::O, rotation), north);
        }
    }

    #[test]
    fn t_layout_rows() {
        let rows: Vec<Vec<bool>> = layout(PieceKind::T, Rotation::North)
            .rows()
            .map(<[bool]>::to_vec)
            .collect();
        assert_eq!(
            rows,
            vec![
                vec![false, true, false],
                vec![true, true, true],
                vec![false, false, false],
            ]
        );
    }

    #[test]
    fn spawn_rows_land_on_row_zero() {
        for kind in PieceKind::ALL {
            let (_, y) = spawn_position(kind);
            let top = get_spawn_shape(kind).iter().map(|&(_, dy)| y + dy).min();
            assert_eq!(top, Some(0), "{kind:?}");
        }
    }
}
