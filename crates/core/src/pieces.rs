//! Tetromino catalog - fixed shape table
//!
//! Every (kind, rotation) pair maps to exactly four distinct offsets inside a
//! 4x4 bounding box. The first offset is always the pivot cell (1, 2).

use crate::types::{PieceKind, Rotation, PIECE_KIND_COUNT};

/// Offset of a single mino relative to the bounding box origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the bounding box origin
pub type PieceShape = [MinoOffset; 4];

/// Pivot cell shared by every shape
pub const PIVOT: MinoOffset = (1, 2);

/// Shape table indexed by `[kind][rotation]`
const SHAPES: [[PieceShape; 4]; PIECE_KIND_COUNT] = [
    // O
    [
        [(1, 2), (1, 1), (2, 1), (2, 2)],
        [(1, 2), (1, 1), (2, 1), (2, 2)],
        [(1, 2), (1, 1), (2, 1), (2, 2)],
        [(1, 2), (1, 1), (2, 1), (2, 2)],
    ],
    // L
    [
        [(1, 2), (1, 1), (1, 3), (2, 3)],
        [(1, 2), (0, 2), (2, 2), (0, 3)],
        [(1, 2), (0, 1), (1, 1), (1, 3)],
        [(1, 2), (2, 1), (0, 2), (2, 2)],
    ],
    // I
    [
        [(1, 2), (0, 2), (2, 2), (3, 2)],
        [(1, 2), (1, 0), (1, 1), (1, 3)],
        [(1, 2), (0, 2), (2, 2), (3, 2)],
        [(1, 2), (1, 0), (1, 1), (1, 3)],
    ],
    // J
    [
        [(1, 2), (1, 1), (1, 3), (0, 3)],
        [(1, 2), (0, 1), (0, 2), (2, 2)],
        [(1, 2), (1, 1), (2, 1), (1, 3)],
        [(1, 2), (0, 2), (2, 2), (2, 3)],
    ],
    // S
    [
        [(1, 2), (0, 3), (1, 3), (2, 2)],
        [(1, 2), (0, 1), (0, 2), (1, 3)],
        [(1, 2), (1, 1), (2, 1), (0, 2)],
        [(1, 2), (1, 1), (2, 2), (2, 3)],
    ],
    // T
    [
        [(1, 2), (1, 1), (0, 2), (2, 2)],
        [(1, 2), (1, 1), (2, 2), (1, 3)],
        [(1, 2), (0, 2), (2, 2), (1, 3)],
        [(1, 2), (1, 1), (0, 2), (1, 3)],
    ],
    // Z
    [
        [(1, 2), (0, 1), (1, 1), (2, 2)],
        [(1, 2), (2, 1), (2, 2), (1, 3)],
        [(1, 2), (0, 2), (1, 3), (2, 3)],
        [(1, 2), (1, 1), (0, 2), (0, 3)],
    ],
];

/// Get the shape (mino offsets) for a piece kind and rotation
#[inline]
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind.index()][rotation.index()]
}

/// Shape shown in the preview queue (always the North orientation)
pub fn preview_shape(kind: PieceKind) -> PieceShape {
    get_shape(kind, Rotation::North)
}

/// Leftmost column used by a shape, relative to its origin
pub fn min_dx(shape: &PieceShape) -> i8 {
    shape.iter().map(|&(dx, _)| dx).min().unwrap_or(0)
}

/// Rightmost column used by a shape, relative to its origin
pub fn max_dx(shape: &PieceShape) -> i8 {
    shape.iter().map(|&(dx, _)| dx).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_starts_with_pivot() {
        for kind in PieceKind::ALL {
            for rotation in Rotation::ALL {
                assert_eq!(get_shape(kind, rotation)[0], PIVOT);
            }
        }
    }

    #[test]
    fn o_piece_is_rotation_invariant() {
        let north = get_shape(PieceKind::O, Rotation::North);
        for rotation in Rotation::ALL {
            assert_eq!(get_shape(PieceKind::O, rotation), north);
        }
    }

    #[test]
    fn i_piece_alternates_between_two_shapes() {
        assert_eq!(
            get_shape(PieceKind::I, Rotation::North),
            get_shape(PieceKind::I, Rotation::South)
        );
        assert_eq!(
            get_shape(PieceKind::I, Rotation::East),
            get_shape(PieceKind::I, Rotation::West)
        );
        assert_ne!(
            get_shape(PieceKind::I, Rotation::North),
            get_shape(PieceKind::I, Rotation::East)
        );
    }

    #[test]
    fn column_extent_helpers() {
        let vertical_i = get_shape(PieceKind::I, Rotation::East);
        assert_eq!(min_dx(&vertical_i), 1);
        assert_eq!(max_dx(&vertical_i), 1);

        let flat_i = get_shape(PieceKind::I, Rotation::North);
        assert_eq!(min_dx(&flat_i), 0);
        assert_eq!(max_dx(&flat_i), 3);
    }
}
