//! The falling piece: kind, orientation and bounding-box origin on the board.

use crate::board::Board;
use crate::pieces::{get_shape, PieceShape};
use crate::types::{PieceKind, Rotation, RotationDirection, SPAWN_ORIGIN};

/// Board cells covered by a piece
pub type PieceCells = [(i8, i8); 4];

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingPiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl FallingPiece {
    pub fn new(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
        }
    }

    /// Create a piece at the spawn origin
    pub fn spawn(kind: PieceKind, rotation: Rotation) -> Self {
        Self::new(kind, rotation, SPAWN_ORIGIN.0, SPAWN_ORIGIN.1)
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board cells, pivot first
    pub fn cells(&self) -> PieceCells {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Same piece moved by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece rotated in place (no kicks, origin unchanged)
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        Self {
            rotation: self.rotation.rotate(direction),
            ..*self
        }
    }

    /// Check if every cell of the piece is free on the board
    pub fn fits(&self, board: &Board) -> bool {
        self.cells().iter().all(|&(x, y)| board.is_free(x, y))
    }
}
