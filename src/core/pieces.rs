//! Tetromino shapes and rotation
//!
//! Nintendo Rotation System: each (kind, rotation) pair maps to four mino
//! offsets inside a 4x4 bounding box. There are no kick offsets; a rotation
//! that collides is simply rejected.

use crate::core::board::Board;
use crate::types::{PieceKind, Rotation, SPAWN_X, SPAWN_Y};

/// Four (dx, dy) mino offsets into the piece bounding box.
pub type PieceShape = [(i8, i8); 4];

/// Look up the NRS shape for a piece in a given rotation. Pure table
/// lookup, no failure mode.
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    use PieceKind::*;
    use Rotation::*;

    match (kind, rotation) {
        (I, North) => [(0, 1), (1, 1), (2, 1), (3, 1)],
        (I, East) => [(2, 0), (2, 1), (2, 2), (2, 3)],
        (I, South) => [(0, 2), (1, 2), (2, 2), (3, 2)],
        (I, West) => [(1, 0), (1, 1), (1, 2), (1, 3)],

        // O does not rotate.
        (O, _) => [(1, 0), (2, 0), (1, 1), (2, 1)],

        (T, North) => [(1, 0), (0, 1), (1, 1), (2, 1)],
        (T, East) => [(1, 0), (1, 1), (2, 1), (1, 2)],
        (T, South) => [(0, 1), (1, 1), (2, 1), (1, 2)],
        (T, West) => [(1, 0), (0, 1), (1, 1), (1, 2)],

        (J, North) => [(0, 0), (0, 1), (1, 1), (2, 1)],
        (J, East) => [(1, 0), (2, 0), (1, 1), (1, 2)],
        (J, South) => [(0, 1), (1, 1), (2, 1), (2, 2)],
        (J, West) => [(1, 0), (1, 1), (0, 2), (1, 2)],

        (L, North) => [(2, 0), (0, 1), (1, 1), (2, 1)],
        (L, East) => [(1, 0), (1, 1), (1, 2), (2, 2)],
        (L, South) => [(0, 1), (1, 1), (2, 1), (0, 2)],
        (L, West) => [(0, 0), (1, 0), (1, 1), (1, 2)],

        (S, North) => [(1, 0), (2, 0), (0, 1), (1, 1)],
        (S, East) => [(1, 0), (1, 1), (2, 1), (2, 2)],
        (S, South) => [(1, 1), (2, 1), (0, 2), (1, 2)],
        (S, West) => [(0, 0), (0, 1), (1, 1), (1, 2)],

        (Z, North) => [(0, 0), (1, 0), (1, 1), (2, 1)],
        (Z, East) => [(2, 0), (1, 1), (2, 1), (1, 2)],
        (Z, South) => [(0, 1), (1, 1), (1, 2), (2, 2)],
        (Z, West) => [(1, 0), (0, 1), (1, 1), (0, 2)],
    }
}

/// An active falling piece. `(x, y)` is the top-left corner of the 4x4
/// bounding box; the box may hang over the board edge as long as every
/// mino stays in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// A freshly spawned piece, centered at the top of the hidden rows.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }
}

/// Attempt to rotate a piece in place. Returns the rotated piece, or
/// `None` if the rotated shape would collide. No kicks.
pub fn try_rotate(board: &Board, piece: &Tetromino, clockwise: bool) -> Option<Tetromino> {
    let rotation = if clockwise {
        piece.rotation.rotate_cw()
    } else {
        piece.rotation.rotate_ccw()
    };
    let candidate = Tetromino { rotation, ..*piece };
    if board.collides(&candidate.shape(), candidate.x, candidate.y) {
        None
    } else {
        Some(candidate)
    }
}
