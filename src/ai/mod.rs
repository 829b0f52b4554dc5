//! Move selection for the autoplayer
//!
//! Policies evaluate every reachable hard-drop placement of the current
//! piece and return a target column and rotation; the state machine then
//! walks the piece there one step at a time, so the autoplayer obeys the
//! same per-frame movement rules as a human player.

pub mod features;
pub mod heuristic;

pub use features::BoardFeatures;
pub use heuristic::{HeuristicPolicy, HeuristicWeights};

use crate::core::Board;
use crate::types::{PieceKind, Rotation};

/// A target resting placement for the current piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i8,
    pub rotation: Rotation,
}

/// Strategy seam: given the board and the current piece (plus the next
/// piece when the preview is known), pick a placement. `None` means no
/// legal placement exists and the game is about to end.
pub trait MovePolicy {
    fn find_best_move(
        &self,
        board: &Board,
        kind: PieceKind,
        next: Option<PieceKind>,
    ) -> Option<Placement>;
}
