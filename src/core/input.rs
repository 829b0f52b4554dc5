//! Latched input state and DAS (delayed auto shift)
//!
//! The host latches key presses into an [`InputState`]; the state machine
//! consumes it once per tick. Horizontal movement is frame-counted: a
//! fresh press moves immediately, then nothing until the DAS charge
//! completes, then a repeat every few frames.

use crate::core::board::Board;
use crate::core::pieces::Tetromino;
use crate::types::{DAS_DELAY, DAS_REPEAT};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    rotate_cw: bool,
    rotate_ccw: bool,
    pub left_frames: u32,
    pub right_frames: u32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press_left(&mut self) {
        if !self.left {
            self.left = true;
            self.left_frames = 0;
        }
    }

    pub fn release_left(&mut self) {
        self.left = false;
        self.left_frames = 0;
    }

    pub fn press_right(&mut self) {
        if !self.right {
            self.right = true;
            self.right_frames = 0;
        }
    }

    pub fn release_right(&mut self) {
        self.right = false;
        self.right_frames = 0;
    }

    pub fn press_down(&mut self) {
        self.down = true;
    }

    pub fn release_down(&mut self) {
        self.down = false;
    }

    /// Latch a rotation; it stays pending until a tick consumes it.
    pub fn press_rotate_cw(&mut self) {
        self.rotate_cw = true;
    }

    pub fn press_rotate_ccw(&mut self) {
        self.rotate_ccw = true;
    }

    /// Consume the pending clockwise rotation, if any.
    pub fn take_rotate_cw(&mut self) -> bool {
        std::mem::take(&mut self.rotate_cw)
    }

    pub fn take_rotate_ccw(&mut self) -> bool {
        std::mem::take(&mut self.rotate_ccw)
    }

    /// Advance the DAS counters by one frame for held directions.
    pub fn advance_frames(&mut self) {
        if self.left {
            self.left_frames += 1;
        }
        if self.right {
            self.right_frames += 1;
        }
    }

    /// Drop everything held or latched.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Whether a held direction fires on this frame count. With a continuous
/// hold the movement frames are 1, then 17, 23, 29 and so on. Nothing
/// fires during the charge, including frame 16 itself.
fn das_fires(frames: u32) -> bool {
    frames == 1 || (frames > DAS_DELAY && (frames - DAS_DELAY - 1) % DAS_REPEAT == 0)
}

/// Horizontal shift for this tick: -1, 0 or +1. Holding both directions
/// cancels out, and a shift into a wall or the stack is swallowed
/// without resetting the charge.
pub fn das_shift(input: &InputState, board: &Board, piece: &Tetromino) -> i8 {
    let (dir, frames) = match (input.left, input.right) {
        (true, false) => (-1i8, input.left_frames),
        (false, true) => (1i8, input.right_frames),
        _ => return 0,
    };
    if !das_fires(frames) {
        return 0;
    }
    if board.collides(&piece.shape(), piece.x + dir, piece.y) {
        0
    } else {
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, BOARD_WIDTH};

    fn held_left(frames: u32) -> InputState {
        InputState {
            left: true,
            left_frames: frames,
            ..InputState::default()
        }
    }

    #[test]
    fn das_cadence_is_1_17_23_29() {
        let fired: Vec<u32> = (1..=30).filter(|&f| das_fires(f)).collect();
        assert_eq!(fired, vec![1, 17, 23, 29]);
    }

    #[test]
    fn frame_sixteen_does_not_fire() {
        assert!(!das_fires(16));
        assert!(das_fires(17));
    }

    #[test]
    fn shift_moves_on_initial_press() {
        let board = Board::new();
        let piece = Tetromino::spawn(PieceKind::T);
        assert_eq!(das_shift(&held_left(1), &board, &piece), -1);
        assert_eq!(das_shift(&held_left(2), &board, &piece), 0);
        assert_eq!(das_shift(&held_left(17), &board, &piece), -1);
    }

    #[test]
    fn both_directions_cancel() {
        let board = Board::new();
        let piece = Tetromino::spawn(PieceKind::T);
        let mut input = held_left(1);
        input.right = true;
        input.right_frames = 1;
        assert_eq!(das_shift(&input, &board, &piece), 0);
    }

    #[test]
    fn shift_into_the_wall_is_swallowed() {
        let board = Board::new();
        let mut piece = Tetromino::spawn(PieceKind::O);
        piece.x = -1; // O minos at box columns 1-2: hugging the left wall
        assert_eq!(das_shift(&held_left(1), &board, &piece), 0);

        let mut input = InputState {
            right: true,
            right_frames: 1,
            ..InputState::default()
        };
        piece.x = (BOARD_WIDTH as i8) - 3;
        assert_eq!(das_shift(&input, &board, &piece), 0);
        input.right_frames = 17;
        assert_eq!(das_shift(&input, &board, &piece), 0);
    }

    #[test]
    fn shift_into_the_stack_is_swallowed() {
        let mut board = Board::new();
        let mut piece = Tetromino::spawn(PieceKind::O);
        piece.y = 10;
        // Block the cell just left of the O.
        board.set(piece.x, piece.y + 1, Some(PieceKind::I));
        assert_eq!(das_shift(&held_left(1), &board, &piece), 0);
    }

    #[test]
    fn release_resets_the_charge() {
        let mut input = InputState::new();
        input.press_left();
        for _ in 0..20 {
            input.advance_frames();
        }
        assert_eq!(input.left_frames, 20);
        input.release_left();
        assert_eq!(input.left_frames, 0);
        input.press_left();
        input.advance_frames();
        assert_eq!(input.left_frames, 1);
    }

    #[test]
    fn repeated_press_while_held_does_not_reset() {
        let mut input = InputState::new();
        input.press_left();
        for _ in 0..10 {
            input.advance_frames();
        }
        input.press_left(); // key repeat from the terminal
        assert_eq!(input.left_frames, 10);
    }

    #[test]
    fn rotation_latch_is_consumed_once() {
        let mut input = InputState::new();
        input.press_rotate_cw();
        assert!(input.take_rotate_cw());
        assert!(!input.take_rotate_cw());
        assert!(!input.take_rotate_ccw());
    }
}
