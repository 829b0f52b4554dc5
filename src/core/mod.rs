//! Core module - pure simulation logic with no I/O
//!
//! Everything that defines the game lives here: the board, the piece
//! catalog, the sequencer, scoring tables, DAS timing and the frame-level
//! state machine. The only outward edge is the injected score store.

pub mod board;
pub mod game_state;
pub mod input;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use board::Board;
pub use game_state::GameState;
pub use input::{das_shift, InputState};
pub use pieces::{get_shape, try_rotate, Tetromino};
pub use rng::{next_piece, random_seed};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
