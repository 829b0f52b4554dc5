//! nestris - frame-accurate NES-style Tetris with heuristic autoplay
//!
//! The crate splits into a pure simulation core ([`core`]), a pluggable
//! move-selection layer ([`ai`]), a small persistence port ([`store`])
//! and a crossterm frontend ([`term`], [`input`]) driven by the binary
//! at the NTSC frame rate.

pub mod ai;
pub mod core;
pub mod input;
pub mod store;
pub mod term;
pub mod types;
