//! Terminal frontend: raw-mode session management and frame drawing

pub mod game_view;
pub mod renderer;

pub use game_view::GameView;
pub use renderer::{Span, StyledLine, TerminalRenderer};
