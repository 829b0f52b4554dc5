//! Snapshot-to-text frame composition
//!
//! Pure layout: a [`GameSnapshot`] in, styled lines out. The hidden
//! spawn rows are cropped, the active piece and its ghost are overlaid
//! on the grid, and the sidebar carries score, preview and status.

use crossterm::style::Color;

use crate::core::{get_shape, GameSnapshot};
use crate::term::renderer::{Span, StyledLine};
use crate::types::{
    GameStatus, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS,
};

const CELL: &str = "██";
const GHOST: &str = "░░";
const EMPTY: &str = "  ";

fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::Cyan,
        PieceKind::O => Color::Yellow,
        PieceKind::T => Color::Magenta,
        PieceKind::J => Color::Blue,
        PieceKind::L => Color::DarkYellow,
        PieceKind::S => Color::Green,
        PieceKind::Z => Color::Red,
    }
}

fn cell_color(value: u8) -> Color {
    piece_color(PieceKind::from_index(value - 1))
}

#[derive(Debug, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Compose one frame. One entry per terminal row, top to bottom.
    pub fn render(&self, snap: &GameSnapshot) -> Vec<StyledLine> {
        let mut active_cells = [[false; BOARD_WIDTH]; BOARD_HEIGHT];
        let mut ghost_cells = [[false; BOARD_WIDTH]; BOARD_HEIGHT];
        if let Some(active) = snap.active {
            let shape = get_shape(active.kind, active.rotation);
            for (dx, dy) in shape {
                mark(&mut active_cells, active.x + dx, active.y + dy);
                if let Some(ghost_y) = snap.ghost_y {
                    mark(&mut ghost_cells, active.x + dx, ghost_y + dy);
                }
            }
        }
        let active_color = snap.active.map(|a| piece_color(a.kind));

        let sidebar = self.sidebar(snap);
        let mut lines = Vec::with_capacity(BOARD_HEIGHT + 2);

        let top = format!("┌{}┐", "─".repeat(BOARD_WIDTH * 2));
        lines.push(vec![Span::plain(format!(" {top}"))]);

        for y in HIDDEN_ROWS..BOARD_HEIGHT {
            let mut line: StyledLine = vec![Span::plain(" │")];
            for x in 0..BOARD_WIDTH {
                if active_cells[y][x] {
                    line.push(Span {
                        text: CELL.into(),
                        fg: active_color,
                    });
                } else if snap.board[y][x] != 0 {
                    line.push(Span::colored(CELL, cell_color(snap.board[y][x])));
                } else if ghost_cells[y][x] {
                    line.push(Span::colored(GHOST, Color::DarkGrey));
                } else {
                    line.push(Span::plain(EMPTY));
                }
            }
            line.push(Span::plain("│"));
            let row = y - HIDDEN_ROWS;
            if let Some(extra) = sidebar.get(row) {
                line.push(Span::plain("   "));
                line.extend(extra.iter().cloned());
            }
            lines.push(line);
        }

        let bottom = format!("└{}┘", "─".repeat(BOARD_WIDTH * 2));
        lines.push(vec![Span::plain(format!(" {bottom}"))]);
        lines.push(vec![Span::plain(format!(" {}", self.banner(snap)))]);
        lines
    }

    fn sidebar(&self, snap: &GameSnapshot) -> Vec<StyledLine> {
        let mut side: Vec<StyledLine> = vec![
            vec![Span::plain(format!("SCORE {:>8}", snap.score))],
            vec![Span::plain(format!("LINES {:>8}", snap.lines))],
            vec![Span::plain(format!("LEVEL {:>8}", snap.level))],
            vec![Span::plain(format!("HIGH  {:>8}", snap.high_score))],
            vec![],
        ];
        if snap.show_next {
            side.push(vec![Span::plain("NEXT")]);
            let shape = get_shape(snap.next, Rotation::North);
            let color = piece_color(snap.next);
            for dy in 0i8..2 {
                let mut line: StyledLine = Vec::new();
                for dx in 0i8..4 {
                    if shape.contains(&(dx, dy)) {
                        line.push(Span::colored(CELL, color));
                    } else {
                        line.push(Span::plain(EMPTY));
                    }
                }
                side.push(line);
            }
        } else {
            side.push(vec![Span::plain("NEXT  hidden")]);
            side.push(vec![]);
            side.push(vec![]);
        }
        side.push(vec![]);
        side.push(vec![Span::plain(if snap.autoplay {
            "MODE  autoplay"
        } else {
            "MODE  manual"
        })]);
        side
    }

    fn banner(&self, snap: &GameSnapshot) -> &'static str {
        match snap.status {
            GameStatus::Idle => "enter: start  b: autoplay  q: quit",
            GameStatus::Playing => "arrows/ad: move  s: drop  x/z: rotate",
            GameStatus::Paused => "PAUSED - enter to resume",
            GameStatus::GameOver => "GAME OVER - enter to play again",
        }
    }
}

fn mark(cells: &mut [[bool; BOARD_WIDTH]; BOARD_HEIGHT], x: i8, y: i8) {
    if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
        cells[y as usize][x as usize] = true;
    }
}
