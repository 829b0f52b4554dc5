//! Raw-mode terminal session and frame output
//!
//! Owns the alternate screen and cursor state. Drawing is line-based:
//! the view hands over styled lines and the renderer queues the whole
//! frame before a single flush, which keeps 60 Hz redraws tear-free.

use std::io::{self, Stdout, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
    QueueableCommand,
};

/// A run of text in one color (`None` = terminal default).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub fg: Option<Color>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fg: None,
        }
    }

    pub fn colored(text: impl Into<String>, fg: Color) -> Self {
        Self {
            text: text.into(),
            fg: Some(fg),
        }
    }
}

pub type StyledLine = Vec<Span>;

pub struct TerminalRenderer {
    stdout: Stdout,
    active: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            active: false,
        }
    }

    /// Enter raw mode on the alternate screen with the cursor hidden.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(Clear(ClearType::All))?;
        self.stdout.flush()?;
        self.active = true;
        Ok(())
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.stdout
            .queue(cursor::Show)?
            .queue(ResetColor)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw a full frame, one styled line per terminal row.
    pub fn draw(&mut self, lines: &[StyledLine]) -> Result<()> {
        for (row, line) in lines.iter().enumerate() {
            self.stdout.queue(cursor::MoveTo(0, row as u16))?;
            for span in line {
                match span.fg {
                    Some(color) => {
                        self.stdout.queue(SetForegroundColor(color))?;
                        self.stdout.queue(Print(&span.text))?;
                        self.stdout.queue(ResetColor)?;
                    }
                    None => {
                        self.stdout.queue(Print(&span.text))?;
                    }
                }
            }
            self.stdout.queue(Clear(ClearType::UntilNewLine))?;
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        // Best effort; the terminal is unusable anyway if this fails.
        let _ = self.exit();
    }
}
