//! Terminal: flushes a composed frame to a raw-mode terminal.
//!
//! Full redraw per frame - a falling-block board is small enough that
//! diffing buys nothing here. The guard enables mouse capture so the
//! column-steering controls work.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::term::view::ComposedFrame;
use crate::types::PlayerId;

/// Terminal columns per board cell (compensates glyph aspect ratio)
pub const CELL_COLS: u16 = 2;

/// Terminal column where the leftmost board cell starts (inside the border)
pub const BOARD_ORIGIN_COL: u16 = 1;

/// Block colors cycled by player id
const PLAYER_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::Red,
    Color::Blue,
];

fn player_color(id: PlayerId) -> Color {
    PLAYER_COLORS[id as usize % PLAYER_COLORS.len()]
}

pub struct Terminal {
    stdout: io::Stdout,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(EnableMouseCapture)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(DisableMouseCapture)?;
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw one frame: bordered board, blocks colored per player, and a
    /// banner when the game is over.
    pub fn draw(&mut self, frame: &ComposedFrame) -> Result<()> {
        let board_cols = frame.width() as u16 * CELL_COLS;

        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;
        self.stdout.queue(cursor::MoveTo(0, 0))?;
        self.stdout.queue(ResetColor)?;

        self.stdout
            .queue(Print(format!("+{}+", "-".repeat(board_cols as usize))))?;

        for row in 0..frame.height() {
            self.stdout.queue(cursor::MoveTo(0, row as u16 + 1))?;
            self.stdout.queue(Print("|"))?;
            for col in 0..frame.width() {
                match frame.occupant(row, col) {
                    Some(id) => {
                        self.stdout.queue(SetForegroundColor(Color::Black))?;
                        self.stdout.queue(SetBackgroundColor(player_color(id)))?;
                        self.stdout.queue(Print("[]"))?;
                        self.stdout.queue(ResetColor)?;
                    }
                    None => {
                        self.stdout.queue(Print("  "))?;
                    }
                }
            }
            self.stdout.queue(Print("|"))?;
        }

        self.stdout
            .queue(cursor::MoveTo(0, frame.height() as u16 + 1))?;
        self.stdout
            .queue(Print(format!("+{}+", "-".repeat(board_cols as usize))))?;

        let status_row = frame.height() as u16 + 2;
        self.stdout.queue(cursor::MoveTo(0, status_row))?;
        if frame.game_over() {
            self.stdout
                .queue(Print("GAME OVER - press r to restart, q to quit"))?;
        } else {
            self.stdout
                .queue(Print("mouse: steer/drop  arrows: rotate/drop  q: quit"))?;
        }

        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}
