//! Input module - translates terminal events into game commands
//!
//! Control scheme for local play: the mouse steers the shape's column and a
//! click drops it; ArrowLeft/ArrowRight rotate, ArrowDown also drops.
//! Mouse movement is debounced to one `Move` per board column.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use crate::types::{Command, RotateDir};

/// Stateful translator from crossterm events to [`Command`]s
#[derive(Debug, Clone)]
pub struct CommandTranslator {
    /// Terminal column of the board's leftmost cell
    origin_col: u16,
    /// Terminal columns per board cell
    cell_cols: u16,
    last_col: Option<i16>,
}

impl CommandTranslator {
    pub fn new(origin_col: u16, cell_cols: u16) -> Self {
        Self {
            origin_col,
            cell_cols: cell_cols.max(1),
            last_col: None,
        }
    }

    /// Translate one event; returns None for events that carry no command.
    /// Unmapped keys are ignored, matching the transport contract that only
    /// decoded commands ever reach the session.
    pub fn translate(&mut self, event: &Event) -> Option<Command> {
        match event {
            Event::Key(key) => self.translate_key(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Command::Drop),
                MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                    let col = self.board_col(mouse.column);
                    if self.last_col == Some(col) {
                        return None;
                    }
                    self.last_col = Some(col);
                    Some(Command::Move { col })
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn translate_key(&self, key: &KeyEvent) -> Option<Command> {
        // Terminal auto-repeat and release events carry no command.
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Left => Some(Command::Rotate {
                direction: RotateDir::Left,
            }),
            KeyCode::Right => Some(Command::Rotate {
                direction: RotateDir::Right,
            }),
            KeyCode::Down => Some(Command::Drop),
            _ => None,
        }
    }

    /// Board column under a terminal column
    fn board_col(&self, terminal_col: u16) -> i16 {
        (terminal_col.saturating_sub(self.origin_col) / self.cell_cols) as i16
    }
}

/// Check if key should quit the game
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
