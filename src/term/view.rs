//! View: composes a `GameSession` into a plain cell grid.
//!
//! This module is pure (no I/O). Locked blocks come straight from the
//! board; the falling shapes are overlaid on top, so a frame cell answers
//! "which player's block shows here" for both kinds of occupancy. Shape
//! cells above the board's top edge are simply not visible.

use crate::core::GameSession;
use crate::types::{Cell, PlayerId};

/// One rendered frame of the shared board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedFrame {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    game_over: bool,
}

impl ComposedFrame {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Player owning the visible block at (row, col), if any
    pub fn occupant(&self, row: usize, col: usize) -> Option<PlayerId> {
        self.cells[row * self.width + col]
    }
}

/// Compose the session's board and falling shapes into a frame
pub fn compose(session: &GameSession) -> ComposedFrame {
    let board = session.board();
    let (width, height) = (board.width(), board.height());

    let mut cells = vec![None; width * height];
    for row in 0..height {
        for col in 0..width {
            cells[row * width + col] = board.occupant(row as i16, col as i16);
        }
    }

    for shape in session.shapes() {
        for (col, row) in shape.cells() {
            if col >= 0 && (col as usize) < width && row >= 0 && (row as usize) < height {
                cells[row as usize * width + col as usize] = Some(shape.player);
            }
        }
    }

    ComposedFrame {
        width,
        height,
        cells,
        game_over: session.is_game_over(),
    }
}
