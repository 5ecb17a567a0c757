//! Core types shared across the application
//! This module contains pure data types with no external dependencies

use serde::{Deserialize, Serialize};

/// Default board dimensions for a live game
pub const GAME_COLS: usize = 10;
pub const GAME_ROWS: usize = 20;

/// Simulation cadence: one downward step per interval (milliseconds)
pub const STEP_INTERVAL_MS: u64 = 500;

/// Stable identifier of a connected player
pub type PlayerId = u32;

/// Cell on the board (None = empty, Some = locked block owned by that player)
pub type Cell = Option<PlayerId>;

/// Rotation direction requested by a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateDir {
    Left,
    Right,
}

impl RotateDir {
    /// Rotation-index delta: left steps back, right steps forward
    pub fn delta(&self) -> i32 {
        match self {
            RotateDir::Left => -1,
            RotateDir::Right => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RotateDir::Left => "left",
            RotateDir::Right => "right",
        }
    }
}

/// Discrete player command, as decoded by the transport layer
///
/// Wire framing is an external concern; this is the closed set of operations
/// a session accepts, dispatched exhaustively in
/// [`crate::core::GameSession::on_command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Command {
    Rotate { direction: RotateDir },
    Move { col: i16 },
    Drop,
}
