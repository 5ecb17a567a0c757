//! Terminal rendering module
//!
//! Small, game-oriented rendering layer for local play: a pure view that
//! composes the session into a frame of player-owned cells, and a renderer
//! that flushes the frame to a raw-mode terminal. No game rules live here;
//! everything is read from `&GameSession`.

pub mod terminal;
pub mod view;

pub use terminal::{Terminal, BOARD_ORIGIN_COL, CELL_COLS};
pub use view::{compose, ComposedFrame};
