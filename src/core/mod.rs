//! Core module - the game-state engine
//!
//! Board model, shape geometry, and the per-tick simulation advancing all
//! players' shapes on one shared board. No I/O lives here; rendering,
//! input devices, and transport are collaborators layered on top.

pub mod board;
pub mod rng;
pub mod session;
pub mod shape;

// Re-export commonly used types
pub use board::Board;
pub use rng::{ShapeRng, SimpleRng};
pub use session::{GameSession, PlayerSlot};
pub use shape::{Shape, ShapeCells, ShapeKind};
