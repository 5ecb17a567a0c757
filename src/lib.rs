//! Gridfall: a multiplayer falling-block engine.
//!
//! Each player controls an independently falling shape over one shared
//! board; shapes lock into common ground and completed rows clear for
//! everyone. `core` holds the engine; `input` and `term` are the thin
//! local-play collaborators used by the default binary.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
