//! Session module - the simulation that advances all players on one board
//!
//! A session owns the shared board plus a map from player id to player slot;
//! each slot carries at most one falling shape. The external clock calls
//! [`GameSession::step`] at a fixed cadence and the transport feeds decoded
//! commands into [`GameSession::on_command`]. Execution is single-threaded
//! and cooperative: one step or command runs to completion before the next,
//! so a threaded embedding must serialize calls into the session.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::core::board::Board;
use crate::core::rng::ShapeRng;
use crate::core::shape::Shape;
use crate::types::{Command, PlayerId, RotateDir};

/// Per-player record: a stable id and at most one live shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSlot {
    id: PlayerId,
    shape: Option<Shape>,
}

impl PlayerSlot {
    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn shape(&self) -> Option<&Shape> {
        self.shape.as_ref()
    }
}

/// One running game: shared board, player map, game-over flag
///
/// Players iterate in ascending id order (`BTreeMap`). That order decides
/// which of two same-tick grounded shapes locks first; the order is
/// deterministic but carries no meaning - the later shape simply gets
/// replaced if the first one's lock invalidated it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    players: BTreeMap<PlayerId, PlayerSlot>,
    game_over: bool,
    rng: ShapeRng,
}

impl GameSession {
    pub fn new(width: usize, height: usize, seed: u32) -> Self {
        Self::with_board(Board::new(width, height), seed)
    }

    /// Build a session around a prepared board (used by tests and embeddings
    /// that set up terrain before play starts)
    pub fn with_board(board: Board, seed: u32) -> Self {
        Self {
            board,
            players: BTreeMap::new(),
            game_over: false,
            rng: ShapeRng::new(seed),
        }
    }

    // ---- membership ----

    /// Register a player and immediately spawn their first shape.
    /// Re-adding an existing id replaces its slot.
    pub fn add_player(&mut self, id: PlayerId) {
        self.players.insert(id, PlayerSlot { id, shape: None });
        self.spawn_shape(id);
    }

    pub fn remove_player(&mut self, id: PlayerId) {
        if self.players.remove(&id).is_none() {
            warn!(player = id, "unknown player, nothing to remove");
        }
    }

    // ---- queries ----

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// All registered players, in ascending id order. A slot may be
    /// shapeless only while the session is game-over.
    pub fn players(&self) -> impl Iterator<Item = &PlayerSlot> {
        self.players.values()
    }

    /// Current shape of the given player, if the player exists and has one
    pub fn shape(&self, id: PlayerId) -> Option<&Shape> {
        self.players.get(&id).and_then(|slot| slot.shape.as_ref())
    }

    /// All live falling shapes, in ascending owner order
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.players.values().filter_map(|slot| slot.shape.as_ref())
    }

    // ---- commands ----

    /// Dispatch one decoded command for a player. Ignored entirely while the
    /// session is game-over.
    pub fn on_command(&mut self, id: PlayerId, command: Command) {
        if self.game_over {
            warn!(player = id, "game over, ignoring command");
            return;
        }

        match command {
            Command::Rotate { direction } => self.rotate_shape(id, direction),
            Command::Move { col } => self.move_shape(id, col),
            Command::Drop => self.drop_shape(id),
        }
    }

    /// Move the player's shape to the given column if the board allows it.
    /// No partial moves: on failure the column is unchanged.
    pub fn move_shape(&mut self, id: PlayerId, col: i16) {
        let Some(slot) = self.players.get_mut(&id) else {
            warn!(player = id, "unknown player, cannot move shape");
            return;
        };
        let Some(shape) = slot.shape.as_mut() else {
            warn!(player = id, "player has no shape, cannot move it");
            return;
        };

        if self.board.can_place_at(shape, shape.row, col, shape.rotation as i32) {
            shape.col = col;
        }
    }

    /// Rotate the player's shape one state left or right if the result fits.
    /// Single-step rotation: no alternate offsets are tried.
    pub fn rotate_shape(&mut self, id: PlayerId, direction: RotateDir) {
        let Some(slot) = self.players.get_mut(&id) else {
            warn!(player = id, "unknown player, cannot rotate shape");
            return;
        };
        let Some(shape) = slot.shape.as_mut() else {
            warn!(player = id, "player has no shape, cannot rotate it");
            return;
        };

        let states = shape.kind.state_count() as i32;
        let candidate = (shape.rotation as i32 + direction.delta()).rem_euclid(states);
        if self.board.can_place_at(shape, shape.row, shape.col, candidate) {
            shape.rotation = candidate as u8;
        }
    }

    /// Drop the player's shape to the floor and lock it, then clear full
    /// rows, respawn for this player, and replace any other player's shape
    /// the newly locked cells invalidated.
    pub fn drop_shape(&mut self, id: PlayerId) {
        let Some(slot) = self.players.get_mut(&id) else {
            warn!(player = id, "unknown player, cannot drop shape");
            return;
        };
        let Some(shape) = slot.shape.as_mut() else {
            warn!(player = id, "player has no shape, cannot drop it");
            return;
        };

        self.board.drop_to_floor(shape);

        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            debug!(player = id, rows = cleared, "cleared full rows");
        }

        self.spawn_shape(id);
        self.replace_invalidated(id);
    }

    /// Advance the game by one tick: move every shape down one row, then
    /// lock the shapes that were resting on something and respawn them.
    ///
    /// All downward advances are decided against the pre-step board, so a
    /// lock in this tick never blocks another shape's same-tick advance.
    pub fn step(&mut self) {
        if self.game_over {
            debug!("game over, not stepping");
            return;
        }

        // Phase one: advance what can fall, snapshot what is grounded.
        let mut grounded: Vec<Shape> = Vec::new();
        for slot in self.players.values_mut() {
            let Some(shape) = slot.shape.as_mut() else {
                continue;
            };
            if self
                .board
                .can_place_at(shape, shape.row + 1, shape.col, shape.rotation as i32)
            {
                shape.row += 1;
            } else {
                grounded.push(*shape);
            }
        }

        // Phase two: lock the grounded shapes. Each snapshot is re-validated
        // at its recorded position first - an earlier lock in this loop may
        // already have replaced the player's shape.
        for snapshot in grounded {
            if self.board.can_place(&snapshot) {
                self.drop_shape(snapshot.player);
            } else {
                debug!(
                    player = snapshot.player,
                    "grounded shape no longer placeable, assuming an earlier drop replaced it"
                );
            }
        }
    }

    /// Give the player a fresh random shape at the board's horizontal
    /// center. A spawn that does not fit ends the game.
    pub fn spawn_shape(&mut self, id: PlayerId) {
        if self.game_over {
            return;
        }

        let col = (self.board.width() / 2) as i16;
        let shape = Shape::new(self.rng.next_kind(), id, col, 0, 0);

        let Some(slot) = self.players.get_mut(&id) else {
            warn!(player = id, "unknown player, cannot spawn shape");
            return;
        };
        slot.shape = Some(shape);

        if !self.board.can_place(&shape) {
            self.end_game();
        }
    }

    /// Replace every other player's shape that no longer fits the board -
    /// blocks locked elsewhere can invalidate a shape mid-air.
    fn replace_invalidated(&mut self, locked_by: PlayerId) {
        let invalidated: Vec<PlayerId> = self
            .players
            .values()
            .filter_map(|slot| slot.shape.as_ref())
            .filter(|shape| shape.player != locked_by && !self.board.can_place(shape))
            .map(|shape| shape.player)
            .collect();

        for id in invalidated {
            debug!(player = id, "shape overlaps newly locked cells, respawning");
            self.spawn_shape(id);
        }
    }

    /// Game over: shapes are discarded, the board resets, players stay
    /// registered. Every mutating entry point no-ops until an external
    /// reset builds a fresh session.
    fn end_game(&mut self) {
        info!("spawn blocked, game over");
        self.game_over = true;
        for slot in self.players.values_mut() {
            slot.shape = None;
        }
        self.board = Board::new(self.board.width(), self.board.height());
    }
}
