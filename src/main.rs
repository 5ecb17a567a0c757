//! Local gameplay runner (default binary).
//!
//! Wires one local player into a session and drives it: crossterm events
//! become commands, a fixed-interval clock calls `step()`, and every frame
//! is composed and flushed to the terminal. The engine itself never touches
//! I/O - this file is the whole bootstrap.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use gridfall::core::GameSession;
use gridfall::input::{should_quit, CommandTranslator};
use gridfall::term::{compose, Terminal, BOARD_ORIGIN_COL, CELL_COLS};
use gridfall::types::{PlayerId, GAME_COLS, GAME_ROWS, STEP_INTERVAL_MS};

const LOCAL_PLAYER: PlayerId = 0;

fn main() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    // Logs go to stderr; redirect it when debugging so the board stays intact.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let mut term = Terminal::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn new_session() -> GameSession {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);
    let mut session = GameSession::new(GAME_COLS, GAME_ROWS, seed);
    session.add_player(LOCAL_PLAYER);
    session
}

fn run(term: &mut Terminal) -> Result<()> {
    let mut session = new_session();
    let mut translator = CommandTranslator::new(BOARD_ORIGIN_COL, CELL_COLS);

    let tick_duration = Duration::from_millis(STEP_INTERVAL_MS);
    let mut last_tick = Instant::now();

    loop {
        term.draw(&compose(&session))?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            let ev = event::read()?;

            if let Event::Key(key) = &ev {
                if key.kind == KeyEventKind::Press {
                    if should_quit(*key) {
                        return Ok(());
                    }
                    // External reset: a fresh session replaces the dead one.
                    if session.is_game_over() && key.code == KeyCode::Char('r') {
                        session = new_session();
                        continue;
                    }
                }
            }

            if let Some(command) = translator.translate(&ev) {
                session.on_command(LOCAL_PLAYER, command);
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.step();
        }
    }
}
