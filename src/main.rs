//! Terminal runner (default binary).
//!
//! crossterm for input, the framebuffer renderer for output, and a tokio
//! timer runtime for the fall ticks. Everything game-related runs on the main
//! thread.

use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tetromino_stacking::engine::Session;
use tetromino_stacking::input::{handle_key_event, should_quit, KeyCommand};
use tetromino_stacking::term::{BoardView, FrameBuffer, TermCanvas, TerminalRenderer, Viewport};
use tetromino_stacking::types::GameConfig;

/// Upper bound on how long input polling may block between pumps
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    init_logging()?;

    let config = GameConfig::from_env();
    info!(?config, "starting");
    let mut session = Session::new(config, TermCanvas::new())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to the file named by `STACKING_LOG`, if set. The terminal belongs to the game.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("STACKING_LOG") else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("cannot open log file {}", path.to_string_lossy()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("cannot install log subscriber: {err}"))
}

fn run(term: &mut TerminalRenderer, session: &mut Session<TermCanvas>) -> Result<()> {
    session.start();

    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        session.pump();

        let dirty = session.controller_mut().render_mut().take_dirty();
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(session.controller().render(), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        if !event::poll(FRAME)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if should_quit(key) {
                    info!(score = session.controller().score(), "quit");
                    return Ok(());
                }
                let tick_ms = session.controller().tick_interval_ms();
                match handle_key_event(key, tick_ms) {
                    Some(KeyCommand::Game(intent)) => {
                        session.handle(intent);
                    }
                    Some(KeyCommand::ToggleColorMode) => session.toggle_color_mode(),
                    None => {}
                }
            }
            Event::Resize(..) => {
                term.invalidate();
                session.controller_mut().render_mut().mark_dirty();
            }
            _ => {}
        }
    }
}
