//! Session: the event pump between the timer runtime and the controller.
//!
//! The host calls [`Session::pump`] from its loop (typically right after
//! polling input). Ticks and intents are applied one at a time, each to
//! completion, on the caller's thread.

use anyhow::Result;
use tracing::debug;

use crate::core::{Controller, RenderSink};
use crate::timer::TokioTimer;
use crate::types::{GameConfig, Intent};

pub struct Session<R: RenderSink> {
    controller: Controller<R, TokioTimer>,
}

impl<R: RenderSink> Session<R> {
    /// Build a session with its own timer runtime. The game is not started.
    pub fn new(config: GameConfig, render: R) -> Result<Self> {
        let timer = TokioTimer::new()?;
        Ok(Self {
            controller: Controller::new(config, render, timer),
        })
    }

    /// Start (or restart) the game.
    pub fn start(&mut self) {
        self.controller.init_game();
    }

    /// Deliver every tick received since the last call. Returns how many
    /// deliveries were handed to the controller.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(id) = self.controller.timer_mut().try_recv() {
            self.controller.on_timer(id);
            delivered += 1;
        }
        delivered
    }

    pub fn handle(&mut self, intent: Intent) -> bool {
        self.controller.apply(intent)
    }

    /// Flip between multi-colour and single-colour pieces and repaint.
    pub fn toggle_color_mode(&mut self) {
        let mut options = *self.controller.config();
        options.color_mode = options.color_mode.toggled(options.main_color);
        debug!(color_mode = ?options.color_mode, "colour mode toggled");
        self.controller.apply_options(options);
    }

    pub fn controller(&self) -> &Controller<R, TokioTimer> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<R, TokioTimer> {
        &mut self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::RecordingSink;
    use crate::core::Phase;
    use crate::types::ColorMode;
    use std::thread::sleep;
    use std::time::Duration;

    fn session(tick_ms: u32) -> Session<RecordingSink> {
        let config = GameConfig {
            tick_interval_ms: tick_ms,
            seed: Some(99),
            ..GameConfig::default()
        };
        Session::new(config, RecordingSink::new()).unwrap()
    }

    #[test]
    fn pump_moves_piece_down() {
        let mut session = session(10);
        session.start();
        let start_y = session.controller().active().unwrap().y;

        sleep(Duration::from_millis(60));
        assert!(session.pump() > 0);

        assert!(session.controller().active().unwrap().y > start_y);
    }

    #[test]
    fn pump_is_idle_before_start() {
        let mut session = session(10);
        sleep(Duration::from_millis(30));
        assert_eq!(session.pump(), 0);
        assert_eq!(session.controller().phase(), Phase::Idle);
    }

    #[test]
    fn paused_session_ignores_ticks() {
        let mut session = session(10);
        session.start();
        assert!(session.handle(Intent::TogglePause));
        let before = session.controller().active();

        sleep(Duration::from_millis(50));
        assert!(session.pump() > 0);
        assert_eq!(session.controller().active(), before);
    }

    #[test]
    fn toggle_color_mode_round_trips() {
        let mut session = session(1_000);
        session.start();
        session.toggle_color_mode();
        assert!(matches!(
            session.controller().color_mode(),
            ColorMode::Single(_)
        ));
        session.toggle_color_mode();
        assert_eq!(session.controller().color_mode(), ColorMode::Multi);
    }
}
