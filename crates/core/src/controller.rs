//! Controller module - the game state machine
//!
//! Ties together board, piece queue, falling piece and session state. Every
//! state change comes from either a timer tick or a player intent, and each is
//! handled to completion before the next one. After each visible change the
//! controller reports it through its [`RenderSink`].
//!
//! ```text
//!  Idle ──init_game──▶ Falling ◀──toggle_pause──▶ Paused
//!                        │
//!                        └─ commit leaves the spawn reference row dirty ─▶ GameOver
//! ```
//!
//! `init_game` is accepted from any phase and always lands in `Falling`.

use arrayvec::ArrayVec;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace, warn};

use crate::board::{Board, GroomReport};
use crate::error::GameError;
use crate::piece::FallingPiece;
use crate::queue::PieceQueue;
use crate::render::RenderSink;
use crate::timer::TimerService;
use crate::types::*;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No session started yet
    Idle,
    /// Piece falling, timer running, input accepted
    Falling,
    /// Timer still scheduled but ticks and moves are ignored
    Paused,
    /// Terminal; only a new `init_game` leaves it
    GameOver,
}

/// What a descend attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescendOutcome {
    /// Piece moved down one row
    Moved,
    /// Piece was committed and the next one spawned
    Committed(GroomReport),
    /// Piece was committed and the spawn area is obstructed
    GameOver(GroomReport),
}

/// Complete game session
#[derive(Debug)]
pub struct Controller<R: RenderSink, T: TimerService> {
    board: Board,
    queue: PieceQueue,
    active: Option<FallingPiece>,
    phase: Phase,
    score: u32,
    config: GameConfig,
    /// Orientation draws for spawned pieces
    rng: ChaCha8Rng,
    timer: T,
    timer_id: Option<TimerId>,
    render: R,
}

impl<R: RenderSink, T: TimerService> Controller<R, T> {
    /// Create an idle controller. Nothing is drawn or scheduled until `init_game`.
    pub fn new(config: GameConfig, render: R, timer: T) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let queue = PieceQueue::with_rng(ChaCha8Rng::seed_from_u64(seed));
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(1);

        Self {
            board: Board::new(),
            queue,
            active: None,
            phase: Phase::Idle,
            score: 0,
            config,
            rng,
            timer,
            timer_id: None,
            render,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<FallingPiece> {
        self.active
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.config.tick_interval_ms
    }

    pub fn color_mode(&self) -> ColorMode {
        self.config.color_mode
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    /// Whether a fall timer is live
    pub fn is_running(&self) -> bool {
        self.timer_id.is_some()
    }

    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer_id
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Mutable access to the timer service, for hosts that poll it for ticks.
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn render(&self) -> &R {
        &self.render
    }

    pub fn render_mut(&mut self) -> &mut R {
        &mut self.render
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: FallingPiece) {
        self.active = Some(piece);
    }

    /// Start a new session from any phase.
    ///
    /// Clears the board, resets the score, refills the queue, spawns the first
    /// piece, unpauses and (re)starts the fall timer.
    pub fn init_game(&mut self) {
        self.board.reset();
        self.score = 0;
        self.queue.refill();
        self.spawn_next();
        self.phase = Phase::Falling;
        self.arm_timer();

        info!(
            tick_ms = self.config.tick_interval_ms,
            first = ?self.active.map(|p| p.kind),
            "session started"
        );
        self.repaint();
    }

    /// Switch between `Falling` and `Paused`. The timer keeps running.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Falling => Phase::Paused,
            Phase::Paused => Phase::Falling,
            phase => {
                self.reject(Intent::TogglePause, phase);
                return false;
            }
        };
        debug!(paused = self.is_paused(), "pause toggled");
        self.render.draw_paused(self.is_paused());
        true
    }

    /// Handle a delivery from the timer service.
    ///
    /// Deliveries from a task that is no longer live are dropped.
    pub fn on_timer(&mut self, id: TimerId) -> Option<DescendOutcome> {
        if self.timer_id != Some(id) {
            debug!(?id, live = ?self.timer_id, "stale timer tick dropped");
            return None;
        }
        self.tick()
    }

    /// Fall timer tick
    pub fn tick(&mut self) -> Option<DescendOutcome> {
        if !self.accepts(Intent::Drop) {
            return None;
        }
        self.attempt_descend()
    }

    /// Explicit drop request from the player
    pub fn descend(&mut self) -> Option<DescendOutcome> {
        self.tick()
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(Intent::MoveLeft, -1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(Intent::MoveRight, 1)
    }

    /// Rotate in place. No wall kicks: a blocked rotation leaves the piece as it was.
    pub fn rotate(&mut self, direction: RotationDirection) -> bool {
        let intent = match direction {
            RotationDirection::Clockwise => Intent::RotateCw,
            RotationDirection::CounterClockwise => Intent::RotateCcw,
        };
        if !self.accepts(intent) {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.rotated(direction);
        if !rotated.fits(&self.board) {
            trace!(kind = ?active.kind, from = ?active.rotation, "rotation blocked");
            return false;
        }
        self.replace_active(active, rotated);
        true
    }

    /// Change the fall interval. A live timer is replaced by one at the new rate.
    pub fn set_tick_interval(&mut self, interval_ms: u32) -> bool {
        if interval_ms == 0 {
            warn!(error = %GameError::InvalidTickInterval, "tick interval ignored");
            return false;
        }
        if interval_ms == self.config.tick_interval_ms {
            return false;
        }

        self.config.tick_interval_ms = interval_ms;
        if self.timer_id.is_some() {
            self.arm_timer();
        }
        info!(tick_ms = interval_ms, "tick interval changed");
        true
    }

    /// Apply a new set of options: fall interval and colour mode.
    ///
    /// Everything on screen is repainted in the new colours.
    pub fn apply_options(&mut self, config: GameConfig) {
        self.set_tick_interval(config.tick_interval_ms);
        self.config.color_mode = config.color_mode;
        self.config.main_color = config.main_color;
        debug!(color_mode = ?config.color_mode, "options applied");
        if self.phase != Phase::Idle {
            self.repaint();
        }
    }

    /// Apply a player intent. Returns whether anything changed.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft => self.move_left(),
            Intent::MoveRight => self.move_right(),
            Intent::RotateCw => self.rotate(RotationDirection::Clockwise),
            Intent::RotateCcw => self.rotate(RotationDirection::CounterClockwise),
            Intent::Drop => self.descend().is_some(),
            Intent::TogglePause => self.toggle_pause(),
            Intent::Restart => {
                self.init_game();
                true
            }
            Intent::SetTickInterval(ms) => self.set_tick_interval(ms),
        }
    }

    fn ensure_falling(&self, intent: Intent) -> Result<(), GameError> {
        match self.phase {
            Phase::Falling => Ok(()),
            phase => Err(GameError::InvalidTransition { intent, phase }),
        }
    }

    /// Gate for move/rotate/drop. Rejections are silent no-ops.
    fn accepts(&self, intent: Intent) -> bool {
        match self.ensure_falling(intent) {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, "intent ignored");
                false
            }
        }
    }

    fn reject(&self, intent: Intent, phase: Phase) {
        debug!(error = %GameError::InvalidTransition { intent, phase }, "intent ignored");
    }

    fn try_shift(&mut self, intent: Intent, dx: i8) -> bool {
        if !self.accepts(intent) {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let shifted = active.shifted(dx, 0);
        if !shifted.fits(&self.board) {
            return false;
        }
        self.replace_active(active, shifted);
        true
    }

    fn attempt_descend(&mut self) -> Option<DescendOutcome> {
        let active = self.active?;

        let lowered = active.shifted(0, 1);
        if lowered.fits(&self.board) {
            self.replace_active(active, lowered);
            return Some(DescendOutcome::Moved);
        }

        Some(self.commit(active))
    }

    /// Lock the piece into the board, compact, score, then spawn or end the game.
    fn commit(&mut self, piece: FallingPiece) -> DescendOutcome {
        if let Err(err) = self.board.commit(&piece.cells(), piece.kind) {
            warn!(error = %err, ?piece, "commit rejected");
        }
        self.active = None;

        let report = self.board.groom();
        self.score += report.points;
        trace!(
            kind = ?piece.kind,
            x = piece.x,
            y = piece.y,
            rows = report.rows_cleared,
            points = report.points,
            "piece committed"
        );

        if report.rows_cleared > 0 {
            self.repaint_board();
            self.render.draw_score(self.score);
        }

        let reference_empty = self.board.count_empty_in_row(SPAWN_REFERENCE_ROW as i8);
        if reference_empty != self.board.interior_width() {
            self.phase = Phase::GameOver;
            self.disarm_timer();
            info!(score = self.score, "game over");
            self.render.draw_game_over();
            return DescendOutcome::GameOver(report);
        }

        self.spawn_next();
        self.draw_active();
        self.draw_queue();
        DescendOutcome::Committed(report)
    }

    /// Take the front of the queue and place it at the spawn origin with a
    /// random orientation. The spawn cells are not checked.
    fn spawn_next(&mut self) {
        let kind = self.queue.dequeue_and_refill();
        let rotation = Rotation::from_index(self.rng.gen_range(0..4));
        self.active = Some(FallingPiece::spawn(kind, rotation));
    }

    fn arm_timer(&mut self) {
        self.disarm_timer();
        let id = self.timer.schedule_periodic(self.config.tick_interval_ms);
        trace!(?id, tick_ms = self.config.tick_interval_ms, "fall timer armed");
        self.timer_id = Some(id);
    }

    fn disarm_timer(&mut self) {
        if let Some(id) = self.timer_id.take() {
            self.timer.cancel(id);
            trace!(?id, "fall timer cancelled");
        }
    }

    fn replace_active(&mut self, old: FallingPiece, new: FallingPiece) {
        self.active = Some(new);

        let new_cells = new.cells();
        let stale: ArrayVec<(i8, i8), 4> = old
            .cells()
            .into_iter()
            .filter(|cell| !new_cells.contains(cell))
            .collect();
        // A spawn may overlap committed cells, so vacated cells show the board.
        for (x, y) in stale {
            let color = self.committed_color(x, y);
            self.render.draw_cell(x, y, color);
        }
        self.draw_active();
    }

    fn color_of(&self, kind: PieceKind) -> Color {
        self.config.color_mode.resolve(kind)
    }

    fn committed_color(&self, x: i8, y: i8) -> Option<Color> {
        self.board
            .cell(x, y)
            .ok()
            .and_then(CellState::piece)
            .map(|kind| self.color_of(kind))
    }

    fn draw_active(&mut self) {
        if let Some(active) = self.active {
            let color = self.color_of(active.kind);
            for (x, y) in active.cells() {
                self.render.draw_cell(x, y, Some(color));
            }
        }
    }

    fn draw_queue(&mut self) {
        let kinds = *self.queue.peek();
        let colors = kinds.map(|kind| self.color_of(kind));
        self.render.draw_queue_preview(&kinds, &colors);
    }

    /// Paint every interior cell from the board
    fn repaint_board(&mut self) {
        for y in 0..(BOARD_HEIGHT - 1) as i8 {
            for x in 1..=INTERIOR_WIDTH as i8 {
                let color = self.committed_color(x, y);
                self.render.draw_cell(x, y, color);
            }
        }
    }

    fn repaint(&mut self) {
        self.render.clear();
        self.repaint_board();
        self.draw_active();
        self.draw_queue();
        self.render.draw_score(self.score);
        match self.phase {
            Phase::Paused => self.render.draw_paused(true),
            Phase::GameOver => self.render.draw_game_over(),
            Phase::Idle | Phase::Falling => {}
        }
    }
}
