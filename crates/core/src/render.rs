//! Render adapter seam.
//!
//! The controller reports every visible change through a [`RenderSink`]. Calls
//! are fire-and-forget: nothing is returned and the controller never waits on
//! the adapter. Geometry, colours on screen and layout belong to the adapter.

use crate::types::{Color, PieceKind, QUEUE_LEN};

pub trait RenderSink {
    /// Paint board cell (x, y); `None` clears it
    fn draw_cell(&mut self, x: i8, y: i8, color: Option<Color>);

    /// Show the upcoming pieces, front first, each in its resolved colour
    fn draw_queue_preview(&mut self, kinds: &[PieceKind; QUEUE_LEN], colors: &[Color; QUEUE_LEN]);

    fn draw_score(&mut self, score: u32);

    fn draw_game_over(&mut self);

    fn draw_paused(&mut self, _paused: bool) {}

    /// Drop everything painted so far (start of a full repaint)
    fn clear(&mut self) {}
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn draw_cell(&mut self, x: i8, y: i8, color: Option<Color>) {
        (**self).draw_cell(x, y, color)
    }

    fn draw_queue_preview(&mut self, kinds: &[PieceKind; QUEUE_LEN], colors: &[Color; QUEUE_LEN]) {
        (**self).draw_queue_preview(kinds, colors)
    }

    fn draw_score(&mut self, score: u32) {
        (**self).draw_score(score)
    }

    fn draw_game_over(&mut self) {
        (**self).draw_game_over()
    }

    fn draw_paused(&mut self, paused: bool) {
        (**self).draw_paused(paused)
    }

    fn clear(&mut self) {
        (**self).clear()
    }
}

/// Sink that ignores every call (headless runs, benchmarks)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw_cell(&mut self, _x: i8, _y: i8, _color: Option<Color>) {}
    fn draw_queue_preview(&mut self, _kinds: &[PieceKind; QUEUE_LEN], _colors: &[Color; QUEUE_LEN]) {}
    fn draw_score(&mut self, _score: u32) {}
    fn draw_game_over(&mut self) {}
}

/// A single recorded render call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    Cell { x: i8, y: i8, color: Option<Color> },
    Queue([PieceKind; QUEUE_LEN], [Color; QUEUE_LEN]),
    Score(u32),
    GameOver,
    Paused(bool),
    Clear,
}

/// Sink that records calls in order (tests and debugging)
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    calls: Vec<DrawCall>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Most recent colour painted at (x, y), if any call touched it
    pub fn last_cell(&self, x: i8, y: i8) -> Option<Option<Color>> {
        self.calls.iter().rev().find_map(|call| match *call {
            DrawCall::Cell { x: cx, y: cy, color } if cx == x && cy == y => Some(color),
            _ => None,
        })
    }

    pub fn last_score(&self) -> Option<u32> {
        self.calls.iter().rev().find_map(|call| match *call {
            DrawCall::Score(score) => Some(score),
            _ => None,
        })
    }

    pub fn saw_game_over(&self) -> bool {
        self.calls.contains(&DrawCall::GameOver)
    }
}

impl RenderSink for RecordingSink {
    fn draw_cell(&mut self, x: i8, y: i8, color: Option<Color>) {
        self.calls.push(DrawCall::Cell { x, y, color });
    }

    fn draw_queue_preview(&mut self, kinds: &[PieceKind; QUEUE_LEN], colors: &[Color; QUEUE_LEN]) {
        self.calls.push(DrawCall::Queue(*kinds, *colors));
    }

    fn draw_score(&mut self, score: u32) {
        self.calls.push(DrawCall::Score(score));
    }

    fn draw_game_over(&mut self) {
        self.calls.push(DrawCall::GameOver);
    }

    fn draw_paused(&mut self, paused: bool) {
        self.calls.push(DrawCall::Paused(paused));
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }
}
