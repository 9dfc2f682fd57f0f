//! TermCanvas: a [`RenderSink`] that keeps what the controller has drawn.
//!
//! The controller paints incrementally (changed cells only); the canvas keeps
//! the accumulated picture so that [`crate::BoardView`] can turn it into a
//! full frame whenever the terminal needs one.

use crate::core::RenderSink;
use crate::types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, QUEUE_LEN};

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermCanvas {
    cells: [[Option<Color>; W]; H],
    queue: Option<([PieceKind; QUEUE_LEN], [Color; QUEUE_LEN])>,
    score: u32,
    paused: bool,
    game_over: bool,
    dirty: bool,
}

impl Default for TermCanvas {
    fn default() -> Self {
        Self {
            cells: [[None; W]; H],
            queue: None,
            score: 0,
            paused: false,
            game_over: false,
            dirty: true,
        }
    }
}

impl TermCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colour painted at (x, y); `None` for empty or off-board cells
    pub fn cell(&self, x: i8, y: i8) -> Option<Color> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .flatten()
    }

    pub fn queue(&self) -> Option<&([PieceKind; QUEUE_LEN], [Color; QUEUE_LEN])> {
        self.queue.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Whether anything changed since the last `take_dirty`
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Force the next `take_dirty` to report a change (terminal resize).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl RenderSink for TermCanvas {
    fn draw_cell(&mut self, x: i8, y: i8, color: Option<Color>) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(slot) = self
            .cells
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *slot = color;
            self.dirty = true;
        }
    }

    fn draw_queue_preview(&mut self, kinds: &[PieceKind; QUEUE_LEN], colors: &[Color; QUEUE_LEN]) {
        self.queue = Some((*kinds, *colors));
        self.dirty = true;
    }

    fn draw_score(&mut self, score: u32) {
        self.score = score;
        self.dirty = true;
    }

    fn draw_game_over(&mut self) {
        self.game_over = true;
        self.dirty = true;
    }

    fn draw_paused(&mut self, paused: bool) {
        self.paused = paused;
        self.dirty = true;
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_cell_calls() {
        let mut canvas = TermCanvas::new();
        assert!(canvas.take_dirty());
        assert!(!canvas.take_dirty());

        canvas.draw_cell(3, 7, Some(Color::Red));
        assert_eq!(canvas.cell(3, 7), Some(Color::Red));
        assert!(canvas.take_dirty());

        canvas.draw_cell(3, 7, None);
        assert_eq!(canvas.cell(3, 7), None);
    }

    #[test]
    fn ignores_off_board_cells() {
        let mut canvas = TermCanvas::new();
        canvas.take_dirty();
        canvas.draw_cell(-1, 0, Some(Color::Blue));
        canvas.draw_cell(0, BOARD_HEIGHT as i8, Some(Color::Blue));
        assert!(!canvas.take_dirty());
    }

    #[test]
    fn clear_resets_overlays() {
        let mut canvas = TermCanvas::new();
        canvas.draw_game_over();
        canvas.draw_paused(true);
        canvas.draw_score(12);
        canvas.clear();
        assert!(!canvas.is_game_over());
        assert!(!canvas.is_paused());
        assert_eq!(canvas.score(), 0);
    }
}
