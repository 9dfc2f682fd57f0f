//! BoardView: turns a [`TermCanvas`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::canvas::TermCanvas;
use crate::core::pieces::preview_shape;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_ZONE_ROWS};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const BACKGROUND: Rgb = Rgb::new(47, 79, 79);
const WELL: Rgb = Rgb::new(30, 30, 40);
const WALL: Rgb = Rgb::new(110, 110, 120);

/// Largest supported cell size, in terminal columns and rows.
const MAX_CELL_W: u16 = 8;
const MAX_CELL_H: u16 = 4;

const PANEL_LABEL: CellStyle = CellStyle::new(Rgb::new(230, 230, 230), BACKGROUND).bold();
const PANEL_VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), BACKGROUND);

/// Screen colour of a palette entry
pub fn color_rgb(color: Color) -> Rgb {
    match color {
        Color::Red => Rgb::new(220, 60, 60),
        Color::Blue => Rgb::new(70, 110, 230),
        Color::Green => Rgb::new(90, 200, 100),
        Color::Cyan => Rgb::new(80, 220, 220),
        Color::Orange => Rgb::new(255, 165, 0),
        Color::Yellow => Rgb::new(240, 220, 80),
        Color::Violet => Rgb::new(190, 110, 230),
    }
}

/// Terminal layout for the board, queue preview and score.
#[derive(Debug, Clone, Copy)]
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 roughly compensates for the glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_W),
            cell_h: cell_h.clamp(1, MAX_CELL_H),
        }
    }

    /// Size of the board area in terminal cells
    pub fn board_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16).saturating_mul(self.cell_w),
            (BOARD_HEIGHT as u16).saturating_mul(self.cell_h),
        )
    }

    /// Render into an existing framebuffer (resized to the viewport).
    pub fn render_into(&self, canvas: &TermCanvas, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(BACKGROUND, BACKGROUND).cell(' '));

        let (board_w, board_h) = self.board_size();
        let start_x = viewport.width.saturating_sub(board_w.saturating_add(14)) / 2;
        let start_y = viewport.height.saturating_sub(board_h) / 2;

        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                let (ch, style) = self.cell_glyph(canvas, x, y);
                let px = start_x.saturating_add(x as u16 * self.cell_w);
                let py = start_y.saturating_add(y as u16 * self.cell_h);
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }

        let panel_x = start_x.saturating_add(board_w).saturating_add(2);
        self.draw_panel(fb, canvas, panel_x, start_y);

        let overlay = if canvas.is_game_over() {
            Some("GAME OVER")
        } else if canvas.is_paused() {
            Some("PAUSED")
        } else {
            None
        };
        if let Some(text) = overlay {
            let text_w = text.chars().count() as u16;
            let x = start_x.saturating_add(board_w.saturating_sub(text_w) / 2);
            let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            fb.put_str(x, start_y.saturating_add(board_h / 2), text, style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, canvas: &TermCanvas, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(canvas, viewport, &mut fb);
        fb
    }

    fn cell_glyph(&self, canvas: &TermCanvas, x: u8, y: u8) -> (char, CellStyle) {
        let is_wall = x == 0 || x == BOARD_WIDTH - 1 || y == BOARD_HEIGHT - 1;
        if is_wall {
            return ('▓', CellStyle::new(WALL, BACKGROUND));
        }

        match canvas.cell(x as i8, y as i8) {
            Some(color) => ('█', CellStyle::new(color_rgb(color), WELL)),
            // The spawn zone sits above the well and has no grid.
            None if y < SPAWN_ZONE_ROWS => (' ', CellStyle::new(BACKGROUND, BACKGROUND)),
            None => ('·', CellStyle::new(Rgb::new(90, 90, 100), WELL).dim()),
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, canvas: &TermCanvas, x: u16, start_y: u16) {
        let mut y = start_y;
        fb.put_str(x, y, "SCORE", PANEL_LABEL);
        y += 1;
        fb.put_u32(x, y, canvas.score(), PANEL_VALUE);
        y += 2;

        fb.put_str(x, y, "NEXT", PANEL_LABEL);
        y += 1;
        if let Some((kinds, colors)) = canvas.queue() {
            for (&kind, &color) in kinds.iter().zip(colors.iter()) {
                let style = CellStyle::new(color_rgb(color), BACKGROUND);
                // Shapes occupy rows 1..=3 of their box in the north orientation.
                for &(dx, dy) in preview_shape(kind).iter() {
                    let px = x + dx as u16 * 2;
                    let py = y + (dy as u16).saturating_sub(1);
                    fb.put_str(px, py, "██", style);
                }
                y += 4;
            }
        }

        y += 1;
        for hint in ["←→ move", "↑ z rotate", "↓ drop", "p pause", "q quit"] {
            fb.put_str(x, y, hint, PANEL_VALUE.dim());
            y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RenderSink;

    #[test]
    fn walls_and_floor_are_drawn() {
        let view = BoardView::default();
        let canvas = TermCanvas::new();
        let fb = view.render(&canvas, Viewport::new(24, 24));

        // Board fills the viewport exactly at 2x1 cells.
        assert_eq!(fb.get(0, 10).map(|c| c.ch), Some('▓'));
        assert_eq!(fb.get(23, 10).map(|c| c.ch), Some('▓'));
        assert_eq!(fb.get(10, 23).map(|c| c.ch), Some('▓'));
        assert_eq!(fb.get(2, 10).map(|c| c.ch), Some('·'));
        assert_eq!(fb.get(2, 1).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn painted_cells_use_palette() {
        let view = BoardView::default();
        let mut canvas = TermCanvas::new();
        canvas.draw_cell(5, 20, Some(Color::Orange));
        let fb = view.render(&canvas, Viewport::new(24, 24));

        let cell = fb.get(10, 20).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, color_rgb(Color::Orange));
        assert_eq!(fb.get(11, 20), Some(cell));
    }

    #[test]
    fn game_over_overlay() {
        let view = BoardView::default();
        let mut canvas = TermCanvas::new();
        canvas.draw_game_over();
        let fb = view.render(&canvas, Viewport::new(24, 24));
        assert!(fb.row_text(12).contains("GAME OVER"));
    }

    #[test]
    fn oversized_cells_are_clamped() {
        let view = BoardView::new(u16::MAX, u16::MAX);
        let (w, h) = view.board_size();
        assert_eq!((w, h), (BOARD_WIDTH as u16 * 8, BOARD_HEIGHT as u16 * 4));

        let mut canvas = TermCanvas::new();
        canvas.draw_paused(true);
        let fb = view.render(&canvas, Viewport::new(10, 5));
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('▓'));
        assert_eq!((fb.width(), fb.height()), (10, 5));
    }
}
