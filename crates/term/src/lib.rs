//! Terminal render adapter.
//!
//! The controller draws into a [`TermCanvas`] through the `RenderSink` trait.
//! Each frame, [`BoardView`] lays the canvas out into a [`FrameBuffer`] and
//! [`TerminalRenderer`] flushes the changed cells to the terminal.

pub mod canvas;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetromino_stacking_core as core;
pub use tetromino_stacking_types as types;

pub use canvas::TermCanvas;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{color_rgb, BoardView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
