//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Intent`]s for the
//! controller. Every press is delivered once; there is no auto-repeat
//! handling beyond what the terminal itself sends.

pub mod map;

pub use tetromino_stacking_types as types;

pub use map::{handle_key_event, should_quit, KeyCommand};
