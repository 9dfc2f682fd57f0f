//! Tetromino stacking (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, integration
//! tests and benches can use `tetromino_stacking::{core,engine,input,term,types}`.

pub use tetromino_stacking_core as core;
pub use tetromino_stacking_engine as engine;
pub use tetromino_stacking_input as input;
pub use tetromino_stacking_term as term;
pub use tetromino_stacking_types as types;
