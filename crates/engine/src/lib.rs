//! Runtime glue for the game engine.
//!
//! - [`TokioTimer`]: periodic fall timer on a tokio runtime
//! - [`Session`]: owns a controller and pumps timer deliveries into it

pub mod session;
pub mod timer;

pub use tetromino_stacking_core as core;
pub use tetromino_stacking_types as types;

pub use session::Session;
pub use timer::TokioTimer;
