//! Core game logic module - rules, state machine and adapter seams
//!
//! Everything here is synchronous and single-threaded. The controller never
//! touches a terminal or a clock directly: drawing goes through [`RenderSink`]
//! and the fall timer through [`TimerService`], so the whole game can be driven
//! deterministically from tests.
//!
//! # Module Structure
//!
//! - [`board`]: 12x24 grid with built-in walls and floor, commit and row compaction
//! - [`pieces`]: fixed shape table for the seven kinds in four orientations
//! - [`piece`]: the falling piece and its collision test
//! - [`queue`]: seeded three-piece lookahead
//! - [`controller`]: session state machine (idle, falling, paused, game over)
//! - [`render`]: render sink trait plus null and recording sinks
//! - [`timer`]: timer service trait plus a manual timer
//! - [`error`]: error taxonomy
//!
//! # Game Rules
//!
//! - Pieces spawn at (4, 0) in a random orientation, with no collision check
//! - Movement and rotation are rejected when any target cell is not empty; no wall kicks
//! - A piece that cannot fall is committed immediately, there is no lock delay
//! - Full rows cascade downward; the k-th clear in one pass is worth k points
//! - The game ends when a commit leaves anything in row 2
//!
//! # Example
//!
//! ```
//! use tetromino_stacking_core::render::RecordingSink;
//! use tetromino_stacking_core::timer::ManualTimer;
//! use tetromino_stacking_core::{Controller, Phase};
//! use tetromino_stacking_types::{GameConfig, Intent};
//!
//! let config = GameConfig {
//!     seed: Some(7),
//!     ..GameConfig::default()
//! };
//! let mut game = Controller::new(config, RecordingSink::new(), ManualTimer::new());
//! game.init_game();
//!
//! game.apply(Intent::MoveRight);
//! game.apply(Intent::Drop);
//!
//! assert_eq!(game.phase(), Phase::Falling);
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod controller;
pub mod error;
pub mod piece;
pub mod pieces;
pub mod queue;
pub mod render;
pub mod timer;

pub use tetromino_stacking_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, GroomReport};
pub use controller::{Controller, DescendOutcome, Phase};
pub use error::GameError;
pub use piece::FallingPiece;
pub use pieces::get_shape;
pub use queue::PieceQueue;
pub use render::{NullSink, RenderSink};
pub use timer::{ManualTimer, TimerService};
