//! Error taxonomy for board access and controller transitions.

use thiserror::Error;

use crate::controller::Phase;
use crate::types::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// Grid access outside the board. Unreachable in correct play.
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: i8, y: i8 },

    /// Attempted write to a wall or floor cell.
    #[error("cell ({x}, {y}) is a border sentinel and cannot be written")]
    BorderCell { x: i8, y: i8 },

    /// Attempted to place a wall/floor value inside the well.
    #[error("cannot write a border sentinel into interior cell ({x}, {y})")]
    SentinelWrite { x: i8, y: i8 },

    /// Intent received in a phase that does not accept it.
    #[error("{} is not accepted while {phase:?}", intent.as_str())]
    InvalidTransition { intent: Intent, phase: Phase },

    #[error("tick interval must be a positive number of milliseconds")]
    InvalidTickInterval,
}
