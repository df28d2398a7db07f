//! Error types for the rules engine.
//!
//! Only `make_move` and snapshot restoration can fail; every query is total.

use crate::moves::Move;
use crate::piece::Color;
use crate::position::Position;

/// Why `Game::make_move` rejected a move. A rejected move changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Invalid move: the game is already over")]
    GameOver,

    #[error("Invalid move: there is no piece at {square}")]
    NoPiece { square: Position },

    #[error("Invalid move: it is not {color}'s turn")]
    NotYourTurn { color: Color },

    #[error("Invalid move: {mv} is not a legal move")]
    IllegalMove { mv: Move },
}

/// Errors restoring a persisted game.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Malformed game snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot has no {0} king")]
    MissingKing(Color),

    #[error("Snapshot has more than one {0} king")]
    ExtraKing(Color),
}

/// Result type alias for move application
pub type MoveResult<T> = Result<T, MoveError>;
