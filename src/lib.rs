pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod perft;
pub mod piece;
pub mod position;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(target_arch = "wasm32")]
mod wasm_api;

pub use board::Board;
pub use error::{MoveError, SnapshotError};
pub use game::{CastleSide, CastlingRights, Game, GameStatus};
pub use moves::Move;
pub use piece::{Color, Piece, PieceType};
pub use position::Position;
pub use snapshot::GameView;
