use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SnapshotError;
use crate::game::Game;
use crate::moves::Move;
use crate::piece::{Color, PieceType};
use crate::position::Position;

// =============================================================================
// Persistence
// =============================================================================

impl Game {
    /// Serialize the whole game (board, turn, history-derived state) to JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a game written by `to_json`. Rejects boards that don't have
    /// exactly one king per side.
    pub fn from_json(json: &str) -> Result<Game, SnapshotError> {
        let game: Game = serde_json::from_str(json)?;
        for color in [Color::White, Color::Black] {
            let kings = game
                .board()
                .pieces_of(color)
                .filter(|(_, p)| p.piece_type() == PieceType::King)
                .count();
            match kings {
                0 => return Err(SnapshotError::MissingKing(color)),
                1 => {}
                _ => return Err(SnapshotError::ExtraKing(color)),
            }
        }
        debug!(turn = ?game.team_turn(), "game restored");
        Ok(game)
    }
}

// =============================================================================
// Read-only view for display and transport
//
// Plain strings and 1-based [row, column] pairs so a front end never has to
// know the engine's types.
// =============================================================================

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct SquarePiece {
    pub piece_type: String,
    pub color: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MoveJson {
    pub from: [i8; 2],
    pub to: [i8; 2],
    pub promotion: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct GameView {
    /// Row 1 first; each row from column 1.
    pub squares: Vec<Vec<Option<SquarePiece>>>,
    pub current_turn: String,
    pub game_over: bool,
    pub is_in_check: bool,
    pub legal_moves: Vec<MoveJson>,
    pub last_move: Option<MoveJson>,
}

pub fn piece_type_to_string(pt: PieceType) -> String {
    format!("{pt:?}")
}

/// Promotion choices only; anything else is `None`.
pub fn string_to_piece_type(s: &str) -> Option<PieceType> {
    match s {
        "Queen" => Some(PieceType::Queen),
        "Rook" => Some(PieceType::Rook),
        "Bishop" => Some(PieceType::Bishop),
        "Knight" => Some(PieceType::Knight),
        _ => None,
    }
}

impl From<&Move> for MoveJson {
    fn from(m: &Move) -> Self {
        MoveJson {
            from: [m.from.row(), m.from.column()],
            to: [m.to.row(), m.to.column()],
            promotion: m.promotion.map(piece_type_to_string),
        }
    }
}

impl GameView {
    pub fn from_game(game: &Game) -> Self {
        let board = game.board();
        let squares = (1..=8)
            .map(|r| {
                (1..=8)
                    .map(|c| {
                        board
                            .get_piece(Position::new(r, c))
                            .map(|p| SquarePiece {
                                piece_type: piece_type_to_string(p.piece_type()),
                                color: p.color().to_string(),
                            })
                    })
                    .collect()
            })
            .collect();

        let turn = game.team_turn();
        let legal_moves = if game.is_game_over() {
            Vec::new()
        } else {
            game.legal_moves(turn).iter().map(MoveJson::from).collect()
        };

        GameView {
            squares,
            current_turn: turn.to_string(),
            game_over: game.is_game_over(),
            is_in_check: game.is_in_check(turn),
            legal_moves,
            last_move: game.last_move().map(|m| MoveJson::from(&m)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip_keeps_history_state() {
        let mut game = Game::new();
        game.make_move(&Move::new(Position::new(2, 5), Position::new(4, 5))).unwrap();
        let json = game.to_json().unwrap();
        let restored = Game::from_json(&json).unwrap();
        assert_eq!(restored, game);
        assert!(restored.en_passant_valid());
        assert_eq!(restored.team_turn(), Color::Black);
    }

    #[test]
    fn restore_rejects_missing_king() {
        let mut game = Game::new();
        let mut board = game.board().clone();
        board.remove_piece(Position::new(8, 5));
        game.set_board(board);
        let json = game.to_json().unwrap();
        assert!(matches!(
            Game::from_json(&json),
            Err(SnapshotError::MissingKing(Color::Black))
        ));
    }

    #[test]
    fn restore_rejects_garbage() {
        let err = Game::from_json("{\"board\": 3}").unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
        assert!(err.to_string().starts_with("Malformed game snapshot"));
    }

    #[test]
    fn view_of_opening() {
        let view = GameView::from_game(&Game::new());
        assert_eq!(view.current_turn, "White");
        assert_eq!(view.legal_moves.len(), 20);
        assert!(!view.is_in_check);
        assert_eq!(view.last_move, None);
        assert_eq!(
            view.squares[0][4],
            Some(SquarePiece {
                piece_type: "King".to_string(),
                color: "White".to_string(),
            })
        );
        assert_eq!(view.squares[3][3], None);
    }

    #[test]
    fn view_of_finished_game_offers_no_moves() {
        let mut game = Game::new();
        game.end_game();
        let view = GameView::from_game(&game);
        assert!(view.game_over);
        assert!(view.legal_moves.is_empty());
    }

    #[test]
    fn promotion_names() {
        assert_eq!(string_to_piece_type("Knight"), Some(PieceType::Knight));
        assert_eq!(string_to_piece_type("King"), None);
        assert_eq!(piece_type_to_string(PieceType::Rook), "Rook");
    }
}
