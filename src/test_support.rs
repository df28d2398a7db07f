//! Board setup helpers shared by the unit tests.

use crate::board::Board;
use crate::piece::{Color, Piece, PieceType};
use crate::position::Position;

/// Build a board from the piece-placement field of a FEN string, rank 8
/// first. Panics on anything it doesn't understand; test input only.
pub fn board_from_placement(placement: &str) -> Board {
    let mut board = Board::empty();
    let ranks: Vec<&str> = placement.split('/').collect();
    assert_eq!(ranks.len(), 8, "placement needs 8 ranks: {placement}");
    for (i, rank) in ranks.iter().enumerate() {
        let row = 8 - i as i8;
        let mut col = 1i8;
        for ch in rank.chars() {
            if let Some(skip) = ch.to_digit(10) {
                col += skip as i8;
                continue;
            }
            let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };
            let kind = match ch.to_ascii_lowercase() {
                'k' => PieceType::King,
                'q' => PieceType::Queen,
                'r' => PieceType::Rook,
                'b' => PieceType::Bishop,
                'n' => PieceType::Knight,
                'p' => PieceType::Pawn,
                other => panic!("unknown piece letter {other:?}"),
            };
            board.add_piece(Position::new(row, col), Piece::new(kind, color));
            col += 1;
        }
        assert_eq!(col, 9, "rank {row} does not cover 8 files: {rank}");
    }
    board
}

/// Shorthand for a 1-indexed square.
pub fn sq(row: i8, col: i8) -> Position {
    Position::new(row, col)
}
