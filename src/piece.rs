use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::movegen;
use crate::moves::Move;
use crate::position::Position;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row direction a pawn of this color advances in.
    pub(crate) fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Row holding this color's king and rooks at the start of the game.
    pub(crate) fn back_rank(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 8,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum PieceType {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl PieceType {
    /// The pieces a pawn may become, in the order promotion moves are generated.
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    /// Lowercase FEN letter.
    pub fn letter(self) -> char {
        match self {
            PieceType::King => 'k',
            PieceType::Queen => 'q',
            PieceType::Bishop => 'b',
            PieceType::Knight => 'n',
            PieceType::Rook => 'r',
            PieceType::Pawn => 'p',
        }
    }
}

/// A colored piece. Pieces are plain values: promotion puts a new piece on
/// the board rather than changing an existing one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Piece {
    piece_type: PieceType,
    color: Color,
}

impl Piece {
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Piece { piece_type, color }
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub const fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    /// Pseudo-legal moves for this piece standing on `position`. Ignores
    /// whether the move exposes the king, and never includes castling or
    /// en passant.
    pub fn piece_moves(&self, board: &Board, position: Position) -> Vec<Move> {
        let mut moves = Vec::new();
        movegen::piece_moves(board, position, *self, &mut moves);
        moves
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.piece_type.letter();
        match self.color {
            Color::White => write!(f, "{}", letter.to_ascii_uppercase()),
            Color::Black => write!(f, "{letter}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_fen_letters() {
        assert_eq!(Piece::new(PieceType::Knight, Color::White).to_string(), "N");
        assert_eq!(Piece::new(PieceType::Queen, Color::Black).to_string(), "q");
    }

    #[test]
    fn opposite_flips_color() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite().opposite(), Color::Black);
    }

    #[test]
    fn piece_moves_ignores_history() {
        // A lone rook in the corner of an empty board sees 14 squares.
        let mut board = Board::empty();
        let rook = Piece::new(PieceType::Rook, Color::White);
        board.add_piece(Position::new(1, 1), rook);
        assert_eq!(rook.piece_moves(&board, Position::new(1, 1)).len(), 14);
    }
}
