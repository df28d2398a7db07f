use serde::{Deserialize, Serialize};

use crate::moves::Move;
use crate::piece::{Color, Piece, PieceType};
use crate::position::Position;

/// Back rank layout from the a-file to the h-file.
const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// The 8x8 grid. Knows nothing about turns, history or legality: every
/// operation does exactly what it is told.
///
/// Cloning copies the grid by value, so a clone can be mutated freely to try
/// out a move without touching the original.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// A board in the standard opening position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset_board();
        board
    }

    /// Clear the grid and set up the standard 32-piece opening position.
    pub fn reset_board(&mut self) {
        self.squares = [[None; 8]; 8];
        for (color, back, pawns) in [(Color::White, 1, 2), (Color::Black, 8, 7)] {
            for (col, piece_type) in (1..=8).zip(BACK_RANK) {
                self.add_piece(Position::new(back, col), Piece::new(piece_type, color));
                self.add_piece(Position::new(pawns, col), Piece::new(PieceType::Pawn, color));
            }
        }
    }

    /// Put `piece` on `position`, replacing any occupant. Off-board writes
    /// are ignored.
    pub fn add_piece(&mut self, position: Position, piece: Piece) {
        if let Some((r, c)) = position.indices() {
            self.squares[r][c] = Some(piece);
        }
    }

    pub fn get_piece(&self, position: Position) -> Option<Piece> {
        position.indices().and_then(|(r, c)| self.squares[r][c])
    }

    /// Clear `position`, returning whatever stood there.
    pub fn remove_piece(&mut self, position: Position) -> Option<Piece> {
        position
            .indices()
            .and_then(|(r, c)| self.squares[r][c].take())
    }

    /// Relocate the occupant of `mv.from` to `mv.to`, or put a freshly
    /// promoted piece of the same color there. Does not check legality and
    /// does nothing if `mv.from` is empty.
    pub fn make_move(&mut self, mv: &Move) {
        let Some(piece) = self.remove_piece(mv.from) else {
            return;
        };
        let placed = match mv.promotion {
            Some(kind) => Piece::new(kind, piece.color()),
            None => piece,
        };
        self.add_piece(mv.to, placed);
    }

    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, p)| p.piece_type() == PieceType::King && p.color() == color)
            .map(|(pos, _)| pos)
    }

    /// Every occupied square, rank by rank from row 1.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(r, rank)| {
            rank.iter().enumerate().filter_map(move |(c, square)| {
                square.map(|p| (Position::new(r as i8 + 1, c as i8 + 1), p))
            })
        })
    }

    /// Pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color() == color)
    }
}
