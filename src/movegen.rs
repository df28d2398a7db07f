// =============================================================================
// Pseudo-legal move generation
//
// Every piece except the pawn is described by a set of direction vectors and
// whether it slides along them or takes a single step. The pawn's asymmetric
// rules (push vs. capture, double step, promotion) get their own generator.
//
// Nothing here knows about turn order, castling rights or en passant: those
// depend on history, which lives in Game.
// =============================================================================

use crate::board::Board;
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceType};
use crate::position::Position;

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1), (0, -1), (1, 0), (-1, 0),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = QUEEN_DIRECTIONS;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

/// How a piece type generates its moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Walk each direction; stop after one square when `single_step`.
    Walk {
        directions: &'static [(i8, i8)],
        single_step: bool,
    },
    Pawn,
}

/// The strategy table. Exhaustive over `PieceType`, so a new piece type
/// cannot be added without deciding how it moves.
pub const fn strategy(piece_type: PieceType) -> Strategy {
    match piece_type {
        PieceType::Bishop => Strategy::Walk { directions: &BISHOP_DIRECTIONS, single_step: false },
        PieceType::Rook => Strategy::Walk { directions: &ROOK_DIRECTIONS, single_step: false },
        PieceType::Queen => Strategy::Walk { directions: &QUEEN_DIRECTIONS, single_step: false },
        PieceType::King => Strategy::Walk { directions: &KING_OFFSETS, single_step: true },
        PieceType::Knight => Strategy::Walk { directions: &KNIGHT_OFFSETS, single_step: true },
        PieceType::Pawn => Strategy::Pawn,
    }
}

/// Append the pseudo-legal moves of `piece` standing on `from` to `moves`.
pub fn piece_moves(board: &Board, from: Position, piece: Piece, moves: &mut Vec<Move>) {
    match strategy(piece.piece_type()) {
        Strategy::Walk { directions, single_step } => {
            walk(board, from, piece.color(), directions, single_step, moves)
        }
        Strategy::Pawn => pawn_moves(board, from, piece.color(), moves),
    }
}

/// The shared directional walk.
///
/// From `from`, step along each direction: off-board ends the ray; a friendly
/// piece ends it without a move; an enemy piece is a capture and ends it; an
/// empty square is a move and the walk continues unless `single_step`.
pub fn walk(
    board: &Board,
    from: Position,
    color: Color,
    directions: &[(i8, i8)],
    single_step: bool,
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in directions {
        let mut to = from.offset(dr, dc);
        while to.is_in_bounds() {
            if let Some(occupant) = board.get_piece(to) {
                if occupant.color() != color {
                    moves.push(Move::new(from, to));
                }
                break;
            }
            moves.push(Move::new(from, to));
            if single_step {
                break;
            }
            to = to.offset(dr, dc);
        }
    }
}

/// Pawn pushes, double pushes from the starting rank, and diagonal captures.
/// Anything landing on the last rank becomes four promotion moves.
pub fn pawn_moves(board: &Board, from: Position, color: Color, moves: &mut Vec<Move>) {
    let dir = color.forward();
    let start_row = color.back_rank() + dir;
    let promo_row = color.opposite().back_rank();

    let push = |to: Position, moves: &mut Vec<Move>| {
        if to.row() == promo_row {
            for kind in PieceType::PROMOTIONS {
                moves.push(Move::with_promotion(from, to, kind));
            }
        } else {
            moves.push(Move::new(from, to));
        }
    };

    let single = from.offset(dir, 0);
    if single.is_in_bounds() && board.get_piece(single).is_none() {
        push(single, moves);

        let double = single.offset(dir, 0);
        if from.row() == start_row && board.get_piece(double).is_none() {
            push(double, moves);
        }
    }

    for dc in [-1, 1] {
        let target = from.offset(dir, dc);
        let is_capture = board
            .get_piece(target)
            .is_some_and(|p| p.color() != color);
        if is_capture {
            push(target, moves);
        }
    }
}
