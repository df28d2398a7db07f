// =============================================================================
// Game state machine
//
// Owns the board plus everything that depends on history: whose turn it is,
// the last move (for en passant), castling rights and the game-over flag.
// Legality is decided here by playing each candidate on a cloned board and
// asking whether the mover's king is attacked afterwards. The board itself
// never validates anything.
//
// Coordinate system: row 1 = White's back rank, column 1 = a-file.
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::board::Board;
use crate::error::{MoveError, MoveResult};
use crate::movegen;
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceType};
use crate::position::Position;

/// Column the king starts on (the e-file).
const KING_HOME_COLUMN: i8 = 5;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    fn rook_column(self) -> i8 {
        match self {
            CastleSide::KingSide => 8,
            CastleSide::QueenSide => 1,
        }
    }

    fn king_target_column(self) -> i8 {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 3,
        }
    }

    fn rook_target_column(self) -> i8 {
        match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 4,
        }
    }

    /// Columns that must be empty between king and rook.
    fn between_columns(self) -> &'static [i8] {
        match self {
            CastleSide::KingSide => &[6, 7],
            CastleSide::QueenSide => &[2, 3, 4],
        }
    }

    /// Columns the king stands on or crosses, none of which may be attacked.
    fn king_path(self) -> &'static [i8] {
        match self {
            CastleSide::KingSide => &[5, 6, 7],
            CastleSide::QueenSide => &[5, 4, 3],
        }
    }

    /// The side whose rook starts on `square`, if it is one of `color`'s
    /// corners.
    fn of_corner(square: Position, color: Color) -> Option<Self> {
        if square.row() != color.back_rank() {
            return None;
        }
        CastleSide::ALL
            .into_iter()
            .find(|side| side.rook_column() == square.column())
    }
}

/// Castling rights only ever go from held to forfeited; nothing outside this
/// module can grant them back.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct CastlingRights {
    white_kingside: bool,
    white_queenside: bool,
    black_kingside: bool,
    black_queenside: bool,
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

impl CastlingRights {
    pub const fn all() -> Self {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub fn allows(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => self.white_kingside,
            (Color::White, CastleSide::QueenSide) => self.white_queenside,
            (Color::Black, CastleSide::KingSide) => self.black_kingside,
            (Color::Black, CastleSide::QueenSide) => self.black_queenside,
        }
    }

    fn revoke(&mut self, color: Color, side: CastleSide) {
        let right = match (color, side) {
            (Color::White, CastleSide::KingSide) => &mut self.white_kingside,
            (Color::White, CastleSide::QueenSide) => &mut self.white_queenside,
            (Color::Black, CastleSide::KingSide) => &mut self.black_kingside,
            (Color::Black, CastleSide::QueenSide) => &mut self.black_queenside,
        };
        if *right {
            trace!(%color, ?side, "castling right forfeited");
        }
        *right = false;
    }

    fn revoke_all(&mut self, color: Color) {
        self.revoke(color, CastleSide::KingSide);
        self.revoke(color, CastleSide::QueenSide);
    }
}

/// Summary of where the game stands for the side to move.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum GameStatus {
    Ongoing,
    Check(Color),
    Checkmate(Color),
    Stalemate(Color),
    /// Ended from outside, e.g. by resignation.
    Ended,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Game {
    board: Board,
    current_turn: Color,
    last_move: Option<Move>,
    en_passant_valid: bool,
    castling_rights: CastlingRights,
    game_over: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A new match: standard opening, White to move, all castling rights.
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            current_turn: Color::White,
            last_move: None,
            en_passant_valid: false,
            castling_rights: CastlingRights::all(),
            game_over: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the board, e.g. when restoring a stored game. History-derived
    /// state (castling rights, en passant) is left as it is.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    pub fn team_turn(&self) -> Color {
        self.current_turn
    }

    pub fn set_team_turn(&mut self, color: Color) {
        self.current_turn = color;
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// True only for the ply right after a two-square pawn advance.
    pub fn en_passant_valid(&self) -> bool {
        self.en_passant_valid
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Mark the game finished (resignation, or a result confirmed by the
    /// caller). Every later `make_move` is rejected.
    pub fn end_game(&mut self) {
        debug!("game ended");
        self.game_over = true;
    }

    // -------------------------------------------------------------------------
    // Move generation
    // -------------------------------------------------------------------------

    /// Fully legal moves for the piece on `position`, or `None` if the square
    /// is empty. Includes en passant and castling where history allows them.
    pub fn valid_moves(&self, position: Position) -> Option<Vec<Move>> {
        let piece = self.board.get_piece(position)?;
        let color = piece.color();

        let mut moves: Vec<Move> = piece
            .piece_moves(&self.board, position)
            .into_iter()
            .filter(|mv| {
                let mut probe = self.board.clone();
                probe.make_move(mv);
                !king_in_check(&probe, color)
            })
            .collect();

        match piece.piece_type() {
            PieceType::Pawn => moves.extend(self.en_passant_move(position, color)),
            PieceType::King => moves.extend(self.castling_moves(position, color)),
            _ => {}
        }

        Some(moves)
    }

    /// Every legal move available to `color`.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        self.board
            .pieces_of(color)
            .filter_map(|(from, _)| self.valid_moves(from))
            .flatten()
            .collect()
    }

    fn has_legal_move(&self, color: Color) -> bool {
        self.board
            .pieces_of(color)
            .any(|(from, _)| self.valid_moves(from).is_some_and(|m| !m.is_empty()))
    }

    /// The en passant capture for the pawn on `from`, if the previous move
    /// was an enemy pawn's double step landing right beside it.
    fn en_passant_move(&self, from: Position, color: Color) -> Option<Move> {
        if !self.en_passant_valid {
            return None;
        }
        let last = self.last_move?;
        let victim = self.board.get_piece(last.to)?;
        if victim.piece_type() != PieceType::Pawn || victim.color() == color {
            return None;
        }
        let double_step = (last.from.row() - last.to.row()).abs() == 2
            && last.from.column() == last.to.column();
        let beside = last.to.row() == from.row() && (last.to.column() - from.column()).abs() == 1;
        if !double_step || !beside {
            return None;
        }

        let mv = Move::new(from, last.to.offset(color.forward(), 0));
        let mut probe = self.board.clone();
        probe.remove_piece(last.to);
        probe.make_move(&mv);
        if king_in_check(&probe, color) {
            return None;
        }
        trace!(%mv, "en passant available");
        Some(mv)
    }

    /// Two-square king moves for each side still allowed to castle.
    fn castling_moves(&self, from: Position, color: Color) -> Vec<Move> {
        let back = color.back_rank();
        if from != Position::new(back, KING_HOME_COLUMN) {
            return Vec::new();
        }
        let rook = Piece::new(PieceType::Rook, color);
        let enemy = color.opposite();

        CastleSide::ALL
            .into_iter()
            .filter(|&side| self.castling_rights.allows(color, side))
            .filter(|&side| self.board.get_piece(Position::new(back, side.rook_column())) == Some(rook))
            .filter(|&side| {
                side.between_columns()
                    .iter()
                    .all(|&col| self.board.get_piece(Position::new(back, col)).is_none())
            })
            .filter(|&side| {
                // Put the king on each square of its path and see if it is hit there.
                side.king_path().iter().all(|&col| {
                    let square = Position::new(back, col);
                    let mut probe = self.board.clone();
                    probe.make_move(&Move::new(from, square));
                    !square_attacked(&probe, square, enemy)
                })
            })
            .map(|side| {
                let mv = Move::new(from, Position::new(back, side.king_target_column()));
                trace!(%mv, ?side, "castling available");
                mv
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Move application
    // -------------------------------------------------------------------------

    /// Play `mv` for the side to move. Either the whole move is applied and
    /// the turn passes, or an error comes back and nothing has changed.
    #[instrument(skip_all, fields(mv = %mv, turn = ?self.current_turn))]
    pub fn make_move(&mut self, mv: &Move) -> MoveResult<()> {
        if let Err(err) = self.validate(mv) {
            debug!(%err, "move rejected");
            return Err(err);
        }
        self.apply(mv);
        debug!(next = ?self.current_turn, "move applied");
        Ok(())
    }

    fn validate(&self, mv: &Move) -> MoveResult<()> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        let piece = self
            .board
            .get_piece(mv.from)
            .ok_or(MoveError::NoPiece { square: mv.from })?;
        if piece.color() != self.current_turn {
            return Err(MoveError::NotYourTurn { color: piece.color() });
        }
        let legal = self.valid_moves(mv.from).unwrap_or_default();
        if !legal.contains(mv) {
            return Err(MoveError::IllegalMove { mv: *mv });
        }
        Ok(())
    }

    /// Apply a move already known to be legal. Also used by perft, which
    /// only ever feeds it moves from `legal_moves`.
    pub(crate) fn apply(&mut self, mv: &Move) {
        let Some(piece) = self.board.get_piece(mv.from) else {
            return;
        };
        let color = piece.color();
        let is_pawn = piece.piece_type() == PieceType::Pawn;

        // En passant: a diagonal pawn move onto an empty square.
        if is_pawn
            && self.en_passant_valid
            && mv.from.column() != mv.to.column()
            && self.board.get_piece(mv.to).is_none()
        {
            let victim = Position::new(mv.from.row(), mv.to.column());
            self.board.remove_piece(victim);
            trace!(%victim, "en passant capture");
        }

        // Castling: the king moves two columns and the rook jumps over it.
        if piece.piece_type() == PieceType::King && (mv.to.column() - mv.from.column()).abs() == 2 {
            let side = if mv.to.column() > mv.from.column() {
                CastleSide::KingSide
            } else {
                CastleSide::QueenSide
            };
            let back = mv.from.row();
            self.board.make_move(&Move::new(
                Position::new(back, side.rook_column()),
                Position::new(back, side.rook_target_column()),
            ));
            trace!(?side, "castled");
        }

        self.board.make_move(mv);
        self.update_castling_rights(piece, mv);

        self.en_passant_valid = is_pawn && (mv.to.row() - mv.from.row()).abs() == 2;
        self.last_move = Some(*mv);
        self.current_turn = color.opposite();
    }

    fn update_castling_rights(&mut self, piece: Piece, mv: &Move) {
        let color = piece.color();
        match piece.piece_type() {
            PieceType::King => self.castling_rights.revoke_all(color),
            PieceType::Rook => {
                if let Some(side) = CastleSide::of_corner(mv.from, color) {
                    self.castling_rights.revoke(color, side);
                }
            }
            _ => {}
        }
        // Landing on an enemy corner takes that rook (or it already left).
        let enemy = color.opposite();
        if let Some(side) = CastleSide::of_corner(mv.to, enemy) {
            self.castling_rights.revoke(enemy, side);
        }
    }

    // -------------------------------------------------------------------------
    // Check, checkmate, stalemate
    // -------------------------------------------------------------------------

    /// Whether a piece of `by`'s opponent standing on `square` could be
    /// captured by `by`.
    pub fn is_square_attacked(&self, square: Position, by: Color) -> bool {
        square_attacked(&self.board, square, by)
    }

    /// A color with no king on the board is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        king_in_check(&self.board, color)
    }

    /// In check with no legal way out. Detecting checkmate ends the game.
    pub fn is_in_checkmate(&mut self, color: Color) -> bool {
        let mated = self.is_in_check(color) && !self.has_legal_move(color);
        if mated && !self.game_over {
            debug!(%color, "checkmate");
            self.game_over = true;
        }
        mated
    }

    /// Not in check, but no legal move either.
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_move(color)
    }

    /// Where the game stands for the side to move. Reporting checkmate ends
    /// the game, as `is_in_checkmate` does.
    pub fn status(&mut self) -> GameStatus {
        let color = self.current_turn;
        if self.is_in_checkmate(color) {
            return GameStatus::Checkmate(color);
        }
        if self.game_over {
            return GameStatus::Ended;
        }
        if self.is_in_stalemate(color) {
            return GameStatus::Stalemate(color);
        }
        if self.is_in_check(color) {
            return GameStatus::Check(color);
        }
        GameStatus::Ongoing
    }
}

fn king_in_check(board: &Board, color: Color) -> bool {
    board
        .find_king(color)
        .is_some_and(|king| square_attacked(board, king, color.opposite()))
}

/// Scan every piece of `by` for a pseudo-legal move onto `square`.
///
/// Pawns only capture onto occupied squares, so an empty (or friendly)
/// target is first filled with a stand-in enemy piece; the generators only
/// look at its color.
fn square_attacked(board: &Board, square: Position, by: Color) -> bool {
    let holds_target = board.get_piece(square).is_some_and(|p| p.color() != by);
    if !holds_target {
        let mut probe = board.clone();
        probe.add_piece(square, Piece::new(PieceType::Pawn, by.opposite()));
        return attacks_square(&probe, square, by);
    }
    attacks_square(board, square, by)
}

fn attacks_square(board: &Board, square: Position, by: Color) -> bool {
    let mut buf = Vec::with_capacity(32);
    board.pieces_of(by).any(|(from, piece)| {
        buf.clear();
        movegen::piece_moves(board, from, piece, &mut buf);
        buf.iter().any(|mv| mv.to == square)
    })
}
