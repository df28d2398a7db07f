use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::PieceType;
use crate::position::Position;

/// A request to move whatever stands on `from` to `to`. `promotion` is only
/// set for pawn moves onto the farthest rank.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub promotion: Option<PieceType>,
}

impl Move {
    pub const fn new(from: Position, to: Position) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    pub const fn with_promotion(from: Position, to: Position, promotion: PieceType) -> Self {
        Move {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Coordinate notation, e.g. "e2e4", "a7a8q"
    pub fn to_uci(&self) -> String {
        let promo = self.promotion.map(PieceType::letter);
        match promo {
            Some(letter) => format!("{}{}{letter}", self.from, self.to),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uci_text() {
        let mv = Move::new(Position::new(2, 5), Position::new(4, 5));
        assert_eq!(mv.to_uci(), "e2e4");
        let promo = Move::with_promotion(Position::new(7, 1), Position::new(8, 1), PieceType::Queen);
        assert_eq!(promo.to_string(), "a7a8q");
    }

    #[test]
    fn equality_includes_promotion() {
        let from = Position::new(7, 1);
        let to = Position::new(8, 1);
        assert_ne!(
            Move::with_promotion(from, to, PieceType::Queen),
            Move::with_promotion(from, to, PieceType::Knight)
        );
        assert_ne!(Move::new(from, to), Move::with_promotion(from, to, PieceType::Queen));
    }
}
