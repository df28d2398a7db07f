//! Perft: count the leaves of the legal move tree to a fixed depth.
//!
//! The counts for well-known positions are published, so any disagreement
//! points straight at a move generation bug.

use crate::game::Game;
use crate::moves::Move;

pub fn perft(game: &Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = game.legal_moves(game.team_turn());
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|mv| {
            let mut child = game.clone();
            child.apply(mv);
            perft(&child, depth - 1)
        })
        .sum()
}

/// Perft split by root move, for narrowing down a wrong total.
pub fn divide(game: &Game, depth: u32) -> Vec<(Move, u64)> {
    game.legal_moves(game.team_turn())
        .into_iter()
        .map(|mv| {
            let mut child = game.clone();
            child.apply(&mv);
            (mv, perft(&child, depth.saturating_sub(1)))
        })
        .collect()
}
