//! Piece mobility evaluation.
//!
//! Mobility is approximated by the raw count of legal moves available to
//! each side: more options generally means a freer, more active position.
//! Unlike the other evaluation terms this one is computed directly from the
//! side to move's own perspective (not White's), since it is derived by
//! counting legal moves for the side to move and then, temporarily, for its
//! opponent.

use zugzwang_core::{generate_legal_moves, Board};

/// Centipawn bonus per extra legal move available to the side to move.
const MOBILITY_WEIGHT: i32 = 3;

/// Evaluate mobility from the side-to-move's perspective.
///
/// Counts the side to move's legal moves, then flips the side to move on a
/// scratch copy of the board to count the opponent's legal moves, restoring
/// nothing on `board` itself since the flip happens on the copy. Returns
/// `MOBILITY_WEIGHT * (own - enemy)`.
pub fn evaluate_mobility(board: &Board) -> i32 {
    let own = generate_legal_moves(board).len() as i32;

    let mut flipped = board.clone();
    flipped.flip_side_to_move();
    let enemy = generate_legal_moves(&flipped).len() as i32;

    MOBILITY_WEIGHT * (own - enemy)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
