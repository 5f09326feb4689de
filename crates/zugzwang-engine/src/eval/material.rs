//! Material balance evaluation.
//!
//! Counts flat piece material for each side and adds a bishop-pair bonus.
//! All scores are returned from White's perspective (positive = White ahead).

use zugzwang_core::{Board, Color, PieceKind};

use crate::eval::score::{Score, S};

/// Flat material values indexed by [`PieceKind::index()`].
///
/// Pawn 100, Knight 320, Bishop 330, Rook 500, Queen 900, King 20000.
/// The same value is used in both the middlegame and endgame halves of the
/// packed score; only the structural terms elsewhere in the evaluator taper.
pub const MATERIAL_VALUE: [Score; PieceKind::COUNT] = [
    S(100, 100),   // Pawn
    S(320, 320),   // Knight
    S(330, 330),   // Bishop
    S(500, 500),   // Rook
    S(900, 900),   // Queen
    S(20000, 20000), // King
];

/// Bonus awarded to a side that has two or more bishops.
const BISHOP_PAIR_BONUS: Score = S(50, 50);

/// Evaluate material balance from White's perspective.
///
/// For each piece kind the function counts White pieces and Black pieces,
/// accumulates `MATERIAL_VALUE[kind] * (white_count - black_count)`, then
/// applies a [`BISHOP_PAIR_BONUS`] if either side owns two or more bishops.
///
/// Returns a positive score when White has more material, negative when Black does.
pub fn material(board: &Board) -> Score {
    let mut counts = [[0i16; PieceKind::COUNT]; Color::COUNT];
    for (_, piece) in board.occupied_squares() {
        counts[piece.color().index()][piece.kind().index()] += 1;
    }

    let mut score = Score::ZERO;
    for kind in PieceKind::ALL {
        let white_count = counts[Color::White.index()][kind.index()];
        let black_count = counts[Color::Black.index()][kind.index()];
        score += MATERIAL_VALUE[kind.index()] * (white_count - black_count);
    }

    let white_bishops = counts[Color::White.index()][PieceKind::Bishop.index()];
    let black_bishops = counts[Color::Black.index()][PieceKind::Bishop.index()];

    if white_bishops >= 2 {
        score += BISHOP_PAIR_BONUS;
    }
    if black_bishops >= 2 {
        score -= BISHOP_PAIR_BONUS;
    }

    score
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
