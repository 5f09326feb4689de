//! Rook evaluation: open files, semi-open files, and rook on the 7th rank.

use zugzwang_core::{Board, Color, PieceKind};

use crate::eval::score::{Score, S};

/// Bonus for a rook on a fully open file (no pawns of either color).
const ROOK_OPEN_FILE: Score = S(25, 25);

/// Bonus for a rook on a semi-open file (no friendly pawns, but enemy pawns present).
const ROOK_SEMI_OPEN_FILE: Score = S(15, 15);

/// Bonus for a rook on the 7th rank, counted from its own side.
const ROOK_ON_SEVENTH: Score = S(30, 30);

/// Evaluate rook placement from White's perspective.
pub fn evaluate_rooks(board: &Board) -> Score {
    let mut pawn_files = [[false; 8]; Color::COUNT];
    for (sq, piece) in board.occupied_squares() {
        if piece.kind() == PieceKind::Pawn {
            pawn_files[piece.color().index()][sq.file().index()] = true;
        }
    }

    let mut score = Score::ZERO;

    for (sq, piece) in board.occupied_squares() {
        if piece.kind() != PieceKind::Rook {
            continue;
        }
        let color = piece.color();
        let sign: i16 = match color {
            Color::White => 1,
            Color::Black => -1,
        };
        let file = sq.file().index();

        let own_pawn_on_file = pawn_files[color.index()][file];
        let enemy_pawn_on_file = pawn_files[color.flip().index()][file];

        if !own_pawn_on_file && !enemy_pawn_on_file {
            score += ROOK_OPEN_FILE * sign;
        } else if !own_pawn_on_file {
            score += ROOK_SEMI_OPEN_FILE * sign;
        }

        let seventh_rank = match color {
            Color::White => 6,
            Color::Black => 1,
        };
        if sq.rank().index() == seventh_rank {
            score += ROOK_ON_SEVENTH * sign;
        }
    }

    score
}
