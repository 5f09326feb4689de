//! Pawn structure evaluation.
//!
//! Evaluates doubled pawns, isolated pawns, and passed pawns. All scores are
//! from White's perspective (positive = White advantage).

use zugzwang_core::{Board, Color, PieceKind, Square};

use crate::eval::score::{Score, S};

/// Penalty per extra pawn on the same file (beyond the first).
const DOUBLED_PAWN_PENALTY: Score = S(-15, -15);

/// Penalty for an isolated pawn (no friendly pawns on adjacent files).
const ISOLATED_PAWN_PENALTY: Score = S(-15, -15);

/// Passed pawn bonus indexed by rank as seen from the pawn's own side
/// (0 = own back rank, impossible for a pawn; 6 = one step from promotion).
const PASSED_PAWN_BONUS: [Score; 8] = [
    S(0, 0),
    S(5, 5),
    S(10, 10),
    S(20, 20),
    S(40, 40),
    S(60, 60),
    S(100, 100),
    S(200, 200),
];

struct PawnSquare {
    sq: Square,
    color: Color,
}

fn collect_pawns(board: &Board) -> Vec<PawnSquare> {
    board
        .occupied_squares()
        .filter(|(_, piece)| piece.kind() == PieceKind::Pawn)
        .map(|(sq, piece)| PawnSquare { sq, color: piece.color() })
        .collect()
}

/// Evaluate pawn structure from White's perspective.
pub fn evaluate_pawns(board: &Board) -> Score {
    let pawns = collect_pawns(board);

    let mut file_counts = [[0i16; 8]; Color::COUNT];
    for p in &pawns {
        file_counts[p.color.index()][p.sq.file().index()] += 1;
    }

    let mut score = Score::ZERO;

    for color in Color::ALL {
        let sign: i16 = match color {
            Color::White => 1,
            Color::Black => -1,
        };

        for file in 0..8 {
            let count = file_counts[color.index()][file];
            if count > 1 {
                score += DOUBLED_PAWN_PENALTY * (sign * (count - 1));
            }
        }
    }

    for p in &pawns {
        let file = p.sq.file().index();
        let rank = p.sq.rank().index();
        let sign: i16 = match p.color {
            Color::White => 1,
            Color::Black => -1,
        };

        let adjacent_has_friendly = (file.saturating_sub(1)..=(file + 1).min(7))
            .any(|f| f != file && file_counts[p.color.index()][f] > 0);
        if !adjacent_has_friendly {
            score += ISOLATED_PAWN_PENALTY * sign;
        }

        let own_rank_idx = match p.color {
            Color::White => rank,
            Color::Black => 7 - rank,
        };

        let enemy = p.color.flip();
        let is_passed = !pawns.iter().any(|other| {
            other.color == enemy
                && other.sq.file().index().abs_diff(file) <= 1
                && match p.color {
                    Color::White => other.sq.rank().index() > rank,
                    Color::Black => other.sq.rank().index() < rank,
                }
        });
        if is_passed {
            score += PASSED_PAWN_BONUS[own_rank_idx] * sign;
        }
    }

    score
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use zugzwang_core::Board;

    use super::evaluate_pawns;
    use crate::eval::score::{Score, S};

    fn parse(fen: &str) -> Board {
        fen.parse::<Board>().unwrap()
    }

    #[test]
    fn starting_position_is_symmetric() {
        let board = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        let score = evaluate_pawns(&board);
        assert_eq!(score, Score::ZERO, "expected S(0,0) for starting position, got {score}");
    }

    /// A lone white pawn on e4 with no other pawns is both isolated and passed.
    #[test]
    fn isolated_passed_pawn() {
        let board = parse("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1");
        let score = evaluate_pawns(&board);
        // e4 is rank index 3 from White's own back rank.
        let expected = S(20, 20) + S(-15, -15);
        assert_eq!(score, expected, "expected {expected}, got {score}");
    }

    /// Two white pawns on the e-file: doubled, isolated, and both passed.
    #[test]
    fn doubled_pawn_penalty() {
        let board = parse("4k3/8/8/8/4P3/4P3/8/4K3 w - - 0 1");
        let score = evaluate_pawns(&board);
        let expected = S(-15, -15)          // doubled penalty
            + S(10, 10) + S(-15, -15)        // e3: passed rank2 + isolated
            + S(20, 20) + S(-15, -15);       // e4: passed rank3 + isolated
        assert_eq!(score, expected, "expected {expected}, got {score}");
    }

    /// A White pawn blocked from passed status by an enemy pawn on an
    /// adjacent file, but still isolated since no friendly pawn supports it.
    #[test]
    fn isolated_but_not_passed() {
        let board = parse("4k3/8/8/8/3p1P2/8/4P3/4K3 w - - 0 1");
        let score = evaluate_pawns(&board);
        // e2 (rank idx 1): not isolated (f4 on adjacent file), not passed (d4 blocks).
        // f4 (rank idx 3): not isolated (e2 on adjacent file), passed (d-file doesn't block f).
        let white = S(20, 20);
        // d4 (Black, rank idx from Black's pov = 7-3=4): isolated (no c/e pawn), not passed (e2 blocks).
        let black = S(-15, -15);
        let expected = white - black;
        assert_eq!(score, expected, "expected {expected}, got {score}");
    }
}
