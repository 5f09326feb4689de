//! A tiny opening book: a compiled-in table from a handful of well-known
//! textual position keys to candidate reply moves.
//!
//! Consulted once per `best_move` call before any search. Not a competitive
//! repertoire — just enough entries to demonstrate the seam between the
//! book and the iterative-deepening search it can short-circuit.

use zugzwang_core::{Board, Move};

/// `(position_key, candidate replies in UCI)`.
///
/// The position key is the first four space-separated fields of the
/// textual position — placement, side to move, castling rights, en
/// passant target — matching the transposition table's identity.
const ENTRIES: &[(&str, &[&str])] = &[
    (
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
        &["e2e4", "d2d4", "g1f3", "c2c4"],
    ),
    (
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq -",
        &["g1f3", "f1c4", "b1c3"],
    ),
    (
        "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq -",
        &["e4d5"],
    ),
    (
        "rnbqkbnr/ppppppp1/7p/8/3P4/8/PPP1PPPP/RNBQKBNR w KQkq -",
        &["c2c4", "g1f3"],
    ),
    (
        "rnbqkbnr/pppp1ppp/8/4p3/3P4/8/PPP1PPPP/RNBQKBNR w KQkq -",
        &["d4e5"],
    ),
    (
        "rnbqkbnr/ppp1pppp/8/3p4/3P4/8/PPP1PPPP/RNBQKBNR w KQkq -",
        &["c2c4", "g1f3"],
    ),
];

/// The first four space-separated fields of the textual position: placement,
/// side to move, castling rights, en passant target.
fn position_key(board: &Board) -> String {
    format!("{board}")
        .split_whitespace()
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Look up a book reply for `board`.
///
/// On a key hit, returns the first listed candidate (deterministic
/// selection). Returns `None` on a miss, in which case the caller should
/// fall through to iterative deepening.
pub fn lookup(board: &Board) -> Option<Move> {
    let key = position_key(board);
    let (_, replies) = ENTRIES.iter().find(|(k, _)| *k == key)?;
    let uci = replies.first()?;
    Move::from_uci(uci, board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_a_reply() {
        let board = Board::starting_position();
        let mv = lookup(&board).expect("starting position should be in the book");
        assert_eq!(mv.to_uci(), "e2e4");
    }

    #[test]
    fn reply_after_e4_is_booked() {
        let board: Board = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
            .parse()
            .unwrap();
        let after_e4 = board.make_move(Move::from_uci("e2e4", &board).unwrap());
        let mv = lookup(&after_e4).expect("1.e4 reply should be booked");
        assert_eq!(mv.to_uci(), "e7e5");
    }

    #[test]
    fn unknown_position_misses() {
        let board: Board = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4"
            .parse()
            .unwrap();
        assert!(lookup(&board).is_none());
    }

    #[test]
    fn move_counters_do_not_affect_lookup() {
        let board: Board = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 5 12"
            .parse()
            .unwrap();
        assert!(lookup(&board).is_some(), "book key must ignore halfmove/fullmove counters");
    }
}
