//! Move execution via make/unmake, plus a copy-make convenience layer for
//! callers (legality filtering, perft, the book, the protocol adapters) that
//! want the resulting position without managing an undo record themselves.

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;
use crate::zobrist;

/// Everything `unmake` needs to restore a [`Board`] to the state it had
/// before the matching `make`: the move played, the piece that moved (its
/// pre-move kind — `Pawn` for a promoting move), the captured piece if any
/// (for en passant this is the enemy pawn, not whatever — nothing — sat on
/// the destination square), and the irreversible state `make` may have
/// overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    mv: Move,
    moving_piece: PieceKind,
    captured_piece: Option<PieceKind>,
    saved_castling: CastleRights,
    saved_en_passant: Option<Square>,
    saved_halfmove: u16,
    saved_fullmove: u16,
    saved_hash: u64,
}

/// Everything `unmake_null` needs to restore a [`Board`] after `make_null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullUndo {
    saved_en_passant: Option<Square>,
    saved_hash: u64,
}

/// Maps each square index to the castling rights that must be removed when
/// that square is the source or destination of any move — including a
/// capture that lands on a corner square (e.g. a rook captured on a8).
const CASTLE_RIGHTS_REVOKE: [CastleRights; 64] = {
    let mut table = [CastleRights::NONE; 64];
    // E1 (index 4): White king moves — remove both white rights.
    table[Square::E1.index()] = CastleRights::WHITE_BOTH;
    // A1 (index 0): White queenside rook.
    table[Square::A1.index()] = CastleRights::WHITE_QUEEN;
    // H1 (index 7): White kingside rook.
    table[Square::H1.index()] = CastleRights::WHITE_KING;
    // E8 (index 60): Black king moves — remove both black rights.
    table[Square::E8.index()] = CastleRights::BLACK_BOTH;
    // A8 (index 56): Black queenside rook.
    table[Square::A8.index()] = CastleRights::BLACK_QUEEN;
    // H8 (index 63): Black kingside rook.
    table[Square::H8.index()] = CastleRights::BLACK_KING;
    table
};

impl Board {
    /// Apply a null move in place: flip the side to move and clear the en
    /// passant target, leaving every other field untouched and the hash
    /// correctly updated. Used only by null-move pruning in search; the
    /// result is never a position a legal move could reach and must not be
    /// stored in the transposition table as if it were one.
    pub fn make_null(&mut self) -> NullUndo {
        let undo = NullUndo {
            saved_en_passant: self.en_passant(),
            saved_hash: self.hash(),
        };
        if let Some(old_ep) = self.en_passant() {
            self.set_hash(self.hash() ^ zobrist::EN_PASSANT_FILE[old_ep.file().index()]);
            self.set_en_passant(None);
        }
        self.set_side_to_move(self.side_to_move().flip());
        self.set_hash(self.hash() ^ zobrist::SIDE_TO_MOVE);
        undo
    }

    /// Undo a null move made by `make_null`.
    pub fn unmake_null(&mut self, undo: NullUndo) {
        self.set_side_to_move(self.side_to_move().flip());
        self.set_en_passant(undo.saved_en_passant);
        self.set_hash(undo.saved_hash);
    }

    /// Apply a null move and return the resulting board, leaving `self`
    /// untouched. Copy-make convenience built on [`Board::make_null`].
    pub fn make_null_move(&self) -> Board {
        let mut b = self.clone();
        b.make_null();
        b
    }

    /// Apply a move in place, pushing an [`Undo`] record onto the board's
    /// history and returning a copy of it for the caller to hand back to
    /// [`Board::unmake`].
    ///
    /// # Panics
    ///
    /// Panics if the source square is empty — a caller passed a move that was
    /// never generated against this position.
    pub fn make(&mut self, mv: Move) -> Undo {
        let us = self.side_to_move();
        let them = us.flip();
        let src = mv.source();
        let dst = mv.dest();

        let moving_piece = self.piece_on(src).expect("make: empty source square");

        let saved_castling = self.castling();
        let saved_en_passant = self.en_passant();
        let saved_halfmove = self.halfmove_clock();
        let saved_fullmove = self.fullmove_number();
        let saved_hash = self.hash();

        // XOR out old en passant file from hash (before clearing).
        if let Some(old_ep) = self.en_passant() {
            self.set_hash(self.hash() ^ zobrist::EN_PASSANT_FILE[old_ep.file().index()]);
        }

        // XOR out old castling rights from hash (before any modifications).
        self.set_hash(self.hash() ^ zobrist::CASTLING[self.castling().bits() as usize]);

        // Clear en passant target set by the previous move.
        self.set_en_passant(None);

        // Detect captures before we move any pieces. Castling moves the king
        // to the rook's square in some encodings, so exclude castling here.
        let is_capture = self.is_occupied(dst) && !mv.is_castle();
        let mut captured_piece = None;

        match mv.kind() {
            MoveKind::Normal => {
                if is_capture {
                    let captured = self.set_piece(dst, None).expect("capture square must be occupied");
                    self.set_hash(self.hash() ^ zobrist::PIECE_SQUARE[captured.index()][dst.index()]);
                    captured_piece = Some(captured.kind());
                }

                self.set_piece(src, None);
                self.set_piece(dst, Some(Piece::new(moving_piece, us)));
                let piece_idx = Piece::new(moving_piece, us).index();
                self.set_hash(self.hash() ^ zobrist::PIECE_SQUARE[piece_idx][src.index()]);
                self.set_hash(self.hash() ^ zobrist::PIECE_SQUARE[piece_idx][dst.index()]);

                // Record en passant target square after a double pawn push.
                if moving_piece == PieceKind::Pawn {
                    let rank_diff = dst.index().abs_diff(src.index());
                    if rank_diff == 16 {
                        let ep_idx = if us == Color::White {
                            src.index() + 8
                        } else {
                            src.index() - 8
                        };
                        self.set_en_passant(Square::from_index(ep_idx as u8));
                    }
                }
            }

            MoveKind::Promotion => {
                if is_capture {
                    let captured = self.set_piece(dst, None).expect("capture square must be occupied");
                    self.set_hash(self.hash() ^ zobrist::PIECE_SQUARE[captured.index()][dst.index()]);
                    captured_piece = Some(captured.kind());
                }

                self.set_piece(src, None);
                self.set_hash(self.hash() ^ zobrist::PIECE_SQUARE[Piece::new(PieceKind::Pawn, us).index()][src.index()]);

                let promo_kind = mv.promotion_piece().to_piece_kind();
                self.set_piece(dst, Some(Piece::new(promo_kind, us)));
                self.set_hash(self.hash() ^ zobrist::PIECE_SQUARE[Piece::new(promo_kind, us).index()][dst.index()]);
            }

            MoveKind::EnPassant => {
                self.set_piece(src, None);
                self.set_piece(dst, Some(Piece::new(PieceKind::Pawn, us)));
                let pawn_idx = Piece::new(PieceKind::Pawn, us).index();
                self.set_hash(self.hash() ^ zobrist::PIECE_SQUARE[pawn_idx][src.index()]);
                self.set_hash(self.hash() ^ zobrist::PIECE_SQUARE[pawn_idx][dst.index()]);

                // The captured pawn stands one rank behind the EP target square.
                let captured_idx = if us == Color::White {
                    dst.index() - 8
                } else {
                    dst.index() + 8
                };
                let captured_sq = Square::from_index(captured_idx as u8).expect("en passant capture square in range");
                self.set_piece(captured_sq, None);
                self.set_hash(self.hash() ^ zobrist::PIECE_SQUARE[Piece::new(PieceKind::Pawn, them).index()][captured_sq.index()]);
                captured_piece = Some(PieceKind::Pawn);
            }

            MoveKind::Castling => {
                self.set_piece(src, None);
                self.set_piece(dst, Some(Piece::new(PieceKind::King, us)));
                let king_idx = Piece::new(PieceKind::King, us).index();
                self.set_hash(self.hash() ^ zobrist::PIECE_SQUARE[king_idx][src.index()]);
                self.set_hash(self.hash() ^ zobrist::PIECE_SQUARE[king_idx][dst.index()]);

                let (rook_src, rook_dst) = match dst.index() {
                    6 => (Square::H1, Square::F1),
                    2 => (Square::A1, Square::D1),
                    62 => (Square::H8, Square::F8),
                    58 => (Square::A8, Square::D8),
                    _ => panic!("invalid castling destination"),
                };
                self.set_piece(rook_src, None);
                self.set_piece(rook_dst, Some(Piece::new(PieceKind::Rook, us)));
                let rook_idx = Piece::new(PieceKind::Rook, us).index();
                self.set_hash(self.hash() ^ zobrist::PIECE_SQUARE[rook_idx][rook_src.index()]);
                self.set_hash(self.hash() ^ zobrist::PIECE_SQUARE[rook_idx][rook_dst.index()]);
            }
        }

        // Revoke castling rights affected by any piece touching a corner or king square.
        let new_castling = self
            .castling()
            .remove(CASTLE_RIGHTS_REVOKE[src.index()])
            .remove(CASTLE_RIGHTS_REVOKE[dst.index()]);
        self.set_castling(new_castling);

        // XOR in new castling rights.
        self.set_hash(self.hash() ^ zobrist::CASTLING[new_castling.bits() as usize]);

        // XOR in new en passant file (if set by a double pawn push).
        if let Some(ep_sq) = self.en_passant() {
            self.set_hash(self.hash() ^ zobrist::EN_PASSANT_FILE[ep_sq.file().index()]);
        }

        // Update the halfmove clock (reset on pawn moves and captures).
        if moving_piece == PieceKind::Pawn || is_capture || mv.kind() == MoveKind::EnPassant {
            self.set_halfmove_clock(0);
        } else {
            self.set_halfmove_clock(self.halfmove_clock() + 1);
        }

        // Switch the side to move.
        self.set_side_to_move(them);

        // XOR side-to-move key (always changes).
        self.set_hash(self.hash() ^ zobrist::SIDE_TO_MOVE);

        // Increment the fullmove counter after Black's move.
        if us == Color::Black {
            self.set_fullmove_number(self.fullmove_number() + 1);
        }

        let undo = Undo {
            mv,
            moving_piece,
            captured_piece,
            saved_castling,
            saved_en_passant,
            saved_halfmove,
            saved_fullmove,
            saved_hash,
        };
        self.push_undo(undo);
        undo
    }

    /// Undo a move made by `make`, restoring `self` to exactly the state it
    /// had beforehand — placement, side to move, castling rights, en
    /// passant target, clocks, king caches, and hash.
    ///
    /// # Panics
    ///
    /// Panics (in debug builds) if `undo` does not match the top of the
    /// board's history stack, or if the history stack is empty — either
    /// indicates a caller made an unbalanced `make`/`unmake` sequence.
    pub fn unmake(&mut self, undo: Undo) {
        let popped = self.pop_undo();
        debug_assert_eq!(popped, undo, "unmake: undo record does not match history top");

        let us = self.side_to_move().flip();
        let them = us.flip();
        let mv = undo.mv;
        let src = mv.source();
        let dst = mv.dest();

        match mv.kind() {
            MoveKind::Normal => {
                self.set_piece(dst, None);
                self.set_piece(src, Some(Piece::new(undo.moving_piece, us)));
                if let Some(captured) = undo.captured_piece {
                    self.set_piece(dst, Some(Piece::new(captured, them)));
                }
            }

            MoveKind::Promotion => {
                self.set_piece(dst, None);
                self.set_piece(src, Some(Piece::new(PieceKind::Pawn, us)));
                if let Some(captured) = undo.captured_piece {
                    self.set_piece(dst, Some(Piece::new(captured, them)));
                }
            }

            MoveKind::EnPassant => {
                self.set_piece(dst, None);
                self.set_piece(src, Some(Piece::new(PieceKind::Pawn, us)));
                let captured_idx = if us == Color::White {
                    dst.index() - 8
                } else {
                    dst.index() + 8
                };
                let captured_sq = Square::from_index(captured_idx as u8).expect("en passant capture square in range");
                self.set_piece(captured_sq, Some(Piece::new(PieceKind::Pawn, them)));
            }

            MoveKind::Castling => {
                let (rook_src, rook_dst) = match dst.index() {
                    6 => (Square::H1, Square::F1),
                    2 => (Square::A1, Square::D1),
                    62 => (Square::H8, Square::F8),
                    58 => (Square::A8, Square::D8),
                    _ => panic!("invalid castling destination"),
                };
                self.set_piece(rook_dst, None);
                self.set_piece(rook_src, Some(Piece::new(PieceKind::Rook, us)));
                self.set_piece(dst, None);
                self.set_piece(src, Some(Piece::new(PieceKind::King, us)));
            }
        }

        self.set_castling(undo.saved_castling);
        self.set_en_passant(undo.saved_en_passant);
        self.set_halfmove_clock(undo.saved_halfmove);
        self.set_fullmove_number(undo.saved_fullmove);
        self.set_side_to_move(us);
        self.set_hash(undo.saved_hash);
    }

    /// Apply a move and return the resulting board, leaving `self`
    /// untouched. Copy-make convenience built on [`Board::make`], for
    /// callers that want the resulting position without tracking an undo
    /// record themselves (legality filtering, perft, the book, loading a
    /// `position ... moves ...` command).
    pub fn make_move(&self, mv: Move) -> Board {
        let mut b = self.clone();
        b.make(mv);
        b
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::castle_rights::CastleRights;
    use crate::chess_move::{Move, PromotionPiece};
    use crate::color::Color;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    fn starting() -> Board {
        Board::starting_position()
    }

    #[test]
    fn normal_pawn_push_e2e4() {
        let board = starting();
        let mv = Move::new(Square::E2, Square::E4);
        let after = board.make_move(mv);

        assert_eq!(after.piece_on(Square::E4), Some(PieceKind::Pawn));
        assert_eq!(after.color_on(Square::E4), Some(Color::White));
        assert_eq!(after.piece_on(Square::E2), None);
        assert_eq!(after.en_passant(), Some(Square::E3));
        assert_eq!(after.side_to_move(), Color::Black);
    }

    #[test]
    fn capture_resets_clock() {
        let b0 = starting();
        let b1 = b0.make_move(Move::new(Square::E2, Square::E4));
        let b2 = b1.make_move(Move::new(Square::D7, Square::D5));
        let b3 = b2.make_move(Move::new(Square::E4, Square::D5));

        assert_eq!(b3.piece_on(Square::D5), Some(PieceKind::Pawn));
        assert_eq!(b3.color_on(Square::D5), Some(Color::White));
        assert_eq!(b3.piece_on(Square::E4), None);
        assert_eq!(b3.halfmove_clock(), 0);
    }

    #[test]
    fn en_passant_capture() {
        let b = starting()
            .make_move(Move::new(Square::E2, Square::E4))
            .make_move(Move::new(Square::A7, Square::A6))
            .make_move(Move::new(Square::E4, Square::E5))
            .make_move(Move::new(Square::D7, Square::D5));

        assert_eq!(b.en_passant(), Some(Square::D6));

        let after = b.make_move(Move::new_en_passant(Square::E5, Square::D6));
        assert_eq!(after.piece_on(Square::D6), Some(PieceKind::Pawn));
        assert_eq!(after.color_on(Square::D6), Some(Color::White));
        assert_eq!(after.piece_on(Square::D5), None);
        assert_eq!(after.piece_on(Square::E5), None);
    }

    #[test]
    fn promotion() {
        let board: Board = "4k3/4P3/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let mv = Move::new_promotion(Square::E7, Square::E8, PromotionPiece::Queen);
        let after = board.make_move(mv);

        assert_eq!(after.piece_on(Square::E8), Some(PieceKind::Queen));
        assert_eq!(after.color_on(Square::E8), Some(Color::White));
        assert_eq!(after.piece_on(Square::E7), None);
    }

    #[test]
    fn capture_promotion() {
        let board: Board = "3rk3/4P3/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let mv = Move::new_promotion(Square::E7, Square::D8, PromotionPiece::Queen);
        let after = board.make_move(mv);

        assert_eq!(after.piece_on(Square::D8), Some(PieceKind::Queen));
        assert_eq!(after.color_on(Square::D8), Some(Color::White));
        assert_eq!(after.piece_on(Square::E7), None);
    }

    #[test]
    fn capture_promotion_on_corner_revokes_rights() {
        // Black rook sits on h1; white pawn on g7 captures it while promoting.
        let board: Board = "4k3/6P1/8/8/8/8/8/R3K2r w Qq - 0 1".parse().unwrap();
        let mv = Move::new_promotion(Square::G7, Square::H8, PromotionPiece::Queen);
        let after = board.make_move(mv);
        assert!(!after.castling().contains(CastleRights::BLACK_KING));
    }

    #[test]
    fn kingside_castling_white() {
        let board: Board = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();
        let mv = Move::new_castle(Square::E1, Square::G1);
        let after = board.make_move(mv);

        assert_eq!(after.piece_on(Square::G1), Some(PieceKind::King));
        assert_eq!(after.color_on(Square::G1), Some(Color::White));
        assert_eq!(after.piece_on(Square::F1), Some(PieceKind::Rook));
        assert_eq!(after.color_on(Square::F1), Some(Color::White));
        assert_eq!(after.piece_on(Square::E1), None);
        assert_eq!(after.piece_on(Square::H1), None);
        assert!(!after.castling().contains(CastleRights::WHITE_KING));
        assert!(!after.castling().contains(CastleRights::WHITE_QUEEN));
        assert!(after.castling().contains(CastleRights::BLACK_KING));
        assert!(after.castling().contains(CastleRights::BLACK_QUEEN));
    }

    #[test]
    fn queenside_castling_white() {
        let board: Board = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();
        let mv = Move::new_castle(Square::E1, Square::C1);
        let after = board.make_move(mv);

        assert_eq!(after.piece_on(Square::C1), Some(PieceKind::King));
        assert_eq!(after.piece_on(Square::D1), Some(PieceKind::Rook));
        assert_eq!(after.piece_on(Square::E1), None);
        assert_eq!(after.piece_on(Square::A1), None);
    }

    #[test]
    fn rook_move_revokes_castling() {
        let board: Board = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();
        let mv = Move::new(Square::H1, Square::G1);
        let after = board.make_move(mv);

        assert!(!after.castling().contains(CastleRights::WHITE_KING));
        assert!(after.castling().contains(CastleRights::WHITE_QUEEN));
    }

    #[test]
    fn halfmove_clock_increments_on_quiet() {
        let board = starting();
        let mv = Move::new(Square::G1, Square::F3);
        let after = board.make_move(mv);
        assert_eq!(after.halfmove_clock(), 1);
    }

    #[test]
    fn fullmove_increments_after_black() {
        let b0 = starting();
        assert_eq!(b0.fullmove_number(), 1);
        let b1 = b0.make_move(Move::new(Square::E2, Square::E4));
        assert_eq!(b1.fullmove_number(), 1);
        let b2 = b1.make_move(Move::new(Square::E7, Square::E5));
        assert_eq!(b2.fullmove_number(), 2);
    }

    #[test]
    fn incremental_hash_normal_move() {
        let board = starting();
        let after = board.make_move(Move::new(Square::E2, Square::E4));
        assert_eq!(after.hash(), crate::zobrist::hash_from_scratch(&after));
    }

    #[test]
    fn incremental_hash_capture() {
        let b = starting()
            .make_move(Move::new(Square::E2, Square::E4))
            .make_move(Move::new(Square::D7, Square::D5));
        let after = b.make_move(Move::new(Square::E4, Square::D5));
        assert_eq!(after.hash(), crate::zobrist::hash_from_scratch(&after));
    }

    #[test]
    fn incremental_hash_en_passant() {
        let b = starting()
            .make_move(Move::new(Square::E2, Square::E4))
            .make_move(Move::new(Square::A7, Square::A6))
            .make_move(Move::new(Square::E4, Square::E5))
            .make_move(Move::new(Square::D7, Square::D5));
        assert_eq!(b.hash(), crate::zobrist::hash_from_scratch(&b));
        let after = b.make_move(Move::new_en_passant(Square::E5, Square::D6));
        assert_eq!(after.hash(), crate::zobrist::hash_from_scratch(&after));
    }

    #[test]
    fn incremental_hash_castling() {
        let board: Board = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();
        let after = board.make_move(Move::new_castle(Square::E1, Square::G1));
        assert_eq!(after.hash(), crate::zobrist::hash_from_scratch(&after));
    }

    #[test]
    fn incremental_hash_promotion() {
        let board: Board = "4k3/4P3/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        for promo in crate::chess_move::PromotionPiece::ALL {
            let after = board.make_move(Move::new_promotion(Square::E7, Square::E8, promo));
            assert_eq!(
                after.hash(),
                crate::zobrist::hash_from_scratch(&after),
                "hash mismatch for promotion to {:?}",
                promo
            );
        }
    }

    #[test]
    fn transposition_same_hash() {
        let path_a = starting()
            .make_move(Move::new(Square::G1, Square::F3))
            .make_move(Move::new(Square::G8, Square::F6))
            .make_move(Move::new(Square::B1, Square::C3))
            .make_move(Move::new(Square::B8, Square::C6));

        let path_b = starting()
            .make_move(Move::new(Square::B1, Square::C3))
            .make_move(Move::new(Square::B8, Square::C6))
            .make_move(Move::new(Square::G1, Square::F3))
            .make_move(Move::new(Square::G8, Square::F6));

        assert_eq!(path_a.hash(), path_b.hash(), "transposed positions should have equal hashes");
    }

    /// `unmake(make(position, m)) == position` for every legal move from a
    /// handful of representative positions, including captures, castling,
    /// en passant, and promotion.
    #[test]
    fn unmake_restores_position_exactly() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
            "4k3/4P3/8/8/8/8/8/4K3 w - - 0 1",
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 4 4",
        ];

        for fen in fens {
            let board: Board = fen.parse().unwrap();
            for mv in crate::movegen::generate_legal_moves(&board) {
                let mut working = board.clone();
                let depth_before = working.history_depth();
                let undo = working.make(mv);
                assert_eq!(working.history_depth(), depth_before + 1);
                working.unmake(undo);
                assert_eq!(working.history_depth(), depth_before);
                assert_eq!(working, board, "unmake did not restore {fen} after {mv:?}");
            }
        }
    }

    #[test]
    fn unmake_null_restores_position_exactly() {
        let board = starting();
        let mut working = board.clone();
        let undo = working.make_null();
        working.unmake_null(undo);
        assert_eq!(working, board);
    }
}
