//! The chess board: piece placement, side to move, castling, en passant, and move counters.

use std::fmt;

use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::BoardError;
use crate::make_move::Undo;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;
use crate::zobrist;

/// Complete chess position state.
///
/// Pieces are stored square-centric, one slot per square, rather than as
/// bitboards — this engine's search depth doesn't need bitboard-speed
/// attack generation, and the array representation keeps move generation
/// and make/unmake straightforward.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    side_to_move: Color,
    castling: CastleRights,
    en_passant: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    king_squares: [Square; Color::COUNT],
    hash: u64,
    /// Undo records for moves made on this board, LIFO. Grows on `make`,
    /// shrinks on `unmake`; empty whenever the board reflects no pending
    /// make without a matching unmake.
    history: Vec<Undo>,
}

impl Board {
    /// Return the standard starting position.
    pub fn starting_position() -> Board {
        let mut squares = [None; 64];

        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (file, kind) in back_rank.into_iter().enumerate() {
            squares[file] = Some(Piece::new(kind, Color::White));
            squares[56 + file] = Some(Piece::new(kind, Color::Black));
            squares[8 + file] = Some(Piece::new(PieceKind::Pawn, Color::White));
            squares[48 + file] = Some(Piece::new(PieceKind::Pawn, Color::Black));
        }

        let mut board = Board {
            squares,
            side_to_move: Color::White,
            castling: CastleRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            king_squares: [Square::E1, Square::E8],
            hash: 0,
            history: Vec::new(),
        };
        board.hash = zobrist::hash_from_scratch(&board);
        board
    }

    /// Construct an empty board (no pieces). Used by FEN parsing.
    pub(crate) fn empty() -> Board {
        Board {
            squares: [None; 64],
            side_to_move: Color::White,
            castling: CastleRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            king_squares: [Square::E1, Square::E8],
            hash: 0,
            history: Vec::new(),
        }
    }

    /// Depth of the pending-unmake history stack (number of `make` calls not
    /// yet matched by `unmake`).
    #[inline]
    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    /// Return the piece kind on the given square, if any.
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<PieceKind> {
        self.squares[sq.index()].map(Piece::kind)
    }

    /// Return the color of the piece on the given square, if any.
    #[inline]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.squares[sq.index()].map(Piece::color)
    }

    /// Return the colored piece on the given square, if any.
    #[inline]
    pub fn colored_piece_on(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Return `true` if the given square is occupied.
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_some()
    }

    /// Iterate over every occupied square with its piece.
    pub fn occupied_squares(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|piece| (Square::from_index_unchecked(i as u8), piece)))
    }

    /// Return the number of occupied squares.
    pub fn occupied_count(&self) -> u32 {
        self.squares.iter().filter(|p| p.is_some()).count() as u32
    }

    /// Return the square of the king for the given side.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    /// Return the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Return the current castling rights.
    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// Return the en passant target square, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Return the halfmove clock.
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// Return the fullmove number.
    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Return the Zobrist hash of the position.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Set the Zobrist hash.
    #[inline]
    pub(crate) fn set_hash(&mut self, hash: u64) {
        self.hash = hash;
    }

    /// Place a piece on a square, returning whatever piece previously occupied it.
    #[inline]
    pub(crate) fn set_piece(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        let previous = self.squares[sq.index()];
        self.squares[sq.index()] = piece;
        if let Some(p) = piece {
            if p.kind() == PieceKind::King {
                self.king_squares[p.color().index()] = sq;
            }
        }
        previous
    }

    /// Set the en passant target square.
    #[inline]
    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    /// Set the castling rights.
    #[inline]
    pub(crate) fn set_castling(&mut self, rights: CastleRights) {
        self.castling = rights;
    }

    /// Set the halfmove clock.
    #[inline]
    pub(crate) fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    /// Set the side to move.
    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// Flip the side to move in place, leaving every other field untouched.
    ///
    /// Intended for callers that need to probe the position from the other
    /// side's perspective (e.g. mobility counting) and restore it afterward;
    /// the hash is not updated, so the result must never be fed to the
    /// transposition table.
    #[inline]
    pub fn flip_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.flip();
    }

    /// Set the fullmove number.
    #[inline]
    pub(crate) fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number;
    }

    /// Push an undo record onto the history stack. Called by `make`.
    #[inline]
    pub(crate) fn push_undo(&mut self, undo: Undo) {
        self.history.push(undo);
    }

    /// Pop the most recent undo record off the history stack. Called by
    /// `unmake`; panics if the stack is empty, since that indicates a
    /// caller-side mismatch between `make` and `unmake` calls.
    #[inline]
    pub(crate) fn pop_undo(&mut self) -> Undo {
        self.history.pop().expect("unmake called with no matching make")
    }

    /// Validate the structural integrity of the board.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let king_count = self
                .occupied_squares()
                .filter(|(_, p)| p.kind() == PieceKind::King && p.color() == color)
                .count();
            if king_count != 1 {
                let color_name = match color {
                    Color::White => "white",
                    Color::Black => "black",
                };
                return Err(BoardError::InvalidKingCount {
                    color: color_name,
                    count: king_count as u32,
                });
            }
        }

        let on_back_rank = |sq: Square| matches!(sq.rank().index(), 0 | 7);
        if self
            .occupied_squares()
            .any(|(sq, p)| p.kind() == PieceKind::Pawn && on_back_rank(sq))
        {
            return Err(BoardError::PawnsOnBackRank);
        }

        Ok(())
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\")", self)
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for rank_idx in (0u8..8).rev() {
            write!(f, "{}  ", rank_idx + 1)?;
            for file_idx in 0u8..8 {
                let sq = Square::from_index(rank_idx * 8 + file_idx).unwrap();
                let c = match (board.piece_on(sq), board.color_on(sq)) {
                    (Some(kind), Some(Color::White)) => kind.fen_char().to_ascii_uppercase(),
                    (Some(kind), Some(Color::Black)) => kind.fen_char(),
                    _ => '.',
                };
                if file_idx < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
