//! Attack detection via ray-walking, rather than precomputed bitboard tables.
//!
//! This engine's board is square-centric, so sliding-piece attacks are found
//! by walking outward from a square one step at a time until a piece or the
//! board edge is hit, instead of indexing a magic-bitboard attack table.

use crate::board::Board;
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

const KNIGHT_STEPS: [i32; 8] = [17, 15, 10, 6, -17, -15, -10, -6];
const KING_STEPS: [i32; 8] = [1, -1, 8, -8, 9, 7, -9, -7];
const BISHOP_RAYS: [i32; 4] = [9, 7, -9, -7];
const ROOK_RAYS: [i32; 4] = [1, -1, 8, -8];

/// Return `true` if stepping from `sq` by `delta` would wrap around a board edge,
/// detected via the file distance a legal knight/king/ray step can never exceed.
fn wraps(sq: Square, delta: i32, max_file_delta: i32) -> bool {
    match sq.try_offset(delta) {
        None => true,
        Some(dest) => sq.file_delta(dest).abs() > max_file_delta,
    }
}

/// Return `true` if any knight of `by_color` attacks `sq`.
fn knight_attacks_square(board: &Board, sq: Square, by_color: Color) -> bool {
    for &delta in &KNIGHT_STEPS {
        if wraps(sq, delta, 2) {
            continue;
        }
        let from = sq.try_offset(delta).unwrap();
        if let Some(piece) = board.colored_piece_on(from) {
            if piece.kind() == PieceKind::Knight && piece.color() == by_color {
                return true;
            }
        }
    }
    false
}

/// Return `true` if the king of `by_color` attacks `sq`.
fn king_attacks_square(board: &Board, sq: Square, by_color: Color) -> bool {
    for &delta in &KING_STEPS {
        if wraps(sq, delta, 1) {
            continue;
        }
        let from = sq.try_offset(delta).unwrap();
        if let Some(piece) = board.colored_piece_on(from) {
            if piece.kind() == PieceKind::King && piece.color() == by_color {
                return true;
            }
        }
    }
    false
}

/// Return `true` if a pawn of `by_color` attacks `sq`.
fn pawn_attacks_square(board: &Board, sq: Square, by_color: Color) -> bool {
    // A white pawn on `from` attacks squares one rank up; so to find an
    // attacker of `sq` from White, look one rank down (i.e. negative deltas).
    let deltas: [i32; 2] = match by_color {
        Color::White => [-7, -9],
        Color::Black => [7, 9],
    };
    for &delta in &deltas {
        if wraps(sq, delta, 1) {
            continue;
        }
        let from = sq.try_offset(delta).unwrap();
        if let Some(piece) = board.colored_piece_on(from) {
            if piece.kind() == PieceKind::Pawn && piece.color() == by_color {
                return true;
            }
        }
    }
    false
}

/// Return `true` if a sliding piece of `by_color` attacks `sq` along `rays`,
/// matching either `primary` or `Queen`.
fn slider_attacks_square(
    board: &Board,
    sq: Square,
    by_color: Color,
    rays: &[i32; 4],
    primary: PieceKind,
) -> bool {
    for &delta in rays {
        let max_delta = if delta.abs() == 1 { 7 } else { 1 };
        let mut current = sq;
        loop {
            if wraps(current, delta, max_delta) {
                break;
            }
            current = current.try_offset(delta).unwrap();
            match board.colored_piece_on(current) {
                None => continue,
                Some(piece) => {
                    if piece.color() == by_color
                        && (piece.kind() == primary || piece.kind() == PieceKind::Queen)
                    {
                        return true;
                    }
                    break;
                }
            }
        }
    }
    false
}

/// Return `true` if `sq` is attacked by any piece of `by_color`.
pub fn is_square_attacked(board: &Board, sq: Square, by_color: Color) -> bool {
    pawn_attacks_square(board, sq, by_color)
        || knight_attacks_square(board, sq, by_color)
        || king_attacks_square(board, sq, by_color)
        || slider_attacks_square(board, sq, by_color, &ROOK_RAYS, PieceKind::Rook)
        || slider_attacks_square(board, sq, by_color, &BISHOP_RAYS, PieceKind::Bishop)
}
