//! Draw detection: fifty-move rule and insufficient material.

use zugzwang_core::{Board, Color, PieceKind};

/// Return `true` if the position is drawn by the fifty-move rule: the
/// halfmove clock has reached 100 plies (50 full moves) since the last
/// pawn move or capture.
pub fn is_fifty_move_draw(board: &Board) -> bool {
    board.halfmove_clock() >= 100
}

/// Return `true` if neither side has enough material to force checkmate:
/// king vs king, king+minor vs king, or king+bishop vs king+bishop with
/// both bishops on the same color complex.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut minors = [Vec::new(), Vec::new()];
    let mut has_major_or_pawn = false;

    for (sq, piece) in board.occupied_squares() {
        match piece.kind() {
            PieceKind::King => {}
            PieceKind::Knight | PieceKind::Bishop => minors[piece.color().index()].push((piece.kind(), sq)),
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => has_major_or_pawn = true,
        }
    }

    if has_major_or_pawn {
        return false;
    }

    let white = &minors[Color::White.index()];
    let black = &minors[Color::Black.index()];

    match (white.len(), black.len()) {
        (0, 0) => true,
        (1, 0) | (0, 1) => true,
        (1, 1) => {
            let (white_kind, white_sq) = white[0];
            let (black_kind, black_sq) = black[0];
            white_kind == PieceKind::Bishop
                && black_kind == PieceKind::Bishop
                && square_color(white_sq.index()) == square_color(black_sq.index())
        }
        _ => false,
    }
}

fn square_color(index: usize) -> bool {
    let rank = index / 8;
    let file = index % 8;
    (rank + file) % 2 == 0
}

/// Return `true` if the current position is a draw under either the
/// fifty-move rule or insufficient material.
pub fn is_draw(board: &Board) -> bool {
    is_fifty_move_draw(board) || is_insufficient_material(board)
}
