//! Pseudo-legal knight move generation.

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::MoveList;

const STEPS: [i32; 8] = [17, 15, 10, 6, -17, -15, -10, -6];

pub(super) fn generate(board: &Board, us: Color, list: &mut MoveList) {
    for sq in Square::all() {
        let Some(piece) = board.colored_piece_on(sq) else {
            continue;
        };
        if piece.kind() != PieceKind::Knight || piece.color() != us {
            continue;
        }

        for &delta in &STEPS {
            let Some(dest) = sq.try_offset(delta) else {
                continue;
            };
            if sq.file_delta(dest).abs() > 2 {
                continue;
            }
            match board.colored_piece_on(dest) {
                Some(target) if target.color() == us => continue,
                _ => list.push(Move::new(sq, dest)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate;
    use crate::board::Board;
    use crate::movegen::MoveList;

    #[test]
    fn knight_in_center_has_eight_moves() {
        let board: Board = "4k3/8/8/4N3/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let mut list = MoveList::new();
        generate(&board, board.side_to_move(), &mut list);
        assert_eq!(list.len(), 8);
    }

    #[test]
    fn knight_in_corner_has_two_moves() {
        let board: Board = "4k3/8/8/8/8/8/8/N3K3 w - - 0 1".parse().unwrap();
        let mut list = MoveList::new();
        generate(&board, board.side_to_move(), &mut list);
        assert_eq!(list.len(), 2);
    }
}
