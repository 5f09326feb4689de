//! Pseudo-legal sliding piece move generation: bishops, rooks, queens.

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::MoveList;

const BISHOP_RAYS: [i32; 4] = [9, 7, -9, -7];
const ROOK_RAYS: [i32; 4] = [1, -1, 8, -8];

pub(super) fn generate(board: &Board, us: Color, list: &mut MoveList) {
    for sq in Square::all() {
        let Some(piece) = board.colored_piece_on(sq) else {
            continue;
        };
        if piece.color() != us {
            continue;
        }

        match piece.kind() {
            PieceKind::Bishop => walk_rays(board, sq, us, &BISHOP_RAYS, list),
            PieceKind::Rook => walk_rays(board, sq, us, &ROOK_RAYS, list),
            PieceKind::Queen => {
                walk_rays(board, sq, us, &BISHOP_RAYS, list);
                walk_rays(board, sq, us, &ROOK_RAYS, list);
            }
            _ => {}
        }
    }
}

fn walk_rays(board: &Board, sq: Square, us: Color, rays: &[i32; 4], list: &mut MoveList) {
    for &delta in rays {
        let max_delta = if delta.abs() == 1 { 7 } else { 1 };
        let mut current = sq;
        loop {
            let Some(dest) = current.try_offset(delta) else {
                break;
            };
            if current.file_delta(dest).abs() > max_delta {
                break;
            }
            current = dest;

            match board.colored_piece_on(current) {
                None => {
                    list.push(Move::new(sq, current));
                }
                Some(target) => {
                    if target.color() != us {
                        list.push(Move::new(sq, current));
                    }
                    break;
                }
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
    fn rook_on_open_board_has_fourteen_moves() {
        let board: Board = "7k/8/8/8/3R4/8/8/7K w - - 0 1".parse().unwrap();
        let mut list = MoveList::new();
        generate(&board, board.side_to_move(), &mut list);
        assert_eq!(list.len(), 14);
    }

    #[test]
    fn bishop_on_open_board_has_thirteen_moves() {
        let board: Board = "7k/8/8/8/3B4/8/8/7K w - - 0 1".parse().unwrap();
        let mut list = MoveList::new();
        generate(&board, board.side_to_move(), &mut list);
        assert_eq!(list.len(), 13);
    }

    #[test]
    fn queen_combines_rook_and_bishop_rays() {
        let board: Board = "7k/8/8/8/3Q4/8/8/7K w - - 0 1".parse().unwrap();
        let mut list = MoveList::new();
        generate(&board, board.side_to_move(), &mut list);
        assert_eq!(list.len(), 27);
    }

    #[test]
    fn rook_stops_at_friendly_piece() {
        let board: Board = "7k/8/8/8/3R4/3P4/8/7K w - - 0 1".parse().unwrap();
        let mut list = MoveList::new();
        generate(&board, board.side_to_move(), &mut list);
        // Can't capture own pawn; ray in that direction stops one short.
        assert!(!list.as_slice().iter().any(|m| m.dest().index() == Square::D3.index()));
    }
}
