//! Pseudo-legal pawn move generation.

use crate::board::Board;
use crate::chess_move::{Move, PromotionPiece};
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::MoveList;

pub(super) fn generate(board: &Board, us: Color, list: &mut MoveList) {
    let (push_delta, start_rank, promo_rank, capture_deltas): (i32, u8, u8, [i32; 2]) = match us {
        Color::White => (8, 1, 7, [7, 9]),
        Color::Black => (-8, 6, 0, [-7, -9]),
    };

    for sq in Square::all() {
        let Some(piece) = board.colored_piece_on(sq) else {
            continue;
        };
        if piece.kind() != PieceKind::Pawn || piece.color() != us {
            continue;
        }

        // Single push.
        if let Some(one) = sq.try_offset(push_delta) {
            if !board.is_occupied(one) {
                push_pawn_move(sq, one, one.rank().index() as u8 == promo_rank, list);

                // Double push from the starting rank.
                if sq.rank().index() as u8 == start_rank {
                    if let Some(two) = one.try_offset(push_delta) {
                        if !board.is_occupied(two) {
                            list.push(Move::new(sq, two));
                        }
                    }
                }
            }
        }

        // Captures (including en passant).
        for &delta in &capture_deltas {
            let Some(dest) = sq.try_offset(delta) else {
                continue;
            };
            if sq.file_delta(dest).abs() != 1 {
                continue;
            }

            if let Some(target) = board.colored_piece_on(dest) {
                if target.color() != us {
                    push_pawn_move(sq, dest, dest.rank().index() as u8 == promo_rank, list);
                }
            } else if board.en_passant() == Some(dest) {
                list.push(Move::new_en_passant(sq, dest));
            }
        }
    }
}

fn push_pawn_move(from: Square, to: Square, is_promotion: bool, list: &mut MoveList) {
    if is_promotion {
        for promo in PromotionPiece::ALL {
            list.push(Move::new_promotion(from, to, promo));
        }
    } else {
        list.push(Move::new(from, to));
    }
}
