//! Pawn generation: advances, diagonal captures, en passant, promotion.

use crate::board::types::{Move, Piece, PieceKind, Position, PROMOTION_KINDS};
use crate::board::Board;

impl Board {
    pub(crate) fn pawn_moves(&self, piece: &Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        let forward = piece.color().pawn_direction();
        let from = piece.position();

        if let Some(one) = from.translate(0, forward) {
            if self.piece_at(one).is_none() {
                push_pawn_move(&mut moves, piece, one);
                // Two steps only from the start square, both squares empty.
                if !piece.has_moved() {
                    if let Some(two) = one.translate(0, forward) {
                        if self.piece_at(two).is_none() {
                            moves.push(Move::standard(from, two));
                        }
                    }
                }
            }
        }

        for dfile in [-1, 1] {
            let Some(target) = from.translate(dfile, forward) else {
                continue;
            };
            if self
                .piece_at(target)
                .is_some_and(|occupant| occupant.color() != piece.color())
            {
                push_pawn_move(&mut moves, piece, target);
            }
        }

        if let Some(mv) = self.en_passant_move(piece) {
            moves.push(mv);
        }

        moves
    }

    /// En passant exists only when the immediately preceding move was an
    /// enemy pawn's two-square advance landing beside this pawn; the board's
    /// last-move record is the sole source, not a memory of history.
    fn en_passant_move(&self, piece: &Piece) -> Option<Move> {
        let last = self.last_move()?;
        let from = piece.position();
        let double_advance =
            last.kind == PieceKind::Pawn && (last.to.rank() - last.from.rank()).abs() == 2;
        let beside =
            last.to.rank() == from.rank() && (last.to.file() - from.file()).abs() == 1;
        if last.color == piece.color() || !double_advance || !beside {
            return None;
        }

        let forward = piece.color().pawn_direction();
        let target = Position::new(last.to.file(), from.rank() + forward)?;
        Some(Move::en_passant(from, target, last.to))
    }

    pub(crate) fn pawn_threatens(&self, piece: &Piece, target: Position) -> bool {
        let forward = piece.color().pawn_direction();
        [-1, 1]
            .iter()
            .any(|&dfile| piece.position().translate(dfile, forward) == Some(target))
    }
}

/// A pawn reaching the last rank promotes; one candidate per choice, queen
/// first. Anywhere else this is a plain move.
fn push_pawn_move(moves: &mut Vec<Move>, piece: &Piece, target: Position) {
    if target.rank() == piece.color().promotion_rank() {
        for kind in PROMOTION_KINDS {
            moves.push(Move::promotion(piece.position(), target, kind));
        }
    } else {
        moves.push(Move::standard(piece.position(), target));
    }
}
