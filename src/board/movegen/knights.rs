//! Knight generation: eight fixed relative offsets.

use crate::board::types::{Move, Piece, Position};
use crate::board::Board;

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

impl Board {
    pub(crate) fn knight_moves(&self, piece: &Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        for (dfile, drank) in KNIGHT_OFFSETS {
            let Some(target) = piece.position().translate(dfile, drank) else {
                continue;
            };
            let friendly = self
                .piece_at(target)
                .is_some_and(|occupant| occupant.color() == piece.color());
            if !friendly {
                moves.push(Move::standard(piece.position(), target));
            }
        }
        moves
    }

    pub(crate) fn knight_threatens(piece: &Piece, target: Position) -> bool {
        KNIGHT_OFFSETS
            .iter()
            .any(|&(dfile, drank)| piece.position().translate(dfile, drank) == Some(target))
    }
}
