//! Sliding piece generation (rook, bishop, queen).

use crate::board::types::{Direction, Move, Piece, Position};
use crate::board::Board;

impl Board {
    /// Walk each direction one step at a time: stop before stepping off
    /// board or onto a friendly piece, include the step onto an enemy piece
    /// as a capture, then stop. A blocker is never skipped.
    pub(crate) fn slider_moves(&self, piece: &Piece, directions: &[Direction]) -> Vec<Move> {
        let mut moves = Vec::new();
        for dir in directions {
            let mut current = piece.position();
            while let Some(next) = current.translate(dir.dfile, dir.drank) {
                match self.piece_at(next) {
                    None => {
                        moves.push(Move::standard(piece.position(), next));
                        current = next;
                    }
                    Some(blocker) => {
                        if blocker.color() != piece.color() {
                            moves.push(Move::standard(piece.position(), next));
                        }
                        break;
                    }
                }
            }
        }
        moves
    }

    /// Direction scan restricted to a single target square.
    pub(crate) fn slider_threatens(
        &self,
        piece: &Piece,
        target: Position,
        directions: &[Direction],
    ) -> bool {
        for dir in directions {
            let mut current = piece.position();
            while let Some(next) = current.translate(dir.dfile, dir.drank) {
                if next == target {
                    return true;
                }
                if self.piece_at(next).is_some() {
                    break;
                }
                current = next;
            }
        }
        false
    }
}
