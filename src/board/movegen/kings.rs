//! King generation: neighboring squares plus castling candidates.

use crate::board::types::{Move, Piece, PieceKind, Position, ALL_DIRECTIONS};
use crate::board::Board;

impl Board {
    pub(crate) fn king_moves(&self, piece: &Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        for dir in ALL_DIRECTIONS {
            let Some(target) = piece.position().translate(dir.dfile, dir.drank) else {
                continue;
            };
            let friendly = self
                .piece_at(target)
                .is_some_and(|occupant| occupant.color() == piece.color());
            if !friendly {
                moves.push(Move::standard(piece.position(), target));
            }
        }

        if !piece.has_moved() {
            let rooks: Vec<Position> = self
                .pieces_of(piece.color())
                .filter(|p| {
                    p.kind() == PieceKind::Rook
                        && !p.has_moved()
                        && p.position().rank() == piece.position().rank()
                })
                .map(|p| p.position())
                .collect();
            for rook in rooks {
                if let Some(mv) = self.castling_move(piece, rook) {
                    moves.push(mv);
                }
            }
        }

        moves
    }

    /// Castling toward one unmoved rook: every square strictly between king
    /// and rook must be empty, and neither the king's square nor either
    /// square it crosses may be threatened. The walk bails out at the first
    /// occupied, off-board, or threatened square.
    fn castling_move(&self, king: &Piece, rook: Position) -> Option<Move> {
        let from = king.position();
        // Classic geometry: the rook sits at least three files away, so the
        // king's destination and the rook's are distinct squares.
        if (rook.file() - from.file()).abs() < 3 {
            return None;
        }
        let dir = (rook.file() - from.file()).signum();

        let mut current = from;
        loop {
            current = current.translate(dir, 0)?;
            if current == rook {
                break;
            }
            if self.piece_at(current).is_some() {
                return None;
            }
        }

        let enemy = king.color().opponent();
        let crossed = from.translate(dir, 0)?;
        let destination = crossed.translate(dir, 0)?;
        if self.is_threatened(from, enemy)
            || self.is_threatened(crossed, enemy)
            || self.is_threatened(destination, enemy)
        {
            return None;
        }

        Some(Move::castling(from, destination, rook, crossed))
    }

    pub(crate) fn king_threatens(piece: &Piece, target: Position) -> bool {
        let dfile = (target.file() - piece.position().file()).abs();
        let drank = (target.rank() - piece.position().rank()).abs();
        dfile <= 1 && drank <= 1 && (dfile, drank) != (0, 0)
    }
}
