//! Candidate move generation, threat queries, and legality filtering.
//!
//! Generation is split by piece kind, each file owning one family's
//! geometry. Candidate moves ignore check; legality is decided by the
//! apply/check/undo probe in this module, which reuses the reversible
//! [`Move`](crate::board::Move) protocol on the shared board instead of
//! copying it.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::types::{
    Color, Move, Piece, PieceKind, Position, ALL_DIRECTIONS, BISHOP_DIRECTIONS, ROOK_DIRECTIONS,
};
use super::Board;

impl Board {
    /// All geometrically possible moves for the piece on a square,
    /// independent of check-legality. Empty when the square is empty.
    #[must_use]
    pub fn candidate_moves_at(&self, position: Position) -> Vec<Move> {
        let Some(piece) = self.piece_at(position) else {
            return Vec::new();
        };
        match piece.kind() {
            PieceKind::Pawn => self.pawn_moves(piece),
            PieceKind::Knight => self.knight_moves(piece),
            PieceKind::Bishop => self.slider_moves(piece, &BISHOP_DIRECTIONS),
            PieceKind::Rook => self.slider_moves(piece, &ROOK_DIRECTIONS),
            PieceKind::Queen => self.slider_moves(piece, &ALL_DIRECTIONS),
            PieceKind::King => self.king_moves(piece),
        }
    }

    /// Whether the given piece could capture on `target` this instant,
    /// independent of whose turn it is.
    pub(crate) fn piece_threatens(&self, piece: &Piece, target: Position) -> bool {
        match piece.kind() {
            PieceKind::Pawn => self.pawn_threatens(piece, target),
            PieceKind::Knight => Self::knight_threatens(piece, target),
            PieceKind::King => Self::king_threatens(piece, target),
            PieceKind::Bishop => self.slider_threatens(piece, target, &BISHOP_DIRECTIONS),
            PieceKind::Rook => self.slider_threatens(piece, target, &ROOK_DIRECTIONS),
            PieceKind::Queen => self.slider_threatens(piece, target, &ALL_DIRECTIONS),
        }
    }

    /// Whether any piece of `by` threatens `target`.
    #[must_use]
    pub fn is_threatened(&self, target: Position, by: Color) -> bool {
        self.pieces_of(by).any(|p| self.piece_threatens(p, target))
    }

    /// Whether the color's king is threatened. False when the king is
    /// absent, so bare test fixtures still generate moves.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_position(color) {
            Some(king) => self.is_threatened(king, color.opponent()),
            None => false,
        }
    }

    /// Whether applying `mv` would leave the mover's own king threatened.
    /// One full apply/threat-scan/undo cycle per candidate; the most
    /// expensive operation in the engine.
    pub(crate) fn leaves_king_in_check(&mut self, mv: &mut Move, color: Color) -> bool {
        mv.apply(self);
        let in_check = self.is_in_check(color);
        mv.undo(self);
        in_check
    }

    /// Legal moves for the piece on one square. Empty when the square is
    /// empty.
    #[must_use]
    pub fn legal_moves_at(&mut self, position: Position) -> Vec<Move> {
        let color = match self.piece_at(position) {
            Some(piece) => piece.color(),
            None => return Vec::new(),
        };
        let mut legal = Vec::new();
        for mut mv in self.candidate_moves_at(position) {
            if !self.leaves_king_in_check(&mut mv, color) {
                legal.push(mv);
            }
        }
        legal
    }

    /// The union of legal moves across all of one color's pieces.
    #[must_use]
    pub fn legal_moves(&mut self, color: Color) -> Vec<Move> {
        let mut all = Vec::new();
        for position in self.positions_of(color) {
            all.extend(self.legal_moves_at(position));
        }
        all
    }

    /// The color's king is threatened and it has no legal reply.
    #[must_use]
    pub fn is_checkmate(&mut self, color: Color) -> bool {
        self.is_in_check(color) && self.legal_moves(color).is_empty()
    }

    /// The color has no legal move but its king is not threatened.
    #[must_use]
    pub fn is_stalemate(&mut self, color: Color) -> bool {
        !self.is_in_check(color) && self.legal_moves(color).is_empty()
    }
}
