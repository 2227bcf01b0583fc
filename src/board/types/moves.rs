//! Reversible move command objects.
//!
//! A [`Move`] describes one transition and carries exactly the state needed
//! to reverse it. The apply/undo pair mutates one shared board in place so
//! the game-tree search never has to copy the position; the `done` flag
//! faults immediately on protocol misuse rather than letting a double apply
//! desynchronize the board's lookup structures.

use std::fmt;

use super::piece::{Color, Piece, PieceKind};
use super::position::Position;
use crate::board::Board;

/// Record of the most recent move applied to a board.
///
/// Move generation rules that depend on "what just happened" (en passant)
/// consult this record; only the immediately preceding move counts.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LastMove {
    pub kind: PieceKind,
    pub color: Color,
    pub from: Position,
    pub to: Position,
}

/// What flavor of transition a [`Move`] performs.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum MoveKind {
    /// A plain relocation, capturing whatever sits on the destination.
    Standard,
    /// King and rook relocate together. Legality (clear, unthreatened path)
    /// is established by the generator before construction.
    Castling {
        rook_from: Position,
        rook_to: Position,
    },
    /// Pawn capture where the captured pawn is *not* on the destination
    /// square.
    EnPassant { captured_square: Position },
    /// Pawn reaches the last rank and is replaced by a new piece.
    Promotion { promote_to: PieceKind },
}

/// Pre-apply state captured so the move can be undone exactly.
#[derive(Clone, Debug)]
struct UndoState {
    moved: Piece,
    captured: Option<Piece>,
    rook: Option<Piece>,
    previous_last_move: Option<LastMove>,
}

/// A reversible transition from one square to another for one piece.
///
/// Protocol: `apply` exactly once, then optionally `undo` exactly once,
/// in that order. Violations panic.
#[derive(Clone, Debug)]
pub struct Move {
    from: Position,
    to: Position,
    kind: MoveKind,
    done: bool,
    undo: Option<UndoState>,
}

impl Move {
    #[must_use]
    pub(crate) fn standard(from: Position, to: Position) -> Self {
        Move {
            from,
            to,
            kind: MoveKind::Standard,
            done: false,
            undo: None,
        }
    }

    #[must_use]
    pub(crate) fn castling(
        from: Position,
        to: Position,
        rook_from: Position,
        rook_to: Position,
    ) -> Self {
        Move {
            from,
            to,
            kind: MoveKind::Castling { rook_from, rook_to },
            done: false,
            undo: None,
        }
    }

    #[must_use]
    pub(crate) fn en_passant(from: Position, to: Position, captured_square: Position) -> Self {
        Move {
            from,
            to,
            kind: MoveKind::EnPassant { captured_square },
            done: false,
            undo: None,
        }
    }

    #[must_use]
    pub(crate) fn promotion(from: Position, to: Position, promote_to: PieceKind) -> Self {
        Move {
            from,
            to,
            kind: MoveKind::Promotion { promote_to },
            done: false,
            undo: None,
        }
    }

    /// Source square.
    #[inline]
    #[must_use]
    pub const fn from(&self) -> Position {
        self.from
    }

    /// Destination square.
    #[inline]
    #[must_use]
    pub const fn to(&self) -> Position {
        self.to
    }

    /// The move's flavor.
    #[must_use]
    pub fn kind(&self) -> &MoveKind {
        &self.kind
    }

    /// Whether this move would capture a piece on the given board.
    ///
    /// Meaningful before `apply`; en passant always captures even though
    /// the destination square is empty.
    #[must_use]
    pub fn is_capture(&self, board: &Board) -> bool {
        match &self.kind {
            MoveKind::EnPassant { .. } => true,
            _ => board.piece_at(self.to).is_some(),
        }
    }

    /// Apply this move to the board, recording undo state.
    ///
    /// # Panics
    ///
    /// Panics when applied twice, when no piece sits on the source square,
    /// or when the board contradicts the move's own variant state (all
    /// engine-internal protocol faults).
    pub fn apply(&mut self, board: &mut Board) {
        assert!(!self.done, "move {self} applied twice");

        let moved = match board.piece_at(self.from) {
            Some(piece) => piece.clone(),
            None => panic!("no piece to move at {}", self.from),
        };
        let previous_last_move = board.last_move().copied();

        let (captured, rook) = match self.kind.clone() {
            MoveKind::Standard => {
                let captured = board.piece_at(self.to).cloned();
                if captured.is_some() {
                    board.remove_piece(self.to);
                }
                board.move_piece(self.from, self.to);
                board.set_moved_flag(self.to, true);
                (captured, None)
            }
            MoveKind::Castling { rook_from, rook_to } => {
                let rook = match board.piece_at(rook_from) {
                    Some(piece) => piece.clone(),
                    None => panic!("castling without a rook at {rook_from}"),
                };
                board.move_piece(self.from, self.to);
                board.set_moved_flag(self.to, true);
                board.move_piece(rook_from, rook_to);
                board.set_moved_flag(rook_to, true);
                (None, Some(rook))
            }
            MoveKind::EnPassant { captured_square } => {
                let captured = match board.piece_at(captured_square) {
                    Some(piece) => piece.clone(),
                    None => panic!("en passant without a pawn at {captured_square}"),
                };
                board.remove_piece(captured_square);
                board.move_piece(self.from, self.to);
                board.set_moved_flag(self.to, true);
                (Some(captured), None)
            }
            MoveKind::Promotion { promote_to } => {
                let captured = board.piece_at(self.to).cloned();
                if captured.is_some() {
                    board.remove_piece(self.to);
                }
                board.remove_piece(self.from);
                board.add_piece(Piece::promoted(promote_to, moved.color(), self.to));
                (captured, None)
            }
        };

        board.set_last_move(Some(LastMove {
            kind: moved.kind(),
            color: moved.color(),
            from: self.from,
            to: self.to,
        }));

        self.undo = Some(UndoState {
            moved,
            captured,
            rook,
            previous_last_move,
        });
        self.done = true;
    }

    /// Reverse a previously applied move, restoring every piece's position,
    /// moved-flag, and the destination occupant exactly.
    ///
    /// # Panics
    ///
    /// Panics when the move has not been applied.
    pub fn undo(&mut self, board: &mut Board) {
        assert!(self.done, "move {self} undone before apply");
        let undo = self
            .undo
            .take()
            .unwrap_or_else(|| panic!("move {self} has no undo state"));

        match &self.kind {
            MoveKind::Standard | MoveKind::EnPassant { .. } => {
                board.move_piece(self.to, self.from);
                board.set_moved_flag(self.from, undo.moved.has_moved());
                if let Some(captured) = undo.captured {
                    board.add_piece(captured);
                }
            }
            MoveKind::Castling { rook_from, rook_to } => {
                board.move_piece(self.to, self.from);
                board.set_moved_flag(self.from, undo.moved.has_moved());
                board.move_piece(*rook_to, *rook_from);
                let rook = undo
                    .rook
                    .unwrap_or_else(|| panic!("castling undo without rook state"));
                board.set_moved_flag(*rook_from, rook.has_moved());
            }
            MoveKind::Promotion { .. } => {
                board.remove_piece(self.to);
                board.add_piece(undo.moved);
                if let Some(captured) = undo.captured {
                    board.add_piece(captured);
                }
            }
        }

        board.set_last_move(undo.previous_last_move);
        self.done = false;
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        match &self.kind {
            MoveKind::Promotion { promote_to } => write!(f, "={}", promote_to.letter()),
            MoveKind::Castling { .. } => write!(f, " castle"),
            MoveKind::EnPassant { .. } => write!(f, " ep"),
            MoveKind::Standard => Ok(()),
        }
    }
}
