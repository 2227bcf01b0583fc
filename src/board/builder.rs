//! Fluent builder for constructing board positions.
//!
//! Positions are assembled piece by piece, either with typed placement or
//! with the `[KQRBNP][a-h][1-8]` shorthand used for the standard layout and
//! test fixtures.
//!
//! # Example
//! ```
//! use gambit::{BoardBuilder, Color};
//!
//! let board = BoardBuilder::new()
//!     .place(Color::White, "Ke1")
//!     .unwrap()
//!     .place(Color::Black, "Ke8")
//!     .unwrap()
//!     .place(Color::White, "Pa2")
//!     .unwrap()
//!     .build();
//! assert_eq!(board.piece_count(), 3);
//! ```

use std::str::FromStr;

use super::error::PlacementError;
use super::types::{Color, Piece, PieceKind, Position};
use super::Board;

/// A fluent builder for [`Board`] positions.
#[derive(Clone, Debug, Default)]
pub struct BoardBuilder {
    pieces: Vec<(PieceKind, Color, Position)>,
}

impl BoardBuilder {
    /// Create a new empty board builder.
    #[must_use]
    pub fn new() -> Self {
        BoardBuilder { pieces: Vec::new() }
    }

    /// A builder holding the standard opening layout.
    #[must_use]
    pub fn starting_position() -> Self {
        let mut builder = Self::new();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (i, &kind) in back_rank.iter().enumerate() {
            let file = i as i8 + 1;
            builder = builder
                .piece(kind, Color::White, Position::new(file, 1).unwrap())
                .piece(kind, Color::Black, Position::new(file, 8).unwrap())
                .piece(PieceKind::Pawn, Color::White, Position::new(file, 2).unwrap())
                .piece(PieceKind::Pawn, Color::Black, Position::new(file, 7).unwrap());
        }
        builder
    }

    /// Place a piece, replacing any piece already on the square.
    #[must_use]
    pub fn piece(mut self, kind: PieceKind, color: Color, position: Position) -> Self {
        self.pieces.retain(|(_, _, p)| *p != position);
        self.pieces.push((kind, color, position));
        self
    }

    /// Place a piece from shorthand notation: piece letter then square,
    /// e.g. `Ke1` or `Pa7`. Malformed strings are rejected before any
    /// board exists, never leaving a partially built position.
    pub fn place(self, color: Color, placement: &str) -> Result<Self, PlacementError> {
        let chars: Vec<char> = placement.chars().collect();
        if chars.len() != 3 {
            return Err(PlacementError::InvalidLength { found: chars.len() });
        }
        let kind = PieceKind::from_letter(chars[0])
            .ok_or(PlacementError::InvalidPiece { char: chars[0] })?;
        let square: String = chars[1..].iter().collect();
        let position =
            Position::from_str(&square).map_err(|_| PlacementError::InvalidSquare {
                notation: square.clone(),
            })?;
        Ok(self.piece(kind, color, position))
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, position: Position) -> Self {
        self.pieces.retain(|(_, _, p)| *p != position);
        self
    }

    /// Build the board.
    #[must_use]
    pub fn build(self) -> Board {
        let mut board = Board::empty();
        for (kind, color, position) in self.pieces {
            board.add_piece(Piece::new(kind, color, position));
        }
        board
    }
}
