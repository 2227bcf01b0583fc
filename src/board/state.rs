//! The mutable authoritative board state.
//!
//! The board owns every live piece in one dense list, plus derived views
//! that must stay in sync on every mutation: an 8x8 position-to-index grid
//! for O(1) lookup, per-color index lists, and a cached king index per
//! color. All mutation goes through `add_piece` / `remove_piece` /
//! `move_piece` / `set_moved_flag`, which update every derived structure
//! atomically; nothing else touches the piece list.

use std::fmt;

use super::types::{Color, LastMove, Piece, PieceKind, Position};

/// Sentinel for an unoccupied grid slot.
const EMPTY: usize = usize::MAX;

/// The mutable game position: piece list, lookup grid, per-color lists,
/// king cache, and the last-move record.
#[derive(Clone, Debug)]
pub struct Board {
    pieces: Vec<Piece>,
    grid: [[usize; 8]; 8],
    by_color: [Vec<usize>; 2],
    kings: [Option<usize>; 2],
    last_move: Option<LastMove>,
}

impl Board {
    /// An empty board with no pieces.
    #[must_use]
    pub fn empty() -> Self {
        Board {
            pieces: Vec::new(),
            grid: [[EMPTY; 8]; 8],
            by_color: [Vec::new(), Vec::new()],
            kings: [None, None],
            last_move: None,
        }
    }

    /// The standard opening position.
    #[must_use]
    pub fn standard() -> Self {
        super::builder::BoardBuilder::starting_position().build()
    }

    #[inline]
    fn slot(position: Position) -> (usize, usize) {
        (position.file() as usize - 1, position.rank() as usize - 1)
    }

    /// The piece on a square, if any.
    #[must_use]
    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        let (f, r) = Self::slot(position);
        let idx = self.grid[f][r];
        if idx == EMPTY {
            None
        } else {
            Some(&self.pieces[idx])
        }
    }

    /// Iterate over every live piece.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// Iterate over one color's pieces.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.by_color[color.index()]
            .iter()
            .map(move |&idx| &self.pieces[idx])
    }

    /// Number of live pieces on the board.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// The cached king position for a color, `None` when absent (bare test
    /// fixtures).
    #[must_use]
    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.kings[color.index()].map(|idx| self.pieces[idx].position())
    }

    /// The most recent move applied to this board.
    #[must_use]
    pub fn last_move(&self) -> Option<&LastMove> {
        self.last_move.as_ref()
    }

    pub(crate) fn set_last_move(&mut self, last_move: Option<LastMove>) {
        self.last_move = last_move;
    }

    /// Snapshot of one color's piece positions. Legality probing mutates
    /// the piece list (capture probes swap-remove and re-add entries), so
    /// enumeration walks a snapshot instead of the live list.
    pub(crate) fn positions_of(&self, color: Color) -> Vec<Position> {
        self.by_color[color.index()]
            .iter()
            .map(|&idx| self.pieces[idx].position())
            .collect()
    }

    /// Add a piece to the board.
    ///
    /// # Panics
    ///
    /// Panics when the square is occupied; two pieces on one square would
    /// corrupt the lookup grid.
    pub(crate) fn add_piece(&mut self, piece: Piece) {
        let (f, r) = Self::slot(piece.position());
        assert!(
            self.grid[f][r] == EMPTY,
            "square {} is already occupied",
            piece.position()
        );

        let idx = self.pieces.len();
        self.grid[f][r] = idx;
        self.by_color[piece.color().index()].push(idx);
        if piece.kind() == PieceKind::King {
            self.kings[piece.color().index()] = Some(idx);
        }
        self.pieces.push(piece);
    }

    /// Remove and return the piece on a square.
    ///
    /// Swap-removal: the removed entry trades places with the last list
    /// entry, the swapped piece's grid slot, color-list entry, and king
    /// cache are fixed up, then the list shrinks. One index changes; every
    /// derived structure agrees before the method returns.
    ///
    /// # Panics
    ///
    /// Panics when the square is empty.
    pub(crate) fn remove_piece(&mut self, position: Position) -> Piece {
        let (f, r) = Self::slot(position);
        let idx = self.grid[f][r];
        assert!(idx != EMPTY, "no piece to remove at {position}");
        self.grid[f][r] = EMPTY;

        let color = self.pieces[idx].color();
        let list = &mut self.by_color[color.index()];
        let list_pos = list
            .iter()
            .position(|&i| i == idx)
            .unwrap_or_else(|| panic!("color list out of sync at {position}"));
        list.swap_remove(list_pos);
        if self.kings[color.index()] == Some(idx) {
            self.kings[color.index()] = None;
        }

        let last = self.pieces.len() - 1;
        if idx != last {
            let swapped_position = self.pieces[last].position();
            let swapped_color = self.pieces[last].color();
            let (sf, sr) = Self::slot(swapped_position);
            self.grid[sf][sr] = idx;

            let swapped_list = &mut self.by_color[swapped_color.index()];
            let swapped_pos = swapped_list
                .iter()
                .position(|&i| i == last)
                .unwrap_or_else(|| panic!("color list out of sync at {swapped_position}"));
            swapped_list[swapped_pos] = idx;
            if self.kings[swapped_color.index()] == Some(last) {
                self.kings[swapped_color.index()] = Some(idx);
            }
        }

        self.pieces.swap_remove(idx)
    }

    /// Relocate a piece, updating its stored position and the grid.
    ///
    /// # Panics
    ///
    /// Panics when the source is empty or the destination occupied.
    pub(crate) fn move_piece(&mut self, from: Position, to: Position) {
        let (ff, fr) = Self::slot(from);
        let (tf, tr) = Self::slot(to);
        let idx = self.grid[ff][fr];
        assert!(idx != EMPTY, "no piece to move at {from}");
        assert!(self.grid[tf][tr] == EMPTY, "destination {to} is occupied");

        self.grid[ff][fr] = EMPTY;
        self.grid[tf][tr] = idx;
        self.pieces[idx].set_position(to);
    }

    /// Overwrite the moved-flag of the piece on a square.
    ///
    /// # Panics
    ///
    /// Panics when the square is empty.
    pub(crate) fn set_moved_flag(&mut self, position: Position, has_moved: bool) {
        let (f, r) = Self::slot(position);
        let idx = self.grid[f][r];
        assert!(idx != EMPTY, "no piece at {position}");
        self.pieces[idx].set_has_moved(has_moved);
    }

    /// Whether no sequence of legal moves can force checkmate.
    ///
    /// True when: fewer than two kings remain (defensive case); only kings
    /// remain; exactly three pieces remain with exactly one bishop or
    /// exactly one knight besides the kings; or exactly four pieces remain
    /// with exactly two bishops on the same square color.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        let kings = self
            .pieces
            .iter()
            .filter(|p| p.kind() == PieceKind::King)
            .count();
        if kings < 2 {
            return true;
        }

        match self.pieces.len() {
            2 => kings == 2,
            3 => {
                let bishops = self.count_kind(PieceKind::Bishop);
                let knights = self.count_kind(PieceKind::Knight);
                kings == 2 && (bishops == 1 && knights == 0 || knights == 1 && bishops == 0)
            }
            4 => {
                let bishops: Vec<&Piece> = self
                    .pieces
                    .iter()
                    .filter(|p| p.kind() == PieceKind::Bishop)
                    .collect();
                kings == 2
                    && bishops.len() == 2
                    && square_color(bishops[0].position()) == square_color(bishops[1].position())
            }
            _ => false,
        }
    }

    fn count_kind(&self, kind: PieceKind) -> usize {
        self.pieces.iter().filter(|p| p.kind() == kind).count()
    }
}

/// Square color as the parity of file + rank.
fn square_color(position: Position) -> i8 {
    (position.file() + position.rank()) % 2
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (1..=8).rev() {
            write!(f, "{rank} ")?;
            for file in 1..=8 {
                let position = Position::new(file, rank).unwrap_or_else(|| unreachable!());
                match self.piece_at(position) {
                    Some(piece) => {
                        let letter = piece.kind().letter();
                        let c = if piece.color() == Color::White {
                            letter
                        } else {
                            letter.to_ascii_lowercase()
                        };
                        write!(f, " {c}")?;
                    }
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}
