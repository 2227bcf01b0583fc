//! The turn-order state machine.
//!
//! A [`Game`] owns one [`Board`], the color to move, and the move history.
//! It enforces turn order, resolves move requests into legal candidate
//! sets, and detects the terminal states (checkmate, stalemate,
//! insufficient material, resignation). Terminal states are ordinary query
//! results, never errors; invalid move requests come back as empty
//! candidate sets so a caller can simply re-prompt.

use crate::board::{Board, Color, Move, Position};

/// Where a game stands.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    Resigned { winner: Color },
}

struct HistoryEntry {
    mv: Move,
    notation: String,
}

/// One chess game: board, side to move, history.
pub struct Game {
    board: Board,
    turn: Color,
    history: Vec<HistoryEntry>,
    resigned: Option<Color>,
}

impl Game {
    /// A fresh game from the standard opening position, White to move.
    #[must_use]
    pub fn new() -> Self {
        Game::with_board(Board::standard(), Color::White)
    }

    /// A game from a custom layout.
    #[must_use]
    pub fn with_board(board: Board, turn: Color) -> Self {
        Game {
            board,
            turn,
            history: Vec::new(),
            resigned: None,
        }
    }

    /// The current position.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whose turn it is.
    #[must_use]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// All legal moves for the side to move.
    #[must_use]
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let turn = self.turn;
        self.board.legal_moves(turn)
    }

    /// Legal moves for the piece on one square. Empty when the square is
    /// empty or the piece belongs to the side not on turn.
    #[must_use]
    pub fn moves_from(&mut self, from: Position) -> Vec<Move> {
        let owned_by_mover = self
            .board
            .piece_at(from)
            .is_some_and(|piece| piece.color() == self.turn);
        if !owned_by_mover {
            return Vec::new();
        }
        self.board.legal_moves_at(from)
    }

    /// Legal moves of the side to move from one square to another. More
    /// than one candidate means the caller must disambiguate (promotion
    /// choice).
    #[must_use]
    pub fn moves_between(&mut self, from: Position, to: Position) -> Vec<Move> {
        self.moves_from(from)
            .into_iter()
            .filter(|mv| mv.to() == to)
            .collect()
    }

    /// Attempt a move between two squares.
    ///
    /// Returns the matching legal candidates. When exactly one matches it
    /// has been applied before returning; zero or several candidates leave
    /// the game untouched so the caller can re-prompt or choose among them.
    pub fn perform_move(&mut self, from: Position, to: Position) -> Vec<Move> {
        let candidates = self.moves_between(from, to);
        if candidates.len() == 1 {
            self.play(candidates[0].clone());
        }
        candidates
    }

    /// Force-apply a chosen move: record its notation, apply it, and pass
    /// the turn. The move must be a fresh candidate for the current
    /// position (the apply protocol faults otherwise).
    pub fn play(&mut self, mut mv: Move) {
        let notation = mv.notation(&self.board);
        mv.apply(&mut self.board);
        #[cfg(feature = "logging")]
        log::debug!("{} played {notation}", self.turn);
        self.history.push(HistoryEntry { mv, notation });
        self.turn = self.turn.opponent();
    }

    /// Reverse the most recent move and restore the prior side to move.
    /// Returns false when there is nothing to undo.
    pub fn undo_move(&mut self) -> bool {
        match self.history.pop() {
            Some(mut entry) => {
                entry.mv.undo(&mut self.board);
                self.turn = self.turn.opponent();
                true
            }
            None => false,
        }
    }

    /// Force the game to end; the opponent of `color` wins. Used when a
    /// player resigns.
    pub fn resign(&mut self, color: Color) {
        self.resigned = Some(color);
        #[cfg(feature = "logging")]
        log::debug!("{color} resigned");
    }

    /// The game's current status.
    #[must_use]
    pub fn status(&mut self) -> GameStatus {
        if let Some(loser) = self.resigned {
            return GameStatus::Resigned {
                winner: loser.opponent(),
            };
        }
        if self.board.is_insufficient_material() {
            return GameStatus::InsufficientMaterial;
        }
        let turn = self.turn;
        if self.board.legal_moves(turn).is_empty() {
            return if self.board.is_in_check(turn) {
                GameStatus::Checkmate {
                    winner: turn.opponent(),
                }
            } else {
                GameStatus::Stalemate
            };
        }
        GameStatus::InProgress
    }

    /// Whether the game has reached any terminal state.
    #[must_use]
    pub fn is_over(&mut self) -> bool {
        self.status() != GameStatus::InProgress
    }

    /// The winner, if the game ended decisively.
    #[must_use]
    pub fn winner(&mut self) -> Option<Color> {
        match self.status() {
            GameStatus::Checkmate { winner } | GameStatus::Resigned { winner } => Some(winner),
            _ => None,
        }
    }

    /// The move history as notation strings, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(|entry| entry.notation.as_str())
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
