//! Rules-correct chess move generation coupled with a depth-limited
//! adversarial search.
//!
//! The crate is split into three layers:
//!
//! - [`board`] — the mutable board, piece move generation, and the
//!   reversible [`Move`](board::Move) apply/undo protocol the search is
//!   built on.
//! - [`game`] — the turn-order state machine: legality filtering, move
//!   history, and terminal-state detection.
//! - [`search`] — minimax with alpha-beta pruning over the board
//!   primitives, with root-level parallelism.
//!
//! # Example
//! ```
//! use gambit::{Difficulty, Game, MiniMax, Position};
//!
//! let mut game = Game::new();
//! let from = Position::new(5, 2).unwrap(); // e2
//! let to = Position::new(5, 4).unwrap(); // e4
//! let applied = game.perform_move(from, to);
//! assert_eq!(applied.len(), 1);
//!
//! let mut ai = MiniMax::new(Difficulty::Easy);
//! let reply = ai.choose_move(game.board(), game.turn());
//! assert!(reply.is_some());
//! ```

pub mod board;
pub mod game;
pub mod search;

pub use board::{
    Board, BoardBuilder, Color, LastMove, Move, MoveKind, Piece, PieceKind, PlacementError,
    Position, PositionError,
};
pub use game::{Game, GameStatus};
pub use search::{Difficulty, MiniMax, SearchStats};
