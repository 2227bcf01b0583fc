//! Minimax search with alpha-beta pruning.
//!
//! The search explores the move tree by repeatedly applying and undoing
//! moves on one board per worker, alternating maximize/minimize per ply
//! and pruning once the alpha-beta window closes. Depth comes from the
//! difficulty tier and deepens adaptively as material thins out; lower
//! tiers also skip random continuations to deliberately weaken play.

mod eval;
mod parallel;
mod tables;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Color, Move, PieceKind};

pub(crate) const INFINITY: i32 = 1_000_000;

/// AI strength tier. Each tier fixes a base search depth, a chance to
/// overlook a continuation, and how much extra depth the endgame may add.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Base search depth in plies.
    #[must_use]
    pub const fn base_depth(self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Normal => 3,
            Difficulty::Hard => 4,
        }
    }

    /// Probability of skipping a continuation at an interior node.
    #[must_use]
    pub const fn mistake_chance(self) -> f64 {
        match self {
            Difficulty::Easy => 0.15,
            Difficulty::Normal => 0.05,
            Difficulty::Hard => 0.0,
        }
    }

    /// Upper bound on the endgame depth bonus.
    #[must_use]
    pub const fn endgame_depth_cap(self) -> u32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
        }
    }
}

/// Counters accumulated across one search.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    /// Interior and leaf nodes visited.
    pub nodes: u64,
    /// Branches cut by the alpha-beta window closing.
    pub cutoffs: u64,
    /// Times the defensive king-capture shortcut fired. Check-legality
    /// makes this branch unreachable under normal play; the counter exists
    /// so tests can prove it stays that way.
    pub king_captures: u64,
}

impl SearchStats {
    pub(crate) fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
        self.king_captures += other.king_captures;
    }
}

/// Depth-limited adversarial move chooser.
pub struct MiniMax {
    difficulty: Difficulty,
    rng: StdRng,
}

impl MiniMax {
    /// A chooser seeded from entropy.
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        MiniMax {
            difficulty,
            rng: StdRng::from_entropy(),
        }
    }

    /// A deterministically seeded chooser, for reproducible behavior.
    #[must_use]
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        MiniMax {
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Compute the best move for `color` without applying it, or `None`
    /// when the side has no legal move. The caller applies the move; the
    /// search only ever mutates private clones of `board`.
    pub fn choose_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        self.choose_move_with_stats(board, color).0
    }

    /// Like [`choose_move`](Self::choose_move) but also returns the search
    /// counters.
    pub fn choose_move_with_stats(
        &mut self,
        board: &Board,
        color: Color,
    ) -> (Option<Move>, SearchStats) {
        let mut probe = board.clone();
        let root_moves = probe.legal_moves(color);
        if root_moves.is_empty() {
            return (None, SearchStats::default());
        }

        let depth = self.search_depth(board);
        let workers = std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1)
            .min(root_moves.len());
        let seeds: Vec<u64> = (0..workers).map(|_| self.rng.gen()).collect();

        let (scores, stats) = parallel::evaluate_root(
            board,
            &root_moves,
            color,
            depth,
            self.difficulty.mistake_chance(),
            &seeds,
        );

        // First move found with the best score wins: lowest enumeration
        // index among the maxima, independent of worker completion order.
        let mut best_index = scores[0].index;
        let mut best_score = scores[0].score;
        for entry in &scores[1..] {
            if entry.score > best_score
                || (entry.score == best_score && entry.index < best_index)
            {
                best_index = entry.index;
                best_score = entry.score;
            }
        }

        #[cfg(feature = "logging")]
        log::debug!(
            "minimax depth {depth}: chose root move {best_index} score {best_score} after {} nodes",
            stats.nodes
        );

        (root_moves.into_iter().nth(best_index), stats)
    }

    /// Endgames want more lookahead: fewer pieces buy extra plies, capped
    /// per difficulty.
    fn search_depth(&self, board: &Board) -> u32 {
        let bonus = match board.piece_count() {
            0..=6 => 2,
            7..=12 => 1,
            _ => 0,
        };
        self.difficulty.base_depth() + bonus.min(self.difficulty.endgame_depth_cap())
    }
}

/// One ply of the alternating search. Applies each legal move, recurses
/// with the opposite extremal objective, undoes it, and folds the result
/// into the running best; returns as soon as beta <= alpha. A node with no
/// legal continuation scores as the static evaluation.
#[allow(clippy::too_many_arguments)]
pub(crate) fn minimax(
    board: &mut Board,
    ai: Color,
    to_move: Color,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    mistake_chance: f64,
    rng: &mut StdRng,
    stats: &mut SearchStats,
) -> i32 {
    if depth == 0 {
        return eval::evaluate(board, ai, rng);
    }
    let moves = board.legal_moves(to_move);
    if moves.is_empty() {
        return eval::evaluate(board, ai, rng);
    }

    let maximizing = to_move == ai;
    let mut best = if maximizing { -INFINITY } else { INFINITY };
    for mut mv in moves {
        if mistake_chance > 0.0 && rng.gen_bool(mistake_chance) {
            continue;
        }

        // Defensive fallback: check-legality already forbids exposing a
        // king to capture, so a move onto a king's square should never be
        // generated. Fault toward a terminal score rather than corrupting
        // the search if it ever happens; deeper remaining depth scores
        // higher so faster mates would still be preferred.
        if let Some(victim) = board.piece_at(mv.to()) {
            if victim.kind() == PieceKind::King {
                stats.king_captures += 1;
                let score = PieceKind::King.value() * (depth as i32 + 1);
                return if maximizing { score } else { -score };
            }
        }

        stats.nodes += 1;
        mv.apply(board);
        let score = minimax(
            board,
            ai,
            to_move.opponent(),
            depth - 1,
            alpha,
            beta,
            mistake_chance,
            rng,
            stats,
        );
        mv.undo(board);

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if beta <= alpha {
            stats.cutoffs += 1;
            break;
        }
    }

    // Every continuation was skipped as a deliberate mistake.
    if best == -INFINITY || best == INFINITY {
        return eval::evaluate(board, ai, rng);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardBuilder;

    #[test]
    fn test_difficulty_tiers() {
        assert_eq!(Difficulty::Easy.base_depth(), 2);
        assert_eq!(Difficulty::Normal.base_depth(), 3);
        assert_eq!(Difficulty::Hard.base_depth(), 4);
        assert_eq!(Difficulty::Hard.mistake_chance(), 0.0);
        assert!(Difficulty::Easy.mistake_chance() > Difficulty::Normal.mistake_chance());
    }

    #[test]
    fn test_search_deepens_as_material_thins() {
        let ai = MiniMax::with_seed(Difficulty::Hard, 1);
        assert_eq!(ai.search_depth(&Board::standard()), 4);

        let sparse = BoardBuilder::new()
            .place(Color::White, "Ke1")
            .unwrap()
            .place(Color::Black, "Ke8")
            .unwrap()
            .place(Color::White, "Ra1")
            .unwrap()
            .build();
        assert_eq!(ai.search_depth(&sparse), 6);

        // Easy never gets the endgame bonus.
        let easy = MiniMax::with_seed(Difficulty::Easy, 1);
        assert_eq!(easy.search_depth(&sparse), 2);
    }

    #[test]
    fn test_no_legal_moves_yields_none() {
        // Black is checkmated in the corner; the AI has nothing to choose.
        let board = BoardBuilder::new()
            .place(Color::Black, "Kh8")
            .unwrap()
            .place(Color::White, "Qh7")
            .unwrap()
            .place(Color::White, "Kh6")
            .unwrap()
            .build();
        let mut ai = MiniMax::with_seed(Difficulty::Easy, 3);
        assert!(ai.choose_move(&board, Color::Black).is_none());
    }

    #[test]
    fn test_only_move_is_chosen() {
        // The rook seals the g-file; the cornered king's only square is h7.
        let board = BoardBuilder::new()
            .place(Color::Black, "Kh8")
            .unwrap()
            .place(Color::White, "Rg1")
            .unwrap()
            .place(Color::White, "Ka1")
            .unwrap()
            .build();
        let mut probe = board.clone();
        let legal = probe.legal_moves(Color::Black);
        assert_eq!(legal.len(), 1);

        let mut ai = MiniMax::with_seed(Difficulty::Normal, 3);
        let chosen = ai.choose_move(&board, Color::Black).unwrap();
        assert_eq!(chosen.from(), legal[0].from());
        assert_eq!(chosen.to(), legal[0].to());
    }
}
