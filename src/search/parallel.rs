//! Root-level parallel evaluation.
//!
//! Every root branch is independent, so root candidates are fanned out
//! across worker threads. The reversible move protocol mutates one board
//! in place, so each worker owns a private deep clone of the position and
//! a private RNG; below the root each worker recurses single-threaded on
//! its own copy. No locking guards the boards themselves — only the work
//! queue (an atomic index) and the result sink are shared.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{minimax, SearchStats, INFINITY};
use crate::board::{Board, Color, Move};

/// Score of one root candidate, keyed by its enumeration index.
pub(crate) struct RootScore {
    pub index: usize,
    pub score: i32,
}

pub(crate) fn evaluate_root(
    board: &Board,
    moves: &[Move],
    ai: Color,
    depth: u32,
    mistake_chance: f64,
    seeds: &[u64],
) -> (Vec<RootScore>, SearchStats) {
    let next = AtomicUsize::new(0);
    let results: Mutex<Vec<RootScore>> = Mutex::new(Vec::with_capacity(moves.len()));
    let totals: Mutex<SearchStats> = Mutex::new(SearchStats::default());

    thread::scope(|scope| {
        for &seed in seeds {
            let next = &next;
            let results = &results;
            let totals = &totals;
            scope.spawn(move || {
                let mut local = board.clone();
                let mut rng = StdRng::seed_from_u64(seed);
                let mut stats = SearchStats::default();

                loop {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    if index >= moves.len() {
                        break;
                    }
                    let mut mv = moves[index].clone();
                    mv.apply(&mut local);
                    let score = minimax(
                        &mut local,
                        ai,
                        ai.opponent(),
                        depth - 1,
                        -INFINITY,
                        INFINITY,
                        mistake_chance,
                        &mut rng,
                        &mut stats,
                    );
                    mv.undo(&mut local);
                    results.lock().push(RootScore { index, score });
                }

                totals.lock().merge(&stats);
            });
        }
    });

    (results.into_inner(), totals.into_inner())
}
