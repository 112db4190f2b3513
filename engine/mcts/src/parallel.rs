//! Root-parallel search.
//!
//! K workers each grow an independent tree over the same root position —
//! own tree, own RNG, own candidate vectors, no communication — and after
//! every worker has finished, the root children's visit counts are summed
//! by move key to pick the final move. Summing by move key (rather than by
//! child position) keeps the aggregation correct even if expansion order
//! ever differed between trees.

use games_nogo::{Board, Color, Placement, BOARD_SIZE};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::config::SearchConfig;
use crate::playout::CandidateSet;
use crate::search::{Search, SearchError, SearchOutcome};

/// Run `workers` independent searches of `position` and aggregate their
/// root visit counts. Worker `k` seeds its RNG with `base_seed + k`, so a
/// fixed base seed makes the whole ensemble reproducible (up to iteration
/// counts under a timed budget, which each worker measures on its own
/// clock).
pub fn run_root_parallel(
    position: &Board,
    side_to_move: Color,
    config: &SearchConfig,
    workers: usize,
    base_seed: u64,
) -> Result<SearchOutcome, SearchError> {
    if workers == 0 {
        return Err(SearchError::NoWorkers);
    }
    if !side_to_move.is_stone() {
        return Err(SearchError::InvalidColor(side_to_move));
    }

    let outcomes: Vec<SearchOutcome> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let config = config.clone();
                scope.spawn(move || {
                    let mut rng =
                        ChaCha20Rng::seed_from_u64(base_seed.wrapping_add(worker as u64));
                    let mut candidates = CandidateSet::new();
                    let mut search = Search::new(position, side_to_move, config)
                        .expect("side validated before spawning workers");
                    search.run(&mut candidates, &mut rng)
                })
            })
            .collect();

        // Join barrier: no tree is read before every worker is done.
        handles
            .into_iter()
            .map(|handle| handle.join().expect("search worker panicked"))
            .collect()
    });

    let mut totals = [0u32; BOARD_SIZE];
    let mut seen = [false; BOARD_SIZE];
    let mut simulations = 0u32;
    for outcome in &outcomes {
        simulations += outcome.simulations;
        for &(mv, visits) in &outcome.root_visits {
            totals[mv.index()] = totals[mv.index()].saturating_add(visits);
            seen[mv.index()] = true;
        }
    }

    let root_visits: Vec<(Placement, u32)> = (0..BOARD_SIZE)
        .filter(|&index| seen[index])
        .map(|index| (Placement::new(index as u8, side_to_move), totals[index]))
        .collect();

    let mut best: Option<(Placement, u32)> = None;
    for &(mv, visits) in &root_visits {
        match best {
            Some((_, best_visits)) if visits <= best_visits => {}
            _ => best = Some((mv, visits)),
        }
    }

    debug!(
        workers,
        simulations,
        best = ?best,
        "root-parallel aggregation finished"
    );
    Ok(SearchOutcome {
        best: best.map(|(mv, _)| mv),
        root_visits,
        simulations,
    })
}
