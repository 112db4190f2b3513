//! The NoGo playing agent.
//!
//! `Player` wires configuration to the search core: it validates its role
//! and name at construction, owns the seedable random engine and the
//! candidate vectors, and dispatches `take_action` to the configured
//! strategy — a random baseline, a single-tree search, or root-parallel
//! search. A `None` action means the agent has no legal placement, which
//! loses the game under NoGo rules.

use std::fmt;

use games_nogo::{Board, Color, Placement};
use mcts::{run_root_parallel, Budget, CandidateSet, PhaseTable, Search, SearchConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::config::{AgentError, Options};

/// Characters that may not appear in an agent name.
const NAME_FORBIDDEN: &str = "[]():; ";

/// Which move-selection strategy `take_action` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Shuffle the candidate vector, play the first legal placement.
    Random,

    /// Single-tree Monte Carlo search.
    Mcts,

    /// Root-parallel Monte Carlo search.
    ParallelMcts,
}

impl SearchMode {
    fn from_options(options: &Options) -> Self {
        match options.get("search") {
            Some("mcts") => SearchMode::Mcts,
            Some("p-mcts") => SearchMode::ParallelMcts,
            _ => SearchMode::Random,
        }
    }
}

/// A NoGo agent configured from a `key=value` option string.
pub struct Player {
    options: Options,
    color: Color,
    mode: SearchMode,
    search_config: SearchConfig,
    workers: usize,
    rng: ChaCha20Rng,
    candidates: CandidateSet,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name())
            .field("role", &self.role())
            .field("mode", &self.mode)
            .field("workers", &self.workers)
            .finish()
    }
}

impl Player {
    /// Build an agent from an option string (see [`Options::parse`]).
    ///
    /// Recognized keys: `name`, `role` (black|white), `search`
    /// (random|mcts|p-mcts), `simulation`, `timeout` (seconds; switches
    /// the budget to the phase table rescaled to that peak), `thread`
    /// (worker count for p-mcts), `seed`. Anything else is preserved but
    /// unused.
    pub fn new(args: &str) -> Result<Self, AgentError> {
        let options = Options::parse(args);

        let name = options.get("name").unwrap_or_default();
        if name.chars().any(|c| NAME_FORBIDDEN.contains(c)) {
            return Err(AgentError::InvalidName(name.to_string()));
        }

        let color = match options.get("role") {
            Some("black") => Color::Black,
            Some("white") => Color::White,
            other => return Err(AgentError::InvalidRole(other.unwrap_or_default().to_string())),
        };

        let mode = SearchMode::from_options(&options);

        let simulations = options.get_parsed::<u32>("simulation")?.unwrap_or(1000);
        let mut search_config = SearchConfig::default().with_simulations(simulations);
        if let Some(timeout) = options.get_parsed::<f64>("timeout")? {
            if !(timeout > 0.0) {
                return Err(AgentError::InvalidValue {
                    key: "timeout".to_string(),
                    value: timeout.to_string(),
                });
            }
            let table = PhaseTable::default().scaled_to_peak(timeout);
            search_config = search_config.with_budget(Budget::Timed(table));
        }

        let workers = options.get_parsed::<usize>("thread")?.unwrap_or(4);
        if workers == 0 {
            return Err(AgentError::InvalidValue {
                key: "thread".to_string(),
                value: "0".to_string(),
            });
        }

        let rng = match options.get_parsed::<u64>("seed")? {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };

        Ok(Self {
            options,
            color,
            mode,
            search_config,
            workers,
            rng,
            candidates: CandidateSet::new(),
        })
    }

    /// Compute a move for the given position. `None` when the agent has no
    /// legal placement.
    ///
    /// The search tree (or trees, in parallel mode) is created here and
    /// dropped before returning; only the candidate vectors and the random
    /// engine persist across moves.
    pub fn take_action(&mut self, board: &Board) -> Option<Placement> {
        match self.mode {
            SearchMode::Random => {
                self.candidates.random_legal(board, self.color, &mut self.rng)
            }
            SearchMode::Mcts => {
                let mut search = Search::new(board, self.color, self.search_config.clone())
                    .expect("role validated at construction");
                let outcome = search.run(&mut self.candidates, &mut self.rng);
                debug!(
                    action = ?outcome.best,
                    simulations = outcome.simulations,
                    "mcts move"
                );
                outcome.best
            }
            SearchMode::ParallelMcts => {
                // Each move draws a fresh base seed from the agent's engine,
                // so a seeded agent is reproducible while workers within one
                // move still search with distinct streams.
                let base_seed = self.rng.gen();
                let outcome = run_root_parallel(
                    board,
                    self.color,
                    &self.search_config,
                    self.workers,
                    base_seed,
                )
                .expect("thread count validated at construction");
                debug!(
                    action = ?outcome.best,
                    workers = self.workers,
                    simulations = outcome.simulations,
                    "p-mcts move"
                );
                outcome.best
            }
        }
    }

    /// Episode lifecycle hook; this agent keeps no per-episode state.
    pub fn open_episode(&mut self, _flag: &str) {}

    /// Episode lifecycle hook; this agent keeps no per-episode state.
    pub fn close_episode(&mut self, _flag: &str) {}

    /// Win claim hook kept for facade parity; this agent never claims.
    pub fn check_for_win(&self, _board: &Board) -> bool {
        false
    }

    /// Read back a configuration value.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.options.get(key)
    }

    /// Accept a `key=value` update from the host. Updates the option map
    /// only; the agent's color and strategy are fixed at construction.
    pub fn notify(&mut self, message: &str) {
        self.options.set_pair(message);
    }

    pub fn name(&self) -> &str {
        self.options.get("name").unwrap_or("unknown")
    }

    pub fn role(&self) -> &str {
        self.options.get("role").unwrap_or("unknown")
    }

    /// The stone color this agent plays.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }
}
