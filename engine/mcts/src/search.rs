//! The MCTS loop.
//!
//! One iteration: selection descends the tree policy to a leaf, the leaf is
//! expanded with every legal move, a random child is played out to a
//! terminal position, and the result is backpropagated to the root. The
//! loop repeats until the budget is spent, then the depth-1 child with the
//! most visits is the move.
//!
//! The tree lives only inside one `Search`; nothing persists between moves.

use games_nogo::{Board, Color, MoveResult, Placement, BOARD_SIZE};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::SearchConfig;
use crate::node::NodeId;
use crate::playout::{playout, CandidateSet};
use crate::rave::{beta, rave_score, RaveTable};
use crate::tree::SearchTree;

/// Errors that can occur setting up a search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("side to move must be black or white, got {0}")]
    InvalidColor(Color),

    #[error("root-parallel search needs at least one worker")]
    NoWorkers,
}

/// Result of one move computation.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The chosen move; `None` when the side to move has no legal
    /// placement (which loses the game under NoGo rules).
    pub best: Option<Placement>,

    /// Visit counts of the root's children, in expansion order.
    pub root_visits: Vec<(Placement, u32)>,

    /// Iterations actually run (equals the configured count for a
    /// fixed-simulation budget).
    pub simulations: u32,
}

/// A single-tree Monte Carlo search over one position.
pub struct Search {
    tree: SearchTree,
    config: SearchConfig,
    rave: Option<RaveTable>,
}

impl Search {
    /// Set up a search of `position` with `side_to_move` to play.
    pub fn new(
        position: &Board,
        side_to_move: Color,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        if !side_to_move.is_stone() {
            return Err(SearchError::InvalidColor(side_to_move));
        }
        let rave = config.rave.then(RaveTable::new);
        Ok(Self {
            tree: SearchTree::new(*position, side_to_move),
            config,
            rave,
        })
    }

    /// Run the search to budget exhaustion and report the best move.
    ///
    /// `candidates` and `rng` are borrowed rather than owned so a caller
    /// can reuse one candidate set and one seeded engine across moves.
    pub fn run(&mut self, candidates: &mut CandidateSet, rng: &mut ChaCha20Rng) -> SearchOutcome {
        let root = self.tree.root();
        self.expand(root);
        if !self.tree.get(root).is_expanded() {
            debug!("no legal move at the searched position");
            return SearchOutcome {
                best: None,
                root_visits: Vec::new(),
                simulations: 0,
            };
        }

        let stones = self.tree.get(root).state.stones_placed();
        let mut clock = self.config.budget.start(stones);
        let mut simulations = 0u32;
        while clock.take_iteration() {
            self.simulate(candidates, rng);
            simulations += 1;
        }

        let best = self.tree.best_move();
        debug!(
            simulations,
            nodes = self.tree.len(),
            best = ?best,
            "search finished"
        );
        SearchOutcome {
            best: best.map(|(mv, _)| mv),
            root_visits: self.tree.root_visit_counts(),
            simulations,
        }
    }

    /// One iteration: select, expand, play out, backpropagate.
    fn simulate(&mut self, candidates: &mut CandidateSet, rng: &mut ChaCha20Rng) {
        let leaf = self.select();
        self.expand(leaf);

        let node = self.tree.get(leaf);
        let start = if node.is_expanded() {
            let pick = rng.gen_range(0..node.children.len());
            node.children[pick].1
        } else {
            // Terminal leaf: its side to move has no placement, so the
            // playout resolves immediately against it.
            leaf
        };

        let start_node = self.tree.get(start);
        let winner = playout(&start_node.state, start_node.side_to_move, candidates, rng);
        self.tree.backpropagate(start, winner, self.rave.as_mut());
        trace!(leaf = leaf.0, start = start.0, winner = %winner, "simulation complete");
    }

    /// Descend from the root, choosing the best-scoring child at every
    /// level, until a childless node is reached. Scores are computed fresh
    /// at each step; the root playout count feeding the exploration term is
    /// fixed for the duration of one descent.
    fn select(&self) -> NodeId {
        let total = self.tree.get(self.tree.root()).visits;
        let mut current = self.tree.root();
        loop {
            let node = self.tree.get(current);
            if !node.is_expanded() {
                return current;
            }
            let chosen = match &self.rave {
                Some(table) => {
                    let b = beta(self.config.simulations, total);
                    let parent_visits = node.visits;
                    self.tree
                        .select_child(current, |child| rave_score(child, parent_visits, table, b))
                }
                None => {
                    let c = self.config.exploration;
                    self.tree.select_child(current, |child| child.ucb1(total, c))
                }
            };
            match chosen {
                Some(id) => current = id,
                None => return current,
            }
        }
    }

    /// Create one child per legal placement of the node's side to move,
    /// testing cells in index order. A no-op when the node already has
    /// children; a node with no legal placements stays childless.
    fn expand(&mut self, id: NodeId) {
        if self.tree.get(id).is_expanded() {
            return;
        }
        let state = self.tree.get(id).state;
        let side = self.tree.get(id).side_to_move;
        for index in 0..BOARD_SIZE as u8 {
            let mv = Placement::new(index, side);
            let mut after = state;
            if after.apply(mv) == MoveResult::Legal {
                self.tree.add_child(id, mv, after);
            }
        }
    }

    /// The search tree (for inspection and tests).
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }
}

/// Convenience wrapper: set up and run a single search.
pub fn run_search(
    position: &Board,
    side_to_move: Color,
    config: SearchConfig,
    candidates: &mut CandidateSet,
    rng: &mut ChaCha20Rng,
) -> Result<SearchOutcome, SearchError> {
    let mut search = Search::new(position, side_to_move, config)?;
    Ok(search.run(candidates, rng))
}
