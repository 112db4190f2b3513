//! Monte Carlo Tree Search for NoGo.
//!
//! This crate is the move-selection core of a NoGo agent: given a position
//! and the side to move, it grows a search tree with random playouts and
//! returns the most-visited move. NoGo legality comes from the
//! [`games_nogo`] rules crate; nothing here knows the rules beyond "ask the
//! board".
//!
//! # Overview
//!
//! Each iteration has four phases:
//!
//! 1. **Selection**: descend from the root by UCB1 (optionally blended
//!    with RAVE) until a childless node is reached
//! 2. **Expansion**: add one child per legal placement of the node's side
//!    to move
//! 3. **Playout**: uniformly random legal self-play from a fresh child
//!    until one side has no placement — that side loses
//! 4. **Backpropagation**: bump visit counts along the path, crediting
//!    wins to the player who moved into each node
//!
//! The budget is either a fixed simulation count or a wall-clock cap from a
//! phase table (cheap opening moves, expensive middle game). Root-parallel
//! search runs K independent trees and sums their root visit counts.
//!
//! # Usage
//!
//! ```rust
//! use games_nogo::{Board, Color};
//! use mcts::{run_search, CandidateSet, SearchConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut candidates = CandidateSet::new();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let config = SearchConfig::for_testing();
//!
//! let outcome = run_search(&Board::new(), Color::Black, config, &mut candidates, &mut rng)
//!     .unwrap();
//! assert!(outcome.best.is_some());
//! ```

pub mod budget;
pub mod config;
pub mod node;
pub mod parallel;
pub mod playout;
pub mod rave;
pub mod search;
pub mod tree;

// Re-export main types
pub use budget::{Budget, BudgetClock, PhaseTable, PHASE_TABLE_LEN};
pub use config::SearchConfig;
pub use node::{Node, NodeId};
pub use parallel::run_root_parallel;
pub use playout::{playout, CandidateSet};
pub use rave::RaveTable;
pub use search::{run_search, Search, SearchError, SearchOutcome};
pub use tree::SearchTree;
