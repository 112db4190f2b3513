//! The NoGo playing agent.
//!
//! This crate is the agent-facing facade over the [`mcts`] search core: it
//! parses `key=value` option strings, validates the agent's identity, and
//! exposes the episode-oriented surface a game host drives
//! (`take_action`, `open_episode` / `close_episode`, `property` /
//! `notify`).
//!
//! # Usage
//!
//! ```rust
//! use games_nogo::Board;
//! use nogo_agent::Player;
//!
//! let mut player = Player::new("name=bot role=black search=mcts simulation=50 seed=42")
//!     .expect("valid configuration");
//!
//! let board = Board::new();
//! let action = player.take_action(&board);
//! assert!(action.is_some(), "the opening position always has a move");
//! ```

pub mod config;
pub mod player;

pub use config::{AgentError, Options};
pub use player::{Player, SearchMode};
