//! Rapid Action Value Estimation.
//!
//! RAVE pools playout statistics across the whole tree by move identity:
//! every backpropagation records each path node's move, so a move's value
//! estimate accumulates far faster than any single node's visit count. The
//! estimate is biased (it ignores move order), so selection blends it with
//! the node's own statistics through a schedule `beta` that decays as real
//! playouts accumulate at the root.

use games_nogo::{Color, Placement, BOARD_SIZE};

use crate::node::Node;

/// Per-move playout statistics, keyed by (color, cell index) in flat
/// arrays — every possible placement has a slot, no hashing involved.
#[derive(Debug, Clone)]
pub struct RaveTable {
    plays: [[u32; BOARD_SIZE]; 2],
    wins: [[u32; BOARD_SIZE]; 2],
}

#[inline]
fn color_slot(color: Color) -> usize {
    match color {
        Color::Black => 0,
        _ => 1,
    }
}

impl RaveTable {
    pub fn new() -> Self {
        Self {
            plays: [[0; BOARD_SIZE]; 2],
            wins: [[0; BOARD_SIZE]; 2],
        }
    }

    /// Record one backpropagation step for `mv`: a play always, a win when
    /// the playout was won by the player of `mv`.
    pub fn record(&mut self, mv: Placement, win: bool) {
        let (slot, index) = (color_slot(mv.color()), mv.index());
        self.plays[slot][index] += 1;
        if win {
            self.wins[slot][index] += 1;
        }
    }

    #[inline]
    pub fn plays(&self, mv: Placement) -> u32 {
        self.plays[color_slot(mv.color())][mv.index()]
    }

    #[inline]
    pub fn wins(&self, mv: Placement) -> u32 {
        self.wins[color_slot(mv.color())][mv.index()]
    }

    /// Total recorded plays across all moves.
    pub fn total_plays(&self) -> u64 {
        self.plays
            .iter()
            .flat_map(|side| side.iter())
            .map(|&p| p as u64)
            .sum()
    }

    /// Pooled win rate for `mv`; zero when never recorded.
    pub fn win_rate(&self, mv: Placement) -> f64 {
        let plays = self.plays(mv);
        if plays == 0 {
            0.0
        } else {
            self.wins(mv) as f64 / plays as f64
        }
    }
}

impl Default for RaveTable {
    fn default() -> Self {
        Self::new()
    }
}

/// RAVE mixing weight `beta = sqrt(S / (3T + S))`: starts at 1 (all RAVE)
/// and decays toward 0 as the root playout count `T` approaches and passes
/// the configured simulation budget `S`.
#[inline]
pub fn beta(simulation_budget: u32, root_playouts: u32) -> f64 {
    let s = simulation_budget.max(1) as f64;
    let t = root_playouts as f64;
    (s / (3.0 * t + s)).sqrt()
}

/// Blended UCB + RAVE selection score for a child node:
///
/// `(1-beta) * node_win_rate + beta * rave_win_rate
///  + sqrt(2) * sqrt(ln(parent_visits) / visits)`
///
/// Infinite while either statistic is missing, so unvisited moves are
/// tried before any blending happens.
pub fn rave_score(node: &Node, parent_visits: u32, table: &RaveTable, beta: f64) -> f64 {
    let mv = match node.mv {
        Some(mv) => mv,
        None => return f64::NEG_INFINITY, // the root is never a candidate
    };
    if node.visits == 0 || table.plays(mv) == 0 {
        return f64::INFINITY;
    }
    let exploit = (1.0 - beta) * node.win_rate() + beta * table.win_rate(mv);
    let parent_visits = parent_visits.max(1) as f64;
    let explore =
        std::f64::consts::SQRT_2 * (parent_visits.ln() / node.visits as f64).sqrt();
    exploit + explore
}
