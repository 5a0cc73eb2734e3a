//! # Decision Policies Module - Unified AI Interface
//!
//! The AI opponents form a small closed set of variants behind one
//! capability interface, implemented as enum dispatch rather than trait
//! objects: no heap allocation, compile-time exhaustiveness, and
//! game-specific optimizations stay possible where needed.
//!
//! ## Difficulty tiers
//! - **Random**: uniform sampling over legal actions
//! - **Easy (Greedy)**: one-ply win/block detection with a
//!   center-weighted random fallback
//! - **Normal (Alpha-Beta)**: depth-bounded minimax with a line/pattern
//!   heuristic
//! - **Hard (MCTS)**: Monte Carlo Tree Search with UCB1 selection and
//!   progressive expansion
//!
//! Drivers resolve a difficulty label through [`Policy::from_difficulty`]
//! and then only call `select_action` on the resulting policy. Stochastic
//! policies own an explicitly seeded generator so searches are
//! reproducible with fixed seeds.

pub mod greedy;
pub mod mcts;
pub mod minimax;
pub mod random;

pub use greedy::GreedyPolicy;
pub use mcts::MctsPolicy;
pub use minimax::MinimaxPolicy;
pub use random::RandomPolicy;

use crate::error::EngineError;
use crate::games::connect4::ConnectFourState;

/// Tunable parameters shared by the policies.
///
/// `search_depth` bounds the minimax search and scales the MCTS iteration
/// budget (`depth * 100`); when unset each policy uses its own default.
/// `time_threshold_ms` is accepted for configuration compatibility but
/// consulted by no search loop: every search runs its full budget.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Search depth in plies; `None` selects the policy's default.
    pub search_depth: Option<u32>,
    /// Reserved time budget per move in milliseconds. Unused.
    pub time_threshold_ms: u64,
    /// Seed for the policy's random source; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            search_depth: None,
            time_threshold_ms: 10,
            seed: None,
        }
    }
}

/// Wrapper enum over the fixed set of decision policies.
#[derive(Debug)]
pub enum Policy {
    Random(RandomPolicy),
    Greedy(GreedyPolicy),
    Minimax(MinimaxPolicy),
    Mcts(MctsPolicy),
}

macro_rules! impl_policy_dispatch {
    ($($variant:ident),*) => {
        impl Policy {
            /// Selects a column for the current mover.
            ///
            /// Blocks until the policy's full search budget completes.
            /// Fails with [`EngineError::NoLegalActions`] on a terminal
            /// state or a state with no legal actions; drivers must check
            /// terminality first.
            pub fn select_action(
                &mut self,
                state: &ConnectFourState,
            ) -> Result<usize, EngineError> {
                match self {
                    $(Policy::$variant(p) => p.select_action(state),)*
                }
            }

            /// Applies new search parameters to the policy.
            pub fn configure(&mut self, params: &SearchParams) {
                match self {
                    $(Policy::$variant(p) => p.configure(params),)*
                }
            }

            /// Human-readable policy name for display.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Policy::$variant(p) => p.name(),)*
                }
            }
        }
    };
}

impl_policy_dispatch!(Random, Greedy, Minimax, Mcts);

impl Policy {
    /// Resolves a difficulty label to a configured policy.
    ///
    /// Labels are case-insensitive: `"random"`, `"easy"`, `"normal"`
    /// (with the `"alphabeta"` alias), `"hard"`. Unknown labels fail with
    /// [`EngineError::UnknownDifficulty`] naming the label.
    pub fn from_difficulty(label: &str, params: &SearchParams) -> Result<Self, EngineError> {
        let mut policy = match label.to_lowercase().as_str() {
            "random" => Policy::Random(RandomPolicy::new()),
            "easy" => Policy::Greedy(GreedyPolicy::new()),
            "normal" | "alphabeta" => Policy::Minimax(MinimaxPolicy::new()),
            "hard" => Policy::Mcts(MctsPolicy::new()),
            _ => return Err(EngineError::UnknownDifficulty(label.to_string())),
        };
        policy.configure(params);
        Ok(policy)
    }
}
