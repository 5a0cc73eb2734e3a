//! Greedy one-ply policy, the "Easy" opponent.
//!
//! Three decision tiers, first match wins:
//! 1. take an immediate win if one exists,
//! 2. avoid moves after which the opponent has an immediate winning
//!    reply (one ply only: double-threat forks are not detected, which
//!    is the intended strength of this tier),
//! 3. otherwise sample a column at random, weighted toward the center.

use crate::error::EngineError;
use crate::games::connect4::{ConnectFourState, WinningStatus, W};
use crate::policies::SearchParams;
use crate::GameState;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// One-ply win/block policy with a center-weighted random fallback.
#[derive(Debug)]
pub struct GreedyPolicy {
    rng: Xoshiro256PlusPlus,
}

impl GreedyPolicy {
    /// Creates a policy seeded from the OS.
    pub fn new() -> Self {
        Self {
            rng: Xoshiro256PlusPlus::from_os_rng(),
        }
    }

    /// Creates a policy with a fixed seed, for reproducible play.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    pub fn configure(&mut self, params: &SearchParams) {
        if let Some(seed) = params.seed {
            self.rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        }
    }

    pub fn select_action(&mut self, state: &ConnectFourState) -> Result<usize, EngineError> {
        let legal_actions = state.legal_actions();
        if state.is_terminal() || legal_actions.is_empty() {
            return Err(EngineError::NoLegalActions);
        }

        // 1. Immediate win: after our move the opponent is to move, so a
        // completed line reads as Lose from the new mover's side.
        for &action in &legal_actions {
            let mut test_state = state.clone();
            test_state.apply(action)?;
            if test_state.status() == WinningStatus::Lose {
                return Ok(action);
            }
        }

        // 2. Forced block: keep the first action after which no opponent
        // reply wins on the spot. One ply only.
        for &action in &legal_actions {
            let mut test_state = state.clone();
            test_state.apply(action)?;

            let mut opponent_can_win = false;
            for reply in test_state.legal_actions() {
                let mut reply_state = test_state.clone();
                reply_state.apply(reply)?;
                if reply_state.status() == WinningStatus::Lose {
                    opponent_can_win = true;
                    break;
                }
            }

            if !opponent_can_win {
                return Ok(action);
            }
        }

        // 3. Center-weighted roulette over the remaining choices.
        let weights: Vec<(usize, u32)> = legal_actions
            .iter()
            .map(|&action| (action, center_weight(action)))
            .collect();
        let total_weight: u32 = weights.iter().map(|&(_, w)| w).sum();

        let draw = self.rng.random_range(0..total_weight);
        let mut cumulative = 0;
        for &(action, weight) in &weights {
            cumulative += weight;
            if draw < cumulative {
                return Ok(action);
            }
        }

        // Unreachable given a positive total weight; uniform as a last
        // resort.
        Ok(legal_actions[self.rng.random_range(0..legal_actions.len())])
    }

    pub fn name(&self) -> &'static str {
        "Easy (Greedy)"
    }
}

/// Column weight favoring the center: `W - |x - W/2|`.
fn center_weight(action: usize) -> u32 {
    (W as i64 - (action as i64 - (W / 2) as i64).abs()) as u32
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self::new()
    }
}
