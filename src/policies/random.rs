//! Uniform random policy: the weakest baseline opponent.

use crate::error::EngineError;
use crate::games::connect4::ConnectFourState;
use crate::policies::SearchParams;
use crate::GameState;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Selects uniformly at random among the legal actions.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: Xoshiro256PlusPlus,
}

impl RandomPolicy {
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

        let index = self.rng.random_range(0..legal_actions.len());
        Ok(legal_actions[index])
    }

    pub fn name(&self) -> &'static str {
        "Random"
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selects_legal_action() {
        let mut policy = RandomPolicy::with_seed(0);
        let state = ConnectFourState::new();
        let legal = state.legal_actions();
        for _ in 0..100 {
            let action = policy.select_action(&state).unwrap();
            assert!(legal.contains(&action));
        }
    }

    #[test]
    fn test_fails_on_terminal_state() {
        let mut state = ConnectFourState::new();
        for _ in 0..3 {
            state.apply(0).unwrap();
            state.apply(1).unwrap();
        }
        state.apply(0).unwrap();
        assert!(state.is_terminal());

        let mut policy = RandomPolicy::with_seed(0);
        assert!(matches!(
            policy.select_action(&state),
            Err(EngineError::NoLegalActions)
        ));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let state = ConnectFourState::new();
        let mut a = RandomPolicy::with_seed(42);
        let mut b = RandomPolicy::with_seed(42);
        for _ in 0..20 {
            assert_eq!(
                a.select_action(&state).unwrap(),
                b.select_action(&state).unwrap()
            );
        }
    }

    #[test]
    fn test_only_remaining_column_is_chosen() {
        let mut state = ConnectFourState::new();
        // Fill columns 0..6 completely without ending the game: pair up
        // columns so no vertical run of 4 forms for either player.
        for pair in [(0, 1), (2, 3), (4, 5)] {
            for _ in 0..3 {
                state.apply(pair.0).unwrap();
                state.apply(pair.1).unwrap();
            }
            for _ in 0..3 {
                state.apply(pair.1).unwrap();
                state.apply(pair.0).unwrap();
            }
        }
        assert!(!state.is_terminal());
        assert_eq!(state.legal_actions(), vec![6]);

        let mut policy = RandomPolicy::with_seed(3);
        assert_eq!(policy.select_action(&state).unwrap(), 6);
    }
}
