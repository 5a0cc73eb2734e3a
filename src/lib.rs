//! # Connect Four Engine
//!
//! A turn-based two-player board-game engine for a Connect Four variant,
//! with AI opponents of increasing strength behind a single policy
//! interface.
//!
//! ## Architecture
//! - [`GameState`] is the minimal contract a game must satisfy: legality,
//!   transition, termination, cloning, ordering by score.
//! - [`games::connect4::ConnectFourState`] is the concrete board model.
//!   It keeps two role-relative grids (`mine`/`theirs`) that are swapped
//!   after every move, so search code never branches on whose turn it is.
//! - [`policies`] holds the four decision algorithms (uniform random,
//!   greedy one-ply, alpha-beta minimax, Monte Carlo Tree Search) behind
//!   the [`policies::Policy`] enum, resolved from a difficulty label by
//!   [`policies::Policy::from_difficulty`].
//!
//! ## Driving a game
//! An external driver owns one state, alternates calling
//! `Policy::select_action` and `ConnectFourState::apply`, and reads the
//! terminal status and board contents for display. All search is
//! single-threaded and synchronous; every exploratory branch operates on
//! an independent clone of the state.

pub mod error;
pub mod games;
pub mod policies;

pub use error::EngineError;

/// The state of a game. Must be cloneable so search algorithms can branch
/// into independent hypothetical futures, and ordered by evaluated score
/// so sibling states can be compared as tie-breaks.
///
/// Ordering (and equality) is by score only: two states with equal score
/// compare equal regardless of board contents. Callers must not rely on
/// it for game-logic equality.
pub trait GameState: Clone + Ord {
    /// Returns every legal action from the current state, in a stable
    /// order. Empty only when no move can be made.
    fn legal_actions(&self) -> Vec<usize>;

    /// Applies an action to the state, mutating it in place. Fails with
    /// [`EngineError::IllegalMove`] if the action is not currently legal.
    fn apply(&mut self, action: usize) -> Result<(), EngineError>;

    /// Returns true if the game is over.
    fn is_terminal(&self) -> bool;

    /// Evaluates the state from the current mover's perspective. Terminal
    /// states map to large constants; otherwise a positional score. Used
    /// only as a comparator between sibling states.
    fn evaluate_score(&self) -> i64;

    /// Returns a clone-and-apply successor for every legal action, in
    /// action order.
    fn next_states(&self) -> Vec<Self> {
        self.legal_actions()
            .into_iter()
            .filter_map(|action| {
                let mut next = self.clone();
                next.apply(action).ok().map(|_| next)
            })
            .collect()
    }
}
