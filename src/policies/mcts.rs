//! Monte Carlo Tree Search, the "Hard" opponent.
//!
//! Classic UCT shape: selection by UCB1, progressive expansion once a
//! leaf has been visited often enough, uniform random playouts, and a
//! `1 - value` back-up at every level because the mover alternates. The
//! tree lives for a single `select_action` call; each node exclusively
//! owns its children, so there are no shared references to manage.

use crate::error::EngineError;
use crate::games::connect4::{ConnectFourState, WinningStatus};
use crate::policies::SearchParams;
use crate::GameState;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// UCB1 exploration constant.
const EXPLORATION: f64 = 1.0;
/// Visits a leaf must accumulate before it is expanded.
const EXPAND_THRESHOLD: u32 = 10;
/// Iteration budget when `search_depth` is not configured.
const DEFAULT_ITERATIONS: u32 = 1000;
/// Iterations contributed per configured depth unit.
const ITERATIONS_PER_DEPTH: u32 = 100;

/// Monte Carlo Tree Search policy.
#[derive(Debug)]
pub struct MctsPolicy {
    search_depth: Option<u32>,
    rng: Xoshiro256PlusPlus,
}

impl MctsPolicy {
    /// Creates a policy seeded from the OS.
    pub fn new() -> Self {
        Self {
            search_depth: None,
            rng: Xoshiro256PlusPlus::from_os_rng(),
        }
    }

    /// Creates a policy with a fixed seed, for reproducible play.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            search_depth: None,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    pub fn configure(&mut self, params: &SearchParams) {
        self.search_depth = params.search_depth;
        if let Some(seed) = params.seed {
            self.rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        }
    }

    pub fn select_action(&mut self, state: &ConnectFourState) -> Result<usize, EngineError> {
        let legal_actions = state.legal_actions();
        if state.is_terminal() || legal_actions.is_empty() {
            return Err(EngineError::NoLegalActions);
        }
        if legal_actions.len() == 1 {
            return Ok(legal_actions[0]);
        }

        let mut root = Node::new(state.clone());
        root.expand()?;

        let iterations = self
            .search_depth
            .map(|depth| depth * ITERATIONS_PER_DEPTH)
            .unwrap_or(DEFAULT_ITERATIONS);
        for _ in 0..iterations {
            root.evaluate(&mut self.rng)?;
        }

        // The answer is the most-visited child, not the best-valued one:
        // visit counts are the statistically robust signal.
        let mut best_index = 0;
        let mut best_visits = 0;
        for (index, child) in root.children.iter().enumerate() {
            if child.visits > best_visits {
                best_index = index;
                best_visits = child.visits;
            }
        }

        Ok(legal_actions[best_index])
    }

    pub fn name(&self) -> &'static str {
        "Hard (MCTS)"
    }
}

impl Default for MctsPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// One node of the search tree. Children are index-aligned with the
/// node state's legal actions at expansion time.
#[derive(Debug)]
struct Node {
    state: ConnectFourState,
    children: Vec<Node>,
    win_sum: f64,
    visits: u32,
}

impl Node {
    fn new(state: ConnectFourState) -> Self {
        Self {
            state,
            children: Vec::new(),
            win_sum: 0.0,
            visits: 0,
        }
    }

    /// Creates one child per legal action of this node's state.
    fn expand(&mut self) -> Result<(), EngineError> {
        self.children.clear();
        for action in self.state.legal_actions() {
            let mut child_state = self.state.clone();
            child_state.apply(action)?;
            self.children.push(Node::new(child_state));
        }
        Ok(())
    }

    /// Runs one simulate-and-backpropagate trial through this node and
    /// returns the value from this node's mover's perspective.
    fn evaluate(&mut self, rng: &mut Xoshiro256PlusPlus) -> Result<f64, EngineError> {
        if self.state.is_terminal() {
            // Node values are stored from the node's own mover's
            // perspective; Lose means that mover has lost. The parent's
            // `1 -` flip and the UCB1 exploitation term both rely on
            // this orientation.
            let value = match self.state.status() {
                WinningStatus::Win => 1.0,
                WinningStatus::Lose => 0.0,
                _ => 0.5,
            };
            self.win_sum += value;
            self.visits += 1;
            return Ok(value);
        }

        if self.children.is_empty() {
            let mut playout_state = self.state.clone();
            let value = playout(&mut playout_state, rng)?;
            self.win_sum += value;
            self.visits += 1;

            if self.visits == EXPAND_THRESHOLD {
                self.expand()?;
            }
            return Ok(value);
        }

        let selected = self.select_child_index();
        let value = 1.0 - self.children[selected].evaluate(rng)?;
        self.win_sum += value;
        self.visits += 1;
        Ok(value)
    }

    /// Picks the child to descend into: any never-visited child first so
    /// every child gets at least one sample, then the UCB1 maximum.
    fn select_child_index(&self) -> usize {
        for (index, child) in self.children.iter().enumerate() {
            if child.visits == 0 {
                return index;
            }
        }

        let total_visits: u32 = self.children.iter().map(|c| c.visits).sum();
        let mut best_index = 0;
        let mut best_value = f64::NEG_INFINITY;

        for (index, child) in self.children.iter().enumerate() {
            let visits = child.visits as f64;
            // A child's stored value is from its own mover's perspective;
            // the `1 -` converts it into ours.
            let exploit = 1.0 - child.win_sum / visits;
            let explore =
                EXPLORATION * (2.0 * (total_visits as f64).ln() / visits).sqrt();
            let ucb1 = exploit + explore;

            if ucb1 > best_value {
                best_value = ucb1;
                best_index = index;
            }
        }

        best_index
    }
}

/// Uniform random playout to a terminal state, valued for the mover of
/// the state it starts from.
fn playout(
    state: &mut ConnectFourState,
    rng: &mut Xoshiro256PlusPlus,
) -> Result<f64, EngineError> {
    match state.status() {
        WinningStatus::Win => return Ok(1.0),
        WinningStatus::Lose => return Ok(0.0),
        WinningStatus::Draw => return Ok(0.5),
        WinningStatus::None => {}
    }

    let legal_actions = state.legal_actions();
    if legal_actions.is_empty() {
        // A non-terminal state without actions cannot arise; valued as a
        // draw if it ever does.
        return Ok(0.5);
    }

    let action = legal_actions[rng.random_range(0..legal_actions.len())];
    state.apply(action)?;
    Ok(1.0 - playout(state, rng)?)
}
