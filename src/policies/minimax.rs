//! Depth-bounded alpha-beta minimax, the "Normal" opponent.
//!
//! The search maximizes for the state's current mover and is fully
//! deterministic: same state and depth, same column.

use crate::error::EngineError;
use crate::games::connect4::{ConnectFourState, Owner, WinningStatus, H, W};
use crate::policies::SearchParams;
use crate::GameState;

/// Depth used when `search_depth` is not configured.
const DEFAULT_DEPTH: u32 = 6;
/// Leaf value for a decided game, dominating every heuristic sum.
const WIN_VALUE: f64 = 1000.0;

/// Line directions for the positional heuristic, as (dy, dx) steps.
const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Fixed-depth alpha-beta search policy.
#[derive(Debug)]
pub struct MinimaxPolicy {
    search_depth: Option<u32>,
}

impl MinimaxPolicy {
    pub fn new() -> Self {
        Self { search_depth: None }
    }

    /// Creates a policy searching a fixed number of plies.
    pub fn with_depth(depth: u32) -> Self {
        Self {
            search_depth: Some(depth),
        }
    }

    pub fn configure(&mut self, params: &SearchParams) {
        self.search_depth = params.search_depth;
    }

    pub fn select_action(&mut self, state: &ConnectFourState) -> Result<usize, EngineError> {
        let legal_actions = state.legal_actions();
        if state.is_terminal() || legal_actions.is_empty() {
            return Err(EngineError::NoLegalActions);
        }

        let depth = self.search_depth.unwrap_or(DEFAULT_DEPTH);
        let (action, _value) =
            self.alpha_beta(state, depth, f64::NEG_INFINITY, f64::INFINITY, true)?;

        Ok(action.unwrap_or(legal_actions[0]))
    }

    /// Alpha-beta recursion. `maximizing` tracks whether this level
    /// maximizes for the root mover; leaf values are sign-flipped so the
    /// value is always interpretable by the immediate caller.
    fn alpha_beta(
        &self,
        state: &ConnectFourState,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> Result<(Option<usize>, f64), EngineError> {
        if state.is_terminal() || depth == 0 {
            let value = match state.status() {
                WinningStatus::Win => {
                    if maximizing {
                        WIN_VALUE
                    } else {
                        -WIN_VALUE
                    }
                }
                WinningStatus::Lose => {
                    if maximizing {
                        -WIN_VALUE
                    } else {
                        WIN_VALUE
                    }
                }
                WinningStatus::Draw => 0.0,
                WinningStatus::None => {
                    let evaluation = evaluate_position(state);
                    if maximizing {
                        evaluation
                    } else {
                        -evaluation
                    }
                }
            };
            return Ok((None, value));
        }

        let legal_actions = state.legal_actions();
        if legal_actions.is_empty() {
            return Ok((None, 0.0));
        }

        let mut best_action = legal_actions[0];
        let mut best_value = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for &action in &legal_actions {
            let mut next_state = state.clone();
            next_state.apply(action)?;

            let (_, value) = self.alpha_beta(&next_state, depth - 1, alpha, beta, !maximizing)?;

            if maximizing {
                if value > best_value {
                    best_value = value;
                    best_action = action;
                }
                alpha = alpha.max(best_value);
            } else {
                if value < best_value {
                    best_value = value;
                    best_action = action;
                }
                beta = beta.min(best_value);
            }

            if beta <= alpha {
                break;
            }
        }

        Ok((Some(best_action), best_value))
    }

    pub fn name(&self) -> &'static str {
        "Normal (Alpha-Beta Pruning)"
    }
}

impl Default for MinimaxPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Positional heuristic: every occupied cell contributes a per-direction
/// run score, positive for the mover's pieces and negative for the
/// opponent's.
fn evaluate_position(state: &ConnectFourState) -> f64 {
    let mut score = 0.0;
    for y in 0..H {
        for x in 0..W {
            match state.owner(y, x) {
                Owner::Mine => score += evaluate_cell(state, y, x, Owner::Mine),
                Owner::Theirs => score -= evaluate_cell(state, y, x, Owner::Theirs),
                Owner::Empty => {}
            }
        }
    }
    score
}

/// Scores one occupied cell: for each direction, the maximal contiguous
/// same-owner run through the cell (capped at 4 steps each way) and
/// whether an open in-bounds extension exists beyond it.
fn evaluate_cell(state: &ConnectFourState, y: usize, x: usize, owner: Owner) -> f64 {
    let mut score = 0.0;

    for &(dy, dx) in &DIRECTIONS {
        let mut count = 1;
        let mut open_ends = 0;

        for sign in [-1i32, 1] {
            for step in 1..4 {
                let ny = y as i32 + dy * step * sign;
                let nx = x as i32 + dx * step * sign;
                if ny < 0 || ny >= H as i32 || nx < 0 || nx >= W as i32 {
                    break;
                }

                match state.owner(ny as usize, nx as usize) {
                    o if o == owner => count += 1,
                    Owner::Empty => {
                        open_ends += 1;
                        break;
                    }
                    _ => break,
                }
            }
        }

        if count >= 4 {
            score += 1000.0;
        } else if count == 3 && open_ends >= 1 {
            score += 50.0;
        } else if count == 2 && open_ends >= 1 {
            score += 10.0;
        } else if count == 1 && open_ends >= 1 {
            score += 1.0;
        }
    }

    // Flat bonus for holding the middle columns.
    if x >= W / 2 - 1 && x <= W / 2 + 1 {
        score += 3.0;
    }

    score
}
