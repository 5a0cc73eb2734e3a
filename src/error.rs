//! Error types for the engine core.
//!
//! Only three operations in the core are fallible: asking a policy for a
//! move, applying a move to a state, and resolving a difficulty label.
//! Everything else is infallible by construction on the fixed-size board.

/// Errors surfaced by the game state and the decision policies.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A policy was asked for a move on a terminal state or a state with
    /// no legal actions. Drivers must check terminality first.
    #[error("no legal actions available; check is_terminal() before selecting")]
    NoLegalActions,

    /// A move targeted a full or out-of-range column, or a finished game.
    /// Legality is always caller-checkable via `legal_actions` beforehand.
    #[error("illegal move in column {column}")]
    IllegalMove { column: usize },

    /// A difficulty label not recognized by the policy factory.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}
