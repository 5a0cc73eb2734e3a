//! # Game Implementations Module
//!
//! Concrete games playable by the engine. Each game implements the
//! [`crate::GameState`] trait so the decision policies and any driver can
//! operate on it through a single interface.
//!
//! Currently one game is implemented:
//! - **Connect 4**: gravity-based connection game on a 6x7 grid for 2
//!   players, win by lining up 4 pieces.

pub mod connect4;
