//! Property tests for the board model: invariants that must hold for
//! every reachable state, driven by random column sequences.

use connect4::games::connect4::{Cell, ConnectFourState, WinningStatus, H, W};
use connect4::GameState;
use proptest::prelude::*;

/// Plays a column sequence, skipping illegal entries, and stops early if
/// the game ends. Returns the resulting state.
fn play_sequence(columns: &[usize]) -> ConnectFourState {
    let mut state = ConnectFourState::new();
    for &column in columns {
        if state.is_terminal() {
            break;
        }
        if state.legal_actions().contains(&column) {
            state.apply(column).unwrap();
        }
    }
    state
}

proptest! {
    #[test]
    fn legal_actions_match_column_occupancy(
        columns in prop::collection::vec(0..W, 0..60)
    ) {
        let state = play_sequence(&columns);
        let legal = state.legal_actions();

        for x in 0..W {
            let top_empty = state.cell(H - 1, x) == Cell::Empty;
            prop_assert_eq!(
                legal.contains(&x),
                top_empty,
                "column {} (top empty: {})", x, top_empty
            );
        }
    }

    #[test]
    fn apply_flips_the_mover(
        columns in prop::collection::vec(0..W, 0..60),
        extra in 0..W
    ) {
        let mut state = play_sequence(&columns);
        if !state.is_terminal() && state.legal_actions().contains(&extra) {
            let before = state.is_first();
            state.apply(extra).unwrap();
            prop_assert_ne!(before, state.is_first());
        }
    }

    #[test]
    fn terminal_states_reject_further_moves(
        columns in prop::collection::vec(0..W, 0..60)
    ) {
        let mut state = play_sequence(&columns);
        if state.is_terminal() {
            let status = state.status();
            for column in 0..W {
                prop_assert!(state.apply(column).is_err());
            }
            prop_assert_eq!(state.status(), status);
        }
    }

    #[test]
    fn clones_are_independent(
        columns in prop::collection::vec(0..W, 0..60),
        extra in 0..W
    ) {
        let original = play_sequence(&columns);
        let mut clone = original.clone();

        if !clone.is_terminal() && clone.legal_actions().contains(&extra) {
            clone.apply(extra).unwrap();
        }

        // The original's observable state is untouched by the clone.
        let replay = play_sequence(&columns);
        prop_assert_eq!(original.legal_actions(), replay.legal_actions());
        prop_assert_eq!(original.status(), replay.status());
        prop_assert_eq!(original.is_first(), replay.is_first());
        for y in 0..H {
            for x in 0..W {
                prop_assert_eq!(original.cell(y, x), replay.cell(y, x));
            }
        }
    }

    #[test]
    fn every_cell_has_one_owner_at_most(
        columns in prop::collection::vec(0..W, 0..60)
    ) {
        let state = play_sequence(&columns);

        // Pieces obey gravity: no occupied cell above an empty one.
        for x in 0..W {
            let mut seen_empty = false;
            for y in 0..H {
                match state.cell(y, x) {
                    Cell::Empty => seen_empty = true,
                    _ => prop_assert!(!seen_empty, "floating piece at ({}, {})", y, x),
                }
            }
        }
    }

    #[test]
    fn piece_counts_stay_balanced(
        columns in prop::collection::vec(0..W, 0..60)
    ) {
        let state = play_sequence(&columns);

        let mut first = 0i32;
        let mut second = 0i32;
        for y in 0..H {
            for x in 0..W {
                match state.cell(y, x) {
                    Cell::First => first += 1,
                    Cell::Second => second += 1,
                    Cell::Empty => {}
                }
            }
        }

        // The first player moves first, so they are never behind and at
        // most one piece ahead.
        prop_assert!(first == second || first == second + 1);
        // The mover flag agrees with the piece count.
        prop_assert_eq!(state.is_first(), first == second);
    }

    #[test]
    fn draw_only_on_a_full_board(
        columns in prop::collection::vec(0..W, 0..120)
    ) {
        let state = play_sequence(&columns);
        if state.status() == WinningStatus::Draw {
            prop_assert!(state.legal_actions().is_empty());
        }
    }
}
