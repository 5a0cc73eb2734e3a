//! Behavioral tests for the decision policies: forced wins and blocks,
//! determinism, statistical convergence, and full-game matchups.

use connect4::games::connect4::{ConnectFourState, WinningStatus};
use connect4::policies::{
    GreedyPolicy, MctsPolicy, MinimaxPolicy, Policy, RandomPolicy, SearchParams,
};
use connect4::GameState;

/// State where the mover completes a vertical four by playing column 3.
fn one_move_from_vertical_win() -> ConnectFourState {
    let mut state = ConnectFourState::new();
    for _ in 0..3 {
        state.apply(3).unwrap(); // X stacks column 3
        state.apply(0).unwrap(); // O stacks column 0
    }
    assert!(!state.is_terminal());
    assert!(state.is_first());
    state
}

#[test]
fn vertical_win_scenario_ends_the_game() {
    // Mover drops in column 3 four consecutive times, opponent always
    // replying in column 0; the 4th drop ends the game with the win
    // attributed to the first player.
    let mut state = ConnectFourState::new();
    for _ in 0..3 {
        state.apply(3).unwrap();
        state.apply(0).unwrap();
    }
    state.apply(3).unwrap();

    assert!(state.is_terminal());
    // The loser is the one left to move: the second player.
    assert_eq!(state.status(), WinningStatus::Lose);
    assert!(!state.is_first());
}

#[test]
fn greedy_takes_the_forced_win() {
    let state = one_move_from_vertical_win();
    let mut policy = GreedyPolicy::with_seed(1);
    assert_eq!(policy.select_action(&state).unwrap(), 3);
}

#[test]
fn greedy_blocks_the_forced_win() {
    // Hand the same threat to the opponent: after X plays column 6 the
    // O threat on column 3 must be blocked.
    let mut state = ConnectFourState::new();
    state.apply(6).unwrap(); // X
    for _ in 0..2 {
        state.apply(3).unwrap(); // O stacks column 3
        state.apply(0).unwrap(); // X stacks column 0
    }
    state.apply(3).unwrap(); // O third piece in column 3
    assert!(state.is_first());

    let mut policy = GreedyPolicy::with_seed(1);
    assert_eq!(policy.select_action(&state).unwrap(), 3);
}

#[test]
fn minimax_is_deterministic_across_instances() {
    let mut state = ConnectFourState::new();
    state.apply(3).unwrap();
    state.apply(2).unwrap();

    let first = MinimaxPolicy::with_depth(6).select_action(&state).unwrap();
    for _ in 0..3 {
        let mut policy = MinimaxPolicy::with_depth(6);
        assert_eq!(policy.select_action(&state).unwrap(), first);
    }
}

#[test]
fn minimax_takes_the_forced_win() {
    let state = one_move_from_vertical_win();
    let mut policy = MinimaxPolicy::with_depth(6);
    assert_eq!(policy.select_action(&state).unwrap(), 3);
}

#[test]
fn mcts_converges_on_the_forced_win() {
    // Across many seeds at the default 1000-iteration budget, the
    // winning column must be selected with overwhelming frequency.
    let state = one_move_from_vertical_win();

    let mut correct = 0;
    let trials = 50;
    for seed in 0..trials {
        let mut policy = MctsPolicy::with_seed(seed);
        if policy.select_action(&state).unwrap() == 3 {
            correct += 1;
        }
    }

    assert!(
        correct >= 48,
        "forced win found in only {correct}/{trials} trials"
    );
}

#[test]
fn minimax_beats_random() {
    let games = 20;
    let mut minimax_wins = 0;

    for seed in 0..games {
        let mut minimax = MinimaxPolicy::with_depth(4);
        let mut random = RandomPolicy::with_seed(seed);
        let mut state = ConnectFourState::new();

        while !state.is_terminal() {
            let action = if state.is_first() {
                minimax.select_action(&state).unwrap()
            } else {
                random.select_action(&state).unwrap()
            };
            state.apply(action).unwrap();
        }

        // Minimax moved first; it won if the second player is the loser.
        if state.status() == WinningStatus::Lose && !state.is_first() {
            minimax_wins += 1;
        }
    }

    assert!(
        minimax_wins >= games * 9 / 10,
        "minimax won only {minimax_wins}/{games} games against random"
    );
}

#[test]
fn mcts_beats_random() {
    let games = 10;
    let mut mcts_wins = 0;

    for seed in 0..games {
        let mut mcts = MctsPolicy::with_seed(seed);
        let mut random = RandomPolicy::with_seed(seed + 1000);
        let mut state = ConnectFourState::new();

        while !state.is_terminal() {
            let action = if state.is_first() {
                mcts.select_action(&state).unwrap()
            } else {
                random.select_action(&state).unwrap()
            };
            state.apply(action).unwrap();
        }

        if state.status() == WinningStatus::Lose && !state.is_first() {
            mcts_wins += 1;
        }
    }

    assert!(
        mcts_wins >= 9,
        "MCTS won only {mcts_wins}/{games} games against random"
    );
}

#[test]
fn factory_policies_finish_a_full_game() {
    // Every difficulty pairing drives a game to a terminal state within
    // the 42 moves the board allows.
    let params = SearchParams {
        search_depth: Some(2),
        seed: Some(7),
        ..SearchParams::default()
    };

    for first_label in ["random", "easy", "normal", "hard"] {
        let mut first = Policy::from_difficulty(first_label, &params).unwrap();
        let mut second = Policy::from_difficulty("random", &params).unwrap();
        let mut state = ConnectFourState::new();
        let mut moves = 0;

        while !state.is_terminal() {
            let action = if state.is_first() {
                first.select_action(&state).unwrap()
            } else {
                second.select_action(&state).unwrap()
            };
            state.apply(action).unwrap();
            moves += 1;
            assert!(moves <= 42, "{first_label}: game exceeded the board");
        }

        assert!(state.is_terminal());
    }
}
