//! # Connect Four: Player vs AI
//!
//! Interactive console driver for the engine. It owns the single
//! authoritative game state, alternates between reading a human column
//! and asking the configured policy for a move, and renders the board
//! between turns.
//!
//! ## Usage
//! ```text
//! play                        # you (X) vs the Normal AI (O)
//! play -d hard -s 42          # seeded Hard opponent
//! play --ai-only --opponent easy -d hard
//! ```

use clap::Parser;
use colored::Colorize;
use connect4::games::connect4::{Cell, ConnectFourState, WinningStatus, H, W};
use connect4::policies::{Policy, SearchParams};
use connect4::GameState;
use std::error::Error;
use std::io::{self, Write};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// AI difficulty: random, easy, normal or hard
    #[clap(short, long, default_value = "normal")]
    difficulty: String,

    /// Search depth in plies; also scales the MCTS budget (depth * 100)
    #[clap(long)]
    depth: Option<u32>,

    /// Seed for the AI's random source, for reproducible games
    #[clap(short, long)]
    seed: Option<u64>,

    /// Let two AIs play each other instead of prompting for moves
    #[clap(long, action = clap::ArgAction::SetTrue)]
    ai_only: bool,

    /// Difficulty of the first player in --ai-only mode
    #[clap(long, default_value = "easy")]
    opponent: String,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("{}", format!("error: {err}").red());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let params = SearchParams {
        search_depth: args.depth,
        seed: args.seed,
        ..SearchParams::default()
    };

    if args.ai_only {
        exhibition(&args, &params)
    } else {
        interactive(&args, &params)
    }
}

/// Human (X, first player) against the configured AI (O).
fn interactive(args: &Args, params: &SearchParams) -> Result<(), Box<dyn Error>> {
    let mut ai = Policy::from_difficulty(&args.difficulty, params)?;
    let mut state = ConnectFourState::new();

    println!("=== Connect Four: Player vs AI ===\n");
    println!("You are {} (first player)", "X".red().bold());
    println!("AI is {} ({})", "O".yellow().bold(), ai.name());
    println!("Enter a column number (1-{W}) to place your piece\n");

    while !state.is_terminal() {
        println!("{}", render_board(&state));

        if state.is_first() {
            let action = read_column(&state)?;
            state.apply(action)?;
            println!("You placed a piece in column {}\n", action + 1);
        } else {
            println!("AI is thinking...");
            let action = ai.select_action(&state)?;
            state.apply(action)?;
            println!("AI placed a piece in column {}\n", action + 1);
        }
    }

    println!("{}", render_board(&state));
    announce(&state, "You", "AI");
    Ok(())
}

/// Two AIs against each other: `--opponent` moves first, `--difficulty`
/// second.
fn exhibition(args: &Args, params: &SearchParams) -> Result<(), Box<dyn Error>> {
    let mut first = Policy::from_difficulty(&args.opponent, params)?;
    let mut second = Policy::from_difficulty(&args.difficulty, params)?;
    let mut state = ConnectFourState::new();

    println!("=== Connect Four: AI vs AI ===\n");
    println!("X: {}  |  O: {}\n", first.name(), second.name());

    while !state.is_terminal() {
        let (policy, symbol) = if state.is_first() {
            (&mut first, "X")
        } else {
            (&mut second, "O")
        };
        let action = policy.select_action(&state)?;
        state.apply(action)?;
        println!("{} plays column {}", symbol, action + 1);
    }

    println!("\n{}", render_board(&state));
    announce(&state, first.name(), second.name());
    Ok(())
}

/// Prompts until a 1-based column that is currently legal is entered.
fn read_column(state: &ConnectFourState) -> Result<usize, Box<dyn Error>> {
    let legal_actions = state.legal_actions();
    loop {
        print!("Your turn (1-{W}): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }

        match line.trim().parse::<usize>() {
            Ok(column) if (1..=W).contains(&column) => {
                let action = column - 1;
                if legal_actions.contains(&action) {
                    return Ok(action);
                }
                println!("Column {column} is full. Try again.\n");
            }
            _ => println!("Invalid input! Enter a number between 1 and {W}.\n"),
        }
    }
}

/// Renders the board with colored pieces, bottom row last.
fn render_board(state: &ConnectFourState) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Current turn: {}\n\n",
        if state.is_first() { "X" } else { "O" }
    ));
    out.push_str("    1   2   3   4   5   6   7\n");
    out.push_str("  +---+---+---+---+---+---+---+\n");

    for y in (0..H).rev() {
        out.push_str("  |");
        for x in 0..W {
            let piece = match state.cell(y, x) {
                Cell::First => "X".red().bold().to_string(),
                Cell::Second => "O".yellow().bold().to_string(),
                Cell::Empty => " ".to_string(),
            };
            out.push_str(&format!(" {} |", piece));
        }
        out.push('\n');
        out.push_str("  +---+---+---+---+---+---+---+\n");
    }

    out
}

/// Prints the final result, attributing the mover-relative status to the
/// absolute players: after a winning move the loser is the one to move.
fn announce(state: &ConnectFourState, first_name: &str, second_name: &str) {
    match state.status() {
        WinningStatus::Lose => {
            let winner = if state.is_first() { second_name } else { first_name };
            println!("{}", format!("{winner} won!").green().bold());
        }
        WinningStatus::Win => {
            let winner = if state.is_first() { first_name } else { second_name };
            println!("{}", format!("{winner} won!").green().bold());
        }
        WinningStatus::Draw => println!("{}", "It's a draw!".cyan().bold()),
        WinningStatus::None => {}
    }
}
