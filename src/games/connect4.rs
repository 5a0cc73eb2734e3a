//! # Connect 4 Game Implementation
//!
//! This module implements the classic Connect 4 board game.
//! Players take turns dropping pieces into columns, trying to get 4 pieces
//! in a row (horizontally, vertically, or diagonally).
//!
//! ## Rules
//! - Players alternate dropping pieces into columns
//! - Pieces fall to the lowest available spot in the column due to gravity
//! - First player to get 4 pieces in a row wins
//! - Game is a draw if the board fills up with no winner
//!
//! ## Board representation
//! The state keeps two parallel occupancy grids, `mine` and `theirs`,
//! instead of one grid tagged with player ids. After every move the grids
//! are swapped and the mover role flips, so `mine` always means "the
//! player about to move" and evaluation code never branches on whose turn
//! it is. Win/lose status is reported relative to the current mover for
//! the same reason.

use crate::error::EngineError;
use crate::GameState;
use std::cmp::Ordering;
use std::fmt;

/// Board height in rows. Row 0 is the bottom row.
pub const H: usize = 6;
/// Board width in columns.
pub const W: usize = 7;
/// Number of pieces in a line needed to win.
pub const CONNECT: usize = 4;

/// Terminal score magnitude, far beyond any positional sum.
pub const INF: i64 = 1_000_000_000;

/// The four line directions checked for a win, as (dy, dx) steps:
/// horizontal, vertical, and the two diagonals.
const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Outcome of a game, always relative to the state's *current* mover.
///
/// `apply` sets `Lose` when the piece just placed completes a line,
/// because after the board swap the side to move is the one who just
/// lost. `Win` is the symmetric case for drivers that present results
/// from the other side; the engine itself never reaches it through play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinningStatus {
    /// Game still in progress.
    None,
    /// The current mover has won.
    Win,
    /// The current mover has lost (the previous mover completed a line).
    Lose,
    /// Board full with no winner.
    Draw,
}

/// Absolute cell occupancy, for display and drivers that attribute
/// pieces to the first or second player rather than to the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    First,
    Second,
}

/// Mover-relative cell occupancy, the view the search heuristics use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Empty,
    Mine,
    Theirs,
}

/// Represents the complete state of a Connect 4 game.
///
/// Cloning produces a fully independent deep copy (the grids are
/// fixed-size arrays), which the search policies rely on when branching
/// into hypothetical futures.
#[derive(Debug, Clone)]
pub struct ConnectFourState {
    /// Occupancy grid of the player about to move, `[row][col]`, row 0 at
    /// the bottom.
    mine: [[bool; W]; H],
    /// Occupancy grid of the opponent.
    theirs: [[bool; W]; H],
    /// True while the first player is the one to move.
    is_first: bool,
    /// Terminal status; monotonic, never reverts to `None` once set.
    status: WinningStatus,
}

impl ConnectFourState {
    /// Creates a fresh game with an empty board, first player to move.
    pub fn new() -> Self {
        Self {
            mine: [[false; W]; H],
            theirs: [[false; W]; H],
            is_first: true,
            status: WinningStatus::None,
        }
    }

    /// Returns the terminal status, relative to the current mover.
    pub fn status(&self) -> WinningStatus {
        self.status
    }

    /// Returns true while the first player is the one to move.
    pub fn is_first(&self) -> bool {
        self.is_first
    }

    /// Mover-relative occupancy of the cell at `(y, x)`, row 0 at the
    /// bottom.
    pub fn owner(&self, y: usize, x: usize) -> Owner {
        if self.mine[y][x] {
            Owner::Mine
        } else if self.theirs[y][x] {
            Owner::Theirs
        } else {
            Owner::Empty
        }
    }

    /// Absolute occupancy of the cell at `(y, x)`: which *player* owns
    /// it, independent of whose turn it is. This is the inversion drivers
    /// need when presenting the role-relative grids to a UI.
    pub fn cell(&self, y: usize, x: usize) -> Cell {
        match self.owner(y, x) {
            Owner::Empty => Cell::Empty,
            Owner::Mine => {
                if self.is_first {
                    Cell::First
                } else {
                    Cell::Second
                }
            }
            Owner::Theirs => {
                if self.is_first {
                    Cell::Second
                } else {
                    Cell::First
                }
            }
        }
    }

    fn is_empty_cell(&self, y: usize, x: usize) -> bool {
        !self.mine[y][x] && !self.theirs[y][x]
    }

    /// Drops a piece for the current mover into `column`, returning the
    /// row it landed in.
    fn place_piece(&mut self, column: usize) -> usize {
        for y in 0..H {
            if self.is_empty_cell(y, column) {
                self.mine[y][column] = true;
                return y;
            }
        }
        unreachable!("column {column} checked legal before placement");
    }

    /// Counts the contiguous run of the mover's pieces through `(y, x)`
    /// along `(dy, dx)`, extending both ways from the placed cell.
    fn check_direction(&self, y: usize, x: usize, dy: i32, dx: i32) -> bool {
        let mut count = 1;

        for sign in [1, -1] {
            let mut ny = y as i32 + dy * sign;
            let mut nx = x as i32 + dx * sign;
            while Self::in_bounds(ny, nx) && self.mine[ny as usize][nx as usize] {
                count += 1;
                ny += dy * sign;
                nx += dx * sign;
            }
        }

        count >= CONNECT
    }

    fn in_bounds(y: i32, x: i32) -> bool {
        y >= 0 && y < H as i32 && x >= 0 && x < W as i32
    }
}

impl GameState for ConnectFourState {
    /// Returns the columns that still have room, left to right. Empty
    /// only when the board is completely full.
    fn legal_actions(&self) -> Vec<usize> {
        (0..W)
            .filter(|&x| self.is_empty_cell(H - 1, x))
            .collect()
    }

    /// Drops a piece for the current mover into `action`.
    ///
    /// After placement the four line directions through the placed cell
    /// are checked; a completed line sets the status to `Lose`, because
    /// the grids are then swapped and the side to move is the one who
    /// just lost. The mover flag flips unconditionally, and a full board
    /// with no line becomes a `Draw`.
    ///
    /// Fails with [`EngineError::IllegalMove`] on a full or out-of-range
    /// column, or when the game is already over. Callers can always check
    /// legality first via `legal_actions`.
    fn apply(&mut self, action: usize) -> Result<(), EngineError> {
        if self.is_terminal() || action >= W || !self.is_empty_cell(H - 1, action) {
            return Err(EngineError::IllegalMove { column: action });
        }

        let y = self.place_piece(action);

        if DIRECTIONS
            .iter()
            .any(|&(dy, dx)| self.check_direction(y, action, dy, dx))
        {
            // The mover just won; after the swap below the new mover has
            // lost, and status is always mover-relative.
            self.status = WinningStatus::Lose;
        }

        std::mem::swap(&mut self.mine, &mut self.theirs);
        self.is_first = !self.is_first;

        if self.status == WinningStatus::None && self.legal_actions().is_empty() {
            self.status = WinningStatus::Draw;
        }

        Ok(())
    }

    fn is_terminal(&self) -> bool {
        self.status != WinningStatus::None
    }

    /// Terminal states score +/-INF (win/lose) or 0 (draw) from the
    /// mover-to-act perspective. Otherwise each occupied cell contributes
    /// a column-centrality weight, positive for the mover's pieces and
    /// negative for the opponent's.
    fn evaluate_score(&self) -> i64 {
        if self.is_terminal() {
            return match self.status {
                WinningStatus::Win => INF,
                WinningStatus::Lose => -INF,
                _ => 0,
            };
        }

        let mut score = 0i64;
        for y in 0..H {
            for x in 0..W {
                let weight = W as i64 - (x as i64 - (W / 2) as i64).abs();
                match self.owner(y, x) {
                    Owner::Mine => score += weight,
                    Owner::Theirs => score -= weight,
                    Owner::Empty => {}
                }
            }
        }
        score
    }
}

impl Default for ConnectFourState {
    fn default() -> Self {
        Self::new()
    }
}

// Ordering is by evaluated score only, so sibling states can be compared
// as tie-breaks. Equal scores compare equal regardless of board contents.
impl PartialEq for ConnectFourState {
    fn eq(&self, other: &Self) -> bool {
        self.evaluate_score() == other.evaluate_score()
    }
}

impl Eq for ConnectFourState {}

impl PartialOrd for ConnectFourState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ConnectFourState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.evaluate_score().cmp(&other.evaluate_score())
    }
}

impl fmt::Display for ConnectFourState {
    /// Renders the board with the bottom row last, pieces attributed to
    /// absolute players: `X` for the first player, `O` for the second.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current turn: {}", if self.is_first { "X" } else { "O" })?;
        writeln!(f)?;
        writeln!(f, "    1   2   3   4   5   6   7")?;
        writeln!(f, "  +---+---+---+---+---+---+---+")?;

        for y in (0..H).rev() {
            write!(f, "  |")?;
            for x in 0..W {
                let c = match self.cell(y, x) {
                    Cell::First => 'X',
                    Cell::Second => 'O',
                    Cell::Empty => ' ',
                };
                write!(f, " {} |", c)?;
            }
            writeln!(f)?;
            writeln!(f, "  +---+---+---+---+---+---+---+")?;
        }

        Ok(())
    }
}
