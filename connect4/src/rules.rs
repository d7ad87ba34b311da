use crate::{BoardState, GameOutcome, Move, Player, HEIGHT, WIDTH};

/// How many pieces in a row are needed to win.
pub const RUN_LENGTH: usize = 4;

/// The four directions a line of pieces can run in.
///
/// Each direction is only walked forwards, since a line walked backwards
/// is the same line starting at its other end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
    DiagonalDownRight,
    DiagonalUpRight,
}

pub const DIRECTIONS: [Direction; 4] = [
    Direction::Horizontal,
    Direction::Vertical,
    Direction::DiagonalDownRight,
    Direction::DiagonalUpRight,
];

impl Direction {
    /// The (row, column) step from one cell to the next.
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDownRight => (1, 1),
            Direction::DiagonalUpRight => (-1, 1),
        }
    }
}

/// [`RUN_LENGTH`] consecutive cells, identified by the first one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Window {
    pub row: usize,
    pub column: usize,
    pub direction: Direction,
}

impl Window {
    /// The coordinates of all cells, or `None` if the window sticks out
    /// of the board.
    pub fn cells(self) -> Option<[(usize, usize); RUN_LENGTH]> {
        let (d_row, d_column) = self.direction.step();
        let mut cells = [(0, 0); RUN_LENGTH];
        for (k, cell) in cells.iter_mut().enumerate() {
            let row = self.row.checked_add_signed(d_row * k as isize)?;
            let column = self.column.checked_add_signed(d_column * k as isize)?;
            if row >= HEIGHT || column >= WIDTH {
                return None;
            }
            *cell = (row, column);
        }
        Some(cells)
    }

    pub fn contains(self, row: usize, column: usize) -> bool {
        self.cells()
            .is_some_and(|cells| cells.contains(&(row, column)))
    }

    fn is_owned_by(self, board: &BoardState, player: Player) -> bool {
        self.cells().is_some_and(|cells| {
            cells
                .iter()
                .all(|&(row, column)| board.get(row, column) == Some(player))
        })
    }
}

/// Does a line of `player`'s pieces start at this cell, in any direction?
pub fn evaluate_win_from(board: &BoardState, row: usize, column: usize, player: Player) -> bool {
    DIRECTIONS.iter().any(|&direction| {
        Window {
            row,
            column,
            direction,
        }
        .is_owned_by(board, player)
    })
}

/// Looks for a line of `player`'s pieces anywhere on the board, trying
/// every cell as the start of a line.
pub fn find_win(board: &BoardState, player: Player) -> Option<Window> {
    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            for direction in DIRECTIONS {
                let window = Window {
                    row,
                    column,
                    direction,
                };
                if window.is_owned_by(board, player) {
                    return Some(window);
                }
            }
        }
    }
    None
}

/// Like [`find_win()`], but only considers lines that pass through the given cell.
///
/// Since only the piece that was just placed can complete a new line,
/// this finds the same wins as the full scan when called after every commit.
pub fn find_win_through(
    board: &BoardState,
    row: usize,
    column: usize,
    player: Player,
) -> Option<Window> {
    for direction in DIRECTIONS {
        let (d_row, d_column) = direction.step();
        // Walk back from the cell to every possible start of a line through it
        for k in 0..RUN_LENGTH as isize {
            let (Some(start_row), Some(start_column)) = (
                row.checked_add_signed(-d_row * k),
                column.checked_add_signed(-d_column * k),
            ) else {
                continue;
            };
            let window = Window {
                row: start_row,
                column: start_column,
                direction,
            };
            if window.is_owned_by(board, player) {
                return Some(window);
            }
        }
    }
    None
}

/// Decides how a game continues after each commit.
///
/// Win detection always looks for lines of the player who just moved,
/// which under strict alternation is the active player. The engine
/// relies on this: a commit by anyone else is a bug in the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RulesEngine {
    outcome: GameOutcome,
    /// Set exactly when the outcome is a win.
    winning_window: Option<Window>,
}

impl RulesEngine {
    pub fn new() -> Self {
        Self {
            outcome: GameOutcome::InProgress,
            winning_window: None,
        }
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn winning_window(&self) -> Option<Window> {
        self.winning_window
    }

    /// Updates the outcome after `just_played` was committed to `board`,
    /// and hands the turn to the other player if the game goes on.
    pub fn check_terminal(&mut self, board: &mut BoardState, just_played: Move) -> GameOutcome {
        let Move {
            row,
            column,
            player,
        } = just_played;
        debug_assert!(!self.outcome.is_terminal());
        debug_assert_eq!(player, board.active_player());
        debug_assert_eq!(board.get(row, column), Some(player));

        if let Some(window) = find_win_through(board, row, column, player) {
            self.winning_window = Some(window);
            self.outcome = GameOutcome::Win { player };
        } else if board.is_full() {
            self.outcome = GameOutcome::Tie;
        } else {
            board.flip_active_player();
        }
        self.outcome
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}
