use crate::Player;

/// Number of columns.
pub const WIDTH: usize = 7;
/// Number of rows.
pub const HEIGHT: usize = 6;

/// The grid contents, top row first.
pub type Rows = [[Option<Player>; WIDTH]; HEIGHT];

/// The grid and whose turn it is.
///
/// Row 0 is the top of the board, so pieces settle at high row indices
/// first. A cell, once occupied, stays occupied until [`Self::reset()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    rows: Rows,
    active_player: Player,
}

impl BoardState {
    /// An empty board with player 1 to move.
    pub fn new() -> Self {
        Self {
            rows: [[None; WIDTH]; HEIGHT],
            active_player: Player::One,
        }
    }

    /// Creates a board from existing grid contents.
    ///
    /// Panics if a piece is floating above an empty cell.
    pub fn from_rows(rows: Rows, active_player: Player) -> Self {
        for row in 1..HEIGHT {
            for column in 0..WIDTH {
                assert!(
                    rows[row - 1][column].is_none() || rows[row][column].is_some(),
                    "piece at ({}, {}) is floating",
                    row - 1,
                    column
                );
            }
        }
        Self {
            rows,
            active_player,
        }
    }

    /// Discards everything and starts over, same as [`Self::new()`].
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn active_player(&self) -> Player {
        self.active_player
    }

    pub(crate) fn flip_active_player(&mut self) {
        self.active_player = self.active_player.other();
    }

    pub fn rows(&self) -> &Rows {
        &self.rows
    }

    /// The piece at the given cell, or `None` if the cell is empty or
    /// not on the board.
    pub fn get(&self, row: usize, column: usize) -> Option<Player> {
        self.rows.get(row)?.get(column).copied().flatten()
    }

    /// The row a piece dropped into this column would land in.
    ///
    /// Returns `None` if the column is full. Panics if `column >= WIDTH`;
    /// callers are expected to validate the column first.
    pub fn lowest_open_row(&self, column: usize) -> Option<usize> {
        assert!(column < WIDTH, "column {} out of range", column);
        (0..HEIGHT)
            .rev()
            .find(|&row| self.rows[row][column].is_none())
    }

    pub fn is_column_full(&self, column: usize) -> bool {
        self.lowest_open_row(column).is_none()
    }

    /// The columns that can still take a piece, in ascending order.
    pub fn open_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..WIDTH).filter(|&column| !self.is_column_full(column))
    }

    /// Places a piece.
    ///
    /// The cell must be empty, which holds when `row` was just obtained
    /// from [`Self::lowest_open_row()`].
    pub fn commit(&mut self, row: usize, column: usize, player: Player) {
        debug_assert!(
            self.rows[row][column].is_none(),
            "cell ({}, {}) is already occupied",
            row,
            column
        );
        self.rows[row][column] = Some(player);
    }

    /// Whether every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(Option::is_some))
    }

    pub fn num_pieces(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.is_some())
            .count()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}
