use crate::{
    BoardState, Event, GameOutcome, Move, Player, Presenter, RejectedMove, RulesEngine, Window,
    WIDTH,
};

/// What a successful [`Game::play()`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Turn {
    pub placed: Move,
    pub outcome: GameOutcome,
}

/// A single game: one board and the rules applied to it.
///
/// Each game is its own value, so any number of them can exist side by side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Game {
    board: BoardState,
    rules: RulesEngine,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn outcome(&self) -> GameOutcome {
        self.rules.outcome()
    }

    pub fn active_player(&self) -> Player {
        self.board.active_player()
    }

    /// The four cells that decided the game, if it was won.
    pub fn winning_window(&self) -> Option<Window> {
        self.rules.winning_window()
    }

    /// The columns the active player may choose from. Empty once the game is over.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.outcome().is_terminal() {
            Vec::new()
        } else {
            self.board.open_columns().collect()
        }
    }

    /// Drops a piece of the active player into the column.
    ///
    /// On error, nothing has changed.
    pub fn play(&mut self, column: usize) -> Result<Turn, RejectedMove> {
        let outcome = self.outcome();
        if outcome.is_terminal() {
            return Err(RejectedMove::GameOver { outcome });
        }
        if column >= WIDTH {
            return Err(RejectedMove::InvalidColumn {
                column: i64::try_from(column).unwrap_or(i64::MAX),
            });
        }
        let row = self
            .board
            .lowest_open_row(column)
            .ok_or(RejectedMove::ColumnFull { column })?;

        let placed = Move {
            row,
            column,
            player: self.board.active_player(),
        };
        self.board.commit(row, column, placed.player);
        let outcome = self.rules.check_terminal(&mut self.board, placed);
        Ok(Turn { placed, outcome })
    }

    /// Starts over with an empty board and player 1 to move.
    ///
    /// This is the only thing that can be done after the game is over.
    pub fn reset(&mut self) {
        self.board.reset();
        self.rules.reset();
    }

    /// Processes one event from the presentation layer and tells the
    /// presenter what changed.
    ///
    /// A rejected column selection changes nothing and notifies nobody;
    /// the error is only returned so that the caller can log it.
    pub fn handle<P: Presenter + ?Sized>(
        &mut self,
        event: Event,
        presenter: &mut P,
    ) -> Result<(), RejectedMove> {
        match event {
            Event::ColumnSelected { column } => {
                // Check for a finished game first, so that the reported reason
                // does not depend on the column
                let outcome = self.outcome();
                if outcome.is_terminal() {
                    return Err(RejectedMove::GameOver { outcome });
                }
                let column = usize::try_from(column)
                    .map_err(|_| RejectedMove::InvalidColumn { column })?;
                let Turn { placed, outcome } = self.play(column)?;
                presenter.piece_committed(placed);
                if outcome.is_terminal() {
                    presenter.game_ended(outcome);
                } else {
                    presenter.turn_changed(self.active_player());
                }
            }
            Event::ResetRequested => {
                self.reset();
                presenter.board_reset();
                presenter.turn_changed(self.active_player());
            }
        }
        Ok(())
    }
}
