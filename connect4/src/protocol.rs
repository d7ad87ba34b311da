use serde::{Deserialize, Serialize};

use crate::InvalidPlayerId;

/// One of the two players.
///
/// On the wire, a player is its bare numeric identifier, `1` or `2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Player {
    /// Always moves first.
    One,
    Two,
}

impl Player {
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// The player whose turn comes after this one.
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = InvalidPlayerId;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            _ => Err(InvalidPlayerId(id)),
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> u8 {
        player.id()
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.id())
    }
}

/// A piece that has been committed to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Row 0 is the top row, row `HEIGHT - 1` the bottom one.
    pub row: usize,
    pub column: usize,
    pub player: Player,
}

/// Where a game stands after the latest commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameOutcome {
    InProgress,
    Win { player: Player },
    Tie,
}

impl GameOutcome {
    /// Win or tie. No more moves are accepted until a reset.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win { player } => Some(player),
            _ => None,
        }
    }
}

/// Input from the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A column top was clicked.
    ///
    /// The column is signed so that nonsense like `-1` still reaches
    /// the core and gets rejected as an invalid column, instead of
    /// failing deserialization.
    ColumnSelected { column: i64 },
    /// The "new game" button was pressed.
    ResetRequested,
}

/// Output towards the presentation layer.
///
/// This mirrors the methods of [`Presenter`] one to one, for hosts that
/// need to ship notifications elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notification {
    PieceCommitted {
        row: usize,
        column: usize,
        player: Player,
    },
    TurnChanged {
        player: Player,
    },
    /// The outcome is always terminal.
    GameEnded {
        outcome: GameOutcome,
    },
    BoardReset,
}

/// The rendering side of a game.
///
/// The core calls these methods in the order the changes happen; an
/// implementation only has to draw them.
pub trait Presenter {
    fn piece_committed(&mut self, placed: Move);
    fn turn_changed(&mut self, player: Player);
    fn game_ended(&mut self, outcome: GameOutcome);
    /// The board was cleared, and the rendered grid should be as well.
    fn board_reset(&mut self);
}

impl Presenter for Vec<Notification> {
    fn piece_committed(&mut self, placed: Move) {
        self.push(Notification::PieceCommitted {
            row: placed.row,
            column: placed.column,
            player: placed.player,
        });
    }

    fn turn_changed(&mut self, player: Player) {
        self.push(Notification::TurnChanged { player });
    }

    fn game_ended(&mut self, outcome: GameOutcome) {
        self.push(Notification::GameEnded { outcome });
    }

    fn board_reset(&mut self) {
        self.push(Notification::BoardReset);
    }
}
