use crate::GameOutcome;

/// The error type for [`Game::play()`](crate::Game::play), i.e. for a column selection
/// that does not lead to a piece being placed.
///
/// None of these change any state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectedMove {
    InvalidColumn { column: i64 },
    ColumnFull { column: usize },
    GameOver { outcome: GameOutcome },
}

impl std::error::Error for RejectedMove {}

impl std::fmt::Display for RejectedMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectedMove::InvalidColumn { column } => write!(
                f,
                "Column {} was selected, but the board only has columns 0 to {}",
                column,
                crate::WIDTH - 1
            ),
            RejectedMove::ColumnFull { column } => {
                write!(f, "Column {} is already full", column)
            }
            RejectedMove::GameOver { outcome } => match outcome {
                GameOutcome::Win { player } => {
                    write!(f, "The game is over, {} has already won", player)
                }
                GameOutcome::Tie => write!(f, "The game is over, it ended in a tie"),
                GameOutcome::InProgress => write!(f, "The game is over"),
            },
        }
    }
}

/// A player identifier other than 1 or 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidPlayerId(pub u8);

impl std::error::Error for InvalidPlayerId {}

impl std::fmt::Display for InvalidPlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is not a player, expected 1 or 2", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn messages() {
        assert_eq!(
            RejectedMove::InvalidColumn { column: 9 }.to_string(),
            "Column 9 was selected, but the board only has columns 0 to 6"
        );
        assert_eq!(
            RejectedMove::GameOver {
                outcome: GameOutcome::Win {
                    player: Player::Two
                }
            }
            .to_string(),
            "The game is over, Player 2 has already won"
        );
    }
}
