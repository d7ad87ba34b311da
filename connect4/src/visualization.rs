use crate::{BoardState, GameOutcome, Player, WIDTH};

/// The token drawn for a player's piece.
pub fn token(player: Player) -> char {
    match player {
        Player::One => '●',
        Player::Two => '○',
    }
}

/// Draws the board, with the column numbers (starting at 1) on top.
pub fn visualize_board(board: &BoardState) -> String {
    // The column tops, which are what a player points at
    let mut result = String::from(" ");
    for column in 0..WIDTH {
        result += &format!(" {}", column + 1);
    }
    result += "\n╭";
    for _ in 0..WIDTH {
        result += "──";
    }
    result += "─╮\n";

    for row in board.rows() {
        result += "│";
        for cell in row {
            match cell {
                Some(player) => result += &format!(" {}", token(*player)),
                None => result += " ·",
            }
        }
        result += " │\n";
    }

    result += "╰";
    for _ in 0..WIDTH {
        result += "──";
    }
    result += "─╯";
    result
}

/// The message shown below the board.
pub fn status_line(outcome: GameOutcome, active_player: Player) -> String {
    match outcome {
        GameOutcome::InProgress => format!("{}'s Turn", active_player),
        GameOutcome::Win { player } => format!("{} wins!", player),
        GameOutcome::Tie => String::from("It's a tie!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_board() {
        let mut board = BoardState::new();
        board.commit(5, 0, Player::One);
        board.commit(5, 1, Player::Two);
        board.commit(4, 0, Player::One);
        let expected = "  1 2 3 4 5 6 7
╭───────────────╮
│ · · · · · · · │
│ · · · · · · · │
│ · · · · · · · │
│ · · · · · · · │
│ ● · · · · · · │
│ ● ○ · · · · · │
╰───────────────╯";
        assert_eq!(visualize_board(&board), expected);
    }

    #[test]
    fn messages() {
        assert_eq!(
            status_line(GameOutcome::InProgress, Player::Two),
            "Player 2's Turn"
        );
        assert_eq!(
            status_line(
                GameOutcome::Win {
                    player: Player::One
                },
                Player::One
            ),
            "Player 1 wins!"
        );
        assert_eq!(status_line(GameOutcome::Tie, Player::Two), "It's a tie!");
    }
}
