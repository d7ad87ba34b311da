use std::io::{BufRead, Write};

use connect4::{status_line, visualize_board, Event, Game, Notification};
use tracing::{debug, info, trace, warn};

use crate::recording::{Exchange, Recorder};
use crate::Config;

/// Counts of what happened during a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub games_finished: usize,
    pub accepted_events: usize,
    pub rejected_events: usize,
    pub malformed_lines: usize,
}

/// Drives a single [`Game`] on behalf of an external presentation layer.
pub struct Referee {
    game: Game,
    recorder: Option<Recorder>,
    show_board: bool,
    summary: Summary,
}

impl Referee {
    pub fn new(config: Config) -> Self {
        Self {
            game: Game::new(),
            recorder: config.recorder,
            show_board: config.show_board,
            summary: Summary::default(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Applies one event and returns the notifications for the presentation layer.
    ///
    /// Events the game rejects are logged and produce no notifications.
    /// An error is returned only if the recording could not be written.
    pub fn process(&mut self, event: Event) -> anyhow::Result<Vec<Notification>> {
        if event == Event::ResetRequested {
            // The game that is being discarded goes into its own file
            if let Some(recorder) = &mut self.recorder {
                if let Some(path) = recorder.write_game_recording()? {
                    debug!(path = %path.display(), "Wrote game recording");
                }
            }
        }

        let mut notifications = Vec::new();
        let rejected = match self.game.handle(event, &mut notifications) {
            Ok(()) => {
                self.summary.accepted_events += 1;
                None
            }
            Err(err) => {
                debug!(?event, "Rejected event: {}", err);
                self.summary.rejected_events += 1;
                Some(err.to_string())
            }
        };

        for notification in &notifications {
            if let Notification::GameEnded { outcome } = notification {
                info!(outcome = %status_line(*outcome, self.game.active_player()), "Game ended");
                self.summary.games_finished += 1;
            }
        }

        if self.show_board && rejected.is_none() {
            eprintln!(
                "{}\n{}",
                visualize_board(self.game.board()),
                status_line(self.game.outcome(), self.game.active_player())
            );
        }

        // A reset is the start of the next recording, not part of it
        if let Some(recorder) = &mut self.recorder {
            if event != Event::ResetRequested {
                recorder.store_exchange(Exchange {
                    event,
                    notifications: notifications.clone(),
                    rejected,
                });
            }
        }

        Ok(notifications)
    }

    /// Reads one JSON event per line and answers with one JSON
    /// notification per line, until the input ends.
    ///
    /// Lines that are not valid events, including lines that are not
    /// UTF-8 at all, are skipped. Only I/O errors end the session early.
    pub fn serve(
        &mut self,
        mut input: impl BufRead,
        mut output: impl Write,
    ) -> anyhow::Result<Summary> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim(),
                Err(err) => {
                    warn!("Skipping line that is not UTF-8: {}", err);
                    self.summary.malformed_lines += 1;
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }
            trace!(name: "Received event", event = %line);
            let event = match serde_json::from_str::<Event>(line) {
                Ok(event) => event,
                Err(err) => {
                    warn!(line, "Skipping malformed event: {}", err);
                    self.summary.malformed_lines += 1;
                    continue;
                }
            };
            let notifications = self.process(event)?;
            write_notifications(&mut output, &notifications)?;
        }
        self.finish()
    }

    /// Like [`Self::serve()`], for events that are already parsed.
    pub fn replay(
        &mut self,
        events: impl IntoIterator<Item = Event>,
        mut output: impl Write,
    ) -> anyhow::Result<Summary> {
        for event in events {
            let notifications = self.process(event)?;
            write_notifications(&mut output, &notifications)?;
        }
        self.finish()
    }

    fn finish(&mut self) -> anyhow::Result<Summary> {
        if let Some(recorder) = &mut self.recorder {
            if let Some(path) = recorder.write_game_recording()? {
                debug!(path = %path.display(), "Wrote game recording");
            }
        }
        Ok(self.summary)
    }
}

fn write_notifications(
    output: &mut impl Write,
    notifications: &[Notification],
) -> anyhow::Result<()> {
    for notification in notifications {
        let json = serde_json::to_string(notification)?;
        trace!(name: "Sending notification", notification = %json);
        writeln!(output, "{}", json)?;
    }
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use connect4::{GameOutcome, Player};

    use super::*;
    use crate::recording::GameRecording;
    use crate::test_utils::scratch_directory;

    fn referee() -> Referee {
        Referee::new(Config {
            recorder: None,
            show_board: false,
        })
    }

    fn read_recording(path: std::path::PathBuf) -> GameRecording {
        let file = std::fs::File::open(path).unwrap();
        serde_json::from_reader(file).unwrap()
    }

    fn output_lines(output: Vec<u8>) -> Vec<Notification> {
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn one_notification_per_line() {
        let input = r#"{"type":"ColumnSelected","column":3}
{"type":"ColumnSelected","column":3}
"#;
        let mut output = Vec::new();
        let summary = referee().serve(Cursor::new(input), &mut output).unwrap();
        assert_eq!(summary.accepted_events, 2);
        assert_eq!(
            output_lines(output),
            vec![
                Notification::PieceCommitted {
                    row: 5,
                    column: 3,
                    player: Player::One
                },
                Notification::TurnChanged {
                    player: Player::Two
                },
                Notification::PieceCommitted {
                    row: 4,
                    column: 3,
                    player: Player::Two
                },
                Notification::TurnChanged {
                    player: Player::One
                },
            ]
        );
    }

    #[test]
    fn bad_input_does_not_end_the_session() {
        let input = r#"this is not json
{"type":"ColumnSelected","column":42}

{"type":"Surrender"}
{"type":"ColumnSelected","column":0}
"#;
        let mut output = Vec::new();
        let mut referee = referee();
        let summary = referee.serve(Cursor::new(input), &mut output).unwrap();
        assert_eq!(
            summary,
            Summary {
                games_finished: 0,
                accepted_events: 1,
                rejected_events: 1,
                malformed_lines: 2,
            }
        );
        assert_eq!(output_lines(output).len(), 2);
        assert_eq!(referee.game().board().num_pieces(), 1);
    }

    #[test]
    fn line_that_is_not_utf8_is_skipped() {
        let mut input = Vec::new();
        input.extend_from_slice(b"{\"type\":\"ColumnSelected\",\"column\":0}\n");
        input.extend_from_slice(b"\xff\xfe garbage\n");
        input.extend_from_slice(b"{\"type\":\"ColumnSelected\",\"column\":1}");

        let mut output = Vec::new();
        let mut referee = referee();
        let summary = referee.serve(Cursor::new(input), &mut output).unwrap();
        assert_eq!(summary.malformed_lines, 1);
        assert_eq!(summary.accepted_events, 2);
        assert_eq!(referee.game().board().num_pieces(), 2);
        assert_eq!(output_lines(output).len(), 4);
    }

    #[test]
    fn tie_with_board_display() {
        // Fills the whole board without anyone getting four in a row
        let columns = [
            0, 1, 0, 3, 0, 0, 1, 0, 1, 0, 2, 1, 3, 1, 6, 1, 6, 2, 2, 3, 2, 3, 2, 3, 3, 5, 5, 4, 5,
            5, 5, 4, 5, 4, 4, 2, 4, 6, 4, 6, 6, 6,
        ];
        let mut referee = Referee::new(Config {
            recorder: None,
            show_board: true,
        });
        let events = columns.map(|column| Event::ColumnSelected { column });
        let mut output = Vec::new();
        let summary = referee.replay(events, &mut output).unwrap();

        assert_eq!(summary.games_finished, 1);
        assert_eq!(summary.accepted_events, 42);
        assert_eq!(summary.rejected_events, 0);
        assert_eq!(referee.game().outcome(), GameOutcome::Tie);
        assert!(referee.game().board().is_full());
        assert_eq!(
            output_lines(output).last(),
            Some(&Notification::GameEnded {
                outcome: GameOutcome::Tie
            })
        );
    }

    #[test]
    fn win_then_ignored_then_reset() {
        let mut referee = referee();
        let mut events: Vec<Event> = [3, 4, 3, 4, 3, 4, 3, 0]
            .into_iter()
            .map(|column| Event::ColumnSelected { column })
            .collect();
        events.push(Event::ResetRequested);
        let mut output = Vec::new();
        let summary = referee.replay(events, &mut output).unwrap();
        assert_eq!(summary.games_finished, 1);
        assert_eq!(summary.rejected_events, 1);

        let notifications = output_lines(output);
        assert_eq!(
            notifications[notifications.len() - 3..],
            [
                Notification::GameEnded {
                    outcome: GameOutcome::Win {
                        player: Player::One
                    }
                },
                Notification::BoardReset,
                Notification::TurnChanged {
                    player: Player::One
                },
            ]
        );
        assert_eq!(*referee.game(), Game::new());
    }

    #[test]
    fn recordings_are_split_at_resets() {
        let dir = scratch_directory("split-at-resets");
        let mut referee = Referee::new(Config {
            recorder: Some(Recorder::new(dir.clone()).unwrap()),
            show_board: false,
        });
        let events = [
            Event::ColumnSelected { column: 1 },
            Event::ColumnSelected { column: -1 },
            Event::ResetRequested,
            Event::ColumnSelected { column: 2 },
        ];
        referee.replay(events, std::io::sink()).unwrap();

        let first = read_recording(dir.join("game_000001.json"));
        assert_eq!(first.exchanges.len(), 2);
        assert_eq!(first.exchanges[0].notifications.len(), 2);
        assert!(first.exchanges[1].rejected.is_some());
        assert!(first.exchanges[1].notifications.is_empty());

        let second = read_recording(dir.join("game_000002.json"));
        assert_eq!(second.exchanges.len(), 1);
        assert_eq!(
            second.exchanges[0].event,
            Event::ColumnSelected { column: 2 }
        );
        assert!(!dir.join("game_000003.json").exists());

        std::fs::remove_dir_all(dir).unwrap();
    }
}
