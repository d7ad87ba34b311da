use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use connect4::{Event, Notification};
use serde::{Deserialize, Serialize};

/// Collects what happens during a game and writes it to a JSON file.
///
/// A game lasts from the start (or a reset) until the next reset or the
/// end of the input, so moves that were rejected after the game was
/// decided end up in that game's file too.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    exchanges: Vec<Exchange>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            exchanges: Vec::new(),
        })
    }

    pub fn store_exchange(&mut self, exchange: Exchange) {
        self.exchanges.push(exchange);
    }

    /// Writes the current game to the next `game_NNNNNN.json` file and
    /// returns its path. Does nothing if no event was stored since the last call.
    pub fn write_game_recording(&mut self) -> anyhow::Result<Option<PathBuf>> {
        if self.exchanges.is_empty() {
            return Ok(None);
        }
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        let recording = GameRecording {
            exchanges: std::mem::take(&mut self.exchanges),
        };
        serde_json::to_writer_pretty(&mut writer, &recording)?;
        writeln!(writer)?;
        writer.flush()?;
        self.num += 1;
        Ok(Some(filepath))
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecording {
    pub exchanges: Vec<Exchange>,
}

/// One event and what came of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub event: Event,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    /// Why the event was ignored, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub rejected: Option<String>,
}
