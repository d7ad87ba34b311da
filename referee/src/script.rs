use std::path::Path;

use anyhow::Context;
use connect4::Event;
use serde::Deserialize;

/// An entry of a move script: either a full event, or just a column number.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptEntry {
    Column(i64),
    Event(Event),
}

impl From<ScriptEntry> for Event {
    fn from(entry: ScriptEntry) -> Event {
        match entry {
            ScriptEntry::Column(column) => Event::ColumnSelected { column },
            ScriptEntry::Event(event) => event,
        }
    }
}

/// Reads a JSON array of events from a file. Plain numbers in the array
/// stand for column selections.
pub fn load_script(path: &Path) -> anyhow::Result<Vec<Event>> {
    let name = path.display();
    let script = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read move script '{name}'"))?;
    parse_script(&script)
        .with_context(|| format!("Could not parse move script '{name}'"))
}

pub fn parse_script(script: &str) -> anyhow::Result<Vec<Event>> {
    let entries: Vec<ScriptEntry> = serde_json::from_str(script)?;
    Ok(entries.into_iter().map(Event::from).collect())
}
