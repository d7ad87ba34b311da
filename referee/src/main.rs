use std::path::PathBuf;

use clap::Parser;
use referee::{load_script, Config, Recorder, Referee, Summary};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Runs a Connect Four game for an external presentation layer.
///
/// Events are read as JSON lines from stdin, and notifications are
/// written as JSON lines to stdout. Logs go to stderr.
#[derive(Parser)]
struct Args {
    /// Replay the events in this JSON file instead of reading stdin.
    /// Plain numbers in the file stand for column selections.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Record every game's events and notifications as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// Print the board to stderr after every accepted event
    #[arg(short = 'b', long, default_value_t = false)]
    show_board: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let mut referee = Referee::new(Config {
        recorder,
        show_board: args.show_board,
    });

    let summary = if let Some(path) = args.script {
        let events = load_script(&path)?;
        info!(events = events.len(), script = %path.display(), "Replaying move script");
        referee.replay(events, std::io::stdout().lock())?
    } else {
        let input = std::io::stdin().lock();
        referee.serve(input, std::io::stdout().lock())?
    };

    let Summary {
        games_finished,
        accepted_events,
        rejected_events,
        malformed_lines,
    } = summary;
    info!(
        games_finished,
        accepted_events, rejected_events, malformed_lines, "Session over"
    );

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
