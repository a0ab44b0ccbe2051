//! replay_evdev
//!
//! Replays a recorded input event log into a device node, keeping the
//! original spacing between events.
//!
//! # Usage
//!
//! ```text
//! replay_evdev --device /dev/input/event3 --input tap.evlog
//! ```
//!
//! Set `RUST_LOG=debug` to print every event as it is replayed.

use clap::{error::ErrorKind, CommandFactory, Parser};
use evreplay_core::{replay_files, ReplayConfig, ReplayResult, ReplayStats};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Replay recorded input events into a device.
#[derive(Parser, Debug)]
#[command(name = "replay_evdev")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Device to replay events into
    #[arg(short, long)]
    device: PathBuf,

    /// Recorded event log to read
    #[arg(short, long)]
    input: PathBuf,
}

impl Cli {
    fn config(&self) -> ReplayConfig {
        ReplayConfig::new(&self.input, &self.device)
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Bad arguments print usage and still exit 0.
            print!("{}", argument_error_text(&err));
            return ExitCode::SUCCESS;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&cli) {
        tracing::error!(error = %err, "replay failed");
        eprintln!("replay_evdev: {err}");
    }

    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> ReplayResult<ReplayStats> {
    replay_files(&cli.config())
}

/// Text printed when argument parsing stops: clap's own output for
/// `--help`/`--version`, otherwise the error followed by the full help.
fn argument_error_text(err: &clap::Error) -> String {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.to_string(),
        _ => format!("{}\n{}", err.render(), Cli::command().render_help()),
    }
}
