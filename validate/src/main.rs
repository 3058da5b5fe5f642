//! whot-validate - Replay recorded game snapshots through the notification engine.
//!
//! Usage: whot-validate --input <file.jsonl> --player <n> [--settings <file.toml>]
//!                      [--save-settings] [--verbose]
//!
//! Prints every notification shown and expired, then a per-kind summary.
//! Time runs on a paused clock, so `advanceMs` lines replay instantly.

mod replay;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::filter::EnvFilter;
use whot_types::{EventKind, PlayerContext};

#[derive(Parser)]
#[command(version, about = "Replay Whot snapshots and print the notifications they produce")]
struct Args {
    /// JSON-lines file of snapshots and control lines
    #[arg(short, long)]
    input: PathBuf,
    /// 1-indexed seat of the viewing player
    #[arg(short, long, default_value_t = 1)]
    player: usize,
    /// Notification settings TOML (stored settings when omitted)
    #[arg(short, long)]
    settings: Option<PathBuf>,
    /// Store the resolved settings for later runs
    #[arg(long)]
    save_settings: bool,
    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // If WHOT_LOG_PATH is set, append to that file
    if let Ok(path) = std::env::var("WHOT_LOG_PATH")
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
        return;
    }

    // Fallback to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread", start_paused = true)]
async fn main() -> Result<(), String> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings =
        replay::resolve_settings(args.settings.as_deref()).map_err(|e| e.to_string())?;
    if args.save_settings {
        let path = replay::save_settings(&settings).map_err(|e| e.to_string())?;
        tracing::info!(path = %path.display(), "settings stored");
    }

    let lines = replay::read_replay(&args.input).map_err(|e| e.to_string())?;
    tracing::info!(
        path = %args.input.display(),
        lines = lines.len(),
        player = args.player,
        "replaying"
    );

    let mut stdout = std::io::stdout().lock();
    let summary = replay::replay(lines, PlayerContext::new(args.player), settings, &mut stdout)
        .await
        .map_err(|e| e.to_string())?;

    writeln!(stdout).map_err(|e| e.to_string())?;
    writeln!(stdout, "{} snapshots, {} expired", summary.snapshots, summary.expired)
        .map_err(|e| e.to_string())?;
    writeln!(stdout, "{:<16} {:>8} {:>6}", "kind", "detected", "shown")
        .map_err(|e| e.to_string())?;
    for kind in EventKind::ALL {
        let detected = summary.detected.get(&kind).copied().unwrap_or(0);
        let shown = summary.shown.get(&kind).copied().unwrap_or(0);
        writeln!(stdout, "{:<16} {:>8} {:>6}", kind.as_str(), detected, shown)
            .map_err(|e| e.to_string())?;
    }

    Ok(())
}
