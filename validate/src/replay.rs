//! Replay of recorded snapshot streams.
//!
//! Input is JSON lines. Each line is one of:
//!
//! ```text
//! {"currentPlayerIndex": 0, "deckSize": 30, ...}   a game state snapshot
//! {"advanceMs": 1500}                              let time pass
//! {"visibility": "hidden"}                         page hidden / visible
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Deserialize;
use whot_core::context::ConfigError;
use whot_core::{GameSession, GameSignal, Notification, SignalHandler};
use whot_types::formatting::format_ttl;
use whot_types::{EventKind, GameStateSnapshot, NotificationSettings, PlayerContext};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        source: serde_json::Error,
    },
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),
    #[error("player number must be at least 1")]
    InvalidPlayer,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisibilityLine {
    pub visibility: Visibility,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AdvanceLine {
    pub advance_ms: u64,
}

/// One input line. Control lines are tried first; anything else must be a
/// snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ReplayLine {
    Visibility(VisibilityLine),
    Advance(AdvanceLine),
    Snapshot(Box<GameStateSnapshot>),
}

/// Parse a JSON-lines replay. Blank lines are skipped.
pub fn parse_replay(text: &str) -> Result<Vec<(usize, ReplayLine)>, ReplayError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line)
                .map(|parsed| (idx + 1, parsed))
                .map_err(|source| ReplayError::Line {
                    line: idx + 1,
                    source,
                })
        })
        .collect()
}

/// Counts every detected signal, including ones the center suppressed.
#[derive(Debug, Clone, Default)]
pub struct SignalTally(Arc<Mutex<BTreeMap<EventKind, usize>>>);

impl SignalTally {
    pub fn counts(&self) -> BTreeMap<EventKind, usize> {
        self.0.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl SignalHandler for SignalTally {
    fn handle_signal(&mut self, signal: &GameSignal) {
        if let Ok(mut counts) = self.0.lock() {
            *counts.entry(signal.kind()).or_default() += 1;
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub snapshots: usize,
    pub detected: BTreeMap<EventKind, usize>,
    pub shown: BTreeMap<EventKind, usize>,
    pub expired: usize,
}

/// Feed `lines` through a fresh session, writing each shown and expired
/// notification to `out`.
pub async fn replay(
    lines: Vec<(usize, ReplayLine)>,
    player: PlayerContext,
    settings: NotificationSettings,
    out: &mut impl Write,
) -> Result<ReplaySummary, ReplayError> {
    if player.local_seat().is_none() {
        return Err(ReplayError::InvalidPlayer);
    }

    let tally = SignalTally::default();
    let mut session = GameSession::new(player, settings);
    session.add_signal_handler(Box::new(tally.clone()));
    let mut summary = ReplaySummary::default();

    for (line, entry) in lines {
        match entry {
            ReplayLine::Snapshot(snapshot) => {
                summary.snapshots += 1;
                let shown = session.observe(&snapshot);
                for id in shown {
                    if let Some(n) = session.live().into_iter().find(|n| n.id == id) {
                        *summary.shown.entry(n.kind).or_default() += 1;
                        writeln!(
                            out,
                            "{line:>5} show   {} [{}] {} ({})",
                            n.id,
                            n.kind,
                            n.message,
                            format_ttl(n.ttl)
                        )
                        .map_err(ReplayError::Output)?;
                    }
                }
            }
            ReplayLine::Advance(AdvanceLine { advance_ms }) => {
                tokio::time::sleep(Duration::from_millis(advance_ms)).await;
            }
            ReplayLine::Visibility(VisibilityLine { visibility }) => {
                session.set_visible(visibility == Visibility::Visible);
                writeln!(out, "{line:>5} page   {visibility:?}").map_err(ReplayError::Output)?;
            }
        }

        for n in session.pump_expired() {
            summary.expired += 1;
            write_expired(out, line, &n)?;
        }
    }

    summary.detected = tally.counts();
    session.shutdown();
    Ok(summary)
}

fn write_expired(out: &mut impl Write, line: usize, n: &Notification) -> Result<(), ReplayError> {
    writeln!(out, "{line:>5} expire {} [{}]", n.id, n.kind).map_err(ReplayError::Output)
}

/// Read settings from `path`, or use the defaults.
/// Settings from `path`, or the stored settings when no file is given.
pub fn resolve_settings(path: Option<&Path>) -> Result<NotificationSettings, ReplayError> {
    match path {
        Some(path) => Ok(whot_core::context::load_settings(path)?),
        None => {
            let stored = whot_core::context::settings_path()?;
            tracing::debug!(path = %stored.display(), "using stored settings");
            Ok(whot_core::context::load_or_default())
        }
    }
}

/// Persist `settings` as the stored settings for later runs.
pub fn save_settings(settings: &NotificationSettings) -> Result<PathBuf, ReplayError> {
    whot_core::context::store(settings)?;
    Ok(whot_core::context::settings_path()?)
}

pub fn read_replay(path: &Path) -> Result<Vec<(usize, ReplayLine)>, ReplayError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_replay(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME: &str = r#"
{"currentPlayerIndex": 0, "deckSize": 30, "opponents": [{"nickname": "ada", "cardCount": 2}], "topCard": {"suit": "CIRCLE", "rank": 3}, "status": "in_progress"}
{"currentPlayerIndex": 1, "deckSize": 29, "opponents": [{"nickname": "ada", "cardCount": 1}], "topCard": {"suit": "STAR", "rank": 14}, "status": "in_progress"}
{"advanceMs": 6000}
{"currentPlayerIndex": 1, "deckSize": 29, "opponents": [{"nickname": "ada", "cardCount": 1}], "topCard": {"suit": "STAR", "rank": 14}, "status": "in_progress"}
"#;

    #[test]
    fn parses_mixed_lines() {
        let lines = parse_replay(GAME).unwrap();
        assert_eq!(lines.len(), 4);
        assert!(matches!(lines[0].1, ReplayLine::Snapshot(_)));
        assert!(matches!(lines[2].1, ReplayLine::Advance(AdvanceLine { advance_ms: 6000 })));

        let hidden = parse_replay(r#"{"visibility": "hidden"}"#).unwrap();
        assert!(matches!(
            hidden[0].1,
            ReplayLine::Visibility(VisibilityLine { visibility: Visibility::Hidden })
        ));
    }

    #[test]
    fn bad_line_reports_its_number() {
        let err = parse_replay("\n{\"deckSize\": 3}\n").unwrap_err();
        assert!(matches!(err, ReplayError::Line { line: 2, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn replay_shows_then_expires() {
        let mut out = Vec::new();
        let summary = replay(
            parse_replay(GAME).unwrap(),
            PlayerContext::new(2),
            NotificationSettings::default(),
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(summary.snapshots, 3);
        assert_eq!(summary.shown.get(&EventKind::GeneralMarket), Some(&1));
        assert_eq!(summary.shown.get(&EventKind::LastCard), Some(&1));
        assert_eq!(summary.expired, 2);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[general-market] ada played 14 for General Market"));
        assert!(text.contains("expire"));
    }

    #[tokio::test(start_paused = true)]
    async fn player_zero_is_rejected() {
        let err = replay(
            Vec::new(),
            PlayerContext::new(0),
            NotificationSettings::default(),
            &mut Vec::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ReplayError::InvalidPlayer));
    }
}
