use std::fmt;

use serde::{Deserialize, Serialize};

/// Notification categories. At most one notification of each kind is live
/// at a time; different kinds may be shown together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    PenaltyIssued,
    PenaltyCleared,
    TurnSkipped,
    GeneralMarket,
    Draw,
    LastCard,
    MatchFinished,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        EventKind::PenaltyIssued,
        EventKind::PenaltyCleared,
        EventKind::TurnSkipped,
        EventKind::GeneralMarket,
        EventKind::Draw,
        EventKind::LastCard,
        EventKind::MatchFinished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PenaltyIssued => "penalty-issued",
            EventKind::PenaltyCleared => "penalty-cleared",
            EventKind::TurnSkipped => "turn-skipped",
            EventKind::GeneralMarket => "general-market",
            EventKind::Draw => "draw",
            EventKind::LastCard => "last-card",
            EventKind::MatchFinished => "match-finished",
        }
    }

    /// Display time before auto-dismiss, in milliseconds.
    pub fn default_ttl_ms(&self) -> u64 {
        match self {
            EventKind::Draw => 3_000,
            EventKind::PenaltyIssued | EventKind::PenaltyCleared | EventKind::TurnSkipped => 4_000,
            EventKind::GeneralMarket | EventKind::LastCard | EventKind::MatchFinished => 5_000,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
