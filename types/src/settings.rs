//! User-tunable notification settings.
//!
//! Every field has a default so a partial TOML file only overrides what it
//! names:
//!
//! ```toml
//! min_ttl_ms = 3000
//!
//! [draw]
//! enabled = false
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::kind::EventKind;
use crate::snapshot::GENERAL_MARKET_RANK;

/// Per-kind display settings. A missing `ttl_ms` uses the kind's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindSettings {
    pub enabled: bool,
    pub ttl_ms: Option<u64>,
}

impl Default for KindSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Lower bound applied to every TTL.
    pub min_ttl_ms: u64,
    /// Upper bound applied to every TTL.
    pub max_ttl_ms: u64,
    /// Rank that makes every other seat draw one card.
    pub general_market_rank: u8,
    pub penalty_issued: KindSettings,
    pub penalty_cleared: KindSettings,
    pub turn_skipped: KindSettings,
    pub general_market: KindSettings,
    pub draw: KindSettings,
    pub last_card: KindSettings,
    pub match_finished: KindSettings,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            min_ttl_ms: 3_000,
            max_ttl_ms: 5_000,
            general_market_rank: GENERAL_MARKET_RANK,
            penalty_issued: KindSettings::default(),
            penalty_cleared: KindSettings::default(),
            turn_skipped: KindSettings::default(),
            general_market: KindSettings::default(),
            draw: KindSettings::default(),
            last_card: KindSettings::default(),
            match_finished: KindSettings::default(),
        }
    }
}

impl NotificationSettings {
    pub fn kind(&self, kind: EventKind) -> &KindSettings {
        match kind {
            EventKind::PenaltyIssued => &self.penalty_issued,
            EventKind::PenaltyCleared => &self.penalty_cleared,
            EventKind::TurnSkipped => &self.turn_skipped,
            EventKind::GeneralMarket => &self.general_market,
            EventKind::Draw => &self.draw,
            EventKind::LastCard => &self.last_card,
            EventKind::MatchFinished => &self.match_finished,
        }
    }

    pub fn kind_mut(&mut self, kind: EventKind) -> &mut KindSettings {
        match kind {
            EventKind::PenaltyIssued => &mut self.penalty_issued,
            EventKind::PenaltyCleared => &mut self.penalty_cleared,
            EventKind::TurnSkipped => &mut self.turn_skipped,
            EventKind::GeneralMarket => &mut self.general_market,
            EventKind::Draw => &mut self.draw,
            EventKind::LastCard => &mut self.last_card,
            EventKind::MatchFinished => &mut self.match_finished,
        }
    }

    pub fn is_enabled(&self, kind: EventKind) -> bool {
        self.kind(kind).enabled
    }

    /// Display time for `kind`, clamped to `[min_ttl_ms, max_ttl_ms]`.
    pub fn ttl(&self, kind: EventKind) -> Duration {
        let requested = self.kind(kind).ttl_ms.unwrap_or_else(|| kind.default_ttl_ms());
        let (lo, hi) = if self.min_ttl_ms <= self.max_ttl_ms {
            (self.min_ttl_ms, self.max_ttl_ms)
        } else {
            (self.max_ttl_ms, self.min_ttl_ms)
        };
        Duration::from_millis(requested.clamp(lo, hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ttls_fall_in_window() {
        let settings = NotificationSettings::default();
        for kind in EventKind::ALL {
            let ttl = settings.ttl(kind);
            assert!(ttl >= Duration::from_secs(3) && ttl <= Duration::from_secs(5));
        }
        assert_eq!(settings.ttl(EventKind::Draw), Duration::from_millis(3_000));
        assert_eq!(settings.ttl(EventKind::TurnSkipped), Duration::from_millis(4_000));
        assert_eq!(settings.ttl(EventKind::GeneralMarket), Duration::from_millis(5_000));
    }

    #[test]
    fn ttl_is_clamped() {
        let mut settings = NotificationSettings::default();
        settings.draw.ttl_ms = Some(60_000);
        settings.last_card.ttl_ms = Some(10);
        assert_eq!(settings.ttl(EventKind::Draw), Duration::from_millis(5_000));
        assert_eq!(settings.ttl(EventKind::LastCard), Duration::from_millis(3_000));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let toml = r#"
max_ttl_ms = 8000

[draw]
enabled = false

[last_card]
ttl_ms = 7000
"#;
        let settings: NotificationSettings = toml::from_str(toml).unwrap();
        assert_eq!(settings.min_ttl_ms, 3_000);
        assert_eq!(settings.general_market_rank, GENERAL_MARKET_RANK);
        assert!(!settings.is_enabled(EventKind::Draw));
        assert!(settings.is_enabled(EventKind::LastCard));
        assert_eq!(settings.ttl(EventKind::LastCard), Duration::from_millis(7_000));
    }
}
