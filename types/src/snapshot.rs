//! Shared game state published by the game service.
//!
//! The service only ever sends complete snapshots. Field names follow the
//! service's camelCase JSON so a snapshot can be deserialized straight off the
//! wire; only the fields the notifier reads are modelled here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Rank 14: every other seat draws one card.
pub const GENERAL_MARKET_RANK: u8 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Suit {
    #[serde(alias = "Circle")]
    Circle,
    #[serde(alias = "Cross")]
    Cross,
    #[serde(alias = "Triangle")]
    Triangle,
    #[serde(alias = "Square")]
    Square,
    #[serde(alias = "Star")]
    Star,
    #[serde(alias = "Whot")]
    Whot,
}

impl Suit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Suit::Circle => "CIRCLE",
            Suit::Cross => "CROSS",
            Suit::Triangle => "TRIANGLE",
            Suit::Square => "SQUARE",
            Suit::Star => "STAR",
            Suit::Whot => "WHOT",
        }
    }
}

/// A card identity. Two cards with the same suit and rank are the same
/// discard-pile fact as far as notifications are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    #[serde(alias = "value")]
    pub rank: u8,
}

impl Card {
    pub const fn new(suit: Suit, rank: u8) -> Self {
        Self { suit, rank }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.suit.as_str(), self.rank)
    }
}

/// Match lifecycle. The service is inconsistent about casing, so parsing is
/// case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum MatchStatus {
    #[default]
    Waiting,
    InProgress,
    Finished,
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "WAITING" => Ok(MatchStatus::Waiting),
            "IN_PROGRESS" | "INPROGRESS" => Ok(MatchStatus::InProgress),
            "FINISHED" => Ok(MatchStatus::Finished),
            other => Err(format!("unknown match status: {other}")),
        }
    }
}

impl TryFrom<String> for MatchStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Another seat at the table, as seen by the local client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentView {
    pub nickname: String,
    pub card_count: u32,
}

/// One complete snapshot of shared game state.
///
/// `opponents` lists every seat except the local one, in seat order. Seat
/// order is stable for the lifetime of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateSnapshot {
    pub current_player_index: usize,
    #[serde(default)]
    pub pending_penalty: u32,
    #[serde(default)]
    pub deck_size: u32,
    #[serde(default)]
    pub opponents: Vec<OpponentView>,
    #[serde(default)]
    pub top_card: Option<Card>,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub winner_index: Option<usize>,
}

impl GameStateSnapshot {
    /// Opponent sitting at `seat`, or `None` for the local seat and for seats
    /// the snapshot does not list.
    pub fn opponent_at_seat(&self, seat: usize, local_seat: usize) -> Option<&OpponentView> {
        let slot = match seat.cmp(&local_seat) {
            std::cmp::Ordering::Less => seat,
            std::cmp::Ordering::Equal => return None,
            std::cmp::Ordering::Greater => seat - 1,
        };
        self.opponents.get(slot)
    }

    /// Display name for `seat`: "You" for the local seat, the nickname for a
    /// listed opponent, and "Opponent" when nothing better is known.
    pub fn seat_name(&self, seat: usize, player: PlayerContext) -> String {
        let Some(local) = player.local_seat() else {
            return "Opponent".to_string();
        };
        if seat == local {
            return "You".to_string();
        }
        self.opponent_at_seat(seat, local)
            .map(|o| o.nickname.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Opponent".to_string())
    }

    /// Nickname of the opponent at list position `slot`.
    pub fn opponent_name(&self, slot: usize) -> String {
        self.opponents
            .get(slot)
            .map(|o| o.nickname.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Opponent".to_string())
    }
}

/// Who is looking at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerContext {
    /// 1-indexed seat of the viewing client.
    pub local_player_number: usize,
}

impl PlayerContext {
    pub const fn new(local_player_number: usize) -> Self {
        Self { local_player_number }
    }

    /// 0-indexed local seat. `None` when the player number is 0.
    pub fn local_seat(&self) -> Option<usize> {
        self.local_player_number.checked_sub(1)
    }

    pub fn is_local(&self, seat: usize) -> bool {
        self.local_seat() == Some(seat)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_json() -> &'static str {
        r#"{
            "currentPlayerIndex": 1,
            "pendingPenalty": 2,
            "deckSize": 30,
            "opponents": [{ "nickname": "ada", "cardCount": 5 }],
            "topCard": { "suit": "STAR", "value": 14 },
            "status": "in_progress",
            "winnerIndex": null
        }"#
    }

    #[test]
    fn parses_service_json() {
        let snap: GameStateSnapshot = serde_json::from_str(snapshot_json()).unwrap();
        assert_eq!(snap.current_player_index, 1);
        assert_eq!(snap.pending_penalty, 2);
        assert_eq!(snap.top_card, Some(Card::new(Suit::Star, 14)));
        assert_eq!(snap.status, MatchStatus::InProgress);
        assert_eq!(snap.opponents[0].card_count, 5);
    }

    #[test]
    fn missing_optional_fields_default() {
        let snap: GameStateSnapshot =
            serde_json::from_str(r#"{ "currentPlayerIndex": 0 }"#).unwrap();
        assert!(snap.opponents.is_empty());
        assert!(snap.top_card.is_none());
        assert_eq!(snap.status, MatchStatus::Waiting);
    }

    #[test]
    fn status_rejects_unknown() {
        assert!("PAUSED".parse::<MatchStatus>().is_err());
        assert_eq!("Finished".parse::<MatchStatus>(), Ok(MatchStatus::Finished));
    }

    #[test]
    fn opponent_lookup_skips_local_seat() {
        let mut snap: GameStateSnapshot = serde_json::from_str(snapshot_json()).unwrap();
        snap.opponents.push(OpponentView {
            nickname: "bo".to_string(),
            card_count: 3,
        });
        // Local seat 1: seat 0 -> "ada", seat 2 -> "bo".
        let player = PlayerContext::new(2);
        assert_eq!(snap.seat_name(0, player), "ada");
        assert_eq!(snap.seat_name(1, player), "You");
        assert_eq!(snap.seat_name(2, player), "bo");
        assert_eq!(snap.seat_name(3, player), "Opponent");
    }

    #[test]
    fn player_number_zero_has_no_seat() {
        let player = PlayerContext::new(0);
        assert_eq!(player.local_seat(), None);
        assert!(!player.is_local(0));
    }
}
