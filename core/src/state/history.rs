use whot_types::{Card, GameStateSnapshot, MatchStatus};

/// Last-observed value of a tracked field.
///
/// `Unobserved` is only valid before the first snapshot of a session. It is
/// never a real prior value: detectors treat it as "no transition".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tracked<T> {
    Unobserved,
    Observed(T),
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Tracked::Unobserved
    }
}

impl<T: Copy> Tracked<T> {
    pub fn get(&self) -> Option<T> {
        match self {
            Tracked::Observed(v) => Some(*v),
            Tracked::Unobserved => None,
        }
    }

    pub fn record(&mut self, value: T) {
        *self = Tracked::Observed(value);
    }
}

impl<T> From<Option<T>> for Tracked<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Tracked::Observed(v),
            None => Tracked::Unobserved,
        }
    }
}

/// Previous-snapshot record shared by every detector.
///
/// Queried before it is updated: detectors compare the incoming snapshot
/// against these values, then [`SnapshotHistory::advance`] overwrites them
/// exactly once per cycle.
#[derive(Debug, Clone, Default)]
pub struct SnapshotHistory {
    pub pending_penalty: Tracked<u32>,
    pub current_seat: Tracked<usize>,
    pub deck_size: Tracked<u32>,
    /// Hand sizes by position in the snapshot's opponents list.
    opponent_hands: Vec<Tracked<u32>>,
    pub top_card: Tracked<Option<Card>>,
    pub status: Tracked<MatchStatus>,
    cycles: u64,
}

impl SnapshotHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Previous hand size of the opponent at list position `slot`.
    pub fn opponent_hand(&self, slot: usize) -> Tracked<u32> {
        self.opponent_hands.get(slot).copied().unwrap_or_default()
    }

    /// Number of snapshots recorded since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// True when a previous top card was observed and differs from `current`.
    pub fn top_card_changed(&self, current: Option<Card>) -> bool {
        match self.top_card {
            Tracked::Observed(previous) => previous != current,
            Tracked::Unobserved => false,
        }
    }

    /// Overwrite every tracked field with `snapshot`. Unconditional: fields
    /// that did not change are re-recorded with the same value.
    pub fn advance(&mut self, snapshot: &GameStateSnapshot) {
        self.pending_penalty.record(snapshot.pending_penalty);
        self.current_seat.record(snapshot.current_player_index);
        self.deck_size.record(snapshot.deck_size);
        self.top_card.record(snapshot.top_card);
        self.status.record(snapshot.status);

        // Slots that disappeared from the list go back to unobserved so a
        // returning opponent is not compared against a stale hand.
        self.opponent_hands = snapshot
            .opponents
            .iter()
            .map(|o| Tracked::Observed(o.card_count))
            .collect();

        self.cycles += 1;
        tracing::trace!(
            cycle = self.cycles,
            seat = snapshot.current_player_index,
            penalty = snapshot.pending_penalty,
            deck = snapshot.deck_size,
            "snapshot history advanced"
        );
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whot_types::{OpponentView, Suit};

    fn snapshot(seat: usize, deck: u32, hands: &[u32]) -> GameStateSnapshot {
        GameStateSnapshot {
            current_player_index: seat,
            pending_penalty: 0,
            deck_size: deck,
            opponents: hands
                .iter()
                .map(|&n| OpponentView {
                    nickname: "opp".to_string(),
                    card_count: n,
                })
                .collect(),
            top_card: Some(Card::new(Suit::Circle, 3)),
            status: MatchStatus::InProgress,
            winner_index: None,
        }
    }

    #[test]
    fn starts_unobserved() {
        let history = SnapshotHistory::new();
        assert_eq!(history.deck_size, Tracked::Unobserved);
        assert_eq!(history.current_seat.get(), None);
        assert_eq!(history.opponent_hand(0), Tracked::Unobserved);
        assert!(!history.top_card_changed(None));
    }

    #[test]
    fn advance_records_every_field() {
        let mut history = SnapshotHistory::new();
        history.advance(&snapshot(1, 30, &[5, 4]));
        assert_eq!(history.current_seat.get(), Some(1));
        assert_eq!(history.deck_size.get(), Some(30));
        assert_eq!(history.opponent_hand(1).get(), Some(4));
        assert_eq!(history.opponent_hand(2), Tracked::Unobserved);
        assert_eq!(history.cycles(), 1);
    }

    #[test]
    fn top_card_change_detection() {
        let mut history = SnapshotHistory::new();
        history.advance(&snapshot(0, 30, &[5]));
        assert!(!history.top_card_changed(Some(Card::new(Suit::Circle, 3))));
        assert!(history.top_card_changed(Some(Card::new(Suit::Star, 14))));
        assert!(history.top_card_changed(None));
    }

    #[test]
    fn shrinking_opponent_list_forgets_slots() {
        let mut history = SnapshotHistory::new();
        history.advance(&snapshot(0, 30, &[5, 4, 3]));
        history.advance(&snapshot(0, 30, &[5]));
        assert_eq!(history.opponent_hand(2), Tracked::Unobserved);
    }

    #[test]
    fn reset_forgets_everything() {
        let mut history = SnapshotHistory::new();
        history.advance(&snapshot(0, 30, &[5]));
        history.reset();
        assert_eq!(history.deck_size, Tracked::Unobserved);
        assert_eq!(history.cycles(), 0);
    }
}
