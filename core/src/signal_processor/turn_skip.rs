//! "Hold On" detection.
//!
//! The snapshot carries no player count, so the expected next seat is
//! computed for every supported table size. If the local seat would have been
//! next under any of them and the turn went elsewhere, the local player was
//! skipped. This is a heuristic: when two table sizes agree on a seat, a
//! coincidental seat move cannot be told apart from a real skip. An explicit
//! "skipped seats" field in the snapshot would remove the guess.

use whot_types::Card;

use crate::events::{CauseKey, GameSignal};
use crate::state::Tracked;

pub const CANDIDATE_TABLE_SIZES: [usize; 3] = [2, 3, 4];

#[derive(Debug, Clone)]
pub struct TurnSkipInput<'a> {
    pub previous: Tracked<usize>,
    pub current: usize,
    pub local_seat: Option<usize>,
    /// The discard-pile top card changed in this cycle.
    pub card_played: bool,
    /// Display name of the seat that held the turn before this cycle.
    pub actor: &'a str,
    pub top_card: Option<Card>,
}

/// Seats that would act next after `previous` for each candidate table size.
pub fn expected_next_seats(previous: usize) -> [usize; 3] {
    CANDIDATE_TABLE_SIZES.map(|n| (previous + 1) % n)
}

pub fn detect_turn_skip(input: &TurnSkipInput<'_>) -> Option<GameSignal> {
    let previous = input.previous.get()?;
    let local = input.local_seat?;

    // Same seat and nothing played: a repeated snapshot, not a transition.
    if previous == input.current && !input.card_played {
        return None;
    }

    if input.current == local || !expected_next_seats(previous).contains(&local) {
        return None;
    }

    tracing::debug!(previous, current = input.current, local, "local seat skipped");
    Some(GameSignal::TurnSkipped {
        by: input.actor.to_string(),
        cause: CauseKey::Seat {
            from: previous,
            to: input.current,
            card: input.top_card,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        previous: Option<usize>,
        current: usize,
        local: usize,
        card_played: bool,
    ) -> TurnSkipInput<'static> {
        TurnSkipInput {
            previous: previous.into(),
            current,
            local_seat: Some(local),
            card_played,
            actor: "ada",
            top_card: None,
        }
    }

    #[test]
    fn expected_seats_per_table_size() {
        assert_eq!(expected_next_seats(0), [1, 1, 1]);
        assert_eq!(expected_next_seats(1), [0, 2, 2]);
        assert_eq!(expected_next_seats(3), [0, 1, 0]);
    }

    #[test]
    fn two_player_hold_on_keeps_turn() {
        // Seat 0 played Hold On and kept the turn; local seat 1 was next.
        let signal = detect_turn_skip(&input(Some(0), 0, 1, true));
        assert!(matches!(signal, Some(GameSignal::TurnSkipped { .. })));
    }

    #[test]
    fn repeated_snapshot_is_not_a_transition() {
        assert!(detect_turn_skip(&input(Some(0), 0, 1, false)).is_none());
    }

    #[test]
    fn three_player_skip_over_local_seat() {
        assert!(detect_turn_skip(&input(Some(0), 2, 1, true)).is_some());
    }

    #[test]
    fn normal_advance_to_local_seat_is_quiet() {
        assert!(detect_turn_skip(&input(Some(0), 1, 1, true)).is_none());
    }

    #[test]
    fn local_seat_not_expected_is_quiet() {
        // From seat 0 the next seat is always 1; local seat 2 was never next.
        assert!(detect_turn_skip(&input(Some(0), 1, 2, true)).is_none());
    }

    #[test]
    fn unobserved_previous_never_fires() {
        for current in 0..4 {
            assert!(detect_turn_skip(&input(None, current, 1, true)).is_none());
        }
    }

    #[test]
    fn missing_local_seat_is_quiet() {
        let mut i = input(Some(0), 0, 1, true);
        i.local_seat = None;
        assert!(detect_turn_skip(&i).is_none());
    }
}
