//! "One card left" warning.

use crate::events::{CauseKey, GameSignal};
use crate::state::Tracked;

/// Persisted per opponent slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LastCardState {
    pub shown_for_state: bool,
    /// Warnings fired so far for this slot.
    pub episodes: u32,
}

#[derive(Debug, Clone)]
pub struct LastCardInput<'a> {
    pub slot: usize,
    pub previous: Tracked<u32>,
    pub current: u32,
    pub opponent: &'a str,
}

/// Fires once per downward transition to exactly one card. Any other hand
/// size re-arms the warning.
pub fn detect_last_card(
    input: &LastCardInput<'_>,
    mut state: LastCardState,
) -> (LastCardState, Option<GameSignal>) {
    if input.current != 1 {
        state.shown_for_state = false;
        return (state, None);
    }

    match input.previous.get() {
        Some(previous) if previous > 1 && !state.shown_for_state => {
            state.shown_for_state = true;
            state.episodes += 1;
            let signal = GameSignal::LastCard {
                opponent: input.opponent.to_string(),
                cause: CauseKey::LastCard {
                    slot: input.slot,
                    episode: state.episodes,
                },
            };
            (state, Some(signal))
        }
        _ => (state, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed a hand-size sequence and count warnings.
    fn run(sizes: &[u32]) -> usize {
        let mut state = LastCardState::default();
        let mut previous = Tracked::Unobserved;
        let mut fired = 0;
        for &current in sizes {
            let input = LastCardInput {
                slot: 0,
                previous,
                current,
                opponent: "ada",
            };
            let (next, signal) = detect_last_card(&input, state);
            state = next;
            fired += usize::from(signal.is_some());
            previous.record(current);
        }
        fired
    }

    #[test]
    fn fires_once_per_transition_to_one() {
        assert_eq!(run(&[3, 2, 1, 1, 1, 2]), 1);
        assert_eq!(run(&[3, 2, 1, 1, 1, 2, 1]), 2);
    }

    #[test]
    fn first_observation_at_one_is_quiet() {
        assert_eq!(run(&[1, 1]), 0);
    }

    #[test]
    fn jump_from_many_to_one() {
        assert_eq!(run(&[7, 1]), 1);
    }

    #[test]
    fn episodes_make_distinct_causes() {
        let input = |previous| LastCardInput {
            slot: 2,
            previous: Tracked::Observed(previous),
            current: 1,
            opponent: "ada",
        };
        let (state, first) = detect_last_card(&input(2), LastCardState::default());
        let (state, _) = detect_last_card(
            &LastCardInput {
                slot: 2,
                previous: Tracked::Observed(1),
                current: 3,
                opponent: "ada",
            },
            state,
        );
        let (_, second) = detect_last_card(&input(3), state);
        assert_ne!(first.unwrap().cause(), second.unwrap().cause());
    }
}
