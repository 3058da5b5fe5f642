//! Penalty issue, stack and clear detection.
//!
//! The penalty counter only grows on the acting player's own play, so an
//! increase while the local player is acting means they sent it. A drop to
//! zero means the acting seat drew it; the local player is told only when
//! they were that seat and did not send it themselves.

use whot_types::Card;

use crate::events::{CauseKey, GameSignal, PenaltyFamily, Stack};
use crate::state::Tracked;

/// Persisted between cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PenaltyState {
    /// The outstanding penalty was last raised by the local player.
    pub sent_by_me: bool,
    /// Name of the opponent who last raised the outstanding penalty.
    pub issuer: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PenaltyInput<'a> {
    pub previous: Tracked<u32>,
    pub current: u32,
    /// The local seat is the seat whose play produced this transition.
    pub is_my_turn: bool,
    /// Display name of the acting seat.
    pub actor: &'a str,
    /// Display name of the seat that now faces the penalty.
    pub target: &'a str,
    pub top_card: Option<Card>,
}

pub fn detect_penalty(
    input: &PenaltyInput<'_>,
    mut state: PenaltyState,
) -> (PenaltyState, Option<GameSignal>) {
    let Some(previous) = input.previous.get() else {
        return (state, None);
    };
    let current = input.current;
    let cause = CauseKey::Penalty {
        from: previous,
        to: current,
        card: input.top_card,
    };

    if current > previous {
        if !input.is_my_turn {
            // An opponent raised or stacked it; they own the outstanding penalty now.
            state.sent_by_me = false;
            state.issuer = Some(input.actor.to_string());
            return (state, None);
        }

        state.sent_by_me = true;
        state.issuer = None;
        let stack = (previous > 0).then(|| {
            let delta = current - previous;
            Stack {
                previous,
                delta,
                family: PenaltyFamily::classify(previous, delta),
            }
        });
        let signal = GameSignal::PenaltyIssued {
            total: current,
            stack,
            target: input.target.to_string(),
            cause,
        };
        return (state, Some(signal));
    }

    if current == 0 && previous > 0 {
        let sent_by_me = std::mem::take(&mut state.sent_by_me);
        let issuer = state.issuer.take();
        if sent_by_me {
            tracing::debug!(previous, "penalty cleared by opponent, issuer already notified");
            return (state, None);
        }
        if !input.is_my_turn {
            tracing::debug!(previous, "penalty drawn by another seat");
            return (state, None);
        }
        let signal = GameSignal::PenaltyCleared {
            drawn: previous,
            issuer: issuer.unwrap_or_else(|| "Opponent".to_string()),
            cause,
        };
        return (state, Some(signal));
    }

    (state, None)
}
