//! Opponent draw detection.

use crate::events::{CauseKey, GameSignal};
use crate::state::Tracked;

#[derive(Debug, Clone)]
pub struct DrawInput<'a> {
    /// Position in the snapshot's opponents list.
    pub slot: usize,
    pub previous: Tracked<u32>,
    pub current: u32,
    pub is_my_turn: bool,
    /// A General Market card landed this cycle, so every other seat drew one.
    pub market_played: bool,
    pub opponent: &'a str,
}

/// Hand grew while the local player was not acting. A previous hand of 0 is
/// never a real starting point: hands are dealt before the first snapshot
/// that lists them. Cards forced by General Market are not deck draws.
pub fn detect_draw(input: &DrawInput<'_>) -> Option<GameSignal> {
    if input.is_my_turn || input.market_played {
        return None;
    }
    let previous = input.previous.get().filter(|&p| p > 0)?;
    if input.current <= previous {
        return None;
    }

    Some(GameSignal::Draw {
        opponent: input.opponent.to_string(),
        drawn: input.current - previous,
        hand: input.current,
        cause: CauseKey::Hand {
            slot: input.slot,
            from: previous,
            to: input.current,
        },
    })
}
