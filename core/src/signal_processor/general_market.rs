//! General Market detection.
//!
//! Every other seat draws one card, so the deck shrinks by the number of
//! opponents of the player who played it. The top card stays on the pile until
//! someone plays over it, which is why the card identity is remembered.

use whot_types::Card;

use crate::events::{CauseKey, GameSignal};
use crate::state::Tracked;

/// Largest deck drop a General Market can cause (four other seats).
pub const MAX_MARKET_DRAW: u32 = 4;

/// Persisted between cycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneralMarketState {
    pub last_processed_card: Option<Card>,
    pub shown_for_current_card: bool,
}

#[derive(Debug, Clone)]
pub struct GeneralMarketInput<'a> {
    pub previous_deck: Tracked<u32>,
    pub current_deck: u32,
    pub previous_seat: Tracked<usize>,
    pub current_seat: usize,
    pub top_card: Option<Card>,
    pub local_seat: Option<usize>,
    pub market_rank: u8,
    /// Display name of the seat that just acted.
    pub actor: &'a str,
}

pub fn detect_general_market(
    input: &GeneralMarketInput<'_>,
    mut state: GeneralMarketState,
) -> (GeneralMarketState, Option<GameSignal>) {
    // A different card on the pile re-arms the detector.
    if let (Some(top), Some(last)) = (input.top_card, state.last_processed_card)
        && top != last
    {
        state.shown_for_current_card = false;
    }

    let (Some(previous_deck), Some(previous_seat), Some(local)) = (
        input.previous_deck.get(),
        input.previous_seat.get(),
        input.local_seat,
    ) else {
        return (state, None);
    };
    let Some(top) = input.top_card else {
        return (state, None);
    };
    if top.rank != input.market_rank {
        return (state, None);
    }
    if state.shown_for_current_card && state.last_processed_card == Some(top) {
        return (state, None);
    }

    let turn_changed = previous_seat != input.current_seat;
    if input.current_deck >= previous_deck || !turn_changed || previous_seat == local {
        return (state, None);
    }

    let drawn = previous_deck - input.current_deck;
    if !(1..=MAX_MARKET_DRAW).contains(&drawn) {
        tracing::debug!(drawn, "deck drop outside General Market range");
        return (state, None);
    }

    state.last_processed_card = Some(top);
    state.shown_for_current_card = true;
    let signal = GameSignal::GeneralMarket {
        by: input.actor.to_string(),
        card: top,
        cause: CauseKey::Card(top),
    };
    (state, Some(signal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use whot_types::{GENERAL_MARKET_RANK, Suit};

    const STAR_14: Card = Card::new(Suit::Star, 14);

    fn input(
        previous_deck: Option<u32>,
        current_deck: u32,
        previous_seat: usize,
        current_seat: usize,
        top_card: Option<Card>,
    ) -> GeneralMarketInput<'static> {
        GeneralMarketInput {
            previous_deck: previous_deck.into(),
            current_deck,
            previous_seat: Tracked::Observed(previous_seat),
            current_seat,
            top_card,
            local_seat: Some(1),
            market_rank: GENERAL_MARKET_RANK,
            actor: "ada",
        }
    }

    fn idle() -> GeneralMarketState {
        GeneralMarketState::default()
    }

    #[test]
    fn fires_once_for_a_market_card() {
        let (state, signal) =
            detect_general_market(&input(Some(30), 29, 0, 1, Some(STAR_14)), idle());
        assert!(matches!(signal, Some(GameSignal::GeneralMarket { card: STAR_14, .. })));
        assert!(state.shown_for_current_card);

        // Same snapshot again: deck unchanged, nothing new.
        let (state, signal) =
            detect_general_market(&input(Some(29), 29, 1, 1, Some(STAR_14)), state);
        assert!(signal.is_none());

        // Same unresolved card with a fresh deck drop still does not re-fire.
        let (_, signal) = detect_general_market(&input(Some(29), 28, 0, 1, Some(STAR_14)), state);
        assert!(signal.is_none());
    }

    #[test]
    fn unobserved_deck_never_fires() {
        let (_, signal) = detect_general_market(&input(None, 10, 0, 1, Some(STAR_14)), idle());
        assert!(signal.is_none());
    }

    #[test]
    fn requires_market_rank() {
        let pick_two = Card::new(Suit::Circle, 2);
        let (_, signal) = detect_general_market(&input(Some(30), 28, 0, 1, Some(pick_two)), idle());
        assert!(signal.is_none());
        let (_, signal) = detect_general_market(&input(Some(30), 29, 0, 1, None), idle());
        assert!(signal.is_none());
    }

    #[test]
    fn local_player_market_is_quiet() {
        let (_, signal) = detect_general_market(&input(Some(30), 29, 1, 0, Some(STAR_14)), idle());
        assert!(signal.is_none());
    }

    #[test]
    fn deck_drop_range_is_enforced() {
        let (_, signal) = detect_general_market(&input(Some(30), 25, 0, 1, Some(STAR_14)), idle());
        assert!(signal.is_none());
        let (_, signal) = detect_general_market(&input(Some(30), 26, 0, 1, Some(STAR_14)), idle());
        assert!(signal.is_some());
    }

    #[test]
    fn new_market_card_rearms() {
        let (state, _) = detect_general_market(&input(Some(30), 29, 0, 1, Some(STAR_14)), idle());
        // Someone plays over it, then a different 14 lands.
        let circle_3 = Card::new(Suit::Circle, 3);
        let (state, _) = detect_general_market(&input(Some(29), 29, 1, 0, Some(circle_3)), state);
        assert!(!state.shown_for_current_card);
        let cross_14 = Card::new(Suit::Cross, 14);
        let (_, signal) = detect_general_market(&input(Some(29), 28, 0, 1, Some(cross_14)), state);
        assert!(signal.is_some());
    }
}
