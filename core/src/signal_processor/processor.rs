use whot_types::{GameStateSnapshot, PlayerContext};

use super::draw::{DrawInput, detect_draw};
use super::general_market::{GeneralMarketInput, GeneralMarketState, detect_general_market};
use super::last_card::{LastCardInput, LastCardState, detect_last_card};
use super::match_outcome::{MatchOutcomeInput, detect_match_outcome};
use super::penalty::{PenaltyInput, PenaltyState, detect_penalty};
use super::turn_skip::{TurnSkipInput, detect_turn_skip};
use crate::events::GameSignal;
use crate::state::SnapshotHistory;

/// One snapshot transition as seen by the detectors.
#[derive(Debug, Clone, Copy)]
pub struct Cycle<'a> {
    pub previous: &'a SnapshotHistory,
    pub current: &'a GameStateSnapshot,
    pub player: PlayerContext,
}

impl Cycle<'_> {
    /// Seat whose play produced this snapshot: the seat that held the turn in
    /// the previous snapshot. Falls back to the current seat before any seat
    /// was observed.
    pub fn acting_seat(&self) -> usize {
        self.previous
            .current_seat
            .get()
            .unwrap_or(self.current.current_player_index)
    }

    pub fn is_my_turn(&self) -> bool {
        self.player.is_local(self.acting_seat())
    }

    pub fn card_played(&self) -> bool {
        self.previous.top_card_changed(self.current.top_card)
    }

    /// A card of `market_rank` replaced the previous top card.
    pub fn market_played(&self, market_rank: u8) -> bool {
        self.card_played()
            && self
                .current
                .top_card
                .is_some_and(|card| card.rank == market_rank)
    }

    pub fn seat_name(&self, seat: usize) -> String {
        self.current.seat_name(seat, self.player)
    }
}

/// Runs every detector against a snapshot and owns their persisted state.
///
/// Detectors are independent; the order they run in does not matter. The
/// history is advanced once, after all of them, whatever they reported.
#[derive(Debug, Clone)]
pub struct SnapshotProcessor {
    penalty: PenaltyState,
    general_market: GeneralMarketState,
    /// Indexed by opponent slot.
    last_card: Vec<LastCardState>,
    market_rank: u8,
}

impl Default for SnapshotProcessor {
    fn default() -> Self {
        Self::new(whot_types::GENERAL_MARKET_RANK)
    }
}

impl SnapshotProcessor {
    pub fn new(market_rank: u8) -> Self {
        Self {
            penalty: PenaltyState::default(),
            general_market: GeneralMarketState::default(),
            last_card: Vec::new(),
            market_rank,
        }
    }

    pub fn penalty_state(&self) -> &PenaltyState {
        &self.penalty
    }

    /// Evaluate `snapshot` against `history`, then record it.
    pub fn process_snapshot(
        &mut self,
        snapshot: &GameStateSnapshot,
        player: PlayerContext,
        history: &mut SnapshotHistory,
    ) -> Vec<GameSignal> {
        let signals = {
            let cycle = Cycle {
                previous: history,
                current: snapshot,
                player,
            };
            self.evaluate(&cycle)
        };

        history.advance(snapshot);

        for signal in &signals {
            tracing::debug!(kind = %signal.kind(), cause = ?signal.cause(), "signal detected");
        }
        signals
    }

    fn evaluate(&mut self, cycle: &Cycle<'_>) -> Vec<GameSignal> {
        let mut signals = Vec::new();
        let snapshot = cycle.current;
        let local_seat = cycle.player.local_seat();
        let actor = cycle.seat_name(cycle.acting_seat());
        let is_my_turn = cycle.is_my_turn();
        let market_played = cycle.market_played(self.market_rank);

        let target = cycle.seat_name(snapshot.current_player_index);
        let (penalty, signal) = detect_penalty(
            &PenaltyInput {
                previous: cycle.previous.pending_penalty,
                current: snapshot.pending_penalty,
                is_my_turn,
                actor: &actor,
                target: &target,
                top_card: snapshot.top_card,
            },
            std::mem::take(&mut self.penalty),
        );
        self.penalty = penalty;
        signals.extend(signal);

        signals.extend(detect_turn_skip(&TurnSkipInput {
            previous: cycle.previous.current_seat,
            current: snapshot.current_player_index,
            local_seat,
            card_played: cycle.card_played(),
            actor: &actor,
            top_card: snapshot.top_card,
        }));

        let (market, signal) = detect_general_market(
            &GeneralMarketInput {
                previous_deck: cycle.previous.deck_size,
                current_deck: snapshot.deck_size,
                previous_seat: cycle.previous.current_seat,
                current_seat: snapshot.current_player_index,
                top_card: snapshot.top_card,
                local_seat,
                market_rank: self.market_rank,
                actor: &actor,
            },
            self.general_market,
        );
        self.general_market = market;
        signals.extend(signal);

        if self.last_card.len() < snapshot.opponents.len() {
            self.last_card
                .resize(snapshot.opponents.len(), LastCardState::default());
        }
        for (slot, opponent) in snapshot.opponents.iter().enumerate() {
            let name = snapshot.opponent_name(slot);
            let previous = cycle.previous.opponent_hand(slot);

            signals.extend(detect_draw(&DrawInput {
                slot,
                previous,
                current: opponent.card_count,
                is_my_turn,
                market_played,
                opponent: &name,
            }));

            let (state, signal) = detect_last_card(
                &LastCardInput {
                    slot,
                    previous,
                    current: opponent.card_count,
                    opponent: &name,
                },
                self.last_card[slot],
            );
            self.last_card[slot] = state;
            signals.extend(signal);
        }

        let winner_name = snapshot
            .winner_index
            .map(|seat| cycle.seat_name(seat))
            .unwrap_or_default();
        signals.extend(detect_match_outcome(&MatchOutcomeInput {
            previous: cycle.previous.status,
            current: snapshot.status,
            winner: snapshot.winner_index,
            local_seat,
            winner_name: &winner_name,
        }));

        signals
    }

    /// Forget all detector flags (new game session).
    pub fn reset(&mut self) {
        *self = Self::new(self.market_rank);
    }
}
