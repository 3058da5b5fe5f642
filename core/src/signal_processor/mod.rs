//! Snapshot transition detectors
//!
//! Each detector compares the incoming snapshot with [`SnapshotHistory`] and
//! reports at most one [`GameSignal`] per cycle:
//! - **Penalty**: Pick 2 / Pick 3 issued, stacked, or drawn
//! - **Turn skip**: Hold On passed over the local seat
//! - **General Market**: an opponent made everyone draw
//! - **Draw**: an opponent drew from the deck
//! - **Last card**: an opponent is down to one card
//! - **Match outcome**: the game finished
//!
//! ```text
//! GameStateSnapshot ──▶ SnapshotProcessor ──▶ Vec<GameSignal>
//!                             │
//!                             ▼
//!                 SnapshotHistory::advance (once, last)
//! ```
//!
//! [`SnapshotHistory`]: crate::state::SnapshotHistory
//! [`GameSignal`]: crate::events::GameSignal

pub mod draw;
pub mod general_market;
pub mod last_card;
pub mod match_outcome;
pub mod penalty;
pub mod processor;
pub mod turn_skip;


pub use draw::{DrawInput, detect_draw};
pub use general_market::{GeneralMarketInput, GeneralMarketState, detect_general_market};
pub use last_card::{LastCardInput, LastCardState, detect_last_card};
pub use match_outcome::{MatchOutcomeInput, detect_match_outcome};
pub use penalty::{PenaltyInput, PenaltyState, detect_penalty};
pub use processor::{Cycle, SnapshotProcessor};
pub use turn_skip::{TurnSkipInput, detect_turn_skip};
