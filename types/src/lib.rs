pub mod formatting;
pub mod kind;
pub mod settings;
pub mod snapshot;

pub use kind::EventKind;
pub use settings::{KindSettings, NotificationSettings};
pub use snapshot::{
    Card, GENERAL_MARKET_RANK, GameStateSnapshot, MatchStatus, OpponentView, PlayerContext, Suit,
};
