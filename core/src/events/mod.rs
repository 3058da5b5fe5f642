pub mod handler;
pub mod signal;

pub use handler::SignalHandler;
pub use signal::{CauseKey, GameSignal, PenaltyFamily, Stack};
