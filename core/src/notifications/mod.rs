//! Notification lifecycle
//!
//! Turns detected [`GameSignal`]s into on-screen notifications:
//! - **Ledger**: drops repeats of a game fact already shown for the current card
//! - **Center**: one live notification per kind, kind-specific TTL, hide/dismiss
//! - **Timer**: cancellable auto-dismiss task per live notification
//!
//! [`GameSignal`]: crate::events::GameSignal

mod ledger;
mod lifecycle;
mod timer;


pub use ledger::CauseLedger;
pub use lifecycle::{Notification, NotificationCenter, NotificationId};
pub use timer::{DismissTimer, Expiry};
