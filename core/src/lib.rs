pub mod context;
pub mod events;
pub mod notifications;
pub mod signal_processor;
pub mod state;

// Re-exports for convenience
pub use context::{ConfigError, GameSession};
pub use events::{CauseKey, GameSignal, SignalHandler};
pub use notifications::{Notification, NotificationCenter, NotificationId};
pub use signal_processor::SnapshotProcessor;
pub use state::{SnapshotHistory, Tracked};
pub use whot_types::*;
