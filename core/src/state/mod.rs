pub mod history;

pub use history::{SnapshotHistory, Tracked};
