use hashbrown::HashSet;
use whot_types::EventKind;

use crate::events::CauseKey;

/// Game facts that have already produced a notification.
///
/// Cleared whenever a new card lands on the discard pile, so only repeats
/// within one play are suppressed.
#[derive(Debug, Clone, Default)]
pub struct CauseLedger {
    seen: HashSet<(EventKind, CauseKey)>,
}

impl CauseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cause. Returns `false` if it was already recorded.
    pub fn insert(&mut self, kind: EventKind, cause: CauseKey) -> bool {
        self.seen.insert((kind, cause))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }
}
