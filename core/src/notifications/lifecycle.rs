use std::fmt;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use hashbrown::HashMap;
use tokio::sync::mpsc;
use tokio::time::Instant;
use whot_types::{EventKind, NotificationSettings};

use super::ledger::CauseLedger;
use super::timer::{DismissTimer, Expiry};
use crate::events::{CauseKey, GameSignal};

/// Display id of a notification. Never reused within a center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A notification currently (or formerly) on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: EventKind,
    pub message: String,
    pub cause: CauseKey,
    pub created_at: NaiveDateTime,
    pub ttl: Duration,
    pub expires_at: Instant,
    pub signal: GameSignal,
}

#[derive(Debug)]
struct LiveSlot {
    notification: Notification,
    timer: DismissTimer,
}

/// Owns every live notification and its dismissal timer.
///
/// At most one notification per [`EventKind`] is live; a newer one replaces
/// the older and cancels its timer. Expiry arrives either through the timer
/// channel or by sweeping past-due deadlines, and is keyed by id so a stale
/// timer can never remove a newer notification.
#[derive(Debug)]
pub struct NotificationCenter {
    settings: NotificationSettings,
    live: HashMap<EventKind, LiveSlot>,
    ledger: CauseLedger,
    visible: bool,
    next_id: u64,
    expiry_tx: mpsc::UnboundedSender<Expiry>,
    expiry_rx: mpsc::UnboundedReceiver<Expiry>,
}

impl NotificationCenter {
    pub fn new(settings: NotificationSettings) -> Self {
        let (expiry_tx, expiry_rx) = mpsc::unbounded_channel();
        Self {
            settings,
            live: HashMap::new(),
            ledger: CauseLedger::new(),
            visible: true,
            next_id: 0,
            expiry_tx,
            expiry_rx,
        }
    }

    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    /// Replace the settings. Live notifications of kinds that are now
    /// disabled are dismissed; the rest keep their original TTL.
    pub fn set_settings(&mut self, settings: NotificationSettings) {
        self.settings = settings;
        let muted: Vec<EventKind> = self
            .live
            .keys()
            .copied()
            .filter(|kind| !self.settings.is_enabled(*kind))
            .collect();
        for kind in muted {
            self.remove_kind(kind);
        }
    }

    /// Offer a detected signal for display. Returns the id of the new
    /// notification, or `None` if the signal was muted, a repeat, or the
    /// center is hidden.
    pub fn accept(&mut self, signal: GameSignal) -> Option<NotificationId> {
        let kind = signal.kind();
        let cause = signal.cause();

        if !self.settings.is_enabled(kind) {
            tracing::debug!(%kind, "kind disabled, signal dropped");
            return None;
        }
        if !self.ledger.insert(kind, cause) {
            tracing::debug!(%kind, ?cause, "duplicate cause, signal dropped");
            return None;
        }
        if !self.visible {
            tracing::debug!(%kind, "hidden, signal recorded but not shown");
            return None;
        }

        let id = NotificationId(self.next_id);
        self.next_id += 1;

        // Dropping the replaced slot aborts its timer before the new one starts.
        if let Some(previous) = self.live.remove(&kind) {
            tracing::debug!(
                replaced = %previous.notification.id,
                %id,
                %kind,
                "notification replaced"
            );
        }

        let ttl = self.settings.ttl(kind);
        let timer = DismissTimer::start(Expiry { id, kind }, ttl, &self.expiry_tx);
        let notification = Notification {
            id,
            kind,
            message: signal.message(),
            cause,
            created_at: Local::now().naive_local(),
            ttl,
            expires_at: timer.deadline(),
            signal,
        };
        tracing::info!(
            %id,
            %kind,
            ttl_ms = ttl.as_millis() as u64,
            message = %notification.message,
            "notification shown"
        );

        self.live.insert(kind, LiveSlot { notification, timer });
        Some(id)
    }

    /// Remove a notification by id. Unknown or already-removed ids are ignored.
    pub fn dismiss(&mut self, id: NotificationId) -> Option<Notification> {
        let kind = self
            .live
            .iter()
            .find(|(_, slot)| slot.notification.id == id)
            .map(|(kind, _)| *kind)?;
        let removed = self.remove_kind(kind);
        tracing::debug!(%id, %kind, "notification dismissed");
        removed
    }

    /// Remove every live notification. Nothing is replayed later.
    pub fn hide_all(&mut self) {
        self.visible = false;
        let count = self.live.len();
        self.live.clear();
        self.drain_channel();
        tracing::info!(count, "notifications hidden");
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            if !self.visible {
                tracing::info!("notifications visible");
            }
            self.visible = true;
        } else {
            self.hide_all();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Forget emitted causes (a new card reached the discard pile).
    pub fn clear_causes(&mut self) {
        if !self.ledger.is_empty() {
            tracing::trace!(causes = self.ledger.len(), "cause ledger cleared");
        }
        self.ledger.clear();
    }

    /// Live notifications, oldest first.
    pub fn live(&self) -> Vec<&Notification> {
        let mut live: Vec<&Notification> = self.live.values().map(|s| &s.notification).collect();
        live.sort_by_key(|n| n.id);
        live
    }

    pub fn get(&self, kind: EventKind) -> Option<&Notification> {
        self.live.get(&kind).map(|s| &s.notification)
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Remove and return every notification whose time is up, without
    /// waiting.
    pub fn pump_expired(&mut self) -> Vec<Notification> {
        let mut expired = Vec::new();
        while let Ok(expiry) = self.expiry_rx.try_recv() {
            expired.extend(self.expire(expiry));
        }

        let now = Instant::now();
        let due: Vec<EventKind> = self
            .live
            .iter()
            .filter(|(_, slot)| slot.timer.is_due(now))
            .map(|(kind, _)| *kind)
            .collect();
        for kind in due {
            expired.extend(self.remove_kind(kind));
        }

        expired.sort_by_key(|n| n.id);
        for n in &expired {
            tracing::debug!(id = %n.id, kind = %n.kind, "notification expired");
        }
        expired
    }

    /// Wait for the next live notification to expire and return it. Returns
    /// `None` immediately when nothing is live.
    pub async fn next_expiry(&mut self) -> Option<Notification> {
        loop {
            let (kind, deadline) = self
                .live
                .iter()
                .map(|(kind, slot)| (*kind, slot.timer.deadline()))
                .min_by_key(|(_, deadline)| *deadline)?;

            tokio::select! {
                Some(expiry) = self.expiry_rx.recv() => {
                    if let Some(notification) = self.expire(expiry) {
                        tracing::debug!(
                            id = %notification.id,
                            kind = %notification.kind,
                            "notification expired"
                        );
                        return Some(notification);
                    }
                }
                _ = tokio::time::sleep_until(deadline) => {
                    if let Some(notification) = self.remove_kind(kind) {
                        tracing::debug!(id = %notification.id, %kind, "notification expired");
                        return Some(notification);
                    }
                }
            }
        }
    }

    /// Drop all live notifications and emitted causes. Visibility is kept.
    pub fn reset(&mut self) {
        self.live.clear();
        self.ledger.clear();
        self.drain_channel();
    }

    /// Cancel every timer.
    pub fn shutdown(&mut self) {
        let count = self.live.len();
        self.live.clear();
        self.drain_channel();
        tracing::debug!(count, "notification center shut down");
    }

    fn expire(&mut self, expiry: Expiry) -> Option<Notification> {
        match self.live.get(&expiry.kind) {
            Some(slot) if slot.notification.id == expiry.id => self.remove_kind(expiry.kind),
            _ => {
                tracing::trace!(id = %expiry.id, kind = %expiry.kind, "stale expiry ignored");
                None
            }
        }
    }

    fn remove_kind(&mut self, kind: EventKind) -> Option<Notification> {
        self.live.remove(&kind).map(|slot| slot.notification)
    }

    fn drain_channel(&mut self) {
        while self.expiry_rx.try_recv().is_ok() {}
    }
}

impl Drop for NotificationCenter {
    fn drop(&mut self) {
        self.shutdown();
    }
}
