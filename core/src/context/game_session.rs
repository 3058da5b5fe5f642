use whot_types::{GameStateSnapshot, NotificationSettings, PlayerContext};

use crate::events::{GameSignal, SignalHandler};
use crate::notifications::{Notification, NotificationCenter, NotificationId};
use crate::signal_processor::SnapshotProcessor;
use crate::state::SnapshotHistory;

/// One client's view of one game: snapshot history, detector state and the
/// notifications they produce.
///
/// Feed every snapshot received from the game service to [`observe`] in
/// arrival order. Poll [`pump_expired`] (or await [`next_expiry`]) to retire
/// notifications whose time is up.
///
/// [`observe`]: GameSession::observe
/// [`pump_expired`]: GameSession::pump_expired
/// [`next_expiry`]: GameSession::next_expiry
pub struct GameSession {
    player: PlayerContext,
    history: SnapshotHistory,
    processor: SnapshotProcessor,
    notifications: NotificationCenter,
    signal_handlers: Vec<Box<dyn SignalHandler + Send + Sync>>,
}

impl GameSession {
    pub fn new(player: PlayerContext, settings: NotificationSettings) -> Self {
        if player.local_seat().is_none() {
            tracing::warn!("local player number is 0, seat-relative signals are disabled");
        }
        Self {
            player,
            history: SnapshotHistory::new(),
            processor: SnapshotProcessor::new(settings.general_market_rank),
            notifications: NotificationCenter::new(settings),
            signal_handlers: Vec::new(),
        }
    }

    /// Register a handler to receive every detected signal, shown or not.
    pub fn add_signal_handler(&mut self, handler: Box<dyn SignalHandler + Send + Sync>) {
        self.signal_handlers.push(handler);
    }

    /// Process one snapshot and return the ids of notifications it put on
    /// screen.
    pub fn observe(&mut self, snapshot: &GameStateSnapshot) -> Vec<NotificationId> {
        // Must be read before the processor advances the history.
        let new_card = self.history.top_card_changed(snapshot.top_card);

        let signals = self
            .processor
            .process_snapshot(snapshot, self.player, &mut self.history);

        if new_card {
            self.notifications.clear_causes();
        }
        self.dispatch_signals(&signals);

        signals
            .into_iter()
            .filter_map(|signal| self.notifications.accept(signal))
            .collect()
    }

    fn dispatch_signals(&mut self, signals: &[GameSignal]) {
        for handler in &mut self.signal_handlers {
            handler.handle_signals(signals);
        }
    }

    /// Page visibility changed. Hiding removes every live notification.
    pub fn set_visible(&mut self, visible: bool) {
        self.notifications.set_visible(visible);
    }

    pub fn dismiss(&mut self, id: NotificationId) -> Option<Notification> {
        self.notifications.dismiss(id)
    }

    pub fn pump_expired(&mut self) -> Vec<Notification> {
        self.notifications.pump_expired()
    }

    pub async fn next_expiry(&mut self) -> Option<Notification> {
        self.notifications.next_expiry().await
    }

    pub fn live(&self) -> Vec<&Notification> {
        self.notifications.live()
    }

    pub fn player(&self) -> PlayerContext {
        self.player
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Apply new settings. The General Market rank takes effect after the
    /// next reset.
    pub fn set_settings(&mut self, settings: NotificationSettings) {
        self.notifications.set_settings(settings);
    }

    /// Start over for a new game: history, detector flags, causes and live
    /// notifications are all cleared.
    pub fn reset(&mut self) {
        let rank = self.notifications.settings().general_market_rank;
        self.history.reset();
        self.processor = SnapshotProcessor::new(rank);
        self.notifications.reset();
        tracing::info!("game session reset");
    }

    pub fn shutdown(&mut self) {
        self.notifications.shutdown();
    }
}
