use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use whot_types::EventKind;

use super::lifecycle::NotificationId;

/// Sent when a notification's display time runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    pub id: NotificationId,
    pub kind: EventKind,
}

/// Auto-dismiss timer owned by a live notification.
///
/// The background task is aborted when the timer is cancelled or dropped, so
/// a replaced or dismissed notification never fires. Outside a tokio runtime
/// no task is spawned and only the deadline is kept.
#[derive(Debug)]
pub struct DismissTimer {
    deadline: Instant,
    task: Option<JoinHandle<()>>,
}

impl DismissTimer {
    pub fn start(expiry: Expiry, ttl: Duration, tx: &mpsc::UnboundedSender<Expiry>) -> Self {
        let deadline = Instant::now() + ttl;
        let task = tokio::runtime::Handle::try_current().ok().map(|runtime| {
            let tx = tx.clone();
            runtime.spawn(async move {
                tokio::time::sleep_until(deadline).await;
                // Receiver gone means the center shut down.
                let _ = tx.send(expiry);
            })
        });
        Self { deadline, task }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for DismissTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
