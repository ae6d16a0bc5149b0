use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};
use tokio::{task::JoinHandle, time::sleep};
use uuid::Uuid;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Default)]
struct Slot {
    current: Option<Notification>,
    timer: Option<JoinHandle<()>>,
}

impl Slot {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Single-slot, auto-dismissing status message.
///
/// A new message replaces whatever is showing. The dismissal timer belongs to one specific
/// notification: it only ever clears the slot if that same notification is still in it.
#[derive(Clone, Debug)]
pub struct Notifier {
    slot: Arc<Mutex<Slot>>,
    timeout: Duration,
}

impl Notifier {
    pub fn new(timeout: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            timeout,
        }
    }

    fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
        //nothing in here can leave the slot half-written
        slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn show(&self, message: impl Into<String>, severity: Severity) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
        };
        let id = notification.id;
        debug!(%id, severity = severity.as_str(), message = %notification.message, "Showing notification");

        let mut slot = Self::lock(&self.slot);
        slot.cancel_timer();
        slot.current = Some(notification);
        slot.timer = Some(tokio::spawn(Self::expire(
            Arc::downgrade(&self.slot),
            id,
            self.timeout,
        )));

        id
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.show(message, Severity::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.show(message, Severity::Error)
    }

    async fn expire(slot: Weak<Mutex<Slot>>, id: Uuid, after: Duration) {
        sleep(after).await;

        let Some(slot) = slot.upgrade() else {
            return;
        };
        let mut slot = Self::lock(&slot);
        if slot.current.as_ref().is_some_and(|n| n.id == id) {
            trace!(%id, "Notification expired");
            slot.current = None;
            slot.timer = None;
        }
    }

    pub fn dismiss(&self) -> Option<Notification> {
        let mut slot = Self::lock(&self.slot);
        slot.cancel_timer();
        slot.current.take()
    }

    ///only dismisses if `id` is still the one showing - a click on an old toast shouldn't hide a new one
    pub fn dismiss_id(&self, id: Uuid) -> Option<Notification> {
        let mut slot = Self::lock(&self.slot);
        if slot.current.as_ref().is_some_and(|n| n.id == id) {
            slot.cancel_timer();
            slot.current.take()
        } else {
            None
        }
    }

    pub fn current(&self) -> Option<Notification> {
        Self::lock(&self.slot).current.clone()
    }

    #[cfg(test)]
    pub fn has_pending_timer(&self) -> bool {
        Self::lock(&self.slot)
            .timer
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}
