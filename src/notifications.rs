use std::sync::Mutex;

/// Lifecycle transitions that are worth telling participants about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Confirmed,
    Finished,
}

impl LifecycleEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleEvent::Confirmed => "confirmed",
            LifecycleEvent::Finished => "finished",
        }
    }
}

/// Delivery target for lifecycle events. Invoked strictly after the owning
/// transaction has committed; implementations cannot fail the caller.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, event: LifecycleEvent, activity_id: &str);
}

/// Sink used by the server binaries: best-effort log line per event.
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, event: LifecycleEvent, activity_id: &str) {
        tracing::info!(activity_id, event = event.as_str(), "activity notification");
    }
}

/// Explicitly owned in-memory sink for tests. Callers hold the instance and
/// inspect the recorded sequence; nothing is shared process-wide.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<(LifecycleEvent, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(LifecycleEvent, String)> {
        self.events.lock().expect("notification sink poisoned").clone()
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, event: LifecycleEvent, activity_id: &str) {
        self.events
            .lock()
            .expect("notification sink poisoned")
            .push((event, activity_id.to_string()));
    }
}
