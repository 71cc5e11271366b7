use crate::events::HarvestEvent;
use std::sync::Mutex;

/// Trait for event sink implementations
///
/// Every component reports typed events instead of writing formatted text,
/// so the orchestrator, the logging layer, and tests all observe the same
/// stream. Implementations must be safe to share across fetch workers.
pub trait EventSink: Send + Sync {
    fn record(&self, event: HarvestEvent);
}

/// Production sink that forwards events to the tracing subscriber
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: HarvestEvent) {
        match &event {
            HarvestEvent::PageFetched { url } => {
                tracing::info!("Fetched index page: {}", url);
            }
            HarvestEvent::PageCacheReused { path } => {
                tracing::info!("Reusing cached index page: {}", path.display());
            }
            HarvestEvent::Downloaded { name } => {
                tracing::info!("Downloaded: {}", name);
            }
            HarvestEvent::Skipped { name } => {
                tracing::info!("Already stored, skipping: {}", name);
            }
            HarvestEvent::FetchFailed { url, reason } => {
                tracing::warn!("Failed to download {}: {}", url, reason);
            }
            HarvestEvent::Invalid { path, reason } => {
                tracing::warn!("Invalid document {}: {}", path.display(), reason);
            }
            HarvestEvent::Removed { path } => {
                tracing::info!("Removed invalid document: {}", path.display());
            }
            HarvestEvent::RemoveFailed { path, reason } => {
                tracing::error!("Could not remove {}: {}", path.display(), reason);
            }
            HarvestEvent::MixedCaseSource { url, name } => {
                tracing::debug!("Source name had uppercase letters: {} -> {}", url, name);
            }
        }
    }
}

/// Sink that records every event in memory
///
/// Used by tests to assert on event sequences; also handy for callers that
/// want to post-process a run programmatically.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<HarvestEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far
    pub fn snapshot(&self) -> Vec<HarvestEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Drains and returns the recorded events
    pub fn take(&self) -> Vec<HarvestEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: HarvestEvent) {
        self.events.lock().unwrap().push(event);
    }
}
