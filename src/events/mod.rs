//! Typed events emitted by the harvest pipeline
//!
//! Components report what happened as data rather than as formatted text.
//! The orchestrator forwards every event to an injectable [`EventSink`];
//! production runs use [`TracingSink`], tests use [`RecordingSink`] to
//! assert on the exact sequence.

mod sink;

pub use sink::{EventSink, RecordingSink, TracingSink};

use std::path::PathBuf;

/// One observable step of a harvest run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestEvent {
    /// The index page was fetched over the network and cached locally
    PageFetched { url: String },

    /// A previously cached index page was used; no network activity
    PageCacheReused { path: PathBuf },

    /// A document was downloaded into the store
    Downloaded { name: String },

    /// A document was already stored (or a duplicate link resolved to the
    /// same canonical name); nothing was fetched
    Skipped { name: String },

    /// A document could not be downloaded; the store is unchanged for it
    FetchFailed { url: String, reason: String },

    /// A stored document failed the structural integrity check
    Invalid { path: PathBuf, reason: String },

    /// An invalid document was deleted from the store
    Removed { path: PathBuf },

    /// Deleting an invalid document failed; the file remains on disk
    RemoveFailed { path: PathBuf, reason: String },

    /// Diagnostic: the source URL's filename carried uppercase letters
    /// before normalization. Observational only; nothing is renamed.
    MixedCaseSource { url: String, name: String },
}
