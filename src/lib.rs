//! Docshelf: a document harvesting and integrity pipeline
//!
//! This crate downloads every document of a target type referenced from a
//! single web page, stores the results under canonical deduplicated names,
//! and removes any stored document that fails a structural integrity check.

pub mod config;
pub mod events;
pub mod inspect;
pub mod name;
pub mod pipeline;
pub mod report;
pub mod state;
pub mod store;

use thiserror::Error;

/// Main error type for docshelf operations
#[derive(Debug, Error)]
pub enum DocshelfError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store setup error: {0}")]
    Setup(String),

    #[error("Link pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Fetch worker error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for docshelf operations
pub type Result<T> = std::result::Result<T, DocshelfError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use events::{EventSink, HarvestEvent, RecordingSink, TracingSink};
pub use inspect::{DocumentInspector, PdfInspector, Verdict};
pub use name::{canonical_name, CanonicalName};
pub use pipeline::{run_harvest, Coordinator, FetchOutcome, LinkExtractor, RemoteLink};
pub use report::RunSummary;
pub use state::DocumentState;
