//! Harvest pipeline module
//!
//! This module contains the core acquisition logic:
//! - Link extraction from raw page text
//! - Streamed, idempotent document fetching
//! - Overall run coordination and the bounded download pool

mod coordinator;
mod extract;
mod fetcher;

pub use coordinator::{run_harvest, Coordinator};
pub use extract::{LinkExtractor, RemoteLink};
pub use fetcher::{build_http_client, fetch_document, fetch_index_page, FetchOutcome};

use crate::config::Config;
use crate::report::RunSummary;
use crate::DocshelfError;

/// Runs a complete harvest operation
///
/// This is the main entry point. It will:
/// 1. Prepare the store directory
/// 2. Fetch the index page (or reuse its cache)
/// 3. Extract and canonicalize document links
/// 4. Download every unique document
/// 5. Validate stored documents and remove invalid ones
///
/// # Arguments
///
/// * `config` - The validated pipeline configuration
///
/// # Returns
///
/// * `Ok(RunSummary)` - Run completed
/// * `Err(DocshelfError)` - Setup failed
pub async fn harvest(config: Config) -> Result<RunSummary, DocshelfError> {
    run_harvest(config).await
}
