//! HTTP fetcher for the harvest pipeline
//!
//! This module handles all network activity:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Idempotent, streamed document downloads with temp-file atomicity
//! - The one-shot index page fetch with a local cache

use crate::config::FetchConfig;
use crate::store::PARTIAL_SUFFIX;
use crate::DocshelfError;
use reqwest::{redirect::Policy, Client};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Result of a document fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The document was downloaded and renamed into place
    Downloaded,

    /// A file already exists at the target path; no network activity
    Skipped,

    /// The download failed; no file exists at the target path
    Failed { reason: String },
}

/// Builds an HTTP client with the configured behavior
///
/// # Arguments
///
/// * `config` - The download behavior configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Downloads one document URL to one store path, idempotently
///
/// - An existing file at `target` returns `Skipped` without touching the
///   network: re-running the pipeline never re-downloads.
/// - The body streams in bounded chunks to `<target>.part`, which is
///   renamed over the target only on full success. Any transport error,
///   non-success status, or write error deletes the partial file, so a
///   failed fetch never leaves a truncated document for the validator to
///   misclassify.
/// - Creates the store directory before the first write if needed.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The document URL
/// * `target` - Final path of the stored document
pub async fn fetch_document(client: &Client, url: &str, target: &Path) -> FetchOutcome {
    if target.exists() {
        return FetchOutcome::Skipped;
    }

    if let Some(parent) = target.parent() {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            return FetchOutcome::Failed {
                reason: format!("cannot create store directory: {}", e),
            };
        }
    }

    let partial = partial_path(target);
    match stream_to_file(client, url, &partial).await {
        Ok(()) => match tokio::fs::rename(&partial, target).await {
            Ok(()) => FetchOutcome::Downloaded,
            Err(e) => {
                discard_partial(&partial).await;
                FetchOutcome::Failed {
                    reason: format!("cannot move download into place: {}", e),
                }
            }
        },
        Err(reason) => {
            discard_partial(&partial).await;
            FetchOutcome::Failed { reason }
        }
    }
}

/// Fetches the index page, reusing the local cache when present
///
/// The cached copy is written through the same temp-then-rename discipline
/// as document downloads.
///
/// # Returns
///
/// * `Ok((String, bool))` - The page text and whether the cache was reused
/// * `Err(DocshelfError)` - The page could not be fetched or cached
pub async fn fetch_index_page(
    client: &Client,
    url: &str,
    cache_path: &Path,
) -> Result<(String, bool), DocshelfError> {
    if cache_path.exists() {
        let body = tokio::fs::read_to_string(cache_path).await?;
        return Ok((body, true));
    }

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|source| DocshelfError::Http {
            url: url.to_string(),
            source,
        })?;

    let body = response.text().await.map_err(|source| DocshelfError::Http {
        url: url.to_string(),
        source,
    })?;

    let partial = partial_path(cache_path);
    tokio::fs::write(&partial, &body).await?;
    tokio::fs::rename(&partial, cache_path).await?;

    Ok((body, false))
}

/// Streams a response body into a file, chunk by chunk
///
/// Returns a human-readable failure reason; the caller owns cleanup of the
/// partial file.
async fn stream_to_file(client: &Client, url: &str, path: &Path) -> Result<(), String> {
    let mut response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?;

    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| format!("cannot create file: {}", e))?;

    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                file.write_all(&chunk)
                    .await
                    .map_err(|e| format!("write failed: {}", e))?;
            }
            Ok(None) => break,
            Err(e) => return Err(format!("stream interrupted: {}", e)),
        }
    }

    file.flush().await.map_err(|e| format!("flush failed: {}", e))?;
    Ok(())
}

fn partial_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("download"));
    name.push(PARTIAL_SUFFIX);
    target.with_file_name(name)
}

async fn discard_partial(partial: &Path) {
    if let Err(e) = tokio::fs::remove_file(partial).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Could not remove partial file {}: {}", partial.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let config = FetchConfig::default();
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_partial_path_appends_suffix() {
        let partial = partial_path(Path::new("/store/report.pdf"));
        assert_eq!(partial, Path::new("/store/report.pdf.part"));
    }

    // Network behavior (idempotency, atomicity on failure, streaming) is
    // covered by the wiremock integration tests.
}
