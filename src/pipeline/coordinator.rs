//! Harvest coordinator - main pipeline orchestration logic
//!
//! This module sequences the full run:
//! - Preparing the store (root creation, stale partial sweep)
//! - Fetching or reusing the cached index page
//! - Extracting and canonicalizing document links
//! - Running the bounded download pool
//! - Validating stored documents and cleaning up invalid ones

use crate::config::Config;
use crate::events::{EventSink, HarvestEvent, TracingSink};
use crate::inspect::{DocumentInspector, PdfInspector, Verdict};
use crate::name::{canonical_name, CanonicalName};
use crate::pipeline::extract::{LinkExtractor, RemoteLink};
use crate::pipeline::fetcher::{build_http_client, fetch_document, fetch_index_page, FetchOutcome};
use crate::report::RunSummary;
use crate::state::DocumentState;
use crate::{store, DocshelfError};
use reqwest::Client;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Main harvest coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    extractor: LinkExtractor,
    inspector: Arc<dyn DocumentInspector>,
    sink: Arc<dyn EventSink>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Uses the PDF inspector and the tracing event sink; tests swap either
    /// through [`Coordinator::with_inspector`] and [`Coordinator::with_sink`].
    ///
    /// # Arguments
    ///
    /// * `config` - The validated pipeline configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(DocshelfError)` - Failed to build the HTTP client or the
    ///   link pattern
    pub fn new(config: Config) -> Result<Self, DocshelfError> {
        let client = build_http_client(&config.fetch)?;
        let extractor = LinkExtractor::new(&config.store.target_extension)?;

        Ok(Self {
            config,
            client,
            extractor,
            inspector: Arc::new(PdfInspector),
            sink: Arc::new(TracingSink),
        })
    }

    /// Replaces the event sink
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replaces the document inspector
    pub fn with_inspector(mut self, inspector: Arc<dyn DocumentInspector>) -> Self {
        self.inspector = inspector;
        self
    }

    /// Runs the full harvest pipeline
    ///
    /// Store-root creation is the only fatal filesystem failure; every
    /// per-document problem is reported as an event and the run continues.
    /// An index page that cannot be fetched ends the run early with an
    /// empty summary, since nothing downstream has input.
    pub async fn run(&self) -> Result<RunSummary, DocshelfError> {
        let mut summary = RunSummary::default();
        let root = PathBuf::from(&self.config.store.root_dir);

        store::ensure_root(&root).map_err(|e| {
            DocshelfError::Setup(format!(
                "cannot create store directory {}: {}",
                root.display(),
                e
            ))
        })?;

        summary.partials_swept = store::sweep_partials(&root)?;

        let page_text = match self.load_index_page().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Cannot fetch index page: {}", e);
                return Ok(summary);
            }
        };

        let work = self.collect_work(&page_text, &mut summary);
        summary.unique_documents = work.len();
        tracing::info!(
            "Discovered {} link(s), {} unique document(s)",
            summary.links_discovered,
            summary.unique_documents
        );

        self.run_fetch_pool(work, &root, &mut summary).await?;
        self.validate_store(&root, &mut summary)?;

        Ok(summary)
    }

    /// Fetches the index page or reuses its cached copy
    async fn load_index_page(&self) -> Result<String, DocshelfError> {
        let cache_path = Path::new(&self.config.source.page_cache_path);
        let (body, reused) =
            fetch_index_page(&self.client, &self.config.source.index_url, cache_path).await?;

        if reused {
            self.sink.record(HarvestEvent::PageCacheReused {
                path: cache_path.to_path_buf(),
            });
        } else {
            self.sink.record(HarvestEvent::PageFetched {
                url: self.config.source.index_url.clone(),
            });
        }

        Ok(body)
    }

    /// Extracts links and reduces them to one fetch per canonical name
    ///
    /// First occurrence wins; later links with the same canonical name are
    /// reported as skipped, the same outcome a re-run produces for an
    /// already-stored document. Links that normalize to an empty name are
    /// reported as failed and never touch the filesystem.
    fn collect_work(
        &self,
        page_text: &str,
        summary: &mut RunSummary,
    ) -> Vec<(CanonicalName, RemoteLink)> {
        let extension = &self.config.store.target_extension;
        let mut seen: HashSet<CanonicalName> = HashSet::new();
        let mut work = Vec::new();

        for link in self.extractor.links(page_text) {
            summary.links_discovered += 1;

            let name = canonical_name(link.as_str(), extension);
            if name.is_empty() {
                summary.unusable_links += 1;
                self.sink.record(HarvestEvent::FetchFailed {
                    url: link.to_string(),
                    reason: "URL has no usable filename".to_string(),
                });
                continue;
            }

            if source_name_has_uppercase(link.as_str()) {
                summary.mixed_case_sources += 1;
                self.sink.record(HarvestEvent::MixedCaseSource {
                    url: link.to_string(),
                    name: name.to_string(),
                });
            }

            if seen.contains(&name) {
                summary.skipped += 1;
                self.sink.record(HarvestEvent::Skipped {
                    name: name.to_string(),
                });
                continue;
            }

            seen.insert(name.clone());
            work.push((name, link));
        }

        work
    }

    /// Downloads every unique document through a bounded worker pool
    ///
    /// Canonical names are deduplicated before spawning, so no two workers
    /// ever write the same target; the existence check inside the fetcher
    /// makes re-runs observe completed files and skip.
    async fn run_fetch_pool(
        &self,
        work: Vec<(CanonicalName, RemoteLink)>,
        root: &Path,
        summary: &mut RunSummary,
    ) -> Result<(), DocshelfError> {
        let permits = self.config.fetch.max_concurrent_downloads as usize;
        let semaphore = Arc::new(Semaphore::new(permits));
        let mut workers: JoinSet<(String, String, FetchOutcome)> = JoinSet::new();

        for (name, link) in work {
            let client = self.client.clone();
            let semaphore = Arc::clone(&semaphore);
            let target = root.join(name.as_str());
            let name = name.into_string();
            let url = link.into_string();

            workers.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return (
                            name,
                            url,
                            FetchOutcome::Failed {
                                reason: "fetch pool closed".to_string(),
                            },
                        )
                    }
                };
                let outcome = fetch_document(&client, &url, &target).await;
                (name, url, outcome)
            });
        }

        while let Some(joined) = workers.join_next().await {
            let (name, url, outcome) = joined?;
            match outcome {
                FetchOutcome::Downloaded => {
                    summary.downloaded += 1;
                    self.sink.record(HarvestEvent::Downloaded { name });
                }
                FetchOutcome::Skipped => {
                    summary.skipped += 1;
                    self.sink.record(HarvestEvent::Skipped { name });
                }
                FetchOutcome::Failed { reason } => {
                    summary.fetch_failed += 1;
                    self.sink.record(HarvestEvent::FetchFailed { url, reason });
                }
            }
        }

        Ok(())
    }

    /// Validates every stored document and removes the invalid ones
    ///
    /// Runs sequentially: inspection is cheap next to the network stage,
    /// and sequential deletes keep the failure reporting simple.
    fn validate_store(&self, root: &Path, summary: &mut RunSummary) -> Result<(), DocshelfError> {
        let extension = &self.config.store.target_extension;
        let stored = store::scan_store(root, extension)?;

        for path in stored {
            let final_state = match self.inspector.inspect(&path) {
                Verdict::Valid { content_units } => {
                    summary.valid += 1;
                    tracing::debug!(
                        "Valid document {} ({} content unit(s))",
                        path.display(),
                        content_units
                    );
                    DocumentState::Valid
                }
                Verdict::Invalid { reason } => {
                    summary.invalid += 1;
                    self.sink.record(HarvestEvent::Invalid {
                        path: path.clone(),
                        reason,
                    });

                    match store::remove_document(&path) {
                        Ok(()) => {
                            summary.removed += 1;
                            self.sink.record(HarvestEvent::Removed { path: path.clone() });
                            DocumentState::Removed
                        }
                        Err(e) => {
                            summary.remove_failed += 1;
                            self.sink.record(HarvestEvent::RemoveFailed {
                                path: path.clone(),
                                reason: e.to_string(),
                            });
                            DocumentState::Invalid
                        }
                    }
                }
            };

            tracing::debug!("{} -> {}", path.display(), final_state);
        }

        Ok(())
    }
}

/// Checks whether the source URL's filename carried uppercase letters
///
/// Purely diagnostic: normalization lowercases everything, and this flags
/// the sources that relied on it.
fn source_name_has_uppercase(link: &str) -> bool {
    let end = link.find(['?', '#']).unwrap_or(link.len());
    link[..end]
        .rsplit('/')
        .next()
        .unwrap_or("")
        .chars()
        .any(|c| c.is_ascii_uppercase())
}

/// Runs the full harvest operation with production backends
///
/// # Arguments
///
/// * `config` - The validated pipeline configuration
///
/// # Returns
///
/// * `Ok(RunSummary)` - Run completed; per-document failures are counted
///   in the summary, not raised
/// * `Err(DocshelfError)` - Setup failed (store root, HTTP client)
pub async fn run_harvest(config: Config) -> Result<RunSummary, DocshelfError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
