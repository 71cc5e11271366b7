/// Counters accumulated over one harvest run
///
/// Every discovered link and every stored document lands in exactly one of
/// the per-stage counters, so the totals are auditable against the event
/// stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Links matched on the index page, before deduplication
    pub links_discovered: usize,

    /// Distinct canonical names after deduplication
    pub unique_documents: usize,

    /// Documents downloaded this run
    pub downloaded: usize,

    /// Documents already stored, or duplicate links within the run
    pub skipped: usize,

    /// Documents whose download failed
    pub fetch_failed: usize,

    /// Links whose canonical name was empty and were never fetched
    pub unusable_links: usize,

    /// Source names that carried uppercase letters (diagnostic only)
    pub mixed_case_sources: usize,

    /// Stored documents that passed the structural check
    pub valid: usize,

    /// Stored documents that failed the structural check
    pub invalid: usize,

    /// Invalid documents deleted from the store
    pub removed: usize,

    /// Invalid documents whose deletion failed; still on disk
    pub remove_failed: usize,

    /// Stale partial downloads swept at run start
    pub partials_swept: usize,
}

impl RunSummary {
    /// Returns true if every stored document passed validation and every
    /// invalid one was removed
    pub fn store_is_clean(&self) -> bool {
        self.invalid == self.removed && self.remove_failed == 0
    }
}

/// Prints the run summary to stdout in a formatted manner
///
/// # Arguments
///
/// * `summary` - The summary to display
pub fn print_summary(summary: &RunSummary) {
    println!("=== Harvest Summary ===\n");

    println!("Discovery:");
    println!("  Links found on page: {}", summary.links_discovered);
    println!("  Unique documents: {}", summary.unique_documents);
    if summary.unusable_links > 0 {
        println!("  Unusable links: {}", summary.unusable_links);
    }
    if summary.mixed_case_sources > 0 {
        println!(
            "  Source names with uppercase letters: {}",
            summary.mixed_case_sources
        );
    }
    println!();

    println!("Downloads:");
    println!("  Downloaded: {}", summary.downloaded);
    println!("  Skipped (already stored): {}", summary.skipped);
    println!("  Failed: {}", summary.fetch_failed);
    if summary.partials_swept > 0 {
        println!("  Stale partials swept: {}", summary.partials_swept);
    }
    println!();

    println!("Validation:");
    println!("  Valid documents: {}", summary.valid);
    println!("  Invalid documents: {}", summary.invalid);
    println!("  Removed: {}", summary.removed);
    if summary.remove_failed > 0 {
        println!("  Removal failures: {}", summary.remove_failed);
    }
    println!();

    if summary.store_is_clean() {
        println!("Store is clean: {} valid document(s) kept", summary.valid);
    } else {
        println!(
            "Store still holds {} invalid document(s) that could not be removed",
            summary.remove_failed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_summary_is_clean() {
        assert!(RunSummary::default().store_is_clean());
    }

    #[test]
    fn test_clean_after_full_removal() {
        let summary = RunSummary {
            invalid: 2,
            removed: 2,
            ..Default::default()
        };
        assert!(summary.store_is_clean());
    }

    #[test]
    fn test_dirty_when_removal_fails() {
        let summary = RunSummary {
            invalid: 2,
            removed: 1,
            remove_failed: 1,
            ..Default::default()
        };
        assert!(!summary.store_is_clean());
    }
}
