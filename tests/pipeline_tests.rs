//! Integration tests for the harvest pipeline
//!
//! These tests use wiremock to stand in for the remote site and tempfile
//! stores to exercise the full fetch-validate-cleanup cycle end-to-end.

use docshelf::config::{Config, FetchConfig, SourceConfig, StoreConfig};
use docshelf::events::{HarvestEvent, RecordingSink};
use docshelf::pipeline::Coordinator;
use lopdf::{dictionary, Document, Object};
use std::path::Path;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration rooted in a temporary directory
fn test_config(index_url: &str, dir: &Path) -> Config {
    Config {
        source: SourceConfig {
            index_url: index_url.to_string(),
            page_cache_path: dir.join("page.html").to_str().unwrap().to_string(),
        },
        store: StoreConfig {
            root_dir: dir.join("store").to_str().unwrap().to_string(),
            target_extension: ".pdf".to_string(),
        },
        fetch: FetchConfig {
            max_concurrent_downloads: 4,
            request_timeout_secs: 5,
            user_agent: "docshelf-test/1.0".to_string(),
        },
    }
}

/// Renders a well-formed PDF with the given number of pages to bytes
fn pdf_bytes(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..page_count)
        .map(|_| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn store_file_names(store: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(store)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_full_harvest_cycle() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempfile::tempdir().unwrap();

    // Two links to the same logical document (different casing, encoding,
    // and a doubled extension), one corrupt document, one zero-page one.
    let index_body = format!(
        r#"<html><body>
        <a href="{base}/Files/Doc%20A.PDF.pdf">Doc A</a>
        <a href="{base}/doc_a.pdf">Doc A again</a>
        <a href="{base}/bad.pdf">Corrupt</a>
        <a href="{base}/empty.pdf">Zero pages</a>
        </body></html>"#
    );

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_body))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Files/Doc%20A.PDF.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(pdf_bytes(3)))
        .expect(1)
        .mount(&server)
        .await;

    // The second link canonicalizes to the same name, so it must never be
    // requested at all.
    Mock::given(method("GET"))
        .and(path("/doc_a.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(pdf_bytes(1)))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bad.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not a pdf".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/empty.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(pdf_bytes(0)))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&format!("{base}/"), dir.path());
    let store_root = dir.path().join("store");

    let coordinator = Coordinator::new(config).unwrap();
    let summary = coordinator.run().await.unwrap();

    assert_eq!(summary.links_discovered, 4);
    assert_eq!(summary.unique_documents, 3);
    assert_eq!(summary.downloaded, 3);
    assert_eq!(summary.skipped, 1, "duplicate link resolves by name collision");
    assert_eq!(summary.fetch_failed, 0);
    assert_eq!(summary.valid, 1);
    assert_eq!(summary.invalid, 2);
    assert_eq!(summary.removed, 2);
    assert_eq!(summary.mixed_case_sources, 1);
    assert!(summary.store_is_clean());

    // Only the well-formed document survives, under its canonical name.
    assert_eq!(store_file_names(&store_root), vec!["doc_a.pdf"]);
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempfile::tempdir().unwrap();

    let index_body = format!(r#"<a href="{base}/report.pdf">Report</a>"#);

    // Exactly one request each across both runs: the page cache and the
    // stored document make the second run fully offline.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_body))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(pdf_bytes(2)))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&format!("{base}/"), dir.path());
    let stored = dir.path().join("store/report.pdf");

    let first = Coordinator::new(config.clone()).unwrap().run().await.unwrap();
    assert_eq!(first.downloaded, 1);
    assert_eq!(first.skipped, 0);
    let bytes_after_first = std::fs::read(&stored).unwrap();

    let second = Coordinator::new(config).unwrap().run().await.unwrap();
    assert_eq!(second.downloaded, 0);
    assert_eq!(second.skipped, 1);
    assert_eq!(second.valid, 1);

    let bytes_after_second = std::fs::read(&stored).unwrap();
    assert_eq!(bytes_after_first, bytes_after_second);
}

#[tokio::test]
async fn test_failed_download_leaves_no_partial_file() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempfile::tempdir().unwrap();

    let index_body = format!(r#"<a href="{base}/gone.pdf">Gone</a>"#);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_body))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone.pdf"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&format!("{base}/"), dir.path());
    let store_root = dir.path().join("store");

    let summary = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(summary.downloaded, 0);
    assert_eq!(summary.fetch_failed, 1);

    // Neither the document nor a truncated partial survives the failure.
    assert!(store_file_names(&store_root).is_empty());
}

#[tokio::test]
async fn test_corruption_cleanup_converges() {
    let dir = tempfile::tempdir().unwrap();
    let store_root = dir.path().join("store");
    std::fs::create_dir_all(&store_root).unwrap();

    // Pre-seeded store, no links on the page: only validation runs.
    std::fs::write(dir.path().join("page.html"), "<html>no links</html>").unwrap();
    std::fs::write(store_root.join("good.pdf"), pdf_bytes(1)).unwrap();
    std::fs::write(store_root.join("hollow.pdf"), pdf_bytes(0)).unwrap();

    let config = test_config("https://unused.example/", dir.path());

    let first = Coordinator::new(config.clone()).unwrap().run().await.unwrap();
    assert_eq!(first.valid, 1);
    assert_eq!(first.invalid, 1);
    assert_eq!(first.removed, 1);
    assert_eq!(store_file_names(&store_root), vec!["good.pdf"]);

    // A second pass finds nothing left to do.
    let second = Coordinator::new(config).unwrap().run().await.unwrap();
    assert_eq!(second.valid, 1);
    assert_eq!(second.invalid, 0);
    assert_eq!(second.removed, 0);
    assert_eq!(store_file_names(&store_root), vec!["good.pdf"]);
}

#[tokio::test]
async fn test_event_stream_reports_every_outcome() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = tempfile::tempdir().unwrap();

    let index_body = format!(
        r#"<a href="{base}/keep.pdf">ok</a> <a href="{base}/junk.pdf">bad</a>"#
    );

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_body))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/keep.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(pdf_bytes(1)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/junk.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"garbage".to_vec()))
        .mount(&server)
        .await;

    let config = test_config(&format!("{base}/"), dir.path());
    let sink = Arc::new(RecordingSink::new());
    let coordinator = Coordinator::new(config).unwrap().with_sink(sink.clone());
    coordinator.run().await.unwrap();

    let events = sink.snapshot();
    let named = |p: &std::path::Path, name: &str| {
        p.file_name().and_then(|n| n.to_str()) == Some(name)
    };

    assert!(events
        .iter()
        .any(|e| matches!(e, HarvestEvent::PageFetched { .. })));
    assert!(events.iter().any(
        |e| matches!(e, HarvestEvent::Downloaded { name } if name == "keep.pdf")
    ));
    assert!(events.iter().any(
        |e| matches!(e, HarvestEvent::Downloaded { name } if name == "junk.pdf")
    ));

    // The invalid verdict must precede the removal of the same file.
    let invalid_at = events
        .iter()
        .position(|e| matches!(e, HarvestEvent::Invalid { path, .. } if named(path, "junk.pdf")));
    let removed_at = events
        .iter()
        .position(|e| matches!(e, HarvestEvent::Removed { path } if named(path, "junk.pdf")));
    assert!(invalid_at.is_some());
    assert!(removed_at.is_some());
    assert!(invalid_at < removed_at);

    // The valid document produces no invalid/removed events.
    assert!(!events
        .iter()
        .any(|e| matches!(e, HarvestEvent::Invalid { path, .. } if named(path, "keep.pdf"))));
    assert!(dir.path().join("store/keep.pdf").exists());
}

#[tokio::test]
async fn test_cached_page_skips_network() {
    let dir = tempfile::tempdir().unwrap();

    // No mock server at all: the cached page is the only input, and it
    // references nothing.
    std::fs::write(dir.path().join("page.html"), "<html>empty</html>").unwrap();

    let config = test_config("https://unreachable.invalid/", dir.path());
    let sink = Arc::new(RecordingSink::new());
    let coordinator = Coordinator::new(config).unwrap().with_sink(sink.clone());
    let summary = coordinator.run().await.unwrap();

    assert_eq!(summary.links_discovered, 0);
    assert!(sink
        .snapshot()
        .iter()
        .any(|e| matches!(e, HarvestEvent::PageCacheReused { .. })));
}
