mod common;

use std::sync::Arc;

use common::{ManualClock, ReadOnlyStore, ScriptedDetector};
use dx_backends::{BackendError, JobStatus, MemoryStore, ObjectRef};
use dx_config::{AppConfig, OutputConfig};
use dx_core::{
    BatchEvent, Dispatcher, DocumentReference, ExtractError, ExtractionMethod, QueueRecord,
    OUTPUT_CONTENT_TYPE,
};

fn config(prefix: &str) -> AppConfig {
    AppConfig::new(OutputConfig::new("extracted", prefix))
}

fn batch(keys: &[&str]) -> BatchEvent {
    BatchEvent {
        records: keys
            .iter()
            .map(|key| QueueRecord::for_object("inbox", key))
            .collect(),
    }
}

fn detector() -> ScriptedDetector {
    ScriptedDetector::new()
        .with_image_lines(&["Invoice", "Total: 42"])
        .with_statuses(&[JobStatus::InProgress, JobStatus::Succeeded])
        .with_page(None, &["Page one"], Some("t1"))
        .with_page(Some("t1"), &["Page two"], None)
}

fn body(store: &MemoryStore, key: &str) -> String {
    let object = store
        .object("extracted", key)
        .unwrap_or_else(|| panic!("no output at {}", key));
    String::from_utf8(object.body).unwrap()
}

#[tokio::test]
async fn test_batch_writes_every_kind() {
    let config = config("outputs/");
    let store = Arc::new(MemoryStore::new());
    store.insert("inbox", "notes/readme.txt", "  plain words \n");
    let detector = Arc::new(detector());

    let dispatcher = Dispatcher::new(&config, store.clone(), detector.clone())
        .with_clock(Arc::new(ManualClock::new()));
    let summary = dispatcher
        .process_batch(&batch(&["notes/readme.txt", "scans/receipt.PNG", "scans/Q1 report.pdf"]))
        .await
        .unwrap();

    assert_eq!(summary.processed, 3);
    assert_eq!(body(&store, "outputs/notes/readme.txt.txt"), "plain words");
    assert_eq!(body(&store, "outputs/scans/receipt.PNG.txt"), "Invoice\nTotal: 42");
    assert_eq!(body(&store, "outputs/scans/Q1 report.pdf.txt"), "Page one\nPage two");
    assert_eq!(
        store.writes(),
        vec![
            ObjectRef::new("extracted", "outputs/notes/readme.txt.txt"),
            ObjectRef::new("extracted", "outputs/scans/receipt.PNG.txt"),
            ObjectRef::new("extracted", "outputs/scans/Q1 report.pdf.txt"),
        ]
    );
}

#[tokio::test]
async fn test_output_content_type_and_metadata() {
    let config = config("outputs");
    let store = Arc::new(MemoryStore::new());
    let detector = Arc::new(detector());

    let dispatcher = Dispatcher::new(&config, store.clone(), detector)
        .with_clock(Arc::new(ManualClock::new()));
    let extraction = dispatcher
        .process_reference(&DocumentReference::new("inbox", "a\\b\\c.png"))
        .await
        .unwrap();

    assert_eq!(extraction.method, ExtractionMethod::SyncOcr);
    assert_eq!(extraction.output_key, "outputs/a/b/c.png.txt");

    let stored = store.object("extracted", "outputs/a/b/c.png.txt").unwrap();
    assert_eq!(stored.content_type.as_deref(), Some(OUTPUT_CONTENT_TYPE));
    assert_eq!(stored.metadata["source_key"], "a/b/c.png");
    assert_eq!(stored.metadata["generated_at"], "2024-01-01T00:00:00+00:00");
}

#[tokio::test]
async fn test_batch_aborts_on_unsupported_item() {
    let config = config("");
    let store = Arc::new(MemoryStore::new());
    store.insert("inbox", "first.txt", "first");
    store.insert("inbox", "third.txt", "third");
    let detector = Arc::new(detector());

    let dispatcher = Dispatcher::new(&config, store.clone(), detector.clone());
    let err = dispatcher
        .process_batch(&batch(&["first.txt", "slides.pptx", "third.txt"]))
        .await
        .unwrap_err();

    assert_eq!(err.processed, 1);
    match &err.source {
        ExtractError::UnsupportedType { extension, key } => {
            assert_eq!(extension, "pptx");
            assert_eq!(key, "slides.pptx");
        }
        other => panic!("Expected UnsupportedType, got {:?}", other),
    }
    assert_eq!(store.writes(), vec![ObjectRef::new("extracted", "first.txt.txt")]);
    assert!(store.object("extracted", "third.txt.txt").is_none());
    assert!(detector.calls().is_empty());
}

#[tokio::test]
async fn test_key_without_extension_is_unsupported() {
    let config = config("");
    let dispatcher = Dispatcher::new(
        &config,
        Arc::new(MemoryStore::new()),
        Arc::new(ScriptedDetector::new()),
    );

    let err = dispatcher
        .process_reference(&DocumentReference::new("inbox", "Makefile"))
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::UnsupportedType { ref extension, .. } if extension.is_empty()));
}

#[tokio::test]
async fn test_batch_malformed_record_is_parse_error() {
    let config = config("");
    let store = Arc::new(MemoryStore::new());
    store.insert("inbox", "ok.txt", "fine");

    let mut event = batch(&["ok.txt"]);
    event.records.push(QueueRecord {
        body: r#"{"Records": []}"#.to_string(),
    });
    event.records.push(QueueRecord::for_object("inbox", "ok.txt"));

    let dispatcher = Dispatcher::new(&config, store.clone(), Arc::new(ScriptedDetector::new()));
    let err = dispatcher.process_batch(&event).await.unwrap_err();

    assert_eq!(err.processed, 1);
    assert!(matches!(err.source, ExtractError::Parse(_)));
    assert_eq!(store.writes().len(), 1);
}

#[tokio::test]
async fn test_invalid_utf8_text_is_replaced() {
    let config = config("");
    let store = Arc::new(MemoryStore::new());
    store.insert("inbox", "latin1.txt", vec![b'c', b'a', b'f', 0xE9, b'\n']);

    let dispatcher = Dispatcher::new(&config, store.clone(), Arc::new(ScriptedDetector::new()));
    let summary = dispatcher.process_batch(&batch(&["latin1.txt"])).await.unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(body(&store, "latin1.txt.txt"), "caf\u{FFFD}");
}

#[tokio::test]
async fn test_missing_source_is_storage_error() {
    let config = config("");
    let store = Arc::new(MemoryStore::new());

    let dispatcher = Dispatcher::new(&config, store.clone(), Arc::new(ScriptedDetector::new()));
    let err = dispatcher.process_batch(&batch(&["gone.txt"])).await.unwrap_err();

    assert_eq!(err.processed, 0);
    assert!(matches!(err.source, ExtractError::Storage(BackendError::NotFound(_))));
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn test_output_write_denied_is_storage_error() {
    let config = config("");
    let inner = MemoryStore::new();
    inner.insert("inbox", "a.txt", "text");
    let store = Arc::new(ReadOnlyStore(inner));

    let dispatcher = Dispatcher::new(&config, store, Arc::new(ScriptedDetector::new()));
    let err = dispatcher
        .process_reference(&DocumentReference::new("inbox", "a.txt"))
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::Storage(BackendError::PermissionDenied(_))));
}

#[tokio::test]
async fn test_sync_ocr_failure_is_ocr_error() {
    let config = config("");
    let store = Arc::new(MemoryStore::new());
    let detector = Arc::new(ScriptedDetector::new().failing_detect());

    let dispatcher = Dispatcher::new(&config, store.clone(), detector);
    let err = dispatcher
        .process_reference(&DocumentReference::new("inbox", "photo.jpeg"))
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::Ocr(_)));
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn test_batch_failed_async_job_propagates() {
    let config = config("");
    let store = Arc::new(MemoryStore::new());
    let detector = Arc::new(ScriptedDetector::new().with_statuses(&[JobStatus::Failed]));

    let dispatcher = Dispatcher::new(&config, store.clone(), detector)
        .with_clock(Arc::new(ManualClock::new()));
    let err = dispatcher.process_batch(&batch(&["scan.pdf"])).await.unwrap_err();

    assert_eq!(err.processed, 0);
    assert!(matches!(
        err.source,
        ExtractError::JobIncomplete { status: JobStatus::Failed, .. }
    ));
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn test_same_document_twice_overwrites() {
    let config = config("outputs/");
    let store = Arc::new(MemoryStore::new());
    store.insert("inbox", "dup.txt", "same");

    let dispatcher = Dispatcher::new(&config, store.clone(), Arc::new(ScriptedDetector::new()));
    let summary = dispatcher
        .process_batch(&batch(&["dup.txt", "dup.txt"]))
        .await
        .unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(
        store.writes(),
        vec![
            ObjectRef::new("extracted", "outputs/dup.txt.txt"),
            ObjectRef::new("extracted", "outputs/dup.txt.txt"),
        ]
    );
    assert_eq!(body(&store, "outputs/dup.txt.txt"), "same");
}

#[tokio::test]
async fn test_empty_batch_processes_nothing() {
    let config = config("");
    let dispatcher = Dispatcher::new(
        &config,
        Arc::new(MemoryStore::new()),
        Arc::new(ScriptedDetector::new()),
    );

    let summary = dispatcher.process_batch(&BatchEvent::default()).await.unwrap();
    assert_eq!(summary.processed, 0);
}
