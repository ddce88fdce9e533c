use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ragchat_engine::{
    Answer, BackendError, EngineEvent, EngineHandle, RagBackend, RankedChunk, UploadReceipt,
};

#[derive(Default)]
struct FakeBackend {
    uploads: Mutex<Vec<PathBuf>>,
}

#[async_trait::async_trait]
impl RagBackend for FakeBackend {
    async fn upload_pdf(&self, path: &Path) -> Result<UploadReceipt, BackendError> {
        self.uploads.lock().unwrap().push(path.to_path_buf());
        Ok(UploadReceipt {
            body: serde_json::json!({"ok": true}),
        })
    }

    async fn ask(&self, question: &str) -> Result<Answer, BackendError> {
        Ok(Answer {
            answer: format!("echo: {question}"),
            metrics: Vec::new(),
            top_results: vec![RankedChunk {
                score: 1.0,
                chunk: question.to_string(),
            }],
        })
    }
}

#[test]
fn engine_reports_completions_with_their_ids() {
    ragchat_logging::initialize_for_tests();
    let backend = Arc::new(FakeBackend::default());
    let (engine, events) = EngineHandle::spawn(backend.clone()).expect("engine");

    engine.upload(3, "doc.pdf");
    let event = events.recv_timeout(Duration::from_secs(5)).expect("upload event");
    match event {
        EngineEvent::UploadCompleted { attempt, result } => {
            assert_eq!(attempt, 3);
            assert!(result.is_ok());
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(*backend.uploads.lock().unwrap(), vec![PathBuf::from("doc.pdf")]);

    engine.ask(9, "hello");
    match events.recv_timeout(Duration::from_secs(5)).expect("ask event") {
        EngineEvent::AskCompleted { request_id, result } => {
            assert_eq!(request_id, 9);
            assert_eq!(result.unwrap().answer, "echo: hello");
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(events.try_recv().is_none());
}

#[test]
fn events_end_when_engine_is_dropped() {
    let (engine, events) = EngineHandle::spawn(Arc::new(FakeBackend::default())).expect("engine");
    drop(engine);
    assert!(events.recv().is_none());
}
