use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::{BackendError, BackendSettings, EngineEvent, RagBackend, ReqwestBackend, RequestId};

enum EngineCommand {
    Upload { attempt: RequestId, path: PathBuf },
    Ask { request_id: RequestId, question: String },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to configure backend: {0}")]
    Backend(#[from] BackendError),
}

/// Sends requests to the backend on a dedicated runtime thread.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving end for completed requests.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn with_settings(settings: BackendSettings) -> Result<(Self, EngineEvents), EngineError> {
        let backend = ReqwestBackend::new(settings)?;
        Self::spawn(Arc::new(backend))
    }

    pub fn spawn(backend: Arc<dyn RagBackend>) -> Result<(Self, EngineEvents), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("ragchat-engine")
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                });
            }
            // Let in-flight requests finish before the runtime goes away.
            runtime.shutdown_timeout(Duration::from_secs(1));
        });

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn upload(&self, attempt: RequestId, path: impl Into<PathBuf>) {
        let _ = self.cmd_tx.send(EngineCommand::Upload {
            attempt,
            path: path.into(),
        });
    }

    pub fn ask(&self, request_id: RequestId, question: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Ask {
            request_id,
            question: question.into(),
        });
    }
}

impl EngineEvents {
    /// Blocks until an event arrives. Returns `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    backend: &dyn RagBackend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Upload { attempt, path } => EngineEvent::UploadCompleted {
            attempt,
            result: backend.upload_pdf(&path).await,
        },
        EngineCommand::Ask {
            request_id,
            question,
        } => EngineEvent::AskCompleted {
            request_id,
            result: backend.ask(&question).await,
        },
    };
    let _ = event_tx.send(event);
}
