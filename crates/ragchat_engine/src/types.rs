use std::fmt;

use serde::Deserialize;

pub type RequestId = u64;

/// A text chunk with the relevance score the backend assigned to it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RankedChunk {
    pub score: f64,
    pub chunk: String,
}

/// Decoded `/ask` response.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub answer: String,
    pub metrics: Vec<RankedChunk>,
    pub top_results: Vec<RankedChunk>,
}

/// Decoded `/upload-pdf` response. The body shape is not validated.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReceipt {
    pub body: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    UploadCompleted {
        attempt: RequestId,
        result: Result<UploadReceipt, BackendError>,
    },
    AskCompleted {
        request_id: RequestId,
        result: Result<Answer, BackendError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct BackendError {
    pub kind: FailureKind,
    pub message: String,
}

impl BackendError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    FileRead,
    Timeout,
    Network,
    InvalidJson,
    MalformedTopResults { line: usize },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid backend url"),
            FailureKind::FileRead => write!(f, "could not read file"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::InvalidJson => write!(f, "response is not valid json"),
            FailureKind::MalformedTopResults { line } => {
                write!(f, "malformed top_results at line {line}")
            }
        }
    }
}
