//! Ragchat engine: HTTP access to the RAG backend and effect execution.
mod backend;
mod engine;
mod top_results;
mod types;

pub use backend::{BackendSettings, RagBackend, ReqwestBackend, ASK_PATH, UPLOAD_PATH};
pub use engine::{EngineError, EngineEvents, EngineHandle};
pub use top_results::{decode_top_results, TopResultsError, CHUNK_SEPARATOR, SCORE_PREFIX};
pub use types::{
    Answer, BackendError, EngineEvent, FailureKind, RankedChunk, RequestId, UploadReceipt,
};
