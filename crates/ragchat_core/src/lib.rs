//! Ragchat core: pure session controller and view-model helpers.
mod effect;
mod error;
mod msg;
mod state;
mod update;
mod view_model;
mod viewer;

pub use effect::Effect;
pub use error::ClientError;
pub use msg::Msg;
pub use state::{
    AppState, AskOutcome, AskReply, ChatTurn, MetricsEntry, RequestId, ScoredChunk, ToastNotice,
    UploadOutcome, UploadStatus,
};
pub use update::update;
pub use view_model::{AppViewModel, TranscriptView, WELCOME_TEXT};
pub use viewer::{ChunkRowView, ResultsViewer, ViewerBody, ViewerKind, ViewerPanel, EMPTY_PLACEHOLDER};
