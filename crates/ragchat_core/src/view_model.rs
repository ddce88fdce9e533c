use std::path::PathBuf;

use crate::{ChatTurn, UploadStatus, ViewerPanel};

/// Shown instead of the transcript until the first answer arrives.
pub const WELCOME_TEXT: &str =
    "Welcome to the local RAG chatbot. Upload a PDF, then ask anything about it.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptView {
    Welcome,
    Turns(Vec<ChatTurn>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub upload_status: UploadStatus,
    pub selected_file: Option<PathBuf>,
    pub transcript: TranscriptView,
    pub loading: bool,
    pub ask_enabled: bool,
    pub question_draft: String,
    /// Message of the visible toast, if any.
    pub toast: Option<String>,
    /// Results viewer first, then metrics viewer.
    pub viewers: Vec<ViewerPanel>,
    pub dirty: bool,
}
