use std::path::{Path, PathBuf};

use crate::view_model::{AppViewModel, TranscriptView};
use crate::{ClientError, Effect, ResultsViewer, ViewerKind};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    NotStarted,
    InProgress,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub score: f64,
    pub chunk: String,
}

/// Metrics rows share the scored-chunk shape; they arrive pre-structured from the backend.
pub type MetricsEntry = ScoredChunk;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToastNotice {
    pub message: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AskReply {
    pub answer: String,
    pub metrics: Vec<MetricsEntry>,
    pub top_results: Vec<ScoredChunk>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AskOutcome {
    Answered(AskReply),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingAsk {
    request_id: RequestId,
    question: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    upload_status: UploadStatus,
    upload_attempt: RequestId,
    selected_file: Option<PathBuf>,
    question_draft: String,
    history: Vec<ChatTurn>,
    metrics: Vec<MetricsEntry>,
    top_results: Vec<ScoredChunk>,
    pending_ask: Option<PendingAsk>,
    next_request_id: RequestId,
    toast: ToastNotice,
    results_viewer: ResultsViewer,
    metrics_viewer: ResultsViewer,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            upload_status: UploadStatus::NotStarted,
            upload_attempt: 0,
            selected_file: None,
            question_draft: String::new(),
            history: Vec::new(),
            metrics: Vec::new(),
            top_results: Vec::new(),
            pending_ask: None,
            next_request_id: 1,
            toast: ToastNotice::default(),
            results_viewer: ResultsViewer::new(ViewerKind::Results),
            metrics_viewer: ResultsViewer::new(ViewerKind::Metrics),
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let transcript = if self.history.is_empty() {
            TranscriptView::Welcome
        } else {
            TranscriptView::Turns(self.history.clone())
        };
        AppViewModel {
            upload_status: self.upload_status,
            selected_file: self.selected_file.clone(),
            transcript,
            loading: self.is_loading(),
            ask_enabled: !self.is_loading(),
            question_draft: self.question_draft.clone(),
            toast: self
                .toast
                .visible
                .then(|| self.toast.message.clone()),
            viewers: vec![
                self.results_viewer.render(&self.top_results),
                self.metrics_viewer.render(&self.metrics),
            ],
            dirty: self.dirty,
        }
    }

    pub fn upload_status(&self) -> UploadStatus {
        self.upload_status
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn top_results(&self) -> &[ScoredChunk] {
        &self.top_results
    }

    pub fn metrics(&self) -> &[MetricsEntry] {
        &self.metrics
    }

    pub fn toast(&self) -> &ToastNotice {
        &self.toast
    }

    pub fn selected_file(&self) -> Option<&Path> {
        self.selected_file.as_deref()
    }

    pub fn question_draft(&self) -> &str {
        &self.question_draft
    }

    pub fn is_loading(&self) -> bool {
        self.pending_ask.is_some()
    }

    pub fn viewer(&self, kind: ViewerKind) -> &ResultsViewer {
        match kind {
            ViewerKind::Results => &self.results_viewer,
            ViewerKind::Metrics => &self.metrics_viewer,
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn select_file(&mut self, path: Option<PathBuf>) {
        if self.selected_file != path {
            self.selected_file = path;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_question_draft(&mut self, text: String) {
        if self.question_draft != text {
            self.question_draft = text;
            self.mark_dirty();
        }
    }

    /// Starts a new upload attempt, superseding any attempt still in flight.
    pub(crate) fn submit_upload(&mut self) -> Result<Effect, ClientError> {
        let path = self.selected_file.clone().ok_or(ClientError::Validation)?;
        self.upload_attempt += 1;
        self.upload_status = UploadStatus::InProgress;
        self.mark_dirty();
        Ok(Effect::UploadPdf {
            attempt: self.upload_attempt,
            path,
        })
    }

    /// Applies an upload completion. Returns false when the attempt was superseded.
    pub(crate) fn finish_upload(&mut self, attempt: RequestId, outcome: UploadOutcome) -> bool {
        if attempt != self.upload_attempt || self.upload_status != UploadStatus::InProgress {
            return false;
        }
        self.upload_status = match outcome {
            UploadOutcome::Success => UploadStatus::Success,
            UploadOutcome::Failed => UploadStatus::Failed,
        };
        self.mark_dirty();
        true
    }

    pub(crate) fn submit_question(&mut self) -> Result<Effect, ClientError> {
        if self.upload_status == UploadStatus::NotStarted {
            return Err(ClientError::Precondition);
        }
        if self.pending_ask.is_some() {
            return Err(ClientError::AskInFlight);
        }
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        let question = self.question_draft.clone();
        self.pending_ask = Some(PendingAsk {
            request_id,
            question: question.clone(),
        });
        self.mark_dirty();
        Ok(Effect::Ask {
            request_id,
            question,
        })
    }

    /// Applies an ask completion. Returns false for a completion that matches
    /// no in-flight request.
    pub(crate) fn finish_ask(&mut self, request_id: RequestId, outcome: AskOutcome) -> bool {
        let pending = match self.pending_ask.take() {
            Some(pending) if pending.request_id == request_id => pending,
            other => {
                self.pending_ask = other;
                return false;
            }
        };

        if let AskOutcome::Answered(reply) = outcome {
            self.metrics = reply.metrics;
            self.top_results = reply.top_results;
            self.history.push(ChatTurn {
                question: pending.question,
                answer: reply.answer,
            });
            self.question_draft.clear();
        }
        self.mark_dirty();
        true
    }

    pub(crate) fn raise_toast(&mut self, message: String) {
        self.toast = ToastNotice {
            message,
            visible: true,
        };
        self.mark_dirty();
    }

    pub(crate) fn dismiss_toast(&mut self) {
        if self.toast.visible {
            self.toast.visible = false;
            self.mark_dirty();
        }
    }

    pub(crate) fn viewer_mut(&mut self, kind: ViewerKind) -> &mut ResultsViewer {
        match kind {
            ViewerKind::Results => &mut self.results_viewer,
            ViewerKind::Metrics => &mut self.metrics_viewer,
        }
    }
}
