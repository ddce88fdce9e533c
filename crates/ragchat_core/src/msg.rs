use std::path::PathBuf;

use crate::{AskOutcome, RequestId, UploadOutcome, ViewerKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked (or cleared) the document to upload.
    FileSelected(Option<PathBuf>),
    /// User clicked Upload.
    UploadClicked,
    /// Backend finished an upload attempt.
    UploadFinished {
        attempt: RequestId,
        outcome: UploadOutcome,
    },
    /// User edited the question field.
    QuestionChanged(String),
    /// User clicked Ask.
    AskClicked,
    /// Backend finished answering a question.
    AskFinished {
        request_id: RequestId,
        outcome: AskOutcome,
    },
    /// User closed the toast.
    ToastDismissed,
    ViewerOpened(ViewerKind),
    ViewerClosed(ViewerKind),
}
