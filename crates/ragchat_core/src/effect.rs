use std::path::PathBuf;

use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the selected file to the upload endpoint.
    UploadPdf { attempt: RequestId, path: PathBuf },
    /// Send a question to the ask endpoint.
    Ask { request_id: RequestId, question: String },
    /// The transcript grew; the frontend should bring the newest turn into view.
    ScrollToLatest { turns: usize },
}
