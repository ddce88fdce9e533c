use thiserror::Error;

/// User-facing rejections raised by the session controller.
///
/// The `Display` text is the exact toast message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Upload requested without a selected file.
    #[error("Please select a PDF file to upload.")]
    Validation,
    /// Question asked before any upload was attempted.
    #[error("Please upload a PDF first!")]
    Precondition,
    /// Question asked while a previous one is still unanswered.
    #[error("Still waiting for the previous answer.")]
    AskInFlight,
}
