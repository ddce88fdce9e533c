use std::path::Path;
use std::time::Duration;

use ragchat_logging::{chat_debug, chat_info, chat_warn};
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::top_results::decode_top_results;
use crate::{Answer, BackendError, FailureKind, RankedChunk, UploadReceipt};

pub const UPLOAD_PATH: &str = "upload-pdf";
pub const ASK_PATH: &str = "ask";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub ask_timeout: Duration,
    pub upload_timeout: Duration,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            ask_timeout: Duration::from_secs(300),
            upload_timeout: Duration::from_secs(600),
        }
    }
}

/// The two operations the chat client needs from a RAG backend.
#[async_trait::async_trait]
pub trait RagBackend: Send + Sync {
    async fn upload_pdf(&self, path: &Path) -> Result<UploadReceipt, BackendError>;

    async fn ask(&self, question: &str) -> Result<Answer, BackendError>;
}

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
struct AskResponse {
    answer: String,
    #[serde(default)]
    metrics: Vec<RankedChunk>,
    #[serde(default)]
    top_results: String,
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: BackendSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let base = parse_base_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    pub fn settings(&self) -> &BackendSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base
            .join(path)
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

/// Parses the base url, treating it as a directory so endpoints are appended to its path.
fn parse_base_url(raw: &str) -> Result<Url, BackendError> {
    let mut base = Url::parse(raw.trim())
        .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(BackendError::new(
            FailureKind::InvalidUrl,
            format!("{raw} cannot be used as a base url"),
        ));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

#[async_trait::async_trait]
impl RagBackend for ReqwestBackend {
    async fn upload_pdf(&self, path: &Path) -> Result<UploadReceipt, BackendError> {
        let url = self.endpoint(UPLOAD_PATH)?;
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            BackendError::new(FailureKind::FileRead, format!("{}: {err}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("document.pdf")
            .to_string();
        chat_info!(
            "Uploading {} ({} bytes) to {}",
            file_name,
            bytes.len(),
            url
        );

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")
            .map_err(map_reqwest_error)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(url)
            .timeout(self.settings.upload_timeout)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let body: serde_json::Value = read_json(response).await?;
        chat_debug!("Upload response: {}", body);
        Ok(UploadReceipt { body })
    }

    async fn ask(&self, question: &str) -> Result<Answer, BackendError> {
        let url = self.endpoint(ASK_PATH)?;
        chat_info!("Asking question_len={} at {}", question.len(), url);

        let response = self
            .client
            .post(url)
            .timeout(self.settings.ask_timeout)
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let wire: AskResponse = read_json(response).await?;
        let top_results = decode_top_results(&wire.top_results).map_err(|err| {
            BackendError::new(
                FailureKind::MalformedTopResults { line: err.line() },
                err.to_string(),
            )
        })?;
        chat_debug!(
            "Answer received: answer_len={} metrics={} top_results={}",
            wire.answer.len(),
            wire.metrics.len(),
            top_results.len()
        );

        Ok(Answer {
            answer: wire.answer,
            metrics: wire.metrics,
            top_results,
        })
    }
}

/// Decodes the body as JSON whatever the status code; the body decides success.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let status = response.status();
    let url = response.url().clone();
    if !status.is_success() {
        chat_warn!("{} answered with status {}", url, status);
    }
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes).map_err(|err| {
        BackendError::new(FailureKind::InvalidJson, format!("status {status}: {err}"))
    })
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return BackendError::new(FailureKind::InvalidUrl, err.to_string());
    }
    BackendError::new(FailureKind::Network, err.to_string())
}
