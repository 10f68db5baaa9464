//! HTTP client for the PastPort backend
//!
//! Every call is one-shot: no retries and no backoff. The only bound on
//! latency is the configured request timeout.

use crate::api::types::{AudioUpload, ChatPayload, ChatResponse, ErrorBody};
use crate::config::AppConfig;
use crate::session::HistoryEntry;
use crate::{PastportError, Result};
use reqwest::{StatusCode, Url};
use tracing::{debug, warn};

pub const CHAT_PATH: &str = "api/chat";
pub const TRANSCRIBE_PATH: &str = "api/transcribe";

/// Which endpoint produced a response; decides how failures are classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Chat,
    Transcribe,
    Audio,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.base_url()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| PastportError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path under the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| PastportError::ConfigError(format!("Invalid endpoint {path:?}: {e}")))
    }

    /// Resolve an audio URL from a reply. Absolute URLs are kept, relative
    /// ones are taken relative to the backend.
    pub fn resolve_audio_url(&self, url: &str) -> Result<Url> {
        self.base_url
            .join(url.trim())
            .map_err(|e| PastportError::DecodeError(format!("Invalid audio URL {url:?}: {e}")))
    }

    /// `POST /api/chat`
    pub async fn send_chat(
        &self,
        persona_id: &str,
        message: &str,
        history: &[HistoryEntry],
    ) -> Result<ChatResponse> {
        let url = self.endpoint(CHAT_PATH)?;
        debug!("POST {} ({} history entries)", url, history.len());

        let payload = ChatPayload {
            persona: persona_id,
            message,
            history,
        };
        let response = self.http.post(url).json(&payload).send().await?;
        read_response(response, Endpoint::Chat).await
    }

    /// `POST /api/transcribe?persona=<id>` with the clip as multipart field `audio`
    pub async fn send_audio(&self, persona_id: &str, upload: AudioUpload) -> Result<ChatResponse> {
        let url = self.endpoint(TRANSCRIBE_PATH)?;
        debug!(
            "POST {} ({} bytes, {})",
            url,
            upload.bytes.len(),
            upload.mime_type
        );

        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime_type)
            .map_err(|e| PastportError::AudioProcessingError(format!("Bad mime type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("audio", part);

        let response = self
            .http
            .post(url)
            .query(&[("persona", persona_id)])
            .multipart(form)
            .send()
            .await?;
        read_response(response, Endpoint::Transcribe).await
    }

    /// Download a synthesized reply for replay
    pub async fn fetch_audio(&self, url: &str) -> Result<Vec<u8>> {
        let url = self.resolve_audio_url(url)?;
        debug!("GET {}", url);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(normalize_error(status, &body, Endpoint::Audio));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

async fn read_response(response: reqwest::Response, endpoint: Endpoint) -> Result<ChatResponse> {
    let status = response.status();

    if !status.is_success() {
        let body = response.bytes().await.unwrap_or_default();
        let err = normalize_error(status, &body, endpoint);
        warn!("{:?} request failed: {}", endpoint, err);
        return Err(err);
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map_err(|e| PastportError::DecodeError(format!("Malformed {:?} response: {}", endpoint, e)))
}

/// Turn a non-2xx answer into an error.
///
/// The `detail` field of a JSON body is used when present, otherwise a
/// generic message naming the status. A 503 from the transcription endpoint
/// means the speech service is down and gets its own variant.
pub fn normalize_error(status: StatusCode, body: &[u8], endpoint: Endpoint) -> PastportError {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .map(|d| match d {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

    if endpoint == Endpoint::Transcribe && status == StatusCode::SERVICE_UNAVAILABLE {
        return PastportError::TranscriptionUnavailable(detail);
    }

    PastportError::RemoteServiceError {
        status: status.as_u16(),
        detail,
    }
}
