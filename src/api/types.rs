//! Wire types for the backend API

use crate::session::HistoryEntry;
use crate::{PastportError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatPayload<'a> {
    pub persona: &'a str,
    pub message: &'a str,
    pub history: &'a [HistoryEntry],
}

/// The one response shape every call site depends on.
///
/// `/api/chat` fills `reply` and `audio_url`; `/api/transcribe` also fills
/// `transcribed_text`. Any field may be missing or null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub transcribed_text: Option<String>,
}

impl ChatResponse {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            ..Default::default()
        }
    }

    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }

    pub fn with_transcribed_text(mut self, text: impl Into<String>) -> Self {
        self.transcribed_text = Some(text.into());
        self
    }
}

/// Error body returned on non-2xx answers
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

/// An audio clip ready to be uploaded for transcription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl AudioUpload {
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            mime_type: mime_type.into(),
        }
    }

    /// A WAV recording made by the capture pipeline
    pub fn wav(bytes: Vec<u8>) -> Self {
        Self::new(bytes, "recording.wav", "audio/wav")
    }

    /// Build an upload from in-memory bytes, guessing the mime type from the name
    pub fn from_named_bytes(name: &str, bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(PastportError::AudioProcessingError(format!(
                "Audio file {name:?} is empty"
            )));
        }
        let file_name = Path::new(name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());
        let mime_type = mime_for_file(&file_name).ok_or_else(|| {
            PastportError::AudioProcessingError(format!("{file_name:?} is not a supported audio file"))
        })?;
        Ok(Self::new(bytes, file_name, mime_type))
    }

    /// Read an audio file from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_named_bytes(&path.to_string_lossy(), bytes)
    }
}

/// Mime type for the audio formats the backend accepts
pub fn mime_for_file(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "wav" | "wave" => "audio/wav",
        "mp3" => "audio/mpeg",
        "ogg" | "oga" => "audio/ogg",
        "webm" => "audio/webm",
        "m4a" | "mp4" => "audio/mp4",
        "flac" => "audio/flac",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;

    #[test]
    fn test_chat_payload_shape() {
        let history = vec![HistoryEntry { role: Role::User, text: "Hello".into() }];
        let payload = ChatPayload {
            persona: "einstein",
            message: "Hello",
            history: &history,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "persona": "einstein",
                "message": "Hello",
                "history": [{"role": "user", "text": "Hello"}],
            })
        );
    }

    #[test]
    fn test_response_tolerates_missing_and_null_fields() {
        let resp: ChatResponse = serde_json::from_str(r#"{"reply": "Hi", "audio_url": null}"#).unwrap();
        assert_eq!(resp, ChatResponse::new("Hi"));

        let resp: ChatResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp, ChatResponse::default());
    }

    #[test]
    fn test_mime_for_file() {
        assert_eq!(mime_for_file("take.WAV"), Some("audio/wav"));
        assert_eq!(mime_for_file("/tmp/speech.mp3"), Some("audio/mpeg"));
        assert_eq!(mime_for_file("notes.txt"), None);
        assert_eq!(mime_for_file("noext"), None);
    }

    #[test]
    fn test_from_named_bytes() {
        let upload = AudioUpload::from_named_bytes("/home/me/question.ogg", vec![1, 2, 3]).unwrap();
        assert_eq!(upload.file_name, "question.ogg");
        assert_eq!(upload.mime_type, "audio/ogg");

        assert!(AudioUpload::from_named_bytes("question.ogg", Vec::new()).is_err());
        assert!(AudioUpload::from_named_bytes("readme.md", vec![1]).is_err());
    }
}
