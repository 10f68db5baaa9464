//! PastPort - talk to historical personas by text and voice
//!
//! The crate is split into a backend-facing API layer, the chat session
//! model, audio capture/playback, and the egui front end that ties them
//! together.

pub mod api;
pub mod audio;
pub mod config;
pub mod messages;
pub mod personas;
pub mod screen;
pub mod session;
pub mod ui;

use thiserror::Error;

pub use config::AppConfig;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PastportError {
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("Audio processing error: {0}")]
    AudioProcessingError(String),

    /// Non-2xx answer from the backend; `detail` comes from the JSON error body
    #[error("Remote service error ({status}): {detail}")]
    RemoteServiceError { status: u16, detail: String },

    #[error("Transcription service unavailable: {0}")]
    TranscriptionUnavailable(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for PastportError {
    fn from(e: std::io::Error) -> Self {
        PastportError::IOError(e.to_string())
    }
}

impl From<reqwest::Error> for PastportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            PastportError::DecodeError(e.to_string())
        } else if e.is_builder() {
            PastportError::ConfigError(e.to_string())
        } else {
            PastportError::TransportError(e.to_string())
        }
    }
}

impl PastportError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Hardware/device errors may require user intervention
            PastportError::AudioDeviceError(_) => false,
            PastportError::AudioProcessingError(_) => true,
            // The backend may come back; the user can simply retry
            PastportError::RemoteServiceError { .. } => true,
            PastportError::TranscriptionUnavailable(_) => true,
            PastportError::TransportError(_) => true,
            PastportError::DecodeError(_) => true,
            PastportError::ConfigError(_) => false,
            PastportError::ChannelError(_) => false,
            PastportError::IOError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            PastportError::AudioDeviceError(_) => {
                "Audio device error. Please check your microphone/speakers.".to_string()
            }
            PastportError::AudioProcessingError(_) => {
                "Audio processing failed. Please try again.".to_string()
            }
            PastportError::RemoteServiceError { .. } | PastportError::TransportError(_) => {
                "Connection failed. Please try again.".to_string()
            }
            PastportError::TranscriptionUnavailable(_) => {
                "Transcription service is unavailable. Try typing your question.".to_string()
            }
            PastportError::DecodeError(_) => {
                "The server sent a response that could not be read.".to_string()
            }
            PastportError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            PastportError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
            PastportError::IOError(_) => "File system error occurred.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PastportError>;
