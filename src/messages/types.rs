use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Persona,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Synthesized speech for persona replies, as returned by the backend
    pub audio_url: Option<String>,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            audio_url: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn persona(text: impl Into<String>) -> Self {
        Self::new(Sender::Persona, text)
    }

    pub fn with_audio_url(mut self, audio_url: Option<String>) -> Self {
        self.audio_url = audio_url.filter(|url| !url.trim().is_empty());
        self
    }

    pub fn is_from_persona(&self) -> bool {
        self.sender == Sender::Persona
    }

    /// Whether the message carries any non-whitespace text
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_audio_url_is_dropped() {
        let msg = Message::persona("Hi").with_audio_url(Some("  ".to_string()));
        assert!(msg.audio_url.is_none());

        let msg = Message::persona("Hi").with_audio_url(Some("/a.mp3".to_string()));
        assert_eq!(msg.audio_url.as_deref(), Some("/a.mp3"));
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::Persona).unwrap(), "\"persona\"");
    }
}
