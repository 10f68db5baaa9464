//! Chat session state
//!
//! A [`ChatSession`] owns the conversation with one persona: the append-only
//! log, the input buffer and the loading flag that allows a single request in
//! flight. Network calls happen elsewhere; the session hands out an outbound
//! request when a send is allowed and folds the result back in when it
//! arrives.

pub mod history;

pub use history::{build_history_window, last_persona_audio, HistoryEntry, Role, HISTORY_WINDOW};

use crate::api::ChatResponse;
use crate::messages::{Message, MessageLog};
use crate::personas::Persona;
use crate::{PastportError, Result};
use tracing::{debug, warn};
use uuid::Uuid;

pub const GREETING: &str =
    "Greetings! I am delighted to converse with you across the ages. What questions do you have for me?";

/// Text used when the backend answers without a reply
pub const NO_REPLY_TEXT: &str = "[No reply]";

/// User bubble text when the transcription came back empty
pub const AUDIO_FALLBACK_TEXT: &str = "Audio input received.";

pub const CHAT_ERROR_TEXT: &str = "[SYSTEM ERROR] Connection failed. Check Console for details.";

pub const AUDIO_ERROR_TEXT: &str = "[S2S ERROR] Audio processing failed. Try typing your question.";

pub const TRANSCRIPTION_UNAVAILABLE_TEXT: &str =
    "[S2S ERROR] Transcription service is unavailable. Try typing your question.";

/// What the in-flight request is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Chat,
    Transcribe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: Uuid,
    pub kind: RequestKind,
}

/// A chat turn ready to be sent to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundChat {
    pub request_id: Uuid,
    pub persona_id: &'static str,
    pub message: String,
    pub history: Vec<HistoryEntry>,
}

pub struct ChatSession {
    persona: &'static Persona,
    log: MessageLog,

    /// Current text input
    pub input_text: String,

    pending: Option<PendingRequest>,
}

impl ChatSession {
    /// Start a conversation; the log is seeded with the greeting
    pub fn new(persona: &'static Persona) -> Self {
        let mut log = MessageLog::new();
        log.push(Message::persona(GREETING));

        Self {
            persona,
            log,
            input_text: String::new(),
            pending: None,
        }
    }

    pub fn persona(&self) -> &'static Persona {
        self.persona
    }

    pub fn messages(&self) -> &[Message] {
        self.log.as_slice()
    }

    /// Whether a request is in flight; sends and uploads are refused meanwhile
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Append a user message. Blank text is ignored.
    pub fn append_user_message(&mut self, text: &str) -> &[Message] {
        let text = text.trim();
        if !text.is_empty() {
            self.log.push(Message::user(text));
        }
        self.log.as_slice()
    }

    /// Append a persona message, substituting a placeholder for a missing reply
    pub fn append_persona_message(
        &mut self,
        reply: Option<String>,
        audio_url: Option<String>,
    ) -> &[Message] {
        let text = reply.unwrap_or_else(|| NO_REPLY_TEXT.to_string());
        self.log.push(Message::persona(text).with_audio_url(audio_url));
        self.log.as_slice()
    }

    /// Context sent upstream with the next turn
    pub fn history_window(&self) -> Vec<HistoryEntry> {
        build_history_window(self.log.as_slice())
    }

    /// Audio the replay panel should offer
    pub fn last_persona_audio(&self) -> Option<&str> {
        last_persona_audio(self.log.as_slice())
    }

    /// Whether the send control should be enabled
    pub fn can_send(&self) -> bool {
        !self.is_loading() && !self.input_text.trim().is_empty()
    }

    /// Take the input buffer and turn it into an outbound chat turn.
    ///
    /// Returns `None` while loading or when the input is blank. On success the
    /// user message is already in the log, the input is cleared and the
    /// session is loading until [`ChatSession::complete_chat`] is called.
    pub fn begin_send(&mut self) -> Option<OutboundChat> {
        if !self.can_send() {
            return None;
        }

        let message = self.input_text.trim().to_string();
        self.input_text.clear();
        self.append_user_message(&message);

        let request_id = Uuid::new_v4();
        self.pending = Some(PendingRequest {
            id: request_id,
            kind: RequestKind::Chat,
        });

        // The window includes the message just appended
        let history = self.history_window();
        debug!(
            "Chat request {} for {} with {} history entries",
            request_id,
            self.persona.id,
            history.len()
        );

        Some(OutboundChat {
            request_id,
            persona_id: self.persona.id,
            message,
            history,
        })
    }

    /// Reserve the request slot for an audio upload
    pub fn begin_audio_upload(&mut self) -> Option<Uuid> {
        if self.is_loading() {
            return None;
        }
        let request_id = Uuid::new_v4();
        self.pending = Some(PendingRequest {
            id: request_id,
            kind: RequestKind::Transcribe,
        });
        Some(request_id)
    }

    /// Fold a chat result into the log.
    ///
    /// Results for a request this session did not start are ignored and
    /// reported as `false`. Otherwise the loading flag is released whatever
    /// the outcome.
    pub fn complete_chat(&mut self, request_id: Uuid, result: Result<ChatResponse>) -> bool {
        if !self.take_pending(request_id, RequestKind::Chat) {
            return false;
        }

        match result {
            Ok(response) => {
                self.append_persona_message(response.reply, response.audio_url);
            }
            Err(e) => {
                warn!("Chat request {} failed: {}", request_id, e);
                self.log.push(Message::persona(CHAT_ERROR_TEXT));
            }
        }
        true
    }

    /// Fold a transcription result into the log: the user's words, then the reply
    pub fn complete_transcription(
        &mut self,
        request_id: Uuid,
        result: Result<ChatResponse>,
    ) -> bool {
        if !self.take_pending(request_id, RequestKind::Transcribe) {
            return false;
        }

        match result {
            Ok(response) => {
                let spoken = response
                    .transcribed_text
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| AUDIO_FALLBACK_TEXT.to_string());
                self.log.push(Message::user(spoken));
                self.append_persona_message(response.reply, response.audio_url);
            }
            Err(e) => {
                warn!("Audio request {} failed: {}", request_id, e);
                let text = match e {
                    PastportError::TranscriptionUnavailable(_) => TRANSCRIPTION_UNAVAILABLE_TEXT,
                    _ => AUDIO_ERROR_TEXT,
                };
                self.log.push(Message::persona(text));
            }
        }
        true
    }

    /// Give up on a request that could not even be dispatched
    pub fn abort_request(&mut self, request_id: Uuid, error: PastportError) {
        match self.pending.map(|p| p.kind) {
            Some(RequestKind::Chat) => {
                self.complete_chat(request_id, Err(error));
            }
            Some(RequestKind::Transcribe) => {
                self.complete_transcription(request_id, Err(error));
            }
            None => {}
        }
    }

    fn take_pending(&mut self, request_id: Uuid, kind: RequestKind) -> bool {
        match self.pending {
            Some(pending) if pending.id == request_id && pending.kind == kind => {
                self.pending = None;
                true
            }
            _ => {
                debug!("Ignoring result for unknown request {}", request_id);
                false
            }
        }
    }
}
