//! History windowing
//!
//! Derives the bounded context that accompanies every chat request, and the
//! audio clip the replay panel should offer.

use crate::messages::{Message, Sender};
use serde::{Deserialize, Serialize};

/// Number of log entries sent upstream (three user/assistant turn pairs)
pub const HISTORY_WINDOW: usize = 6;

/// Role of an entry in the backend's history payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl From<Sender> for Role {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User => Role::User,
            Sender::Persona => Role::Assistant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub text: String,
}

/// Build the history window for a log whose first entry is the greeting.
///
/// Blank entries are skipped and only the last [`HISTORY_WINDOW`] survivors
/// are kept, in log order.
pub fn build_history_window(log: &[Message]) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = log
        .iter()
        .skip(1)
        .filter(|m| m.has_text())
        .map(|m| HistoryEntry {
            role: m.sender.into(),
            text: m.text.clone(),
        })
        .collect();

    let start = entries.len().saturating_sub(HISTORY_WINDOW);
    entries.split_off(start)
}

/// Audio URL of the most recent persona message, if it has one
pub fn last_persona_audio(log: &[Message]) -> Option<&str> {
    log.iter()
        .rev()
        .find(|m| m.is_from_persona())
        .and_then(|m| m.audio_url.as_deref())
}
