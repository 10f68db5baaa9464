//! UI Components for PastPort
//!
//! This module contains all the reusable UI components.

mod audio_player;
mod input_bar;
mod message_list;
mod persona_gallery;
mod profile_panel;
mod welcome;

pub use audio_player::{AudioPlayer, UNAVAILABLE_TEXT, WAITING_TEXT};
pub use input_bar::{InputBar, DISCLAIMER, INPUT_ID};
pub use message_list::MessageList;
pub use persona_gallery::{portrait, PersonaGallery};
pub use profile_panel::ProfilePanel;
pub use welcome::{WelcomeScreen, TAGLINE, TITLE};
