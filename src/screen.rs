//! Top-level navigation
//!
//! The app moves Welcome → Selection → Chat. Picking a persona starts a
//! fresh [`ChatSession`]; going back from the chat throws it away.

use crate::personas::Persona;
use crate::session::ChatSession;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Selection,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    GetStarted,
    SelectPersona(&'static Persona),
    Back,
}

pub struct ScreenController {
    screen: Screen,
    session: Option<ChatSession>,
}

impl Default for ScreenController {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenController {
    pub fn new() -> Self {
        Self {
            screen: Screen::Welcome,
            session: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Apply a navigation event. Events that make no sense on the current
    /// screen are ignored; returns whether the screen changed.
    pub fn apply(&mut self, event: Navigation) -> bool {
        match (self.screen, event) {
            (Screen::Welcome, Navigation::GetStarted) => {
                self.screen = Screen::Selection;
            }
            (Screen::Selection, Navigation::SelectPersona(persona)) => {
                info!("Starting conversation with {}", persona.name);
                self.session = Some(ChatSession::new(persona));
                self.screen = Screen::Chat;
            }
            (Screen::Selection, Navigation::Back) => {
                self.screen = Screen::Welcome;
            }
            (Screen::Chat, Navigation::Back) => {
                // The session and anything still in flight for it are discarded
                self.session = None;
                self.screen = Screen::Selection;
            }
            (screen, event) => {
                debug!("Ignoring {:?} on {:?}", event, screen);
                return false;
            }
        }
        true
    }

    pub fn get_started(&mut self) -> bool {
        self.apply(Navigation::GetStarted)
    }

    pub fn select_persona(&mut self, persona: &'static Persona) -> bool {
        self.apply(Navigation::SelectPersona(persona))
    }

    pub fn back(&mut self) -> bool {
        self.apply(Navigation::Back)
    }

    /// The running conversation; only present on the chat screen
    pub fn session(&self) -> Option<&ChatSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut ChatSession> {
        self.session.as_mut()
    }

    pub fn selected_persona(&self) -> Option<&'static Persona> {
        self.session.as_ref().map(ChatSession::persona)
    }
}
