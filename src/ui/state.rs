//! Application state management
//!
//! This module provides the central state for the PastPort UI. Widgets mutate
//! it directly; backend traffic goes through the API worker channels and is
//! folded back in by [`AppState::poll_events`] once per frame.

use crate::api::{ApiCommand, ApiEvent, AudioUpload};
use crate::audio::{CapturedAudio, ReplayState};
use crate::personas::Persona;
use crate::screen::{Screen, ScreenController};
use crate::session::ChatSession;
use crate::PastportError;
use crossbeam_channel::{Receiver, Sender as ChannelSender};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Recording state for voice input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    /// Not recording
    Idle,
    /// Microphone is open
    Recording,
    /// Take finished, waiting for the transcription round trip
    Processing,
}

/// Central application state
pub struct AppState {
    /// Screen and the running conversation
    pub nav: ScreenController,

    /// Recording state
    pub recording_state: RecordingState,

    /// Reply audio offered in the profile panel
    pub replay: ReplayState,

    /// Last error shown as a banner; cleared on the next successful action
    pub last_error: Option<String>,

    /// Whether a microphone may be used
    pub audio_input_available: bool,

    /// Whether reply audio may be played
    pub audio_output_available: bool,

    /// Channel to send API commands
    pub api_command_tx: Option<ChannelSender<ApiCommand>>,

    /// Channel to receive API events
    pub api_event_rx: Option<Receiver<ApiEvent>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create a new application state with no backend attached
    pub fn new() -> Self {
        Self {
            nav: ScreenController::new(),
            recording_state: RecordingState::Idle,
            replay: ReplayState::new(),
            last_error: None,
            audio_input_available: false,
            audio_output_available: false,
            api_command_tx: None,
            api_event_rx: None,
        }
    }

    /// Attach the API worker channels
    pub fn with_api(
        mut self,
        command_tx: ChannelSender<ApiCommand>,
        event_rx: Receiver<ApiEvent>,
    ) -> Self {
        self.api_command_tx = Some(command_tx);
        self.api_event_rx = Some(event_rx);
        self
    }

    pub fn screen(&self) -> Screen {
        self.nav.screen()
    }

    pub fn session(&self) -> Option<&ChatSession> {
        self.nav.session()
    }

    pub fn session_mut(&mut self) -> Option<&mut ChatSession> {
        self.nav.session_mut()
    }

    pub fn is_loading(&self) -> bool {
        self.session().is_some_and(ChatSession::is_loading)
    }

    pub fn get_started(&mut self) {
        self.nav.get_started();
    }

    pub fn select_persona(&mut self, persona: &'static Persona) {
        if self.nav.select_persona(persona) {
            self.last_error = None;
        }
    }

    /// Leave the current screen. Leaving the chat drops the take in progress
    /// and the replay; late responses for the old session are ignored.
    pub fn go_back(&mut self) {
        if self.nav.back() {
            self.recording_state = RecordingState::Idle;
            self.last_error = None;
            self.sync_replay();
        }
    }

    /// Send the text in the input box
    pub fn send_message(&mut self) {
        let Some(session) = self.nav.session_mut() else {
            return;
        };
        let Some(outbound) = session.begin_send() else {
            return;
        };
        let request_id = outbound.request_id;

        if let Err(e) = dispatch(&self.api_command_tx, outbound.into()) {
            if let Some(session) = self.nav.session_mut() {
                session.abort_request(request_id, e);
            }
        }
    }

    /// Upload a clip for speech-to-speech. Returns whether it was sent.
    pub fn upload_audio(&mut self, upload: AudioUpload) -> bool {
        let Some(session) = self.nav.session_mut() else {
            return false;
        };
        let Some(request_id) = session.begin_audio_upload() else {
            debug!("Ignoring audio upload while a request is in flight");
            return false;
        };
        let persona_id = session.persona().id.to_string();

        info!("Uploading {} ({} bytes)", upload.file_name, upload.bytes.len());
        self.recording_state = RecordingState::Processing;
        self.last_error = None;

        let command = ApiCommand::Transcribe {
            request_id,
            persona_id,
            upload,
        };
        if let Err(e) = dispatch(&self.api_command_tx, command) {
            self.recording_state = RecordingState::Idle;
            if let Some(session) = self.nav.session_mut() {
                session.abort_request(request_id, e);
            }
            return false;
        }
        true
    }

    /// Start recording audio
    pub fn start_recording(&mut self) {
        if self.recording_state != RecordingState::Idle
            || !self.audio_input_available
            || self.session().map_or(true, ChatSession::is_loading)
        {
            return;
        }
        self.recording_state = RecordingState::Recording;
        self.last_error = None;
    }

    /// Stop recording; the captured take will be handed to [`Self::finish_recording`]
    pub fn stop_recording(&mut self) {
        if self.recording_state != RecordingState::Recording {
            return;
        }
        self.recording_state = RecordingState::Processing;
    }

    /// Cancel recording without processing
    pub fn cancel_recording(&mut self) {
        if self.recording_state == RecordingState::Recording {
            self.recording_state = RecordingState::Idle;
            debug!("Recording cancelled");
        }
    }

    /// Encode and upload a finished take
    pub fn finish_recording(&mut self, clip: CapturedAudio) {
        match clip.to_upload() {
            Ok(upload) => {
                if !self.upload_audio(upload) {
                    self.recording_state = RecordingState::Idle;
                }
            }
            Err(e) => {
                warn!("Discarding recording: {}", e);
                self.report_error(&e);
                self.recording_state = RecordingState::Idle;
            }
        }
    }

    /// Record a failure that has no place in the conversation log
    pub fn report_error(&mut self, error: &PastportError) {
        self.last_error = Some(error.user_message());
    }

    /// Process incoming events from the API worker
    pub fn poll_events(&mut self) {
        let events: Vec<ApiEvent> = match &self.api_event_rx {
            Some(rx) => rx.try_iter().collect(),
            None => Vec::new(),
        };

        for event in events {
            self.handle_event(event);
        }

        self.sync_replay();
    }

    /// Fold one API event into the state
    pub fn handle_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::ChatCompleted { request_id, result } => {
                self.complete(request_id, |session| session.complete_chat(request_id, result));
            }
            ApiEvent::TranscriptionCompleted { request_id, result } => {
                if self.complete(request_id, |session| {
                    session.complete_transcription(request_id, result)
                }) {
                    self.recording_state = RecordingState::Idle;
                }
            }
            ApiEvent::AudioFetched { url, result } => {
                self.replay.on_fetched(&url, result);
            }
            ApiEvent::Shutdown => {
                info!("API worker shut down");
                self.api_command_tx = None;
            }
        }
    }

    fn complete(&mut self, request_id: Uuid, apply: impl FnOnce(&mut ChatSession) -> bool) -> bool {
        match self.nav.session_mut() {
            Some(session) => apply(session),
            None => {
                debug!("Dropping response {} after leaving the chat", request_id);
                false
            }
        }
    }

    /// Point the replay panel at the latest reply audio
    fn sync_replay(&mut self) {
        let url = self
            .nav
            .session()
            .and_then(ChatSession::last_persona_audio)
            .map(str::to_string);

        let Some(url) = self.replay.sync(url.as_deref()) else {
            return;
        };

        if !self.audio_output_available {
            self.replay.mark_failed();
            return;
        }
        if let Err(e) = dispatch(&self.api_command_tx, ApiCommand::FetchAudio { url }) {
            warn!("Cannot fetch reply audio: {}", e);
            self.replay.mark_failed();
        }
    }
}

fn dispatch(tx: &Option<ChannelSender<ApiCommand>>, command: ApiCommand) -> crate::Result<()> {
    let tx = tx
        .as_ref()
        .ok_or_else(|| PastportError::ChannelError("API worker not running".into()))?;
    tx.send(command)
        .map_err(|e| PastportError::ChannelError(format!("Failed to send command: {}", e)))
}
