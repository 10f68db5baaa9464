//! Main application struct and eframe integration
//!
//! This module contains the PastportApp that implements eframe::App. Besides
//! drawing, it owns the API worker and the audio devices, and keeps them in
//! step with the UI state every frame.

use crate::api::{ApiClient, ApiCommand, ApiWorker};
use crate::audio::PlaybackState;
use crate::config::AppConfig;
use crate::ui::state::{AppState, RecordingState};
use crate::ui::theme::Theme;
use crate::Result;
use crossbeam_channel::Sender;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, info, warn};

#[cfg(feature = "audio-io")]
use crate::audio::{AudioCapture, AudioPlayback};

/// Main PastPort application
pub struct PastportApp {
    /// Application state
    state: AppState,
    /// Visual theme
    theme: Theme,
    command_tx: Sender<ApiCommand>,
    worker: Option<JoinHandle<()>>,
    /// Open only while a take is being recorded
    #[cfg(feature = "audio-io")]
    capture: Option<AudioCapture>,
    #[cfg(feature = "audio-io")]
    playback: Option<AudioPlayback>,
    /// Replay state last pushed to the output device
    applied_playback: PlaybackState,
}

impl PastportApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Result<Self> {
        let theme = Theme::default();
        theme.apply(&cc.egui_ctx);
        // Persona portraits are fetched over http
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let client = ApiClient::new(&config)?;
        let ctx = cc.egui_ctx.clone();
        let worker = ApiWorker::new(client).with_notifier(move || ctx.request_repaint());
        let command_tx = worker.command_sender();
        let mut state = AppState::new().with_api(worker.command_sender(), worker.event_receiver());
        let handle = worker.start()?;

        #[cfg(feature = "audio-io")]
        let playback = if config.enable_audio_output {
            match AudioPlayback::new() {
                Ok(playback) => Some(playback),
                Err(e) => {
                    warn!("Reply audio disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        #[cfg(feature = "audio-io")]
        {
            state.audio_input_available = config.enable_audio_input && AudioCapture::is_available();
            state.audio_output_available = playback.is_some();
        }

        info!(
            "PastPort UI ready (microphone: {}, speakers: {})",
            state.audio_input_available, state.audio_output_available
        );

        Ok(Self {
            state,
            theme,
            command_tx,
            worker: Some(handle),
            #[cfg(feature = "audio-io")]
            capture: None,
            #[cfg(feature = "audio-io")]
            playback,
            applied_playback: PlaybackState::Idle,
        })
    }

    /// Open, close or hand off the microphone to match the record button
    #[cfg(feature = "audio-io")]
    fn sync_capture(&mut self) {
        match self.state.recording_state {
            RecordingState::Recording => {
                if self.capture.is_some() {
                    return;
                }
                let opened = AudioCapture::new().and_then(|mut capture| {
                    capture.start_capture()?;
                    Ok(capture)
                });
                match opened {
                    Ok(capture) => self.capture = Some(capture),
                    Err(e) => {
                        warn!("Cannot record: {}", e);
                        self.state.report_error(&e);
                        self.state.cancel_recording();
                    }
                }
            }
            RecordingState::Processing => {
                if let Some(mut capture) = self.capture.take() {
                    match capture.stop_capture() {
                        Some(clip) => self.state.finish_recording(clip),
                        None => self.state.recording_state = RecordingState::Idle,
                    }
                }
            }
            RecordingState::Idle => {
                // Dropping the handle discards the take
                if self.capture.take().is_some() {
                    debug!("Released microphone");
                }
            }
        }
    }

    /// Push replay state changes to the output device
    #[cfg(feature = "audio-io")]
    fn sync_playback(&mut self) {
        let Some(playback) = self.playback.as_mut() else {
            return;
        };
        let replay = &mut self.state.replay;

        if let Some(bytes) = replay.take_ready_audio() {
            match playback.load(bytes, true) {
                Ok(duration) => replay.mark_loaded(duration, true),
                Err(e) => {
                    warn!("Cannot play reply audio: {}", e);
                    replay.mark_failed();
                }
            }
        }

        match replay.state() {
            PlaybackState::Playing => {
                if self.applied_playback != PlaybackState::Playing {
                    if let Err(e) = playback.play() {
                        warn!("Cannot resume reply audio: {}", e);
                        replay.mark_failed();
                    }
                }
                if playback.is_finished() {
                    replay.finished();
                } else {
                    replay.set_position(playback.position());
                }
            }
            PlaybackState::Paused => {
                if self.applied_playback != PlaybackState::Paused {
                    playback.pause();
                }
            }
            PlaybackState::Ready => {}
            PlaybackState::Idle | PlaybackState::Loading | PlaybackState::Unavailable => {
                if matches!(
                    self.applied_playback,
                    PlaybackState::Playing | PlaybackState::Paused | PlaybackState::Ready
                ) {
                    playback.stop();
                }
            }
        }

        self.applied_playback = replay.state();
    }

    #[cfg(not(feature = "audio-io"))]
    fn sync_capture(&mut self) {
        if self.state.recording_state != RecordingState::Idle {
            self.state.recording_state = RecordingState::Idle;
        }
    }

    #[cfg(not(feature = "audio-io"))]
    fn sync_playback(&mut self) {
        self.applied_playback = self.state.replay.state();
    }
}

impl eframe::App for PastportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll backend events
        self.state.poll_events();
        super::handle_dropped_files(ctx, &mut self.state);

        // Render UI
        super::show_screen(ctx, &mut self.state, &self.theme);

        self.sync_capture();
        self.sync_playback();

        // Keep the progress bar moving
        if self.state.replay.is_playing() {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("PastPort shutting down");
        if self.command_tx.send(ApiCommand::Shutdown).is_err() {
            debug!("API worker already stopped");
        }
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("API worker panicked");
            }
        }
    }
}
