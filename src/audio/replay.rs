//! Replay panel state
//!
//! Tracks the reply audio offered in the profile panel independently of any
//! output device, so the flow can be driven (and tested) without sound.

use crate::Result;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No audio to offer
    Idle,
    /// Downloading or decoding
    Loading,
    /// Loaded and stopped at the start
    Ready,
    Playing,
    Paused,
    /// Could not be fetched or decoded
    Unavailable,
}

#[derive(Debug)]
pub struct ReplayState {
    url: Option<String>,
    state: PlaybackState,
    fetched: Option<Vec<u8>>,
    position: Duration,
    duration: Option<Duration>,
}

impl Default for ReplayState {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayState {
    pub fn new() -> Self {
        Self {
            url: None,
            state: PlaybackState::Idle,
            fetched: None,
            position: Duration::ZERO,
            duration: None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Play/pause is only offered once the audio is loaded
    pub fn is_ready(&self) -> bool {
        matches!(
            self.state,
            PlaybackState::Ready | PlaybackState::Playing | PlaybackState::Paused
        )
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Follow the audio the session currently offers.
    ///
    /// When the URL changes everything is reset and the new URL is returned
    /// so the caller can start downloading it.
    pub fn sync(&mut self, url: Option<&str>) -> Option<String> {
        if self.url.as_deref() == url {
            return None;
        }

        self.url = url.map(str::to_string);
        self.fetched = None;
        self.position = Duration::ZERO;
        self.duration = None;
        self.state = if self.url.is_some() {
            PlaybackState::Loading
        } else {
            PlaybackState::Idle
        };

        debug!("Replay source changed to {:?}", self.url);
        self.url.clone()
    }

    /// Store a finished download. Results for an outdated URL are dropped.
    pub fn on_fetched(&mut self, url: &str, result: Result<Vec<u8>>) -> bool {
        if self.url.as_deref() != Some(url) || self.state != PlaybackState::Loading {
            debug!("Dropping audio for stale source {}", url);
            return false;
        }

        match result {
            Ok(bytes) => self.fetched = Some(bytes),
            Err(e) => {
                warn!("Failed to fetch reply audio {}: {}", url, e);
                self.state = PlaybackState::Unavailable;
            }
        }
        true
    }

    /// Hand the downloaded bytes to the output device, once
    pub fn take_ready_audio(&mut self) -> Option<Vec<u8>> {
        self.fetched.take()
    }

    /// The device accepted the audio; `playing` reports whether autoplay started
    pub fn mark_loaded(&mut self, duration: Option<Duration>, playing: bool) {
        if self.state != PlaybackState::Loading {
            return;
        }
        self.duration = duration;
        self.position = Duration::ZERO;
        self.state = if playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Ready
        };
    }

    pub fn mark_failed(&mut self) {
        if self.url.is_some() {
            self.fetched = None;
            self.state = PlaybackState::Unavailable;
        }
    }

    /// Flip between playing and paused. Returns the new state, or `None` when
    /// the audio is not ready yet.
    pub fn toggle(&mut self) -> Option<PlaybackState> {
        self.state = match self.state {
            PlaybackState::Ready | PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Paused,
            _ => return None,
        };
        Some(self.state)
    }

    /// Playback reached the end
    pub fn finished(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Ready;
            self.position = Duration::ZERO;
        }
    }

    pub fn set_position(&mut self, position: Duration) {
        self.position = match self.duration {
            Some(total) => position.min(total),
            None => position,
        };
    }

    /// Fraction played, 0.0 when the length is unknown
    pub fn progress(&self) -> f32 {
        match self.duration {
            Some(total) if !total.is_zero() => {
                (self.position.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// `current / total`, e.g. `0:07 / 1:42`
    pub fn time_label(&self) -> String {
        format!(
            "{} / {}",
            format_time(self.position),
            format_time(self.duration.unwrap_or_default())
        )
    }
}

/// Format as `m:ss`
pub fn format_time(time: Duration) -> String {
    let secs = time.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
