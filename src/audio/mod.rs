//! Audio capture, encoding and reply playback

pub mod replay;
pub mod wav;

#[cfg(feature = "audio-io")]
pub mod capture;
#[cfg(feature = "audio-io")]
pub mod playback;

pub use replay::{format_time, PlaybackState, ReplayState};
pub use wav::{encode_wav, CapturedAudio};

#[cfg(feature = "audio-io")]
pub use capture::AudioCapture;
#[cfg(feature = "audio-io")]
pub use playback::AudioPlayback;
