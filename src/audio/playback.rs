use crate::{PastportError, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::io::Cursor;
use std::time::Duration;
use tracing::{debug, info};

/// Plays downloaded reply audio on the default output device.
///
/// The loaded clip is kept so it can be started again after it finished.
pub struct AudioPlayback {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    clip: Option<Vec<u8>>,
}

impl AudioPlayback {
    /// Open the default output device
    pub fn new() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| PastportError::AudioDeviceError(format!("No output device available: {}", e)))?;

        info!("Opened audio output");

        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            clip: None,
        })
    }

    /// Replace the current clip. Returns its length when the format reports one.
    pub fn load(&mut self, bytes: Vec<u8>, autoplay: bool) -> Result<Option<Duration>> {
        self.stop();

        let source = decode(&bytes)?;
        let duration = source.total_duration();
        let sink = self.new_sink()?;
        sink.append(source);
        if !autoplay {
            sink.pause();
        }

        debug!("Loaded {} bytes of reply audio ({:?})", bytes.len(), duration);
        self.sink = Some(sink);
        self.clip = Some(bytes);
        Ok(duration)
    }

    pub fn play(&mut self) -> Result<()> {
        let finished = self.is_finished();
        if finished {
            // Restart from the beginning
            let Some(bytes) = &self.clip else {
                return Ok(());
            };
            let source = decode(bytes)?;
            let sink = self.new_sink()?;
            sink.append(source);
            self.sink = Some(sink);
        } else if let Some(sink) = &self.sink {
            sink.play();
        }
        Ok(())
    }

    pub fn pause(&self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    /// Whether the clip ran to the end (or nothing is loaded)
    pub fn is_finished(&self) -> bool {
        self.sink.as_ref().map_or(true, |sink| sink.empty())
    }

    pub fn position(&self) -> Duration {
        self.sink.as_ref().map_or(Duration::ZERO, |sink| sink.get_pos())
    }

    fn new_sink(&self) -> Result<Sink> {
        Sink::try_new(&self.handle)
            .map_err(|e| PastportError::AudioDeviceError(format!("Failed to create sink: {}", e)))
    }
}

impl Drop for AudioPlayback {
    fn drop(&mut self) {
        self.stop();
    }
}

fn decode(bytes: &[u8]) -> Result<Decoder<Cursor<Vec<u8>>>> {
    Decoder::new(Cursor::new(bytes.to_vec()))
        .map_err(|e| PastportError::AudioProcessingError(format!("Failed to decode audio: {}", e)))
}
