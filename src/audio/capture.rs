use crate::audio::wav::CapturedAudio;
use crate::{PastportError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Hard cap on a single take
pub const MAX_CAPTURE_SECONDS: u32 = 120;

/// Microphone capture handle.
///
/// At most one take is active at a time; starting again while capturing is a
/// no-op and stopping when idle returns nothing.
pub struct AudioCapture {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    samples: Arc<Mutex<Vec<f32>>>,
}

impl AudioCapture {
    /// Open the default input device
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or_else(|| PastportError::AudioDeviceError("No input device available".into()))?;

        info!("Using input device: {}", device.name().unwrap_or_else(|_| "Unknown".to_string()));

        let config = device
            .default_input_config()
            .map_err(|e| PastportError::AudioDeviceError(format!("Failed to get input config: {}", e)))?
            .into();

        Ok(Self {
            device,
            config,
            stream: None,
            samples: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Whether the host reports any input device
    pub fn is_available() -> bool {
        cpal::default_host().default_input_device().is_some()
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    pub fn is_capturing(&self) -> bool {
        self.stream.is_some()
    }

    /// Start a new take
    pub fn start_capture(&mut self) -> Result<()> {
        if self.is_capturing() {
            warn!("Already capturing");
            return Ok(());
        }

        self.samples.lock().clear();

        let channels = self.config.channels as usize;
        let max_samples = (self.sample_rate() * MAX_CAPTURE_SECONDS) as usize;
        let samples = Arc::clone(&self.samples);

        let err_fn = |err| {
            error!("Audio input stream error: {}", err);
        };

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let mut buffer = samples.lock();
                    if buffer.len() >= max_samples {
                        return;
                    }
                    if channels == 1 {
                        buffer.extend_from_slice(data);
                    } else {
                        // Average all channels to create mono
                        buffer.extend(
                            data.chunks(channels)
                                .map(|frame| frame.iter().sum::<f32>() / channels as f32),
                        );
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| PastportError::AudioDeviceError(format!("Failed to build input stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| PastportError::AudioDeviceError(format!("Failed to start input stream: {}", e)))?;

        self.stream = Some(stream);
        info!("Started audio capture");
        Ok(())
    }

    /// Finish the current take and hand back what was recorded
    pub fn stop_capture(&mut self) -> Option<CapturedAudio> {
        let stream = self.stream.take()?;
        drop(stream);

        let samples = std::mem::take(&mut *self.samples.lock());
        let clip = CapturedAudio::new(samples, self.sample_rate());
        info!("Stopped audio capture ({:.1}s)", clip.duration_seconds());
        Some(clip)
    }

    /// Drop the current take, if any
    pub fn cancel_capture(&mut self) {
        if self.stop_capture().is_some() {
            info!("Audio capture cancelled");
        }
    }
}

impl Drop for AudioCapture {
    fn drop(&mut self) {
        self.cancel_capture();
    }
}
