use crate::api::AudioUpload;
use crate::{PastportError, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;
use tracing::debug;

/// Clips shorter than this are treated as accidental clicks
pub const MIN_CLIP_SECONDS: f32 = 0.3;

/// Mono audio collected from the microphone
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl CapturedAudio {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Encode as WAV and wrap it for the transcription endpoint
    pub fn to_upload(&self) -> Result<AudioUpload> {
        if self.duration_seconds() < MIN_CLIP_SECONDS {
            return Err(PastportError::AudioProcessingError(format!(
                "Recording too short ({:.2}s)",
                self.duration_seconds()
            )));
        }
        let bytes = encode_wav(&self.samples, self.sample_rate, 1)?;
        Ok(AudioUpload::wav(bytes))
    }
}

/// Encode f32 samples (-1.0..=1.0) as 16-bit PCM WAV in memory
pub fn encode_wav(samples: &[f32], sample_rate: u32, channels: u16) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| PastportError::AudioProcessingError(format!("Failed to create WAV writer: {}", e)))?;

        for &sample in samples {
            let sample_i16 = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer
                .write_sample(sample_i16)
                .map_err(|e| PastportError::AudioProcessingError(format!("Failed to write sample: {}", e)))?;
        }

        writer
            .finalize()
            .map_err(|e| PastportError::AudioProcessingError(format!("Failed to finalize WAV: {}", e)))?;
    }

    let bytes = cursor.into_inner();
    debug!("Encoded {} samples into {} WAV bytes", samples.len(), bytes.len());
    Ok(bytes)
}
