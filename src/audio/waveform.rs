use crate::error::FeatureExtractionError;

/// A mono recording: normalized samples in roughly [-1.0, 1.0] plus the rate
/// they were captured at.
///
/// Construction is the only place the non-empty invariant is checked, so
/// everything downstream can rely on `duration_secs() > 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self, FeatureExtractionError> {
        if samples.is_empty() {
            return Err(FeatureExtractionError::EmptyWaveform);
        }
        if sample_rate == 0 {
            return Err(FeatureExtractionError::InvalidSampleRate(sample_rate));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Length in seconds: `len / sample_rate`.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Average interleaved channels down to a single channel.
///
/// A trailing partial frame (fewer samples than `channels`) is dropped.
pub fn downmix(interleaved: &[f32], channels: u16) -> Vec<f32> {
    let channels = channels.max(1) as usize;
    if channels == 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}
