use serde::{Deserialize, Serialize};

use crate::audio::Waveform;
use crate::dsp::framing::{self, FrameConfig};
use crate::dsp::spectrum::{self, WELCH_SEGMENT};
use crate::dsp::{loudness, stats};
use crate::error::FeatureExtractionError;

/// Parameters for the framed acoustic pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcousticConfig {
    pub frames: FrameConfig,
    /// Welch segment length for the global spectral estimate.
    pub welch_segment: usize,
}

impl Default for AcousticConfig {
    fn default() -> Self {
        Self {
            frames: FrameConfig::default(),
            welch_segment: WELCH_SEGMENT,
        }
    }
}

/// Per-recording loudness and spectral summary.
///
/// With fewer samples than one frame there are no per-frame values and every
/// statistic is 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcousticFeatures {
    /// RMS of each frame, in frame order. Never negative.
    pub rms_values: Vec<f64>,
    pub mean_rms: f64,
    pub rms_variance: f64,
    /// Mean of 20·log10(max(rms, 1e-10)) over frames
    pub mean_volume_db: f64,
    pub volume_db_variance: f64,
    /// Power-weighted mean frequency of the Welch spectrum (Hz)
    pub spectral_centroid_hz: f64,
    /// Mean per-frame zero-crossing rate
    pub zero_crossing_rate: f64,
}

/// Run the framed feature pass over a waveform.
///
/// Algorithm:
/// 1. Reject buffers holding NaN or infinite samples
/// 2. Slide a `frame_length` window at `hop_length` stride; per frame record
///    RMS and zero-crossing rate
/// 3. Aggregate RMS linearly and in dB (mean + population variance)
/// 4. One Welch PSD over the whole signal gives the spectral centroid
pub fn extract(
    waveform: &Waveform,
    config: &AcousticConfig,
) -> Result<AcousticFeatures, FeatureExtractionError> {
    let samples = waveform.samples();

    if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
        return Err(FeatureExtractionError::NonFiniteSample { index });
    }

    let frame_total = framing::frame_count(samples.len(), config.frames);
    let mut rms_values = Vec::with_capacity(frame_total);
    let mut zcr_values = Vec::with_capacity(frame_total);

    for frame in framing::frames(samples, config.frames) {
        rms_values.push(loudness::frame_rms(frame));
        zcr_values.push(loudness::zero_crossing_rate(frame));
    }

    let db_values: Vec<f64> = rms_values
        .iter()
        .map(|&rms| loudness::amplitude_to_db(rms))
        .collect();

    let psd = spectrum::welch_psd(samples, waveform.sample_rate(), config.welch_segment);
    let spectral_centroid_hz = spectrum::spectral_centroid(&psd);

    log::debug!(
        "acoustic pass: {} samples -> {} frames, centroid {:.1} Hz",
        samples.len(),
        rms_values.len(),
        spectral_centroid_hz
    );

    Ok(AcousticFeatures {
        mean_rms: stats::mean(&rms_values),
        rms_variance: stats::variance(&rms_values),
        mean_volume_db: stats::mean(&db_values),
        volume_db_variance: stats::variance(&db_values),
        spectral_centroid_hz,
        zero_crossing_rate: stats::mean(&zcr_values),
        rms_values,
    })
}
