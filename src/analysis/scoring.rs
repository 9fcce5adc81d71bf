use serde::{Deserialize, Serialize};

use super::acoustic::AcousticFeatures;
use super::lexical::LexicalFeatures;
use crate::dsp::stats;

/// Score returned when loudness gives nothing to measure (no frames, or
/// silence throughout).
pub const NEUTRAL_STABILITY: f64 = 5.0;

/// Comfortable conversational pace, in words per minute.
pub const PACE_SLOW_WPM: f64 = 120.0;
pub const PACE_FAST_WPM: f64 = 200.0;

/// Everything measured about one recording.
///
/// Built once by `fuse` and handed to the narrator and renderers read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechMetrics {
    pub duration_secs: f64,
    pub total_words: usize,
    pub words_per_minute: f64,
    /// 1.0 to 10.0
    pub confidence_score: f64,
    pub filler_count: usize,
    pub filler_percentage: f64,
    pub common_fillers: Vec<String>,
    pub avg_word_length: f64,
    /// 1.0 to 10.0, or 5.0 when loudness can't be judged
    pub volume_stability: f64,
    pub avg_volume_db: f64,
    pub volume_variance: f64,
    pub spectral_centroid_hz: f64,
    pub zero_crossing_rate: f64,
    /// Per-frame RMS, kept for plotting a loudness timeline
    pub rms_values: Vec<f64>,
}

/// Combine acoustic and lexical features with the recording length.
pub fn fuse(
    acoustic: AcousticFeatures,
    lexical: LexicalFeatures,
    duration_secs: f64,
) -> SpeechMetrics {
    let words_per_minute = words_per_minute(lexical.word_count, duration_secs);
    let volume_stability = volume_stability(&acoustic.rms_values);
    let confidence_score =
        confidence_score(words_per_minute, lexical.filler_percentage, volume_stability);

    SpeechMetrics {
        duration_secs,
        total_words: lexical.word_count,
        words_per_minute,
        confidence_score,
        filler_count: lexical.filler_count,
        filler_percentage: lexical.filler_percentage,
        common_fillers: lexical.common_fillers,
        avg_word_length: lexical.avg_word_length,
        volume_stability,
        avg_volume_db: acoustic.mean_volume_db,
        volume_variance: acoustic.volume_db_variance,
        spectral_centroid_hz: acoustic.spectral_centroid_hz,
        zero_crossing_rate: acoustic.zero_crossing_rate,
        rms_values: acoustic.rms_values,
    }
}

/// Speaking pace. Zero (not an error) when the duration is zero.
pub fn words_per_minute(word_count: usize, duration_secs: f64) -> f64 {
    if duration_secs > 0.0 {
        word_count as f64 / duration_secs * 60.0
    } else {
        0.0
    }
}

/// Loudness consistency on a 1-10 scale.
///
/// Uses the coefficient of variation (std / mean) of the frame RMS values
/// that are finite and strictly positive: cv 0 scores 10, cv ≥ 0.9 scores 1.
pub fn volume_stability(rms_values: &[f64]) -> f64 {
    let valid: Vec<f64> = rms_values
        .iter()
        .copied()
        .filter(|r| r.is_finite() && *r > 0.0)
        .collect();

    if valid.is_empty() {
        return NEUTRAL_STABILITY;
    }

    let mean = stats::mean(&valid);
    if mean == 0.0 {
        return NEUTRAL_STABILITY;
    }

    let cv = stats::std_dev(&valid) / mean;
    (10.0 - cv * 10.0).clamp(1.0, 10.0)
}

/// Multi-factor delivery score on a 1-10 scale.
///
/// Starts at 10 and subtracts:
/// - (120 - wpm) / 20 below 120 wpm
/// - (wpm - 200) / 30 above 200 wpm
/// - filler_percentage / 5
/// - (10 - volume_stability) / 2
pub fn confidence_score(wpm: f64, filler_percentage: f64, volume_stability: f64) -> f64 {
    let mut score = 10.0;

    if wpm < PACE_SLOW_WPM {
        score -= (PACE_SLOW_WPM - wpm) / 20.0;
    } else if wpm > PACE_FAST_WPM {
        score -= (wpm - PACE_FAST_WPM) / 30.0;
    }

    score -= filler_percentage / 5.0;
    score -= (10.0 - volume_stability) / 2.0;

    score.clamp(1.0, 10.0)
}
