use console::style;

use super::acoustic::{self, AcousticConfig};
use super::lexical::{FillerLexicon, TextAnalyzer};
use super::scoring::{self, SpeechMetrics};
use crate::audio::Waveform;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

/// The extraction -> fusion half of the pipeline.
///
/// Holds only immutable configuration and compiled patterns, so one instance
/// can serve any number of requests (and threads); every buffer it touches
/// is local to a single `analyze` call.
#[derive(Debug, Clone)]
pub struct SpeechAnalyzer {
    acoustic: AcousticConfig,
    text: TextAnalyzer,
}

impl SpeechAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        Self::with_lexicon(config, FillerLexicon::english())
    }

    pub fn with_lexicon(
        config: &AnalysisConfig,
        lexicon: FillerLexicon,
    ) -> Result<Self, AnalysisError> {
        Ok(Self {
            acoustic: config.into(),
            text: TextAnalyzer::new(lexicon)?,
        })
    }

    /// Measure one recording and its transcript.
    ///
    /// An empty transcript is a valid "no speech detected" case and yields
    /// zero lexical metrics. Only a malformed waveform fails.
    pub fn analyze(
        &self,
        waveform: &Waveform,
        transcript: &str,
    ) -> Result<SpeechMetrics, AnalysisError> {
        let acoustic = acoustic::extract(waveform, &self.acoustic)?;
        let lexical = self.text.analyze(transcript);

        log::debug!(
            "lexical pass: {} words, {} fillers",
            lexical.word_count,
            lexical.filler_count
        );

        Ok(scoring::fuse(acoustic, lexical, waveform.duration_secs()))
    }
}

/// Print the headline metrics the way the terminal report shows them.
pub fn print_metrics(m: &SpeechMetrics) {
    println!("     Duration:    {:.1}s, {} words", m.duration_secs, m.total_words);
    println!(
        "     Pace:        {:.1} WPM {}",
        m.words_per_minute,
        pace_label(m.words_per_minute)
    );
    println!(
        "     Fillers:     {} ({:.1}%) {}",
        m.filler_count,
        m.filler_percentage,
        filler_label(m.filler_percentage)
    );
    if !m.common_fillers.is_empty() {
        println!("     Most used:   {}", m.common_fillers.join(", "));
    }
    println!("     Stability:   {:.1}/10", m.volume_stability);
    println!("     Volume:      {:.1} dB (variance {:.2})", m.avg_volume_db, m.volume_variance);
    println!("     Centroid:    {:.0} Hz", m.spectral_centroid_hz);
    println!("     ZCR:         {:.3}", m.zero_crossing_rate);
    println!(
        "     Confidence:  {}",
        style(format!("{:.1}/10", m.confidence_score)).bold()
    );
}

fn pace_label(wpm: f64) -> console::StyledObject<&'static str> {
    if wpm == 0.0 {
        style("")
    } else if wpm < scoring::PACE_SLOW_WPM {
        style("(slow)").yellow()
    } else if wpm > scoring::PACE_FAST_WPM {
        style("(fast)").yellow()
    } else {
        style("(ok)").green()
    }
}

fn filler_label(percentage: f64) -> console::StyledObject<&'static str> {
    if percentage > 5.0 {
        style("(high)").yellow()
    } else {
        style("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeatureExtractionError;
    use std::f32::consts::PI;

    fn tone(sample_rate: u32, duration_secs: f32) -> Waveform {
        let n = (sample_rate as f32 * duration_secs) as usize;
        let samples = (0..n)
            .map(|i| 0.3 * (2.0 * PI * 220.0 * i as f32 / sample_rate as f32).sin())
            .collect();
        Waveform::new(samples, sample_rate).unwrap()
    }

    fn analyzer() -> SpeechAnalyzer {
        SpeechAnalyzer::new(&AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn end_to_end_on_steady_tone() {
        // 13 words over 6 seconds = 130 wpm
        let m = analyzer()
            .analyze(
                &tone(16000, 6.0),
                "um so basically I think uh this is like really good you know",
            )
            .unwrap();

        assert_eq!(m.total_words, 13);
        assert!((m.words_per_minute - 130.0).abs() < 1e-6);
        assert!((m.filler_percentage - 46.15).abs() < 0.01);
        assert!(m.volume_stability > 9.9);
        // 10 - 46.15/5 - ~0 -> ~0.77 -> clamped to 1
        assert_eq!(m.confidence_score, 1.0);
    }

    #[test]
    fn silent_waveform_gets_neutral_stability() {
        let w = Waveform::new(vec![0.0; 4096], 16000).unwrap();
        let m = analyzer().analyze(&w, "").unwrap();
        assert_eq!(m.volume_stability, scoring::NEUTRAL_STABILITY);
        assert_eq!(m.total_words, 0);
        assert_eq!(m.filler_percentage, 0.0);
    }

    #[test]
    fn empty_transcript_is_not_an_error() {
        let m = analyzer().analyze(&tone(16000, 1.0), "").unwrap();
        assert_eq!(m.words_per_minute, 0.0);
        assert!(m.common_fillers.is_empty());
    }

    #[test]
    fn malformed_waveform_fails() {
        let w = Waveform::new(vec![f32::NAN; 4096], 16000).unwrap();
        let err = analyzer().analyze(&w, "hello").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::FeatureExtraction(FeatureExtractionError::NonFiniteSample { index: 0 })
        );
    }

    #[test]
    fn analyzer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SpeechAnalyzer>();
    }

    #[test]
    fn custom_frame_geometry_is_used() {
        let config = AnalysisConfig {
            frame_length: 1024,
            hop_length: 1024,
            welch_segment: 512,
        };
        let m = SpeechAnalyzer::new(&config)
            .unwrap()
            .analyze(&tone(16000, 1.0), "")
            .unwrap();
        // 16000 / 1024 = 15 full frames
        assert_eq!(m.rms_values.len(), 15);
    }
}
