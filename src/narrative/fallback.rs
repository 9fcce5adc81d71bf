use super::report::{AnalysisReport, LanguageProficiency, ProficiencyLevel, Recommendation};
use super::NarrativeStrategy;
use crate::analysis::SpeechMetrics;
use crate::error::NarrativeBackendError;

// Pace band considered a strength, in wpm.
const PACE_IDEAL_MIN: f64 = 140.0;
const PACE_IDEAL_MAX: f64 = 180.0;
const PACE_TOO_SLOW: f64 = 120.0;
const PACE_TOO_FAST: f64 = 200.0;

const FILLERS_LOW_PCT: f64 = 2.0;
const FILLERS_HIGH_PCT: f64 = 5.0;

const STABILITY_GOOD: f64 = 7.0;

const FALLBACK_EXPLANATION: &str = "Assessment based on speaking metrics analysis";

const ADVANCED_COMPOSITE: f64 = 8.0;
const INTERMEDIATE_COMPOSITE: f64 = 6.0;

/// Rule-based report built purely from the metrics.
///
/// Needs no network, has no state and never fails; the narrator falls back
/// to it whenever the external strategy is missing or errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicNarrator;

impl DeterministicNarrator {
    pub fn build(&self, m: &SpeechMetrics) -> AnalysisReport {
        let mut strengths = Vec::new();
        let mut improvements = Vec::new();
        let mut recommendations = Vec::new();

        let wpm = m.words_per_minute;
        if (PACE_IDEAL_MIN..=PACE_IDEAL_MAX).contains(&wpm) {
            strengths.push("Excellent speaking pace - clear and easy to follow".to_string());
        } else if wpm < PACE_TOO_SLOW {
            improvements.push("Speaking pace is quite slow - consider increasing tempo".to_string());
            recommendations.push(Recommendation::new(
                "Increase Speaking Pace",
                "Practice speaking at 140-160 words per minute for optimal clarity and engagement.",
            ));
        } else if wpm > PACE_TOO_FAST {
            improvements.push("Speaking pace is very fast - consider slowing down".to_string());
            recommendations.push(Recommendation::new(
                "Moderate Speaking Pace",
                "Slow down to 140-180 words per minute to ensure your audience can follow along easily.",
            ));
        }

        let fp = m.filler_percentage;
        if fp < FILLERS_LOW_PCT {
            strengths.push("Excellent control of filler words".to_string());
        } else if fp > FILLERS_HIGH_PCT {
            improvements.push("High usage of filler words detected".to_string());
            recommendations.push(Recommendation::new(
                "Reduce Filler Words",
                "Practice pausing instead of using filler words. Record yourself and identify patterns.",
            ));
        }

        let vs = m.volume_stability;
        if vs >= STABILITY_GOOD {
            strengths.push("Good volume control and consistency".to_string());
        } else {
            improvements.push("Volume inconsistency detected".to_string());
            recommendations.push(Recommendation::new(
                "Improve Volume Consistency",
                "Practice maintaining steady volume levels. Consider using a metronome for rhythm.",
            ));
        }

        let composite = composite_score(m);
        let level = if composite >= ADVANCED_COMPOSITE {
            ProficiencyLevel::Advanced
        } else if composite >= INTERMEDIATE_COMPOSITE {
            ProficiencyLevel::Intermediate
        } else {
            ProficiencyLevel::Beginner
        };

        let proficiency = LanguageProficiency::new(
            composite.trunc(),
            composite.trunc(),
            (10.0 - fp / 2.0).trunc(),
            level,
            FALLBACK_EXPLANATION,
        );

        let assessment = format!(
            "Analysis complete. Speaking pace: {wpm:.1} WPM, Filler percentage: {fp:.1}%, \
             Volume stability: {vs:.1}/10"
        );

        AnalysisReport::new(assessment, proficiency, strengths, improvements, recommendations)
    }
}

/// Average of filler control, loudness stability and pace, each on ~0-10.
fn composite_score(m: &SpeechMetrics) -> f64 {
    let filler_part = 10.0 - m.filler_percentage / 2.0;
    let pace_part = (m.words_per_minute / 15.0).min(10.0);
    (filler_part + m.volume_stability + pace_part) / 3.0
}

impl NarrativeStrategy for DeterministicNarrator {
    fn name(&self) -> &'static str {
        "built-in"
    }

    fn generate(
        &self,
        _transcript: &str,
        metrics: &SpeechMetrics,
    ) -> Result<AnalysisReport, NarrativeBackendError> {
        Ok(self.build(metrics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::report::{GENERIC_RECOMMENDATION_TITLE, GENERIC_STRENGTH};

    fn metrics(wpm: f64, filler_pct: f64, stability: f64) -> SpeechMetrics {
        SpeechMetrics {
            duration_secs: 60.0,
            total_words: wpm as usize,
            words_per_minute: wpm,
            confidence_score: 5.0,
            filler_count: 0,
            filler_percentage: filler_pct,
            common_fillers: Vec::new(),
            avg_word_length: 4.5,
            volume_stability: stability,
            avg_volume_db: -20.0,
            volume_variance: 2.0,
            spectral_centroid_hz: 1500.0,
            zero_crossing_rate: 0.05,
            rms_values: Vec::new(),
        }
    }

    fn titles(r: &AnalysisReport) -> Vec<&str> {
        r.recommendations.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn strong_speaker_gets_only_strengths() {
        let r = DeterministicNarrator.build(&metrics(160.0, 1.0, 9.0));
        assert_eq!(r.strengths.len(), 3);
        // Nothing to improve, so the generic entries fill in
        assert_eq!(r.areas_for_improvement.len(), 1);
        assert_eq!(titles(&r), vec![GENERIC_RECOMMENDATION_TITLE]);
        // (9.5 + 9 + 10) / 3 = 9.5
        let p = &r.language_proficiency;
        assert_eq!(p.level(), ProficiencyLevel::Advanced);
        assert_eq!(p.grammar_score(), 9);
        assert_eq!(p.vocabulary_score(), 9);
        assert_eq!(p.fluency_score(), 9);
    }

    #[test]
    fn struggling_speaker_gets_recommendations() {
        let r = DeterministicNarrator.build(&metrics(90.0, 12.0, 4.0));
        assert_eq!(
            titles(&r),
            vec!["Increase Speaking Pace", "Reduce Filler Words", "Improve Volume Consistency"]
        );
        assert_eq!(r.strengths, vec![GENERIC_STRENGTH]);
        // (4 + 4 + 6) / 3 = 4.67
        let p = &r.language_proficiency;
        assert_eq!(p.level(), ProficiencyLevel::Beginner);
        assert_eq!(p.grammar_score(), 4);
        assert_eq!(p.fluency_score(), 4);
    }

    #[test]
    fn fast_pace_is_flagged() {
        let r = DeterministicNarrator.build(&metrics(230.0, 3.0, 8.0));
        assert_eq!(titles(&r), vec!["Moderate Speaking Pace"]);
        assert!(r.areas_for_improvement[0].contains("very fast"));
    }

    #[test]
    fn pace_between_bands_is_neutral() {
        // 125 wpm: neither ideal nor too slow
        let r = DeterministicNarrator.build(&metrics(125.0, 3.0, 8.0));
        assert!(!r.strengths.iter().any(|s| s.contains("pace")));
        assert!(!r.areas_for_improvement.iter().any(|s| s.contains("pace")));
    }

    #[test]
    fn intermediate_band() {
        // (10 - 1.5 + 6 + 8.67) / 3 = 7.72
        let r = DeterministicNarrator.build(&metrics(130.0, 3.0, 6.0));
        assert_eq!(r.language_proficiency.level(), ProficiencyLevel::Intermediate);
        assert_eq!(r.language_proficiency.grammar_score(), 7);
    }

    #[test]
    fn extreme_fillers_clamp_scores() {
        let r = DeterministicNarrator.build(&metrics(0.0, 100.0, 1.0));
        let p = &r.language_proficiency;
        assert_eq!(p.fluency_score(), 1);
        assert_eq!(p.grammar_score(), 1);
        assert_eq!(p.level(), ProficiencyLevel::Beginner);
    }

    #[test]
    fn assessment_summarises_metrics() {
        let r = DeterministicNarrator.build(&metrics(150.0, 2.5, 7.3));
        assert_eq!(
            r.overall_assessment,
            "Analysis complete. Speaking pace: 150.0 WPM, Filler percentage: 2.5%, Volume stability: 7.3/10"
        );
    }

    #[test]
    fn lists_are_never_empty() {
        for &(wpm, fp, vs) in &[(0.0, 0.0, 5.0), (160.0, 0.0, 10.0), (300.0, 50.0, 1.0)] {
            let r = DeterministicNarrator.build(&metrics(wpm, fp, vs));
            assert!(!r.strengths.is_empty());
            assert!(!r.areas_for_improvement.is_empty());
            assert!(!r.recommendations.is_empty());
        }
    }

    #[test]
    fn explanation_is_fixed_text() {
        let r = DeterministicNarrator.build(&metrics(160.0, 1.0, 9.0));
        assert_eq!(
            r.language_proficiency.explanation(),
            "Assessment based on speaking metrics analysis"
        );
    }

    #[test]
    fn strategy_never_fails() {
        assert!(DeterministicNarrator.generate("", &metrics(0.0, 0.0, 5.0)).is_ok());
    }
}
