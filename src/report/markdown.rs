use crate::analysis::scoring::{PACE_FAST_WPM, PACE_SLOW_WPM};
use crate::analysis::SpeechMetrics;
use crate::narrative::AnalysisReport;

/// Render one analysis as a markdown document.
///
/// `source` names the recording and `narrator` the strategy that wrote the
/// feedback. Returns the markdown; the caller decides where to save it.
pub fn generate_report(
    source: &str,
    metrics: &SpeechMetrics,
    report: &AnalysisReport,
    narrator: &str,
) -> String {
    let mut md = String::new();

    md.push_str("# Speech Coaching Report\n\n");
    md.push_str(&format!("Recording: `{source}`  \n"));
    md.push_str(&format!(
        "Generated: {}  \n",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    ));
    md.push_str(&format!("Feedback: {narrator}\n\n"));

    md.push_str("---\n\n");

    md.push_str("## Overall\n\n");
    md.push_str(&format!("{}\n\n", report.overall_assessment));
    md.push_str(&format!(
        "**Confidence score: {:.1}/10**\n\n",
        metrics.confidence_score
    ));

    md.push_str("## Delivery Metrics\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Duration | {:.1} s |\n", metrics.duration_secs));
    md.push_str(&format!("| Words | {} |\n", metrics.total_words));
    md.push_str(&format!(
        "| Pace | {:.1} WPM{} |\n",
        metrics.words_per_minute,
        pace_flag(metrics.words_per_minute)
    ));
    md.push_str(&format!(
        "| Filler words | {} ({:.1}%) |\n",
        metrics.filler_count, metrics.filler_percentage
    ));
    let common = if metrics.common_fillers.is_empty() {
        "—".to_string()
    } else {
        metrics.common_fillers.join(", ")
    };
    md.push_str(&format!("| Most common fillers | {common} |\n"));
    md.push_str(&format!(
        "| Average word length | {:.1} chars |\n",
        metrics.avg_word_length
    ));
    md.push_str(&format!(
        "| Volume stability | {:.1}/10 |\n",
        metrics.volume_stability
    ));
    md.push_str(&format!(
        "| Average volume | {:.1} dB |\n",
        metrics.avg_volume_db
    ));
    md.push_str(&format!(
        "| Spectral centroid | {:.0} Hz |\n",
        metrics.spectral_centroid_hz
    ));
    md.push_str(&format!(
        "| Zero-crossing rate | {:.3} |\n",
        metrics.zero_crossing_rate
    ));
    md.push('\n');

    let p = &report.language_proficiency;
    md.push_str("## Language Proficiency\n\n");
    md.push_str(&format!("Level: **{}**\n\n", p.level()));
    md.push_str("| Grammar | Vocabulary | Fluency |\n");
    md.push_str("|---------|------------|---------|\n");
    md.push_str(&format!(
        "| {}/10 | {}/10 | {}/10 |\n\n",
        p.grammar_score(),
        p.vocabulary_score(),
        p.fluency_score()
    ));
    md.push_str(&format!("{}\n\n", p.explanation()));

    md.push_str("## Strengths\n\n");
    for s in &report.strengths {
        md.push_str(&format!("- {s}\n"));
    }
    md.push('\n');

    md.push_str("## Areas for Improvement\n\n");
    for a in &report.areas_for_improvement {
        md.push_str(&format!("- {a}\n"));
    }
    md.push('\n');

    md.push_str("## Recommendations\n\n");
    for (i, r) in report.recommendations.iter().enumerate() {
        md.push_str(&format!("{}. **{}**", i + 1, r.title));
        if !r.description.is_empty() {
            md.push_str(&format!(": {}", r.description));
        }
        md.push('\n');
    }

    md
}

fn pace_flag(wpm: f64) -> &'static str {
    if wpm > 0.0 && wpm < PACE_SLOW_WPM {
        " (slow)"
    } else if wpm > PACE_FAST_WPM {
        " (fast)"
    } else {
        ""
    }
}
