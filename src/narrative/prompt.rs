use crate::analysis::SpeechMetrics;

/// How many of the most common fillers the prompt mentions.
const PROMPT_FILLERS: usize = 3;

/// The role and output contract. Identical for every request.
pub fn system_prompt() -> String {
    "You are a professional speech coach and linguist with expertise in communication \
     analysis. Provide detailed, constructive feedback on speech performance based on the \
     provided transcript and metrics. Respond with structured JSON output only, with no \
     prose before or after it."
        .to_string()
}

/// Transcript, measurements and the JSON shape we expect back.
pub fn user_prompt(transcript: &str, m: &SpeechMetrics) -> String {
    let mut out = String::new();

    out.push_str(
        "Please analyze the following speech performance data and provide comprehensive feedback.\n\n",
    );

    out.push_str("## Transcript\n\n");
    out.push_str(&format!("\"{}\"\n\n", transcript.trim()));

    let fillers = if m.common_fillers.is_empty() {
        "none".to_string()
    } else {
        m.common_fillers
            .iter()
            .take(PROMPT_FILLERS)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };

    out.push_str("## Speech metrics\n\n");
    out.push_str(&format!(
        "- Speaking pace: {:.1} words per minute\n",
        m.words_per_minute
    ));
    out.push_str(&format!("- Total words: {}\n", m.total_words));
    out.push_str(&format!("- Duration: {:.2} seconds\n", m.duration_secs));
    out.push_str(&format!(
        "- Filler words: {} ({:.1}%)\n",
        m.filler_count, m.filler_percentage
    ));
    out.push_str(&format!("- Common fillers: {fillers}\n"));
    out.push_str(&format!(
        "- Average word length: {:.1} characters\n",
        m.avg_word_length
    ));
    out.push_str(&format!("- Volume stability: {:.1}/10\n", m.volume_stability));
    out.push_str(&format!("- Average volume: {:.2} dB\n", m.avg_volume_db));
    out.push('\n');

    out.push_str("## Response format\n\n");
    out.push_str("Reply with a single JSON object of this shape:\n\n");
    out.push_str(RESPONSE_SCHEMA);
    out.push('\n');

    out.push_str(
        "\nFocus on language proficiency (grammar, vocabulary, fluency), communication \
         effectiveness, speaking pace and rhythm, use of filler words, overall clarity and \
         confidence. Make every recommendation specific and actionable.\n",
    );

    out
}

const RESPONSE_SCHEMA: &str = r#"{
  "overall_assessment": "Brief overall assessment of the speech performance",
  "language_proficiency": {
    "grammar_score": 1-10,
    "vocabulary_score": 1-10,
    "fluency_score": 1-10,
    "level": "Beginner | Intermediate | Advanced | Native",
    "explanation": "Brief explanation of the proficiency assessment"
  },
  "strengths": ["strength", "..."],
  "areas_for_improvement": ["area", "..."],
  "recommendations": [
    {"title": "Recommendation title", "description": "Detailed recommendation with actionable steps"}
  ]
}"#;
