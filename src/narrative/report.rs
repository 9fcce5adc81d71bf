use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NarrativeBackendError;

pub const MIN_SUB_SCORE: u8 = 1;
pub const MAX_SUB_SCORE: u8 = 10;
/// Sub-score assumed when the backend leaves one out.
pub const DEFAULT_SUB_SCORE: f64 = 7.0;

pub const DEFAULT_ASSESSMENT: &str = "Speech analysis completed.";
pub const DEFAULT_EXPLANATION: &str = "Assessment based on speech analysis.";
pub const GENERIC_STRENGTH: &str = "Speech analysis completed successfully";
pub const GENERIC_IMPROVEMENT: &str = "Continue practicing for improvement";
pub const GENERIC_RECOMMENDATION_TITLE: &str = "General Practice";
pub const GENERIC_RECOMMENDATION_DESCRIPTION: &str =
    "Continue practicing speaking to improve overall fluency and confidence.";

/// Coarse proficiency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Native,
}

impl ProficiencyLevel {
    /// Case-insensitive parse; anything unrecognised is None.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            "native" => Some(Self::Native),
            _ => None,
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProficiencyLevel::Beginner => write!(f, "Beginner"),
            ProficiencyLevel::Intermediate => write!(f, "Intermediate"),
            ProficiencyLevel::Advanced => write!(f, "Advanced"),
            ProficiencyLevel::Native => write!(f, "Native"),
        }
    }
}

/// Grammar, vocabulary and fluency scores plus a level.
///
/// Fields are private: `new` is the only way in, and it clamps every score
/// into 1..=10 whatever produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageProficiency {
    grammar_score: u8,
    vocabulary_score: u8,
    fluency_score: u8,
    level: ProficiencyLevel,
    explanation: String,
}

impl LanguageProficiency {
    pub fn new(
        grammar: f64,
        vocabulary: f64,
        fluency: f64,
        level: ProficiencyLevel,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            grammar_score: clamp_score(grammar),
            vocabulary_score: clamp_score(vocabulary),
            fluency_score: clamp_score(fluency),
            level,
            explanation: explanation.into(),
        }
    }

    pub fn grammar_score(&self) -> u8 {
        self.grammar_score
    }

    pub fn vocabulary_score(&self) -> u8 {
        self.vocabulary_score
    }

    pub fn fluency_score(&self) -> u8 {
        self.fluency_score
    }

    pub fn level(&self) -> ProficiencyLevel {
        self.level
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// Round to the nearest integer and clamp into the sub-score range.
/// NaN lands on the minimum.
pub fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return MIN_SUB_SCORE;
    }
    value
        .round()
        .clamp(MIN_SUB_SCORE as f64, MAX_SUB_SCORE as f64) as u8
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
}

impl Recommendation {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn generic() -> Self {
        Self::new(GENERIC_RECOMMENDATION_TITLE, GENERIC_RECOMMENDATION_DESCRIPTION)
    }
}

/// The qualitative half of a coaching report.
///
/// Whichever strategy built it, the three lists are never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub overall_assessment: String,
    pub language_proficiency: LanguageProficiency,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisReport {
    /// Assemble a report, substituting one generic entry for any empty list.
    pub fn new(
        overall_assessment: impl Into<String>,
        language_proficiency: LanguageProficiency,
        strengths: Vec<String>,
        areas_for_improvement: Vec<String>,
        recommendations: Vec<Recommendation>,
    ) -> Self {
        Self {
            overall_assessment: overall_assessment.into(),
            language_proficiency,
            strengths: or_generic(strengths, GENERIC_STRENGTH),
            areas_for_improvement: or_generic(areas_for_improvement, GENERIC_IMPROVEMENT),
            recommendations: if recommendations.is_empty() {
                vec![Recommendation::generic()]
            } else {
                recommendations
            },
        }
    }
}

fn or_generic(items: Vec<String>, generic: &str) -> Vec<String> {
    if items.is_empty() {
        vec![generic.to_string()]
    } else {
        items
    }
}

// --- Backend response parsing ---
// Every field is optional so a partial answer still yields a report;
// a field of the wrong JSON type fails the whole parse.

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawReport {
    overall_assessment: Option<String>,
    language_proficiency: Option<RawProficiency>,
    strengths: Option<Vec<String>>,
    areas_for_improvement: Option<Vec<String>>,
    recommendations: Option<Vec<RawRecommendation>>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawProficiency {
    grammar_score: Option<f64>,
    vocabulary_score: Option<f64>,
    fluency_score: Option<f64>,
    level: Option<String>,
    explanation: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawRecommendation {
    title: Option<String>,
    description: Option<String>,
}

/// Turn a backend's text answer into a validated report.
///
/// Accepts bare JSON or JSON inside a markdown code fence. Missing fields
/// get defaults, scores are clamped, blank list entries are dropped.
/// Non-JSON text, a non-object payload or a mistyped field is an error.
pub fn parse_report(text: &str) -> Result<AnalysisReport, NarrativeBackendError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(NarrativeBackendError::EmptyResponse);
    }

    let raw: RawReport = serde_json::from_str(body)?;
    let prof = raw.language_proficiency.unwrap_or_default();

    let level = prof
        .level
        .as_deref()
        .and_then(ProficiencyLevel::from_str_loose)
        .unwrap_or(ProficiencyLevel::Intermediate);

    let proficiency = LanguageProficiency::new(
        prof.grammar_score.unwrap_or(DEFAULT_SUB_SCORE),
        prof.vocabulary_score.unwrap_or(DEFAULT_SUB_SCORE),
        prof.fluency_score.unwrap_or(DEFAULT_SUB_SCORE),
        level,
        non_blank(prof.explanation).unwrap_or_else(|| DEFAULT_EXPLANATION.into()),
    );

    let recommendations = raw
        .recommendations
        .unwrap_or_default()
        .into_iter()
        .filter_map(|r| {
            let title = non_blank(r.title);
            let description = non_blank(r.description);
            if title.is_none() && description.is_none() {
                return None;
            }
            Some(Recommendation::new(
                title.unwrap_or_else(|| "Recommendation".into()),
                description.unwrap_or_default(),
            ))
        })
        .collect();

    Ok(AnalysisReport::new(
        non_blank(raw.overall_assessment).unwrap_or_else(|| DEFAULT_ASSESSMENT.into()),
        proficiency,
        clean_list(raw.strengths),
        clean_list(raw.areas_for_improvement),
        recommendations,
    ))
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn clean_list(items: Option<Vec<String>>) -> Vec<String> {
    items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|s| non_blank(Some(s)))
        .collect()
}

/// Remove a surrounding ```json ... ``` fence if present.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
