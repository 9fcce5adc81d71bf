use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::TextAnalysisError;

/// How many distinct fillers `common_fillers` reports.
const TOP_FILLERS: usize = 5;

/// Immutable filler-expression tables.
///
/// Single-word entries are matched against word tokens; multi-word entries
/// are matched as whole phrases in the lower-cased transcript. The built-in
/// English lists are disjoint, so a phrase hit never also counts as a word
/// hit. A custom lexicon whose phrases contain its own single words counts
/// both, and its filler percentage can then exceed 100.
#[derive(Debug, Clone, Copy)]
pub struct FillerLexicon {
    pub single_word: &'static [&'static str],
    pub multi_word: &'static [&'static str],
}

const ENGLISH_SINGLE: &[&str] = &[
    "um", "uh", "er", "ah", "like", "actually", "basically", "literally", "so", "well", "okay",
    "right", "obviously", "clearly", "honestly",
];

const ENGLISH_MULTI: &[&str] = &["you know", "i mean", "sort of", "kind of", "you see"];

impl FillerLexicon {
    pub const fn english() -> Self {
        Self {
            single_word: ENGLISH_SINGLE,
            multi_word: ENGLISH_MULTI,
        }
    }
}

impl Default for FillerLexicon {
    fn default() -> Self {
        Self::english()
    }
}

/// Word-level statistics for one transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexicalFeatures {
    pub word_count: usize,
    pub filler_count: usize,
    /// 100 · filler_count / word_count, or 0 with no words
    pub filler_percentage: f64,
    /// Up to five most frequent fillers, most frequent first
    pub common_fillers: Vec<String>,
    /// Mean token length in characters
    pub avg_word_length: f64,
}

/// Tokenizes transcripts and counts filler usage.
///
/// Patterns are compiled once here; `analyze` itself cannot fail.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    lexicon: FillerLexicon,
    word_pattern: Regex,
    phrase_patterns: Vec<(&'static str, Regex)>,
}

impl TextAnalyzer {
    pub fn new(lexicon: FillerLexicon) -> Result<Self, TextAnalysisError> {
        let word_pattern = compile(r"\b\w+\b")?;

        let phrase_patterns = lexicon
            .multi_word
            .iter()
            .map(|&phrase| {
                let pattern = format!(r"\b{}\b", regex::escape(phrase));
                compile(&pattern).map(|re| (phrase, re))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            lexicon,
            word_pattern,
            phrase_patterns,
        })
    }

    /// Compute lexical features for a transcript.
    ///
    /// An empty or whitespace-only transcript gives all-zero features.
    pub fn analyze(&self, transcript: &str) -> LexicalFeatures {
        if transcript.trim().is_empty() {
            return LexicalFeatures::default();
        }

        let lowered = transcript.to_lowercase();
        let words: Vec<&str> = self
            .word_pattern
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        // Discovery order: word hits in token order, then phrase hits in
        // lexicon order. Ties in the ranking keep this order.
        let mut tally = FillerTally::default();

        for word in &words {
            if self.lexicon.single_word.iter().any(|&f| f == *word) {
                tally.add(word, 1);
            }
        }

        for (phrase, pattern) in &self.phrase_patterns {
            let hits = pattern.find_iter(&lowered).count();
            tally.add(phrase, hits);
        }

        let word_count = words.len();
        let filler_count = tally.total();

        let filler_percentage = if word_count > 0 {
            filler_count as f64 / word_count as f64 * 100.0
        } else {
            0.0
        };

        let avg_word_length = if word_count > 0 {
            let chars: usize = words.iter().map(|w| w.chars().count()).sum();
            chars as f64 / word_count as f64
        } else {
            0.0
        };

        LexicalFeatures {
            word_count,
            filler_count,
            filler_percentage,
            common_fillers: tally.most_common(TOP_FILLERS),
            avg_word_length,
        }
    }
}

fn compile(pattern: &str) -> Result<Regex, TextAnalysisError> {
    Regex::new(pattern).map_err(|e| TextAnalysisError::Pattern(e.to_string()))
}

/// Occurrence counts in first-seen order.
#[derive(Default)]
struct FillerTally {
    counts: Vec<(String, usize)>,
}

impl FillerTally {
    fn add(&mut self, filler: &str, hits: usize) {
        if hits == 0 {
            return;
        }
        match self.counts.iter_mut().find(|(f, _)| f.as_str() == filler) {
            Some((_, count)) => *count += hits,
            None => self.counts.push((filler.to_string(), hits)),
        }
    }

    fn total(&self) -> usize {
        self.counts.iter().map(|(_, c)| c).sum()
    }

    /// Stable sort keeps first-seen order among equal counts.
    fn most_common(mut self, n: usize) -> Vec<String> {
        self.counts.sort_by(|a, b| b.1.cmp(&a.1));
        self.counts.into_iter().take(n).map(|(f, _)| f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> TextAnalyzer {
        TextAnalyzer::new(FillerLexicon::english()).unwrap()
    }

    #[test]
    fn reference_sentence() {
        let f = analyzer().analyze("um so basically I think uh this is like really good you know");
        assert_eq!(f.word_count, 13);
        // um, so, basically, uh, like + "you know"
        assert_eq!(f.filler_count, 6);
        assert!((f.filler_percentage - 46.1538).abs() < 0.01, "{}", f.filler_percentage);
        assert_eq!(
            f.common_fillers,
            vec!["um", "so", "basically", "uh", "like"]
        );
    }

    #[test]
    fn empty_transcript_is_all_zero() {
        let f = analyzer().analyze("");
        assert_eq!(f, LexicalFeatures::default());
        assert_eq!(f.filler_percentage, 0.0);
    }

    #[test]
    fn whitespace_transcript_is_all_zero() {
        assert_eq!(analyzer().analyze("   \n\t  "), LexicalFeatures::default());
    }

    #[test]
    fn punctuation_only_has_no_words() {
        let f = analyzer().analyze("... !!! ???");
        assert_eq!(f.word_count, 0);
        assert_eq!(f.filler_percentage, 0.0);
        assert_eq!(f.avg_word_length, 0.0);
    }

    #[test]
    fn case_and_punctuation_are_ignored() {
        let f = analyzer().analyze("Um, WELL... okay!");
        assert_eq!(f.word_count, 3);
        assert_eq!(f.filler_count, 3);
        assert!((f.filler_percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn ranking_by_count_then_discovery() {
        let f = analyzer().analyze("like um like so um like you know you know you know you know");
        // like=3, um=2, so=1, "you know"=4
        assert_eq!(f.common_fillers, vec!["you know", "like", "um", "so"]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let f = analyzer().analyze("well uh okay um right");
        assert_eq!(f.common_fillers, vec!["well", "uh", "okay", "um", "right"]);
    }

    #[test]
    fn at_most_five_common_fillers() {
        let f = analyzer().analyze("um uh er ah like actually basically");
        assert_eq!(f.filler_count, 7);
        assert_eq!(f.common_fillers.len(), 5);
    }

    #[test]
    fn phrases_need_word_boundaries() {
        // "kind of" inside "mankind offers" must not match
        let f = analyzer().analyze("mankind offers sort of hope");
        assert_eq!(f.filler_count, 1);
        assert_eq!(f.common_fillers, vec!["sort of"]);
    }

    #[test]
    fn phrase_split_by_punctuation_does_not_match() {
        let f = analyzer().analyze("you, know");
        assert_eq!(f.filler_count, 0);
    }

    #[test]
    fn average_word_length_counts_characters() {
        let f = analyzer().analyze("café ab");
        assert_eq!(f.word_count, 2);
        assert!((f.avg_word_length - 3.0).abs() < 1e-9);
    }

    #[test]
    fn custom_lexicon_is_respected() {
        const SINGLE: &[&str] = &["hmm"];
        const MULTI: &[&str] = &["and stuff"];
        let lexicon = FillerLexicon {
            single_word: SINGLE,
            multi_word: MULTI,
        };
        let f = TextAnalyzer::new(lexicon).unwrap().analyze("hmm cats and stuff um");
        assert_eq!(f.filler_count, 2);
        assert_eq!(f.common_fillers, vec!["hmm", "and stuff"]);
    }

    #[test]
    fn overlapping_custom_lexicon_counts_both() {
        const SINGLE: &[&str] = &["you", "know"];
        const MULTI: &[&str] = &["you know"];
        let lexicon = FillerLexicon {
            single_word: SINGLE,
            multi_word: MULTI,
        };
        let f = TextAnalyzer::new(lexicon).unwrap().analyze("you know");
        assert_eq!(f.word_count, 2);
        assert_eq!(f.filler_count, 3);
        assert!((f.filler_percentage - 150.0).abs() < 1e-9);
    }

    #[test]
    fn percentage_stays_in_range() {
        // Phrase hits add to the count without adding tokens, but each
        // phrase spans two tokens so the ratio can't exceed 100%.
        let f = analyzer().analyze("you know you know you know");
        assert_eq!(f.word_count, 6);
        assert_eq!(f.filler_count, 3);
        assert!(f.filler_percentage <= 100.0);
    }
}
