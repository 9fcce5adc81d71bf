pub mod acoustic;
pub mod analyzer;
pub mod lexical;
pub mod scoring;

pub use analyzer::SpeechAnalyzer;
pub use scoring::SpeechMetrics;
