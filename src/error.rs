use thiserror::Error;

/// The waveform could not be turned into acoustic features.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeatureExtractionError {
    #[error("waveform contains no samples")]
    EmptyWaveform,

    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    /// NaN or infinite amplitude somewhere in the buffer.
    #[error("non-finite sample at index {index}")]
    NonFiniteSample { index: usize },

    #[error("failed to decode audio: {0}")]
    Decode(String),
}

/// Text analysis is total over arbitrary strings. The only failure is a
/// filler pattern that does not compile, which the built-in lexicon never
/// produces.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TextAnalysisError {
    #[error("invalid filler pattern: {0}")]
    Pattern(String),
}

/// A failed analysis request, as surfaced to the caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("could not extract features from this audio: {0}")]
    FeatureExtraction(#[from] FeatureExtractionError),

    #[error("could not analyze this transcript: {0}")]
    TextAnalysis(#[from] TextAnalysisError),
}

/// Anything that went wrong talking to the external text-generation service.
///
/// These never reach the user: the narrator swaps in the built-in report.
#[derive(Debug, Error)]
pub enum NarrativeBackendError {
    #[error("{0} not set")]
    MissingApiKey(&'static str),

    #[error("failed to create async runtime: {0}")]
    Runtime(String),

    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("request timed out")]
    Timeout,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("backend returned an empty response")]
    EmptyResponse,

    #[error("failed to parse backend response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for NarrativeBackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            NarrativeBackendError::Timeout
        } else {
            NarrativeBackendError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for NarrativeBackendError {
    fn from(e: serde_json::Error) -> Self {
        NarrativeBackendError::Parse(e.to_string())
    }
}
