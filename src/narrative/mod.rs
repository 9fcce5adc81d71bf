mod anthropic;
pub mod fallback;
pub mod llm;
mod openai;
pub mod prompt;
pub mod provider;
pub mod report;

use crate::analysis::SpeechMetrics;
use crate::config::NarrativeConfig;
use crate::error::NarrativeBackendError;

pub use fallback::DeterministicNarrator;
pub use llm::LlmNarrator;
pub use report::AnalysisReport;

/// One way of turning metrics (and the transcript) into coaching feedback.
pub trait NarrativeStrategy: Send + Sync {
    /// Short label for logs and the terminal report.
    fn name(&self) -> &'static str;

    fn generate(
        &self,
        transcript: &str,
        metrics: &SpeechMetrics,
    ) -> Result<AnalysisReport, NarrativeBackendError>;
}

/// Picks a strategy once, then always produces a report.
///
/// With a primary strategy configured, any error from it is logged and the
/// deterministic report is returned instead. Without one, only the
/// deterministic report is ever built.
pub struct Narrator {
    primary: Option<Box<dyn NarrativeStrategy>>,
    fallback: DeterministicNarrator,
}

impl Narrator {
    /// Deterministic feedback only; never touches the network.
    pub fn offline() -> Self {
        Self {
            primary: None,
            fallback: DeterministicNarrator,
        }
    }

    pub fn with_strategy(primary: Box<dyn NarrativeStrategy>) -> Self {
        Self {
            primary: Some(primary),
            fallback: DeterministicNarrator,
        }
    }

    /// Build from configuration.
    ///
    /// Disabled narrative, a bad provider/tier name or a missing API key all
    /// give an offline narrator; the reason is logged.
    pub fn from_config(config: &NarrativeConfig) -> Self {
        if !config.enabled {
            log::info!("narrative backend disabled; using built-in feedback");
            return Self::offline();
        }

        match LlmNarrator::from_config(config) {
            Ok(llm) => Self::with_strategy(Box::new(llm)),
            Err(e) => {
                log::info!("narrative backend unavailable ({e:#}); using built-in feedback");
                Self::offline()
            }
        }
    }

    /// Name of the strategy tried first.
    pub fn source(&self) -> &'static str {
        match &self.primary {
            Some(primary) => primary.name(),
            None => self.fallback.name(),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.primary.is_none()
    }

    /// Produce a report. Total: backend failures never reach the caller.
    pub fn report(&self, transcript: &str, metrics: &SpeechMetrics) -> AnalysisReport {
        let Some(primary) = &self.primary else {
            return self.fallback.build(metrics);
        };

        match primary.generate(transcript, metrics) {
            Ok(report) => {
                log::info!("feedback written by {}", primary.name());
                report
            }
            Err(e) => {
                log::warn!(
                    "{} feedback failed ({e}); falling back to built-in feedback",
                    primary.name()
                );
                self.fallback.build(metrics)
            }
        }
    }
}
