use std::time::Duration;

use anyhow::Result;

use super::provider::{ModelTier, Provider};
use super::report::{parse_report, AnalysisReport};
use super::{anthropic, openai, prompt, NarrativeStrategy};
use crate::analysis::SpeechMetrics;
use crate::config::NarrativeConfig;
use crate::error::NarrativeBackendError;

/// Coaching feedback written by a hosted language model.
pub struct LlmNarrator {
    provider: Provider,
    model: String,
    api_key: String,
    /// Endpoint URL; the provider's public API unless overridden.
    base_url: String,
    timeout: Duration,
    max_tokens: u32,
}

impl LlmNarrator {
    pub fn new(provider: Provider, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        let defaults = NarrativeConfig::default();
        let base_url = match provider {
            Provider::Anthropic => anthropic::API_URL,
            Provider::OpenAI => openai::API_URL,
        };
        Self {
            provider,
            model: model.into(),
            api_key: api_key.into(),
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(defaults.timeout_secs),
            max_tokens: defaults.max_tokens,
        }
    }

    /// Resolve provider, model and API key from configuration.
    ///
    /// An explicit `model` wins over `tier`. Fails on an unknown provider or
    /// tier name, or when the provider's API key is not exported.
    pub fn from_config(config: &NarrativeConfig) -> Result<Self> {
        let provider = Provider::from_str_loose(&config.provider)?;
        let model = resolve_model(provider, config)?;
        let api_key = provider.api_key()?;

        let mut llm = Self::new(provider, model, api_key)
            .with_timeout(Duration::from_secs(config.timeout_secs))
            .with_max_tokens(config.max_tokens);
        if let Some(url) = config.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            llm = llm.with_base_url(url.trim());
        }
        Ok(llm)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send requests somewhere other than the provider's public endpoint,
    /// such as a proxy or gateway.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one system + user exchange and return the raw reply text.
    ///
    /// Blocks the calling thread on a private current-thread runtime, so this
    /// must not be called from inside another tokio runtime.
    fn complete(&self, system: &str, user: &str) -> Result<String, NarrativeBackendError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| NarrativeBackendError::Runtime(e.to_string()))?;

        let client = reqwest::Client::builder().timeout(self.timeout).build()?;

        rt.block_on(async {
            match self.provider {
                Provider::Anthropic => {
                    anthropic::complete_async(
                        &client,
                        &self.base_url,
                        &self.api_key,
                        &self.model,
                        system,
                        user,
                        self.max_tokens,
                    )
                    .await
                }
                Provider::OpenAI => {
                    openai::complete_async(
                        &client,
                        &self.base_url,
                        &self.api_key,
                        &self.model,
                        system,
                        user,
                        self.max_tokens,
                    )
                    .await
                }
            }
        })
    }
}

fn resolve_model(provider: Provider, config: &NarrativeConfig) -> Result<String> {
    match &config.model {
        Some(model) if !model.trim().is_empty() => Ok(model.trim().to_string()),
        _ => {
            let tier = ModelTier::from_str_loose(&config.tier)?;
            Ok(provider.model_for_tier(tier).to_string())
        }
    }
}

impl NarrativeStrategy for LlmNarrator {
    fn name(&self) -> &'static str {
        match self.provider {
            Provider::Anthropic => "Claude",
            Provider::OpenAI => "GPT",
        }
    }

    fn generate(
        &self,
        transcript: &str,
        metrics: &SpeechMetrics,
    ) -> Result<AnalysisReport, NarrativeBackendError> {
        let system = prompt::system_prompt();
        let user = prompt::user_prompt(transcript, metrics);

        log::info!("requesting feedback from {} ({})", self.provider(), self.model());
        let text = self.complete(&system, &user)?;
        log::debug!("backend replied with {} bytes", text.len());

        parse_report(&text)
    }
}

// Keep the key out of debug output.
impl std::fmt::Debug for LlmNarrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmNarrator")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}
