use std::fmt;

use anyhow::Result;

use crate::error::NarrativeBackendError;

/// Hosted text-generation services the narrator can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAI,
}

/// Model tier: speed versus depth of the written feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Haiku / GPT-5.2
    Fast,
    /// Sonnet / GPT-5.2
    Default,
    /// Opus / GPT-5.2-pro
    Think,
}

impl Provider {
    /// Parse from a CLI or config string like "claude" or "gpt".
    pub fn from_str_loose(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "claude" | "anthropic" => Ok(Provider::Anthropic),
            "gpt" | "openai" => Ok(Provider::OpenAI),
            _ => anyhow::bail!("Unknown provider: {s}. Use 'claude' or 'gpt'."),
        }
    }

    /// The environment variable holding this provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::OpenAI => "OPENAI_API_KEY",
        }
    }

    /// Read the API key from the environment. Empty counts as unset.
    pub fn api_key(&self) -> Result<String, NarrativeBackendError> {
        let var = self.api_key_env();
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(NarrativeBackendError::MissingApiKey(var)),
        }
    }

    pub fn model_for_tier(&self, tier: ModelTier) -> &'static str {
        match (self, tier) {
            (Provider::Anthropic, ModelTier::Fast)    => "claude-haiku-4-5-20251001",
            (Provider::Anthropic, ModelTier::Default) => "claude-sonnet-4-5-20250929",
            (Provider::Anthropic, ModelTier::Think)   => "claude-opus-4-6",

            (Provider::OpenAI, ModelTier::Fast)       => "gpt-5.2",
            (Provider::OpenAI, ModelTier::Default)    => "gpt-5.2",
            (Provider::OpenAI, ModelTier::Think)      => "gpt-5.2-pro",
        }
    }
}

impl ModelTier {
    /// Resolve from CLI flags. `--fast` wins over `--think`.
    pub fn from_flags(fast: bool, think: bool) -> Option<Self> {
        match (fast, think) {
            (true, _) => Some(ModelTier::Fast),
            (_, true) => Some(ModelTier::Think),
            _ => None,
        }
    }

    /// Parse the `tier` config value.
    pub fn from_str_loose(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fast" => Ok(ModelTier::Fast),
            "default" | "" => Ok(ModelTier::Default),
            "think" => Ok(ModelTier::Think),
            _ => anyhow::bail!("Unknown model tier: {s}. Use 'fast', 'default' or 'think'."),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Anthropic => write!(f, "Claude"),
            Provider::OpenAI => write!(f, "GPT"),
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelTier::Fast => write!(f, "fast"),
            ModelTier::Default => write!(f, "default"),
            ModelTier::Think => write!(f, "think"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_provider_aliases() {
        assert_eq!(Provider::from_str_loose("claude").unwrap(), Provider::Anthropic);
        assert_eq!(Provider::from_str_loose("Anthropic").unwrap(), Provider::Anthropic);
        assert_eq!(Provider::from_str_loose("gpt").unwrap(), Provider::OpenAI);
        assert_eq!(Provider::from_str_loose(" openai ").unwrap(), Provider::OpenAI);
    }

    #[test]
    fn parse_unknown_provider() {
        assert!(Provider::from_str_loose("gemini").is_err());
    }

    #[test]
    fn tier_models() {
        let a = Provider::Anthropic;
        assert!(a.model_for_tier(ModelTier::Fast).contains("haiku"));
        assert!(a.model_for_tier(ModelTier::Default).contains("sonnet"));
        assert!(a.model_for_tier(ModelTier::Think).contains("opus"));

        let o = Provider::OpenAI;
        assert!(o.model_for_tier(ModelTier::Default).starts_with("gpt"));
        assert!(o.model_for_tier(ModelTier::Think).contains("pro"));
    }

    #[test]
    fn tier_from_flags() {
        assert_eq!(ModelTier::from_flags(false, false), None);
        assert_eq!(ModelTier::from_flags(true, false), Some(ModelTier::Fast));
        assert_eq!(ModelTier::from_flags(false, true), Some(ModelTier::Think));
        assert_eq!(ModelTier::from_flags(true, true), Some(ModelTier::Fast));
    }

    #[test]
    fn tier_from_config_string() {
        assert_eq!(ModelTier::from_str_loose("Think").unwrap(), ModelTier::Think);
        assert_eq!(ModelTier::from_str_loose("default").unwrap(), ModelTier::Default);
        assert!(ModelTier::from_str_loose("turbo").is_err());
    }

    #[test]
    fn api_key_env_names() {
        assert_eq!(Provider::Anthropic.api_key_env(), "ANTHROPIC_API_KEY");
        assert_eq!(Provider::OpenAI.api_key_env(), "OPENAI_API_KEY");
    }
}
