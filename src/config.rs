use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::acoustic::AcousticConfig;
use crate::dsp::framing::{FrameConfig, FRAME_LENGTH, HOP_LENGTH};
use crate::dsp::spectrum::WELCH_SEGMENT;
use crate::paths;

/// Application configuration, loaded from config.toml.
///
/// serde's `default` attribute means: if a field is missing from the TOML file,
/// use the value from the Default implementation instead of failing to parse.
/// This makes the config file optional: every field has a sensible default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub narrative: NarrativeConfig,
}

/// Frame geometry for the acoustic pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Samples per RMS / zero-crossing frame
    pub frame_length: usize,
    /// Stride between frame starts
    pub hop_length: usize,
    /// Welch segment length for the spectral centroid
    pub welch_segment: usize,
}

/// External language-model backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeConfig {
    /// When false, only the built-in report is produced.
    pub enabled: bool,
    /// "claude" or "gpt"
    pub provider: String,
    /// "fast", "default" or "think"
    pub tier: String,
    /// Explicit model ID; overrides `tier`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Endpoint override, e.g. an API gateway; the provider's URL if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_tokens: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            frame_length: FRAME_LENGTH,
            hop_length: HOP_LENGTH,
            welch_segment: WELCH_SEGMENT,
        }
    }
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: "gpt".into(),
            tier: "default".into(),
            model: None,
            base_url: None,
            timeout_secs: 60,
            max_tokens: 2000,
        }
    }
}

/// Bridge between the user-facing config format and the extractor's
/// parameters.
impl From<&AnalysisConfig> for AcousticConfig {
    fn from(cfg: &AnalysisConfig) -> Self {
        AcousticConfig {
            frames: FrameConfig {
                frame_length: cfg.frame_length,
                hop_length: cfg.hop_length,
            },
            welch_segment: cfg.welch_segment,
        }
    }
}

/// Load the application config from $XDG_CONFIG_HOME/speechcoach/config.toml.
/// If the file doesn't exist, returns defaults.
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&paths::config_file())
}

/// Load config from an explicit path, falling back to defaults when absent.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
