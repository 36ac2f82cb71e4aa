//! Configuration for progress reporting, the assistant, and sentiment scoring.
//!
//! Load order: `.roadmap/config.toml` → environment variables → defaults.
//! API keys are never read from the file; see `roadmap_assist::provider`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level roadmap configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapConfig {
    pub progress: ProgressConfig,
    pub assistant: AssistantConfig,
    pub sentiment: SentimentConfig,
}

/// Progress report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// How many next topics a progress report lists.
    pub recommendation_limit: usize,
}

/// LLM assistant configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Provider name: "openai" or "anthropic".
    pub provider: String,
    /// Model override; each provider has its own default.
    pub model: Option<String>,
    /// Base URL override for OpenAI-compatible proxies.
    pub base_url: Option<String>,
    /// Extra attempts after a failed provider call.
    pub max_retries: usize,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

/// Thresholds for scoring emotional tone from audio features.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// Mean RMS energy above which speech counts as high energy.
    pub energy_high: f64,
    pub energy_low: f64,
    /// Beats per minute.
    pub tempo_fast: f64,
    pub tempo_slow: f64,
    /// Zero crossing rate: voice stability.
    pub zcr_high: f64,
    pub zcr_low: f64,
    /// Spectral centroid in Hz: brightness.
    pub centroid_bright: f64,
    pub centroid_dark: f64,
    /// Variance of the spectral centroid: expressiveness.
    pub pitch_variance_high: f64,
    pub pitch_variance_low: f64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            recommendation_limit: 3,
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: None,
            base_url: None,
            max_retries: 1,
            timeout_secs: 120,
        }
    }
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            energy_high: 0.02,
            energy_low: 0.005,
            tempo_fast: 140.0,
            tempo_slow: 80.0,
            zcr_high: 0.15,
            zcr_low: 0.05,
            centroid_bright: 3000.0,
            centroid_dark: 1500.0,
            pitch_variance_high: 1_000_000.0,
            pitch_variance_low: 100_000.0,
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        tracing::debug!("config override from {}", var);
        *target = n;
    }
}

/// Like [`env_override`] for optional string fields.
fn env_override_opt(var: &str, target: &mut Option<String>) {
    if let Ok(v) = std::env::var(var)
        && !v.trim().is_empty()
    {
        tracing::debug!("config override from {}", var);
        *target = Some(v);
    }
}

impl RoadmapConfig {
    /// Load config from `.roadmap/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = crate::storage::roadmap_dir(project_root).join("config.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", config_path.display()))?
        } else {
            Self::default()
        };

        // Environment variable overrides
        env_override(
            "ROADMAP_RECOMMENDATION_LIMIT",
            &mut config.progress.recommendation_limit,
        );
        env_override("ROADMAP_PROVIDER", &mut config.assistant.provider);
        env_override_opt("ROADMAP_MODEL", &mut config.assistant.model);
        env_override_opt("ROADMAP_BASE_URL", &mut config.assistant.base_url);
        env_override("ROADMAP_MAX_RETRIES", &mut config.assistant.max_retries);
        env_override("ROADMAP_TIMEOUT_SECS", &mut config.assistant.timeout_secs);

        config.assistant.provider = config.assistant.provider.trim().to_lowercase();

        config.validate()?;
        Ok(config)
    }

    /// Reject threshold pairs that are not finite or would make a scoring band empty.
    pub fn validate(&self) -> Result<()> {
        if self.progress.recommendation_limit == 0 {
            anyhow::bail!("progress.recommendation_limit must be at least 1");
        }
        let s = &self.sentiment;
        let pairs = [
            ("energy", s.energy_low, s.energy_high),
            ("tempo", s.tempo_slow, s.tempo_fast),
            ("zcr", s.zcr_low, s.zcr_high),
            ("centroid", s.centroid_dark, s.centroid_bright),
            ("pitch_variance", s.pitch_variance_low, s.pitch_variance_high),
        ];
        for (name, low, high) in pairs {
            if !low.is_finite() || !high.is_finite() {
                anyhow::bail!(
                    "sentiment {} thresholds must be finite numbers (got {} and {})",
                    name,
                    low,
                    high
                );
            }
            if low >= high {
                anyhow::bail!(
                    "sentiment {} thresholds out of order: low ({}) must be less than high ({})",
                    name,
                    low,
                    high
                );
            }
        }
        Ok(())
    }
}
