//! Global configuration types for Formcraft.
//!
//! `GlobalConfig` represents the top-level `config.toml`. Today it only
//! configures the text-generation endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.formcraft/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub model: ModelConfig,
}

/// Text-generation endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Full URL of the generate endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name sent in every request.
    #[serde(default = "default_model_name")]
    pub name: String,

    /// Upper bound on a single generation call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://localhost:11434/api/generate".to_string()
}

fn default_model_name() -> String {
    "deepseek-coder".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            name: default_model_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ModelConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reset a zero `timeout_secs` to the default. Returns true if it changed.
    pub fn reset_zero_timeout(&mut self) -> bool {
        if self.timeout_secs == 0 {
            self.timeout_secs = default_timeout_secs();
            return true;
        }
        false
    }
}
