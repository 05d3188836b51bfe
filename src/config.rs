use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{CustodyBuddyError, Result};

const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Crate configuration. The provider credential is the only value read from
/// the environment; everything else defaults in code and can be overridden
/// programmatically by the embedding host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gemini: GeminiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
}

impl Config {
    /// Load configuration from the environment. Probes `.env` in the current
    /// and parent directory before reading `GEMINI_API_KEY`.
    pub fn load() -> Result<Self> {
        let env_paths = [".env", "../.env"];
        let mut env_loaded = false;
        for path in &env_paths {
            if dotenvy::from_path(path).is_ok() {
                tracing::info!("Loaded .env from: {}", path);
                env_loaded = true;
                break;
            }
        }
        if !env_loaded {
            tracing::debug!("No .env file found - continuing with process env only");
        }

        let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
            CustodyBuddyError::Config("GEMINI_API_KEY is not set".to_string())
        })?;

        Ok(Self {
            gemini: GeminiConfig {
                api_key,
                model: DEFAULT_MODEL.to_string(),
            },
        })
    }

    /// Build a configuration directly, for hosts that manage credentials
    /// themselves.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            gemini: GeminiConfig {
                api_key: api_key.into(),
                model: DEFAULT_MODEL.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_api_key_uses_default_model() {
        let config = Config::with_api_key("test-key");
        assert_eq!(config.gemini.api_key, "test-key");
        assert_eq!(config.gemini.model, DEFAULT_MODEL);
    }
}
