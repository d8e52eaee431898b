//! Groq API client configuration.

use std::fmt;
use std::path::Path;

use crate::AiError;

/// Groq API client configuration.
#[derive(Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

impl fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .finish()
    }
}

impl GroqConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "llama3-8b-8192".to_string(),
            max_tokens: 1024,
            temperature: 1.0,
            top_p: 1.0,
        }
    }

    /// Create config from the environment or the local key file.
    ///
    /// Resolution order:
    /// 1. `GROQ_API_KEY` env var
    /// 2. `~/.config/outpost/keys.json` (field `"groq"`)
    pub fn from_env() -> Result<Self, AiError> {
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            return Ok(Self::new(key));
        }

        if let Some(path) = default_key_file() {
            if path.exists() {
                return Self::from_key_file(&path);
            }
        }

        Err(AiError::NotConfigured(
            "Groq API key not found. Set GROQ_API_KEY or create \
             ~/.config/outpost/keys.json with a \"groq\" field."
                .into(),
        ))
    }

    /// Read the API key from a JSON key file.
    ///
    /// Accepts `{"groq": "..."}`; the legacy `"grok"` spelling is honored
    /// as a fallback.
    pub fn from_key_file(path: &Path) -> Result<Self, AiError> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            AiError::NotConfigured(format!("cannot read key file {}: {e}", path.display()))
        })?;
        let json: serde_json::Value = serde_json::from_str(&data).map_err(|e| {
            AiError::NotConfigured(format!("invalid key file {}: {e}", path.display()))
        })?;

        let key = json["groq"]
            .as_str()
            .or_else(|| json["grok"].as_str())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                AiError::NotConfigured(format!(
                    "no \"groq\" field in key file {}",
                    path.display()
                ))
            })?;

        Ok(Self::new(key))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = top_p;
        self
    }
}

/// Platform default key file path (`<config dir>/outpost/keys.json`).
pub fn default_key_file() -> Option<std::path::PathBuf> {
    Some(dirs::config_dir()?.join("outpost").join("keys.json"))
}
