//! Configuration schema types for Outpost.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Model defaults are llama3-8b-8192 with temperature 1, max_tokens 1024,
//! top_p 1, and streaming on.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutpostConfig {
    pub model: ModelConfig,
    pub keys: KeysConfig,
    pub transcript: TranscriptConfig,
    pub logging: LoggingConfig,
}

/// Generation parameters sent with every completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier on the completion service.
    pub id: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    /// Stream the reply token-by-token instead of waiting for the whole body.
    pub stream: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            id: "llama3-8b-8192".into(),
            temperature: 1.0,
            max_tokens: 1024,
            top_p: 1.0,
            stream: true,
        }
    }
}

/// Credential lookup configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    /// Path to the JSON key file. When unset, the `GROQ_API_KEY` env var
    /// and the platform default path are tried in order.
    pub file: Option<PathBuf>,
}

/// Append-only transcript log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("chat_log.txt"),
        }
    }
}

/// Diagnostic logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of: trace, debug, info, warn, error.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}
