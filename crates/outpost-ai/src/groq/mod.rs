//! Groq completion-service client.
//!
//! Implements the `AiClient` trait against Groq's OpenAI-compatible
//! chat-completions API (https://api.groq.com/openai/v1/chat/completions).
//!
//! Authenticates with a bearer API key resolved from the environment or
//! a local JSON key file.

mod api;
mod client;
mod config;

pub use client::GroqClient;
pub use config::GroqConfig;
