//! AiClient trait implementation for GroqClient (send_message + streaming).

use async_trait::async_trait;
use tracing::debug;

use crate::streaming::{parse_sse_stream, SseEvent};
use crate::{AiClient, AiError, AiResponse, Message, TokenUsage};

use super::client::{GroqClient, GROQ_API_URL};

#[async_trait]
impl AiClient for GroqClient {
    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(messages, false);

        debug!(model = %self.config.model, "Groq API request");

        let response = self
            .http
            .post(GROQ_API_URL)
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        self.parse_response(json)
    }

    async fn send_message_streaming(
        &self,
        messages: &[Message],
        on_chunk: Box<dyn Fn(String) + Send + Sync>,
    ) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(messages, true);

        debug!(model = %self.config.model, "Groq API streaming request");

        let response = self
            .http
            .post(GROQ_API_URL)
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let mut full_content = String::new();
        let mut usage = TokenUsage::default();

        parse_sse_stream(response, |event: SseEvent| {
            // The terminator carries no JSON payload.
            if event.data == "[DONE]" {
                return;
            }

            let Ok(data) = serde_json::from_str::<serde_json::Value>(&event.data) else {
                return;
            };

            let mut chunk = String::new();
            if let Some(t) = data["choices"][0]["delta"]["content"].as_str() {
                if !t.is_empty() {
                    chunk.push_str(t);
                    full_content.push_str(t);
                }
            }

            // Groq reports usage on the final chunk, under `x_groq`.
            let u = if data.get("usage").is_some() {
                &data["usage"]
            } else {
                &data["x_groq"]["usage"]
            };
            if u.is_object() {
                usage.prompt_tokens = u["prompt_tokens"].as_u64().unwrap_or(0);
                usage.completion_tokens = u["completion_tokens"].as_u64().unwrap_or(0);
            }

            if !chunk.is_empty() {
                on_chunk(chunk);
            }
        })
        .await?;

        Ok(AiResponse {
            content: full_content,
            usage,
        })
    }
}
