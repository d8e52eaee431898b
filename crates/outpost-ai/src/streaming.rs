//! Server-Sent Events (SSE) streaming parser.
//!
//! The Groq chat-completions API streams tokens as SSE `data:` lines,
//! one JSON chunk per event, terminated by a literal `data: [DONE]`.
//! The line-level parsing lives in [`SseParser`] so it can be tested
//! without a network stream; [`parse_sse_stream`] drives it over a
//! reqwest response body.

use futures_util::StreamExt;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

/// A single SSE event parsed from the stream.
#[derive(Debug, Clone)]
pub struct SseEvent {
    /// The event type, when the server sends an `event:` field.
    pub event: Option<String>,
    /// The event data (JSON string, or `[DONE]` for the terminator).
    pub data: String,
}

/// Incremental SSE field accumulator. Feed it lines; it yields an event
/// at each blank-line boundary.
#[derive(Debug, Default)]
pub struct SseParser {
    event: Option<String>,
    data: String,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one line of the stream. Returns a complete event when the
    /// line is the blank separator and data has been accumulated.
    pub fn push_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            if self.data.is_empty() {
                self.event = None;
                return None;
            }
            return Some(SseEvent {
                event: self.event.take(),
                data: std::mem::take(&mut self.data),
            });
        }

        if let Some(event_type) = line.strip_prefix("event: ") {
            self.event = Some(event_type.to_string());
        } else if let Some(data) = line.strip_prefix("data: ") {
            // Multi-line data fields are joined with newlines per the SSE spec.
            if !self.data.is_empty() {
                self.data.push('\n');
            }
            self.data.push_str(data);
        }
        // Ignore other fields (id:, retry:, comments)
        None
    }

    /// Flush a trailing event left without a final blank line.
    pub fn finish(self) -> Option<SseEvent> {
        if self.data.is_empty() {
            return None;
        }
        Some(SseEvent {
            event: self.event,
            data: self.data,
        })
    }
}

/// Parse an SSE stream from a reqwest response, calling `on_event` for
/// each complete event.
pub async fn parse_sse_stream(
    response: reqwest::Response,
    mut on_event: impl FnMut(SseEvent),
) -> Result<(), crate::AiError> {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
    let mut lines = reader.lines();

    let mut parser = SseParser::new();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| crate::AiError::NetworkError(e.to_string()))?
    {
        if let Some(event) = parser.push_line(&line) {
            on_event(event);
        }
    }

    if let Some(event) = parser.finish() {
        on_event(event);
    }

    Ok(())
}
