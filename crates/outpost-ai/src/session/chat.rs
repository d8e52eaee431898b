//! Async chat methods for Session (send_message + streaming).

use tracing::debug;

use crate::{AiClient, AiError, Message, Role};

use super::manager::Session;
use super::types::BusyGuard;

impl Session {
    /// Add a user message and get the assistant's full reply.
    ///
    /// On success the user and assistant messages are appended to history.
    /// On failure the history is left exactly as it was before the call;
    /// the error is returned for the display layer to surface, never
    /// recorded as an assistant turn.
    pub async fn chat(
        &mut self,
        client: &dyn AiClient,
        user_message: impl Into<String>,
    ) -> Result<String, AiError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        self.messages.push(Message {
            role: Role::User,
            content: user_message.into(),
        });

        let messages = self.build_messages();
        match client.send_message(&messages).await {
            Ok(response) => {
                debug!(
                    prompt_tokens = response.usage.prompt_tokens,
                    completion_tokens = response.usage.completion_tokens,
                    "completion finished"
                );
                self.messages.push(Message {
                    role: Role::Assistant,
                    content: response.content.clone(),
                });
                Ok(response.content)
            }
            Err(e) => {
                // Roll back the user message so a failed call leaves no trace.
                self.messages.pop();
                Err(e)
            }
        }
    }

    /// Send a message with streaming. `on_chunk` receives each text
    /// fragment in arrival order; the concatenated reply is returned once
    /// the stream is fully drained.
    pub async fn chat_streaming(
        &mut self,
        client: &dyn AiClient,
        user_message: impl Into<String>,
        on_chunk: Box<dyn Fn(String) + Send + Sync>,
    ) -> Result<String, AiError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        self.messages.push(Message {
            role: Role::User,
            content: user_message.into(),
        });

        let messages = self.build_messages();
        match client.send_message_streaming(&messages, on_chunk).await {
            Ok(response) => {
                debug!(
                    prompt_tokens = response.usage.prompt_tokens,
                    completion_tokens = response.usage.completion_tokens,
                    "streaming completion finished"
                );
                self.messages.push(Message {
                    role: Role::Assistant,
                    content: response.content.clone(),
                });
                Ok(response.content)
            }
            Err(e) => {
                self.messages.pop();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::{AiClient, AiError, AiResponse, Message, Role, Session, TokenUsage};

    /// Mock client that streams canned fragments, or fails.
    struct MockClient {
        fragments: Vec<&'static str>,
        fail_with: Option<fn() -> AiError>,
        /// Messages observed by the last call, for request assertions.
        seen: Mutex<Vec<Message>>,
    }

    impl MockClient {
        fn streaming(fragments: Vec<&'static str>) -> Self {
            Self {
                fragments,
                fail_with: None,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: fn() -> AiError) -> Self {
            Self {
                fragments: Vec::new(),
                fail_with: Some(err),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AiClient for MockClient {
        async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError> {
            self.send_message_streaming(messages, Box::new(|_| {})).await
        }

        async fn send_message_streaming(
            &self,
            messages: &[Message],
            on_chunk: Box<dyn Fn(String) + Send + Sync>,
        ) -> Result<AiResponse, AiError> {
            *self.seen.lock().unwrap() = messages.to_vec();
            if let Some(err) = self.fail_with {
                return Err(err());
            }
            let mut content = String::new();
            for fragment in &self.fragments {
                content.push_str(fragment);
                on_chunk(fragment.to_string());
            }
            Ok(AiResponse {
                content,
                usage: TokenUsage::default(),
            })
        }
    }

    #[tokio::test]
    async fn history_is_two_entries_per_turn_in_order() {
        let client = MockClient::streaming(vec!["ok"]);
        let mut session = Session::new();

        for i in 0..3 {
            session.chat(&client, format!("turn {i}")).await.unwrap();
        }

        assert_eq!(session.message_count(), 6);
        for (i, pair) in session.messages().chunks(2).enumerate() {
            assert_eq!(pair[0].role, Role::User);
            assert_eq!(pair[0].content, format!("turn {i}"));
            assert_eq!(pair[1].role, Role::Assistant);
        }
    }

    #[tokio::test]
    async fn fragments_concatenate_in_arrival_order() {
        let client = MockClient::streaming(vec!["Hel", "lo, ", "world"]);
        let mut session = Session::new();

        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let reply = session
            .chat_streaming(
                &client,
                "greet me",
                Box::new(move |chunk| sink.lock().unwrap().push(chunk)),
            )
            .await
            .unwrap();

        assert_eq!(reply, "Hello, world");
        assert_eq!(*received.lock().unwrap(), vec!["Hel", "lo, ", "world"]);
    }

    #[tokio::test]
    async fn end_to_end_streamed_turn() {
        let client = MockClient::streaming(vec!["Hi", " there"]);
        let mut session = Session::new();

        let reply = session
            .chat_streaming(&client, "Hello", Box::new(|_| {}))
            .await
            .unwrap();

        assert_eq!(reply, "Hi there");
        assert_eq!(
            session.messages(),
            &[
                Message {
                    role: Role::User,
                    content: "Hello".into()
                },
                Message {
                    role: Role::Assistant,
                    content: "Hi there".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn request_carries_system_prompt_first() {
        let client = MockClient::streaming(vec!["ok"]);
        let mut session = Session::new().with_system_prompt("you are the narrator");

        session.chat(&client, "look around").await.unwrap();

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen[0].role, Role::System);
        assert_eq!(seen[0].content, "you are the narrator");
        assert_eq!(seen[1].content, "look around");
        // History never gained the system entry.
        assert!(session.messages().iter().all(|m| m.role != Role::System));
    }

    #[tokio::test]
    async fn empty_input_is_forwarded_as_is() {
        let client = MockClient::streaming(vec!["..."]);
        let mut session = Session::new();

        session.chat(&client, "").await.unwrap();
        assert_eq!(client.seen.lock().unwrap()[0].content, "");
        assert_eq!(session.messages()[0].content, "");
    }

    #[tokio::test]
    async fn failure_leaves_history_untouched() {
        let client = MockClient::failing(|| AiError::NetworkError("connection reset".into()));
        let mut session = Session::new();

        let err = session
            .chat_streaming(&client, "Hello", Box::new(|_| {}))
            .await
            .unwrap_err();

        assert!(matches!(err, AiError::NetworkError(_)));
        assert_eq!(session.message_count(), 0);

        // The display layer renders failures in the legacy pseudo-reply
        // shape without ever storing them.
        assert!(format!("Error: {err}").starts_with("Error: "));
    }

    #[tokio::test]
    async fn session_recovers_after_failure() {
        let failing = MockClient::failing(|| AiError::Timeout);
        let working = MockClient::streaming(vec!["back online"]);
        let mut session = Session::new();

        assert!(session.chat(&failing, "first").await.is_err());
        let reply = session.chat(&working, "second").await.unwrap();

        assert_eq!(reply, "back online");
        assert_eq!(session.message_count(), 2);
        assert_eq!(session.messages()[0].content, "second");
    }
}
