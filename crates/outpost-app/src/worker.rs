//! Completion worker task.
//!
//! The session and client live on their own tokio task so the long-running
//! streamed call never blocks the input loop. The UI submits player lines
//! over one channel and receives delta/complete/failed events over another.
//! The worker handles one submission at a time; the session's own busy
//! guard backs this up.

use tokio::sync::mpsc;
use tracing::{debug, error};

use outpost_ai::{GroqClient, Session};

/// Events the worker reports back to the UI.
#[derive(Debug)]
pub enum WorkerEvent {
    /// One streamed text fragment, in arrival order.
    Delta(String),
    /// The fully assembled reply; history has been updated.
    Complete(String),
    /// The call failed; history is unchanged. Carries the display string.
    Failed(String),
}

pub struct WorkerHandle {
    pub submit: mpsc::UnboundedSender<String>,
    pub events: mpsc::UnboundedReceiver<WorkerEvent>,
}

/// Spawn the worker task. `client` is `None` when no credential was found
/// at startup; submissions then fail without making any call.
pub fn spawn(client: Option<GroqClient>, system_prompt: &str, stream: bool) -> WorkerHandle {
    let (submit_tx, mut submit_rx) = mpsc::unbounded_channel::<String>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<WorkerEvent>();

    let mut session = Session::new().with_system_prompt(system_prompt);

    tokio::spawn(async move {
        while let Some(text) = submit_rx.recv().await {
            let Some(ref client) = client else {
                error!("submission dropped: completion service not configured");
                let _ = event_tx.send(WorkerEvent::Failed(
                    "Error: completion service not configured".into(),
                ));
                continue;
            };

            debug!(chars = text.len(), "submitting player line");
            let result = if stream {
                let delta_tx = event_tx.clone();
                session
                    .chat_streaming(
                        client,
                        text,
                        Box::new(move |chunk| {
                            let _ = delta_tx.send(WorkerEvent::Delta(chunk));
                        }),
                    )
                    .await
            } else {
                session.chat(client, text).await
            };

            let event = match result {
                Ok(reply) => WorkerEvent::Complete(reply),
                Err(e) => {
                    error!("completion call failed: {e}");
                    WorkerEvent::Failed(format!("Error: {e}"))
                }
            };
            if event_tx.send(event).is_err() {
                // UI is gone; stop the worker.
                break;
            }
        }
    });

    WorkerHandle {
        submit: submit_tx,
        events: event_rx,
    }
}
