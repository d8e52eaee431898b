//! Conversation session management.
//!
//! A `Session` holds the ordered conversation history and mediates calls
//! to the completion service. The system prompt is prepended per call,
//! never stored, and only one submission may be in flight at a time.

mod chat;
mod manager;
mod types;

pub use manager::Session;
