//! AI assistant chat.
//!
//! A conversation of turns in front of a [`ChatBackend`]. Any backend failure
//! is logged and replaced with [`FALLBACK_REPLY`]; callers never see it.

pub mod client;
pub mod conversation;

pub use client::{GeminiClient, EMPTY_REPLY};
pub use conversation::{Conversation, Role, Turn};

use thiserror::Error;
use tracing::warn;

use crate::error::StaffdeskError;

/// Reply shown in place of any failed assistant call.
pub const FALLBACK_REPLY: &str = "Sorry, I am having trouble connecting to the assistant service.";

/// Failures of a chat backend.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// No API key in the configured environment variable.
    #[error("no API key found in ${0}")]
    MissingApiKey(String),
    /// Transport-level failure.
    #[error("assistant request failed: {0}")]
    Request(String),
    /// Non-success HTTP status.
    #[error("assistant API error {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },
    /// Response body was not the expected shape.
    #[error("assistant response parse failed: {0}")]
    Decode(String),
}

/// Something that can continue a conversation.
#[cfg_attr(test, mockall::automock)]
pub trait ChatBackend {
    /// Produce the model's reply to `prompt`, given the turns before it.
    ///
    /// # Errors
    ///
    /// Returns an [`AssistantError`] on any transport or API failure.
    fn generate(&self, history: &[Turn], prompt: &str) -> Result<String, AssistantError>;
}

/// The chat panel: one conversation bound to one backend.
pub struct Assistant {
    backend: Box<dyn ChatBackend>,
    conversation: Conversation,
}

impl Assistant {
    /// Create an assistant whose conversation opens with `greeting`.
    #[must_use]
    pub fn new(backend: Box<dyn ChatBackend>, greeting: &str) -> Self {
        Self {
            backend,
            conversation: Conversation::with_greeting(greeting),
        }
    }

    /// Send `prompt` and record both the prompt and the reply.
    ///
    /// The backend sees the conversation as it was before this prompt.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank prompt. Backend failures are not
    /// errors: the recorded reply becomes [`FALLBACK_REPLY`].
    pub fn ask(&mut self, prompt: &str) -> Result<&Turn, StaffdeskError> {
        if prompt.trim().is_empty() {
            return Err(StaffdeskError::validation("prompt is empty"));
        }

        let reply = match self.backend.generate(self.conversation.turns(), prompt) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "assistant call failed");
                FALLBACK_REPLY.to_string()
            }
        };

        self.conversation.push(Turn::user(prompt));
        self.conversation.push(Turn::model(reply));
        self.conversation
            .turns()
            .last()
            .ok_or_else(|| StaffdeskError::NotFound("assistant reply".to_string()))
    }

    /// The conversation so far.
    #[must_use]
    pub const fn conversation(&self) -> &Conversation {
        &self.conversation
    }
}
