//! Gemini `generateContent` client.
//!
//! API key: read from the environment variable named in the assistant config
//! (default `GEMINI_API_KEY`). A missing key surfaces as a call failure, never
//! at construction time.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::conversation::{Role, Turn};
use super::{AssistantError, ChatBackend};
use crate::config::AssistantConfig;

/// Reply used when the model returns no text.
pub const EMPTY_REPLY: &str = "I couldn't generate a response.";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Blocking client for the Gemini REST API.
pub struct GeminiClient {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    system_instruction: String,
    client: reqwest::blocking::Client,
}

impl GeminiClient {
    /// Build a client from config, reading the key from the configured variable.
    #[must_use]
    pub fn from_config(config: &AssistantConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self::new(config, api_key)
    }

    /// Build a client with an explicit key.
    #[must_use]
    pub fn new(config: &AssistantConfig, api_key: Option<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            system_instruction: config.system_instruction.clone(),
            client,
        }
    }

    /// Full URL of the `generateContent` call.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl ChatBackend for GeminiClient {
    fn generate(&self, history: &[Turn], prompt: &str) -> Result<String, AssistantError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AssistantError::MissingApiKey(self.api_key_env.clone()))?;

        let body = build_request(&self.system_instruction, history, prompt);
        debug!(model = %self.model, turns = body.contents.len(), "sending assistant request");

        let res = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .map_err(|e| AssistantError::Request(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().unwrap_or_default();
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GenerateResponse = res
            .json()
            .map_err(|e| AssistantError::Decode(e.to_string()))?;
        Ok(extract_text(parsed).unwrap_or_else(|| EMPTY_REPLY.to_string()))
    }
}

/// Assemble the request body.
///
/// Model turns that come before the first user turn (the local greeting) are
/// not sent; the conversation on the wire must open with the user.
fn build_request<'a>(
    system_instruction: &'a str,
    history: &'a [Turn],
    prompt: &'a str,
) -> GenerateRequest<'a> {
    let first_user = history
        .iter()
        .position(|t| t.role == Role::User)
        .unwrap_or(history.len());

    let mut contents: Vec<Content<'a>> = history[first_user..]
        .iter()
        .map(|turn| Content {
            role: Some(turn.role.as_str()),
            parts: vec![Part { text: &turn.text }],
        })
        .collect();
    contents.push(Content {
        role: Some(Role::User.as_str()),
        parts: vec![Part { text: prompt }],
    });

    let system_instruction = (!system_instruction.trim().is_empty()).then(|| Content {
        role: None,
        parts: vec![Part {
            text: system_instruction,
        }],
    });

    GenerateRequest {
        system_instruction,
        contents,
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> Option<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    (!text.trim().is_empty()).then_some(text)
}
