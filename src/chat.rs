//! Chat passthrough: one blocking call per prompt, a single user-role
//! message each time. No conversation context is carried between calls —
//! the transcript in `Session` is display-only.

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::constants::{CHAT_MODEL, ERROR_BODY_MAX, HTTP_TIMEOUT_SECS, OPENAI_CHAT_URL};
use crate::text::truncate;

#[derive(Debug)]
pub enum ChatError {
    /// Missing or rejected API key
    Auth(String),
    /// Network-level failure (DNS, connection, timeout)
    Network(String),
    /// API returned a non-success HTTP status
    Api { status: u16, body: String },
    /// Failed to parse the response
    Parse(String),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Auth(msg) => write!(f, "Auth error: {}", msg),
            ChatError::Network(msg) => write!(f, "Network error: {}", msg),
            ChatError::Api { status, body } => write!(f, "API error {}: {}", status, body),
            ChatError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ChatError {}

impl From<reqwest::Error> for ChatError {
    fn from(e: reqwest::Error) -> Self {
        ChatError::Network(e.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

pub struct ChatClient {
    client: Client,
    api_key: SecretString,
}

impl ChatClient {
    pub fn new(api_key: &str) -> Result<Self, ChatError> {
        let client = Client::builder().timeout(Duration::from_secs(HTTP_TIMEOUT_SECS)).build()?;
        Ok(Self { client, api_key: SecretString::from(api_key.to_string()) })
    }

    /// Send one prompt, return the generated text.
    pub fn ask(&self, prompt: &str) -> Result<String, ChatError> {
        let request = ChatRequest { model: CHAT_MODEL, messages: vec![ChatMessage { role: "user", content: prompt }] };
        let resp = self
            .client
            .post(OPENAI_CHAT_URL)
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .json(&request)
            .send()?;

        let status = resp.status().as_u16();
        let body = resp.text()?;
        match status {
            200..=299 => parse_completion(&body),
            401 | 403 => Err(ChatError::Auth(truncate(&body, ERROR_BODY_MAX).to_string())),
            _ => Err(ChatError::Api { status, body: truncate(&body, ERROR_BODY_MAX).to_string() }),
        }
    }
}

/// Extract `choices[0].message.content` from a completion response body.
fn parse_completion(body: &str) -> Result<String, ChatError> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(|e| ChatError::Parse(e.to_string()))?;
    parsed
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| ChatError::Parse("response contained no choices".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_completion_extracts_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Hello!"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "Hello!");
    }

    #[test]
    fn parse_completion_empty_choices_is_parse_error() {
        let body = r#"{"choices":[]}"#;
        assert!(matches!(parse_completion(body), Err(ChatError::Parse(_))));
    }

    #[test]
    fn parse_completion_garbage_is_parse_error() {
        assert!(matches!(parse_completion("not json"), Err(ChatError::Parse(_))));
    }

    #[test]
    fn display_api_error() {
        let e = ChatError::Api { status: 429, body: "rate limited".into() };
        assert_eq!(e.to_string(), "API error 429: rate limited");
    }
}
