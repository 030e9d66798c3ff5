use crate::error::{RagError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const MAX_TOKENS: u32 = 1500;
const TEMPERATURE: f32 = 0.7;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Minimal OpenAI-compatible chat-completions client
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiClient {
    #[must_use]
    pub fn new(api_key: String, mut base_url: String, model: String) -> Self {
        while base_url.ends_with('/') {
            base_url.pop();
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key,
            base_url,
            model,
        }
    }

    /// Send one system+user exchange and return the model's reply
    pub async fn chat(&self, system: &str, user: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RagError::RateLimited);
        }
        if !status.is_success() {
            log::error!("Model endpoint error {status}: {text}");
            return Err(RagError::ApiError {
                status: status.as_u16(),
                message: truncate_message(&text),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(RagError::EmptyResponse)
    }
}

fn truncate_message(text: &str) -> String {
    const LIMIT: usize = 300;
    if text.len() <= LIMIT {
        text.to_string()
    } else {
        let cut = text
            .char_indices()
            .take_while(|(idx, _)| *idx < LIMIT)
            .last()
            .map_or(0, |(idx, c)| idx + c.len_utf8());
        format!("{}...", &text[..cut])
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_deserializes() {
        let raw = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Use Retrofit."}}
            ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Use Retrofit.");
    }

    #[test]
    fn empty_choices_maps_to_empty_response() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let result: Result<String> = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(RagError::EmptyResponse);
        assert!(matches!(result, Err(RagError::EmptyResponse)));
    }

    #[test]
    fn base_url_is_normalized() {
        let client = OpenAiClient::new(
            "key".to_string(),
            "https://example.com/v1///".to_string(),
            DEFAULT_MODEL.to_string(),
        );
        assert_eq!(client.base_url, "https://example.com/v1");
    }

    #[test]
    fn long_error_messages_are_truncated() {
        let long = "x".repeat(1000);
        let truncated = truncate_message(&long);
        assert!(truncated.len() < 350);
        assert!(truncated.ends_with("..."));
    }
}
