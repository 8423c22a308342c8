/// Hosted language model provider (OpenAI Responses API)
///
/// API Flow:
/// 1. POST /v1/responses with the full prompt as `input`
/// 2. Read `output_text`, or join the `output_text` parts of each output message
use crate::{
    error::{AppError, AppResult},
    services::providers::TextGenerator,
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
    reasoning: Reasoning,
    text: TextOptions,
}

#[derive(Debug, Serialize)]
struct Reasoning {
    effort: &'static str,
}

#[derive(Debug, Serialize)]
struct TextOptions {
    verbosity: &'static str,
}

#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    part_type: String,
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesReply {
    fn into_text(self) -> Option<String> {
        if let Some(text) = self.output_text.filter(|t| !t.trim().is_empty()) {
            return Some(text);
        }

        let joined: String = self
            .output
            .into_iter()
            .flat_map(|item| item.content)
            .filter(|part| part.part_type == "output_text")
            .filter_map(|part| part.text)
            .collect();

        (!joined.trim().is_empty()).then_some(joined)
    }
}

#[derive(Clone)]
pub struct OpenAiGenerator {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let url = format!("{}/v1/responses", self.api_url);

        let body = ResponsesRequest {
            model: &self.model,
            input: prompt,
            reasoning: Reasoning { effort: "low" },
            text: TextOptions { verbosity: "low" },
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Generation(format!(
                "Model API returned status {}: {}",
                status, body
            )));
        }

        let reply: ResponsesReply = response.json().await?;
        let text = reply
            .into_text()
            .ok_or_else(|| AppError::Generation("Model returned no text".to_string()))?;

        tracing::debug!(
            provider = self.name(),
            model = %self.model,
            prompt_chars = prompt.len(),
            reply_chars = text.len(),
            "Generated text"
        );

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_prefers_output_text() {
        let reply: ResponsesReply = serde_json::from_str(
            r#"{"output_text":"Short and sweet.","output":[{"content":[{"type":"output_text","text":"ignored"}]}]}"#,
        )
        .unwrap();
        assert_eq!(reply.into_text().as_deref(), Some("Short and sweet."));
    }

    #[test]
    fn test_reply_joins_output_parts() {
        let reply: ResponsesReply = serde_json::from_str(
            r#"{"output":[
                {"type":"reasoning","content":[]},
                {"type":"message","content":[
                    {"type":"output_text","text":"Great combat. "},
                    {"type":"refusal","text":"nope"},
                    {"type":"output_text","text":"Weak story."}
                ]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            reply.into_text().as_deref(),
            Some("Great combat. Weak story.")
        );
    }

    #[test]
    fn test_reply_without_text_is_unusable() {
        let reply: ResponsesReply = serde_json::from_str(r#"{"output_text":"  "}"#).unwrap();
        assert_eq!(reply.into_text(), None);
    }

    #[test]
    fn test_request_serialization() {
        let body = ResponsesRequest {
            model: "gpt-5.1",
            input: "hello",
            reasoning: Reasoning { effort: "low" },
            text: TextOptions { verbosity: "low" },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["reasoning"]["effort"], "low");
        assert_eq!(json["text"]["verbosity"], "low");
        assert_eq!(json["input"], "hello");
    }
}
