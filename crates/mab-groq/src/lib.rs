//! Groq adapter (chat completions).
//!
//! Speaks the OpenAI-compatible `/chat/completions` endpoint. One call per
//! exchange, no retries, no total timeout.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use mab_core::{
    domain::Turn,
    errors::Error,
    model::{client::CompletionClient, types::CompletionRequest},
    Result,
};

#[derive(Clone)]
pub struct GroqClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [Turn],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| Error::External(format!("http client build failed: {e}")))?;
        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

fn request_body(req: &CompletionRequest) -> ChatCompletionBody<'_> {
    ChatCompletionBody {
        model: &req.params.model,
        messages: &req.messages,
        temperature: req.params.temperature,
        max_tokens: req.params.max_tokens,
        top_p: req.params.top_p,
    }
}

fn parse_completion(body: &str) -> Result<String> {
    let resp: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| Error::Upstream(format!("invalid completion payload: {e}")))?;

    let text = resp
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(Error::Upstream("completion returned empty text".to_string()));
    }
    Ok(text)
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, req: &CompletionRequest) -> Result<String> {
        let resp = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request_body(req))
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("groq request error: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Upstream(format!("groq response error: {e}")))?;

        if !status.is_success() {
            tracing::warn!(%status, "groq completion rejected");
            return Err(Error::Upstream(format!(
                "groq completion failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        parse_completion(&body)
    }
}
