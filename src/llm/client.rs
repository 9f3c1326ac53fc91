use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::answer::{AnswerError, AnswerPayload, Answerer};
use crate::config::LlmConfig;

/// Answers prompts through an Ollama or OpenAI-compatible chat endpoint.
pub struct HttpAnswerer {
    client: reqwest::Client,
    config: LlmConfig,
}

impl HttpAnswerer {
    pub fn new(client: reqwest::Client, config: LlmConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Answerer for HttpAnswerer {
    async fn answer(&self, prompt: &str) -> Result<AnswerPayload, AnswerError> {
        let body = match self.config.provider.as_str() {
            "ollama" => call_ollama(&self.client, &self.config, prompt).await?,
            "openai" => call_openai(&self.client, &self.config, prompt).await?,
            other => {
                return Err(AnswerError::Unavailable(format!(
                    "unknown LLM provider: {other}"
                )))
            }
        };
        Ok(AnswerPayload::from_json(body))
    }
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

// ─── Ollama ──────────────────────────────────────────────

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
}

async fn call_ollama(
    client: &reqwest::Client,
    config: &LlmConfig,
    prompt: &str,
) -> Result<Value, AnswerError> {
    let url = format!("{}/api/chat", config.base_url);

    let req = OllamaChatRequest {
        model: &config.chat_model,
        messages: vec![Message {
            role: "user",
            content: prompt,
        }],
        stream: false,
    };

    let resp = client
        .post(&url)
        .timeout(config.timeout())
        .json(&req)
        .send()
        .await
        .map_err(classify_send_error)?;

    read_json(resp).await
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

async fn call_openai(
    client: &reqwest::Client,
    config: &LlmConfig,
    prompt: &str,
) -> Result<Value, AnswerError> {
    let url = format!("{}/v1/chat/completions", config.base_url);
    let api_key = config.api_key.as_deref().unwrap_or_default();

    let req = OpenAiChatRequest {
        model: &config.chat_model,
        messages: vec![Message {
            role: "user",
            content: prompt,
        }],
        temperature: 0.3,
    };

    let resp = client
        .post(&url)
        .timeout(config.timeout())
        .header("Authorization", format!("Bearer {api_key}"))
        .json(&req)
        .send()
        .await
        .map_err(classify_send_error)?;

    let body = read_json(resp).await?;
    Ok(first_choice(body))
}

/// `choices[0]` carries the `message.content` shape; fall back to the whole
/// body so an unexpected reply still reaches the user.
fn first_choice(body: Value) -> Value {
    match body.pointer("/choices/0") {
        Some(choice) => choice.clone(),
        None => body,
    }
}

fn classify_send_error(e: reqwest::Error) -> AnswerError {
    if e.is_connect() {
        AnswerError::Unavailable(e.to_string())
    } else {
        AnswerError::Request(e)
    }
}

async fn read_json(resp: reqwest::Response) -> Result<Value, AnswerError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(AnswerError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let text = resp.text().await?;
    Ok(serde_json::from_str(&text)?)
}
