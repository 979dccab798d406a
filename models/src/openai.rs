//! Backend for OpenAI-compatible REST APIs.
//!
//! Generation issues one chat-completion request per input (the API family
//! has no batched chat endpoint); embeddings are one batched request;
//! classification is prompt-engineered over the completions endpoint and
//! yields a single top label at confidence 1.0.

use crate::backend::{BackendOptions, Classification, ModelBackend, TaskOptions};
use crate::error::{ModelError, Result};
use crate::wire;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Construction options: `api_key` (required), `base_url` (default
/// `https://api.openai.com`) and `timeout_secs` (default 120).
pub struct OpenAiBackend {
    model: String,
    base_url: String,
    api_key: String,
    timeout: Duration,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

impl OpenAiBackend {
    pub fn new(model: &str, options: &BackendOptions) -> Result<Self> {
        let api_key = options
            .get_str("api_key")
            .ok_or_else(|| ModelError::MissingParameter("api_key".to_string()))?
            .to_string();
        let base_url = options
            .get_str("base_url")
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let timeout =
            Duration::from_secs(options.get_u64("timeout_secs").unwrap_or(DEFAULT_TIMEOUT_SECS));
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        log::debug!("OpenAI-compatible backend for '{model}' at {base_url}");
        Ok(Self {
            model: model.to_string(),
            base_url,
            api_key,
            timeout,
            client,
        })
    }

    fn post(&self, path: &str, payload: &serde_json::Value) -> Result<serde_json::Value> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .map_err(|error| {
                if error.is_timeout() {
                    ModelError::Timeout(self.timeout)
                } else {
                    ModelError::Network(error)
                }
            })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json()?)
    }

    /// `{model, ...options}` plus the given fields.
    fn payload(
        &self,
        options: &TaskOptions,
        fields: &[(&str, serde_json::Value)],
    ) -> serde_json::Value {
        let mut map = options.as_map().clone();
        map.insert("model".to_string(), serde_json::Value::String(self.model.clone()));
        for (key, value) in fields {
            map.insert((*key).to_string(), value.clone());
        }
        serde_json::Value::Object(map)
    }

    fn classification_prompt(labels: &[String], input: &str) -> String {
        format!(
            "Classify the following text into one of these labels: {}.\n\nText: {input}\n\nLabel:",
            labels.join(", ")
        )
    }
}

impl ModelBackend for OpenAiBackend {
    fn generate(&mut self, inputs: &[String], options: &TaskOptions) -> Result<Vec<String>> {
        let mut generated = Vec::with_capacity(inputs.len());
        for input in inputs {
            let messages = serde_json::json!([{ "role": "user", "content": input }]);
            let payload = self.payload(options, &[("messages", messages)]);
            let response: ChatResponse =
                wire::decode(self.post("/v1/chat/completions", &payload)?, "chat completion")?;
            let choice = response.choices.into_iter().next().ok_or_else(|| {
                ModelError::InvalidResponse("chat completion returned no choices".to_string())
            })?;
            generated.push(choice.message.content);
        }
        Ok(generated)
    }

    fn embeddings(&mut self, inputs: &[String], options: &TaskOptions) -> Result<Vec<Vec<f32>>> {
        let payload = self.payload(options, &[("input", serde_json::json!(inputs))]);
        let response: EmbeddingsResponse =
            wire::decode(self.post("/v1/embeddings", &payload)?, "embeddings")?;
        let vectors = response
            .data
            .into_iter()
            .map(|item| item.embedding)
            .collect();
        wire::expect_parallel(vectors, inputs.len(), "embeddings")
    }

    fn classify(
        &mut self,
        inputs: &[String],
        labels: &[String],
        options: &TaskOptions,
    ) -> Result<Vec<Classification>> {
        let mut classifications = Vec::with_capacity(inputs.len());
        for input in inputs {
            let prompt = Self::classification_prompt(labels, input);
            let payload = self.payload(options, &[("prompt", serde_json::json!(prompt))]);
            let response: CompletionResponse =
                wire::decode(self.post("/v1/completions", &payload)?, "completion")?;
            let choice = response.choices.into_iter().next().ok_or_else(|| {
                ModelError::InvalidResponse("completion returned no choices".to_string())
            })?;
            classifications.push(Classification {
                labels: vec![choice.text.trim().to_string()],
                scores: vec![1.0],
            });
        }
        Ok(classifications)
    }

    fn close(&mut self) -> Result<()> {
        log::debug!("Closed OpenAI-compatible backend for '{}'", self.model);
        Ok(())
    }
}
