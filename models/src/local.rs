//! Backend for a locally deployed inference service.
//!
//! Every capability is one synchronous HTTP POST against a fixed endpoint
//! suffix under the configured base URL. Non-success statuses surface the
//! service's error body as the failure detail; there is no retry or backoff.

use crate::backend::{BackendOptions, Classification, ModelBackend, TaskOptions};
use crate::error::{ModelError, Result};
use crate::wire;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Construction options: `base_url` (default `http://localhost:8000`) and
/// `timeout_secs` (default 120).
pub struct LocalBackend {
    model: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::blocking::Client,
}

impl LocalBackend {
    pub fn new(model: &str, options: &BackendOptions) -> Result<Self> {
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
        log::debug!("Local backend for '{model}' at {base_url}");
        Ok(Self {
            model: model.to_string(),
            base_url,
            timeout,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post(&self, endpoint: &str, payload: &serde_json::Value) -> Result<serde_json::Value> {
        let url = format!("{}/{endpoint}", self.base_url);
        let response = self
            .client
            .post(&url)
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
}

impl ModelBackend for LocalBackend {
    fn generate(&mut self, inputs: &[String], options: &TaskOptions) -> Result<Vec<String>> {
        let payload = wire::task_payload(&self.model, inputs, options);
        let response: wire::GenerateResponse =
            wire::decode(self.post("generate", &payload)?, "generate")?;
        wire::expect_parallel(response.generated_texts, inputs.len(), "generate")
    }

    fn embeddings(&mut self, inputs: &[String], options: &TaskOptions) -> Result<Vec<Vec<f32>>> {
        let payload = wire::task_payload(&self.model, inputs, options);
        let response: wire::EmbeddingsResponse =
            wire::decode(self.post("embeddings", &payload)?, "embeddings")?;
        wire::expect_parallel(response.embeddings, inputs.len(), "embeddings")
    }

    fn classify(
        &mut self,
        inputs: &[String],
        labels: &[String],
        options: &TaskOptions,
    ) -> Result<Vec<Classification>> {
        let payload = wire::classify_payload(&self.model, inputs, labels, options);
        let response: wire::ClassifyResponse =
            wire::decode(self.post("classify", &payload)?, "classify")?;
        wire::expect_parallel(response.classifications, inputs.len(), "classify")
    }

    fn close(&mut self) -> Result<()> {
        // The connection pool is released when the client drops.
        log::debug!("Closed local backend for '{}'", self.model);
        Ok(())
    }
}
