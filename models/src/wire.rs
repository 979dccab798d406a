//! Wire shapes shared by the backends that speak the service JSON protocol
//! (the local HTTP service and the transformer runtime).

use crate::backend::{Classification, TaskOptions};
use crate::error::{ModelError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    pub generated_texts: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmbeddingsResponse {
    pub embeddings: Vec<Vec<f32>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClassifyResponse {
    pub classifications: Vec<Classification>,
}

/// Request body for `/generate` and `/embeddings`:
/// `{model, inputs, parameters}`.
pub(crate) fn task_payload(
    model: &str,
    inputs: &[String],
    options: &TaskOptions,
) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "inputs": inputs,
        "parameters": options.as_map(),
    })
}

/// Request body for `/classify`: `{model, inputs, labels, parameters}`.
pub(crate) fn classify_payload(
    model: &str,
    inputs: &[String],
    labels: &[String],
    options: &TaskOptions,
) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "inputs": inputs,
        "labels": labels,
        "parameters": options.as_map(),
    })
}

/// Enforce the one-result-per-input contract.
pub(crate) fn expect_parallel<T>(results: Vec<T>, inputs: usize, what: &str) -> Result<Vec<T>> {
    if results.len() == inputs {
        Ok(results)
    } else {
        Err(ModelError::InvalidResponse(format!(
            "{what}: expected {inputs} results, got {}",
            results.len()
        )))
    }
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
    what: &str,
) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|error| ModelError::InvalidResponse(format!("{what}: {error}")))
}
