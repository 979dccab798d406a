//! The model capability contract and its option/result types.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// The four-method contract every inference backend must satisfy.
///
/// Each call operates on a list of input texts and returns a parallel list
/// of results, one per input and in input order. `close` releases held
/// resources (HTTP connections, loaded runtimes); calling any capability
/// after `close` is a backend-specific error, not undefined behavior.
pub trait ModelBackend: Send {
    /// Generate one text per input.
    fn generate(&mut self, inputs: &[String], options: &TaskOptions) -> Result<Vec<String>>;

    /// Produce one embedding vector per input.
    fn embeddings(&mut self, inputs: &[String], options: &TaskOptions) -> Result<Vec<Vec<f32>>>;

    /// Score each input against the candidate `labels`.
    fn classify(
        &mut self,
        inputs: &[String],
        labels: &[String],
        options: &TaskOptions,
    ) -> Result<Vec<Classification>>;

    /// Release held resources.
    fn close(&mut self) -> Result<()>;
}

impl std::fmt::Debug for dyn ModelBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn ModelBackend")
    }
}

/// Per-input classification result: candidate labels paired with confidence
/// scores, ranked in descending score order.
///
/// All backends return this shape. The OpenAI-compatible backend performs
/// prompt-engineered classification and therefore fills in a single top
/// label at confidence 1.0 rather than a genuine distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub labels: Vec<String>,
    pub scores: Vec<f32>,
}

/// Free-form string-keyed options, passed through to the backend.
///
/// Used both for backend construction parameters (base URL, API key,
/// timeout) and for per-call task parameters (sampling temperature,
/// candidate labels). Unknown keys are forwarded verbatim on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskOptions(serde_json::Map<String, serde_json::Value>);

/// Construction-time options carry the same shape as task options.
pub type BackendOptions = TaskOptions;

impl TaskOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(map)
    }

    /// Builder-style insertion.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(serde_json::Value::as_str)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(serde_json::Value::as_u64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(serde_json::Value::as_f64)
    }

    /// The value under `key` as a list of strings, if it is one.
    pub fn string_list(&self, key: &str) -> Option<Vec<String>> {
        let array = self.0.get(key)?.as_array()?;
        array
            .iter()
            .map(|entry| entry.as_str().map(str::to_string))
            .collect()
    }

    /// A copy with `key` removed; used to strip consumed options before
    /// forwarding the rest to the backend.
    pub fn without(&self, key: &str) -> Self {
        let mut map = self.0.clone();
        map.remove(key);
        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.0
    }
}
