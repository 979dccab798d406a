//! Backend for an in-process transformer runtime loaded as a shared library.
//!
//! The runtime is a platform shared library exposing a small C ABI that
//! speaks the same JSON protocol as the local service backend: each
//! capability symbol takes a request string and returns a heap-allocated
//! response string which must be released through `mmr_free_string`.
//!
//! Availability is decided at construction time: if no runtime library is
//! configured, or it cannot be loaded, construction fails with
//! `BackendUnavailable` rather than deferring the failure to first use.
//! Capability symbols are resolved lazily, one per task, on first use.

use crate::backend::{BackendOptions, Classification, ModelBackend, TaskOptions};
use crate::error::{ModelError, Result};
use crate::wire;
use libloading::Library;
use std::ffi::{c_char, CStr, CString};
use std::path::PathBuf;

/// Environment variable consulted when the `runtime_path` option is absent.
pub const RUNTIME_ENV_VAR: &str = "MMPIPE_TRANSFORMER_RUNTIME";

type CapabilityFn = unsafe extern "C" fn(*const c_char) -> *mut c_char;
type FreeFn = unsafe extern "C" fn(*mut c_char);

#[derive(Debug, Clone, Copy)]
enum Capability {
    Generate,
    Embeddings,
    Classify,
}

impl Capability {
    fn symbol(self) -> &'static [u8] {
        match self {
            Capability::Generate => b"mmr_generate\0",
            Capability::Embeddings => b"mmr_embeddings\0",
            Capability::Classify => b"mmr_classify\0",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Capability::Generate => "generate",
            Capability::Embeddings => "embeddings",
            Capability::Classify => "classify",
        }
    }
}

/// Construction options: `runtime_path` (falls back to the
/// `MMPIPE_TRANSFORMER_RUNTIME` environment variable).
pub struct TransformerBackend {
    model: String,
    runtime_path: PathBuf,
    library: Option<Library>,
    free_fn: FreeFn,
    generate_fn: Option<CapabilityFn>,
    embeddings_fn: Option<CapabilityFn>,
    classify_fn: Option<CapabilityFn>,
}

impl TransformerBackend {
    pub fn new(model: &str, options: &BackendOptions) -> Result<Self> {
        let runtime_path = options
            .get_str("runtime_path")
            .map(PathBuf::from)
            .or_else(|| std::env::var(RUNTIME_ENV_VAR).ok().map(PathBuf::from))
            .ok_or_else(|| {
                ModelError::BackendUnavailable(format!(
                    "no transformer runtime configured; set the runtime_path option or {RUNTIME_ENV_VAR}"
                ))
            })?;
        if !runtime_path.exists() {
            return Err(ModelError::BackendUnavailable(format!(
                "transformer runtime not found: {}",
                runtime_path.display()
            )));
        }

        // SAFETY: loading an arbitrary shared library runs its initializers;
        // the runtime path is explicit caller configuration.
        let library = unsafe { Library::new(&runtime_path) }.map_err(|error| {
            ModelError::BackendUnavailable(format!(
                "failed to load {}: {error}",
                runtime_path.display()
            ))
        })?;

        // The release symbol is required by every capability, so it is
        // resolved eagerly as part of the availability check.
        let free_fn: FreeFn = unsafe {
            *library.get::<FreeFn>(b"mmr_free_string\0").map_err(|error| {
                ModelError::BackendUnavailable(format!(
                    "runtime at {} is missing mmr_free_string: {error}",
                    runtime_path.display()
                ))
            })?
        };

        log::info!(
            "Loaded transformer runtime {} for model '{model}'",
            runtime_path.display()
        );
        Ok(Self {
            model: model.to_string(),
            runtime_path,
            library: Some(library),
            free_fn,
            generate_fn: None,
            embeddings_fn: None,
            classify_fn: None,
        })
    }

    fn cached(&self, capability: Capability) -> Option<CapabilityFn> {
        match capability {
            Capability::Generate => self.generate_fn,
            Capability::Embeddings => self.embeddings_fn,
            Capability::Classify => self.classify_fn,
        }
    }

    fn resolve(&mut self, capability: Capability) -> Result<CapabilityFn> {
        if let Some(func) = self.cached(capability) {
            return Ok(func);
        }
        let library = self.library.as_ref().ok_or_else(|| {
            ModelError::Runtime("transformer runtime already closed".to_string())
        })?;
        let func: CapabilityFn = unsafe {
            *library.get::<CapabilityFn>(capability.symbol()).map_err(|error| {
                ModelError::Runtime(format!(
                    "runtime at {} does not support {}: {error}",
                    self.runtime_path.display(),
                    capability.name()
                ))
            })?
        };
        match capability {
            Capability::Generate => self.generate_fn = Some(func),
            Capability::Embeddings => self.embeddings_fn = Some(func),
            Capability::Classify => self.classify_fn = Some(func),
        }
        Ok(func)
    }

    fn call(&mut self, capability: Capability, payload: &serde_json::Value) -> Result<serde_json::Value> {
        let func = self.resolve(capability)?;
        let request = CString::new(payload.to_string())
            .map_err(|error| ModelError::Runtime(format!("request contains NUL byte: {error}")))?;

        // SAFETY: the runtime contract is request-string-in,
        // heap-allocated-response-out; the response is released below with
        // the runtime's own allocator.
        let raw = unsafe { func(request.as_ptr()) };
        if raw.is_null() {
            return Err(ModelError::Runtime(format!(
                "{} returned no response",
                capability.name()
            )));
        }
        let text = unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned();
        unsafe { (self.free_fn)(raw) };

        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|error| ModelError::InvalidResponse(format!("{}: {error}", capability.name())))?;
        if let Some(message) = value.get("error").and_then(serde_json::Value::as_str) {
            return Err(ModelError::Runtime(message.to_string()));
        }
        Ok(value)
    }
}

impl ModelBackend for TransformerBackend {
    fn generate(&mut self, inputs: &[String], options: &TaskOptions) -> Result<Vec<String>> {
        let payload = wire::task_payload(&self.model, inputs, options);
        let response: wire::GenerateResponse =
            wire::decode(self.call(Capability::Generate, &payload)?, "generate")?;
        wire::expect_parallel(response.generated_texts, inputs.len(), "generate")
    }

    fn embeddings(&mut self, inputs: &[String], options: &TaskOptions) -> Result<Vec<Vec<f32>>> {
        let payload = wire::task_payload(&self.model, inputs, options);
        let response: wire::EmbeddingsResponse =
            wire::decode(self.call(Capability::Embeddings, &payload)?, "embeddings")?;
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
            wire::decode(self.call(Capability::Classify, &payload)?, "classify")?;
        wire::expect_parallel(response.classifications, inputs.len(), "classify")
    }

    fn close(&mut self) -> Result<()> {
        if self.library.take().is_some() {
            self.generate_fn = None;
            self.embeddings_fn = None;
            self.classify_fn = None;
            log::info!(
                "Released transformer runtime {}",
                self.runtime_path.display()
            );
        }
        Ok(())
    }
}
