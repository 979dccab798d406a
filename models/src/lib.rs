//! Inference backends for the multimodal data pipeline.
//!
//! Every backend satisfies the same four-method capability contract
//! ([`ModelBackend`]): text generation, embeddings, zero-shot-style
//! classification and resource release. Callers never depend on a concrete
//! backend type - they name one through the [`ModelRegistry`] and receive a
//! boxed trait object.
//!
//! Three adapters ship in this crate:
//! - [`LocalBackend`]: a locally deployed inference service spoken to over
//!   HTTP (`/generate`, `/embeddings`, `/classify`)
//! - [`TransformerBackend`]: an in-process transformer runtime loaded as a
//!   shared library; availability is decided at construction time
//! - [`OpenAiBackend`]: any OpenAI-compatible REST API
//!
//! All HTTP calls are synchronous, carry a per-request timeout and are never
//! retried; errors propagate unchanged to the pipeline.

pub mod backend;
pub mod error;
pub mod local;
pub mod openai;
pub mod registry;
pub mod transformer;

mod wire;

pub use backend::{BackendOptions, Classification, ModelBackend, TaskOptions};
pub use error::{ModelError, Result};
pub use local::LocalBackend;
pub use openai::OpenAiBackend;
pub use registry::ModelRegistry;
pub use transformer::TransformerBackend;
