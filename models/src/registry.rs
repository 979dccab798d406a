//! Name-to-constructor registry for inference backends.
//!
//! The registry is an explicit owned object, constructed once and passed by
//! reference to whoever needs to create backends - there is no process-wide
//! mutable state. Registering under an existing name silently replaces the
//! previous constructor.

use crate::backend::{BackendOptions, ModelBackend};
use crate::error::{ModelError, Result};
use crate::local::LocalBackend;
use crate::openai::OpenAiBackend;
use crate::transformer::TransformerBackend;
use std::collections::HashMap;

type BackendConstructor =
    Box<dyn Fn(&str, &BackendOptions) -> Result<Box<dyn ModelBackend>> + Send + Sync>;

#[derive(Default)]
pub struct ModelRegistry {
    constructors: HashMap<String, BackendConstructor>,
}

impl ModelRegistry {
    /// An empty registry with no backends.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in backends under their fixed names:
    /// `"local"`, `"transformer"` (also reachable as `"huggingface"`) and
    /// `"openai"`.
    pub fn with_builtin_backends() -> Self {
        let mut registry = Self::new();
        registry.register("local", |model, options| {
            Ok(Box::new(LocalBackend::new(model, options)?) as Box<dyn ModelBackend>)
        });
        registry.register("transformer", |model, options| {
            Ok(Box::new(TransformerBackend::new(model, options)?) as Box<dyn ModelBackend>)
        });
        // Alias for callers configured against the older vendor name.
        registry.register("huggingface", |model, options| {
            Ok(Box::new(TransformerBackend::new(model, options)?) as Box<dyn ModelBackend>)
        });
        registry.register("openai", |model, options| {
            Ok(Box::new(OpenAiBackend::new(model, options)?) as Box<dyn ModelBackend>)
        });
        registry
    }

    /// Register `constructor` under `name`, silently replacing any previous
    /// registration for that name.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&str, &BackendOptions) -> Result<Box<dyn ModelBackend>> + Send + Sync + 'static,
    {
        let name = name.into();
        if self
            .constructors
            .insert(name.clone(), Box::new(constructor))
            .is_some()
        {
            log::debug!("Replaced backend registration '{name}'");
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered backend names, sorted for deterministic output.
    pub fn backend_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiate the backend registered under `name` for `model`.
    pub fn create(
        &self,
        name: &str,
        model: &str,
        options: &BackendOptions,
    ) -> Result<Box<dyn ModelBackend>> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| ModelError::UnknownBackend(name.to_string()))?;
        constructor(model, options)
    }
}
