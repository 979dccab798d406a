//! The model-invocation operator.
//!
//! Wraps one backend instance obtained from a
//! [`ModelRegistry`](mmpipe_models::ModelRegistry) and one task selection.
//! The backend is created eagerly at operator construction, so an
//! unavailable backend fails the pipeline before any data is touched.

use crate::error::Result;
use crate::operator::Operator;
use mmpipe_dataset::{Column, Dataset};
use mmpipe_models::{BackendOptions, ModelBackend, ModelError, ModelRegistry, TaskOptions};
use std::fmt;

/// Which backend capability the operator invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Generate,
    Embeddings,
    Classify,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::Generate => "generate",
            TaskKind::Embeddings => "embeddings",
            TaskKind::Classify => "classify",
        }
    }

    /// Default output column: `"{task}_result"`.
    pub fn default_output_column(self) -> String {
        format!("{}_result", self.as_str())
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracts a text column, invokes one backend capability over it and
/// appends the results as a new column.
///
/// Output column type depends on the task: `Utf8` for generate, `FloatList`
/// for embeddings, `Json` (one `{labels, scores}` object per row) for
/// classify. Null input cells are sent to the backend as empty strings.
pub struct ModelOperator {
    task: TaskKind,
    text_column: String,
    output_column: String,
    task_options: TaskOptions,
    backend: Box<dyn ModelBackend>,
}

impl std::fmt::Debug for ModelOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelOperator")
            .field("task", &self.task)
            .field("text_column", &self.text_column)
            .field("output_column", &self.output_column)
            .finish_non_exhaustive()
    }
}

impl ModelOperator {
    /// Create the operator with default column names and empty options.
    ///
    /// The backend is instantiated through `registry` immediately; an
    /// unregistered name or unavailable backend fails here, not at
    /// transform time.
    pub fn new(
        registry: &ModelRegistry,
        task: TaskKind,
        backend_name: &str,
        model: &str,
    ) -> Result<Self> {
        Self::with_options(
            registry,
            task,
            backend_name,
            model,
            &BackendOptions::new(),
            TaskOptions::new(),
        )
    }

    pub fn with_options(
        registry: &ModelRegistry,
        task: TaskKind,
        backend_name: &str,
        model: &str,
        backend_options: &BackendOptions,
        task_options: TaskOptions,
    ) -> Result<Self> {
        let backend = registry.create(backend_name, model, backend_options)?;
        log::debug!("Created '{backend_name}' backend for {task} on model '{model}'");
        Ok(Self {
            task,
            text_column: "text".to_string(),
            output_column: task.default_output_column(),
            task_options,
            backend,
        })
    }

    /// Override the input text column (default `"text"`).
    pub fn text_column(mut self, column: impl Into<String>) -> Self {
        self.text_column = column.into();
        self
    }

    /// Override the output column (default `"{task}_result"`).
    pub fn output_column(mut self, column: impl Into<String>) -> Self {
        self.output_column = column.into();
        self
    }

    /// Release the wrapped backend's resources.
    pub fn close(&mut self) -> Result<()> {
        Ok(self.backend.close()?)
    }
}

impl Operator for ModelOperator {
    fn name(&self) -> &str {
        "ModelOperator"
    }

    fn transform(&mut self, dataset: Dataset) -> Result<Dataset> {
        let texts: Vec<String> = dataset
            .utf8(&self.text_column)?
            .iter()
            .map(|cell| cell.clone().unwrap_or_default())
            .collect();

        let column = match self.task {
            TaskKind::Generate => {
                let generated = self.backend.generate(&texts, &self.task_options)?;
                Column::Utf8(generated.into_iter().map(Some).collect())
            }
            TaskKind::Embeddings => {
                let vectors = self.backend.embeddings(&texts, &self.task_options)?;
                Column::FloatList(vectors.into_iter().map(Some).collect())
            }
            TaskKind::Classify => {
                // The label list is validated before any backend call.
                let labels = self
                    .task_options
                    .string_list("labels")
                    .ok_or_else(|| ModelError::MissingParameter("labels".to_string()))?;
                let options = self.task_options.without("labels");
                let results = self.backend.classify(&texts, &labels, &options)?;
                let cells = results
                    .iter()
                    .map(|classification| serde_json::to_value(classification).map(Some))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(ModelError::from)?;
                Column::Json(cells)
            }
        };
        Ok(dataset.with_column(&self.output_column, column)?)
    }
}
