//! Built-in operators.

pub mod dedupe;
pub mod evaluate;
pub mod filters;
pub mod model;
pub mod readers;
pub mod writers;

use crate::error::{PipelineError, Result};
use std::path::PathBuf;

/// Readers and writers reject empty paths at construction time.
pub(crate) fn non_empty_path(path: PathBuf, operator: &str) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        Err(PipelineError::InvalidConfiguration(format!(
            "{operator} requires a non-empty path"
        )))
    } else {
        Ok(path)
    }
}
