//! The unit-of-transformation contract.

use crate::error::Result;
use mmpipe_dataset::Dataset;

/// One configured transformation step with a uniform dataset-to-dataset
/// contract.
///
/// Implementations carry configuration only (column names, bounds, paths,
/// backend selection). `transform` consumes the input dataset and returns a
/// derived one; the input is never mutated in place. It takes `&mut self`
/// solely so backend-holding operators can warm lazy state - built-in
/// operators are stateless across invocations.
pub trait Operator: Send {
    /// Operator name, used by the pipeline's `Display` and in logs.
    fn name(&self) -> &str;

    /// Transform a dataset into a dataset.
    fn transform(&mut self, dataset: Dataset) -> Result<Dataset>;
}
