//! Sequencing and error semantics of a chain of operators.

use crate::error::{PipelineError, Result};
use crate::operator::Operator;
use mmpipe_dataset::Dataset;
use std::fmt;

/// An ordered sequence of operators plus the dataset they run on.
///
/// Operators execute strictly in registration order; the pipeline performs
/// no reordering, optimization or deduplication of steps. `run` fails fast:
/// the first operator error aborts the whole chain and no partial output is
/// produced. Re-running re-executes the whole chain from the attached
/// input, never from partial results.
#[derive(Default)]
pub struct Pipeline {
    operators: Vec<Box<dyn Operator>>,
    input: Option<Dataset>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operator; returns `&mut self` for chaining.
    pub fn add_operator(&mut self, operator: impl Operator + 'static) -> &mut Self {
        self.operators.push(Box::new(operator));
        self
    }

    /// Attach the initial dataset; returns `&mut self` for chaining.
    pub fn set_input(&mut self, dataset: Dataset) -> &mut Self {
        self.input = Some(dataset);
        self
    }

    pub fn num_operators(&self) -> usize {
        self.operators.len()
    }

    pub fn operator_names(&self) -> Vec<&str> {
        self.operators.iter().map(|op| op.name()).collect()
    }

    /// Fold the attached input through every operator in order.
    ///
    /// Fails with [`PipelineError::NoInput`] before touching any operator if
    /// no input has been attached. An empty operator list returns the input
    /// unchanged.
    pub fn run(&mut self) -> Result<Dataset> {
        let mut current = self.input.clone().ok_or(PipelineError::NoInput)?;
        log::info!(
            "Running pipeline with {} operators on {} rows",
            self.operators.len(),
            current.num_rows()
        );
        for operator in &mut self.operators {
            log::debug!("Applying {}", operator.name());
            current = operator.transform(current)?;
        }
        log::info!("Pipeline finished with {} rows", current.num_rows());
        Ok(current)
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataPipeline: {}", self.operator_names().join(" -> "))
    }
}
