//! Operator composition for the multimodal data pipeline.
//!
//! A [`Pipeline`] is an ordered sequence of [`Operator`]s plus an attached
//! input dataset. Running the pipeline folds the dataset through each
//! operator's `transform` in registration order, failing fast on the first
//! error. Operators carry configuration only; they never mutate their input
//! dataset in place.
//!
//! Built-in operators:
//! - filters: [`TextLengthFilter`], [`ImageResolutionFilter`],
//!   [`AudioDurationFilter`], [`QualityScoreFilter`]
//! - dedup: [`TextDeduper`]
//! - scoring: [`TextQualityEvaluator`]
//! - sources: [`CsvReader`], [`JsonlReader`], [`ColumnarReader`],
//!   [`ImageReader`], [`AudioReader`]
//! - sinks: [`CsvWriter`], [`ColumnarWriter`]
//! - model invocation: [`ModelOperator`], which wraps one backend obtained
//!   from a [`ModelRegistry`](mmpipe_models::ModelRegistry)

pub mod error;
pub mod operator;
pub mod ops;
pub mod pipeline;

pub use error::{PipelineError, Result};
pub use operator::Operator;
pub use ops::dedupe::{KeepPolicy, TextDeduper};
pub use ops::evaluate::TextQualityEvaluator;
pub use ops::filters::{
    AudioDurationFilter, ImageResolutionFilter, QualityScoreFilter, TextLengthFilter,
};
pub use ops::model::{ModelOperator, TaskKind};
pub use ops::readers::{AudioReader, ColumnarReader, CsvReader, ImageReader, JsonlReader};
pub use ops::writers::{ColumnarWriter, CsvWriter};
pub use pipeline::Pipeline;
