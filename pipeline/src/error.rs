use mmpipe_dataset::DatasetError;
use mmpipe_models::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No input dataset attached; call set_input before run")]
    NoInput,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
