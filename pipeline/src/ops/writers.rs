//! Sink operators.
//!
//! Writers persist the current dataset as a side effect and return it
//! unchanged, so they can appear mid-pipeline without breaking the chain.

use crate::error::Result;
use crate::operator::Operator;
use crate::ops::non_empty_path;
use mmpipe_dataset::{io, Dataset};
use std::path::PathBuf;

/// Writes the dataset to a delimited-text file.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    path: PathBuf,
    delimiter: u8,
}

impl CsvWriter {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            path: non_empty_path(path.into(), "CsvWriter")?,
            delimiter: b',',
        })
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Operator for CsvWriter {
    fn name(&self) -> &str {
        "CsvWriter"
    }

    fn transform(&mut self, dataset: Dataset) -> Result<Dataset> {
        io::csv::write_csv(&dataset, &self.path, self.delimiter)?;
        log::info!("Wrote {} rows to {}", dataset.num_rows(), self.path.display());
        Ok(dataset)
    }
}

/// Writes the dataset to a columnar dataset directory.
#[derive(Debug, Clone)]
pub struct ColumnarWriter {
    dir: PathBuf,
}

impl ColumnarWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            dir: non_empty_path(dir.into(), "ColumnarWriter")?,
        })
    }
}

impl Operator for ColumnarWriter {
    fn name(&self) -> &str {
        "ColumnarWriter"
    }

    fn transform(&mut self, dataset: Dataset) -> Result<Dataset> {
        io::columnar::write_columnar(&dataset, &self.dir)?;
        log::info!("Wrote {} rows to {}", dataset.num_rows(), self.dir.display());
        Ok(dataset)
    }
}
