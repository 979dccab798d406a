//! Source operators.
//!
//! Readers ignore any input dataset and produce a fresh one from a
//! configured path; they are effectively pipeline sources and only make
//! sense as the first operator. An empty path is rejected at construction.

use crate::error::Result;
use crate::operator::Operator;
use crate::ops::non_empty_path;
use mmpipe_dataset::io::csv::CsvReadOptions;
use mmpipe_dataset::{io, Dataset};
use std::path::PathBuf;

/// Loads a delimited-text file.
#[derive(Debug, Clone)]
pub struct CsvReader {
    path: PathBuf,
    options: CsvReadOptions,
}

impl CsvReader {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            path: non_empty_path(path.into(), "CsvReader")?,
            options: CsvReadOptions::default(),
        })
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.options.delimiter = delimiter;
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.options.has_headers = has_headers;
        self
    }
}

impl Operator for CsvReader {
    fn name(&self) -> &str {
        "CsvReader"
    }

    fn transform(&mut self, _input: Dataset) -> Result<Dataset> {
        Ok(io::csv::read_csv(&self.path, &self.options)?)
    }
}

/// Loads a line-delimited JSON file.
#[derive(Debug, Clone)]
pub struct JsonlReader {
    path: PathBuf,
}

impl JsonlReader {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            path: non_empty_path(path.into(), "JsonlReader")?,
        })
    }
}

impl Operator for JsonlReader {
    fn name(&self) -> &str {
        "JsonlReader"
    }

    fn transform(&mut self, _input: Dataset) -> Result<Dataset> {
        Ok(io::jsonl::read_jsonl(&self.path)?)
    }
}

/// Loads a columnar dataset directory (including prior pipeline output).
#[derive(Debug, Clone)]
pub struct ColumnarReader {
    path: PathBuf,
}

impl ColumnarReader {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            path: non_empty_path(path.into(), "ColumnarReader")?,
        })
    }
}

impl Operator for ColumnarReader {
    fn name(&self) -> &str {
        "ColumnarReader"
    }

    fn transform(&mut self, _input: Dataset) -> Result<Dataset> {
        Ok(io::columnar::read_columnar(&self.path)?)
    }
}

/// Scans a directory of image files into a dataset with dimension metadata.
#[derive(Debug, Clone)]
pub struct ImageReader {
    dir: PathBuf,
}

impl ImageReader {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            dir: non_empty_path(dir.into(), "ImageReader")?,
        })
    }
}

impl Operator for ImageReader {
    fn name(&self) -> &str {
        "ImageReader"
    }

    fn transform(&mut self, _input: Dataset) -> Result<Dataset> {
        Ok(io::media::scan_images(&self.dir)?)
    }
}

/// Scans a directory of audio files into a dataset with duration metadata.
#[derive(Debug, Clone)]
pub struct AudioReader {
    dir: PathBuf,
}

impl AudioReader {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            dir: non_empty_path(dir.into(), "AudioReader")?,
        })
    }
}

impl Operator for AudioReader {
    fn name(&self) -> &str {
        "AudioReader"
    }

    fn transform(&mut self, _input: Dataset) -> Result<Dataset> {
        Ok(io::media::scan_audio(&self.dir)?)
    }
}
