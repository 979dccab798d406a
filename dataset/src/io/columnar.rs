//! Directory-based columnar persistence.
//!
//! A dataset directory holds two files: `manifest.json` describing the
//! schema (format version, row count, column names and types) and
//! `columns.bin`, the bincode-encoded column payload. The reader validates
//! the decoded columns against the manifest before handing the dataset out.

use crate::column::{Column, DataType};
use crate::dataset::Dataset;
use crate::error::{DatasetError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

const MANIFEST_FILE: &str = "manifest.json";
const COLUMNS_FILE: &str = "columns.bin";
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Manifest {
    version: u32,
    num_rows: usize,
    columns: Vec<ManifestColumn>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ManifestColumn {
    name: String,
    dtype: DataType,
}

pub fn write_columnar(dataset: &Dataset, dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let manifest = Manifest {
        version: FORMAT_VERSION,
        num_rows: dataset.num_rows(),
        columns: dataset
            .columns()
            .map(|(name, column)| ManifestColumn {
                name: name.to_string(),
                dtype: column.data_type(),
            })
            .collect(),
    };
    let manifest_file = File::create(dir.join(MANIFEST_FILE))?;
    serde_json::to_writer_pretty(BufWriter::new(manifest_file), &manifest)?;

    let payload: Vec<&Column> = dataset.columns().map(|(_, column)| column).collect();
    let columns_file = File::create(dir.join(COLUMNS_FILE))?;
    bincode::serialize_into(BufWriter::new(columns_file), &payload)?;

    log::debug!(
        "Wrote {} rows x {} columns to {}",
        dataset.num_rows(),
        dataset.num_columns(),
        dir.display()
    );
    Ok(())
}

pub fn read_columnar(dir: impl AsRef<Path>) -> Result<Dataset> {
    let dir = dir.as_ref();
    let manifest_path = dir.join(MANIFEST_FILE);
    if !dir.is_dir() || !manifest_path.is_file() {
        return Err(DatasetError::InvalidPath(dir.display().to_string()));
    }

    let manifest: Manifest =
        serde_json::from_reader(BufReader::new(File::open(&manifest_path)?))?;
    if manifest.version != FORMAT_VERSION {
        return Err(DatasetError::Manifest(format!(
            "unsupported format version {} (expected {})",
            manifest.version, FORMAT_VERSION
        )));
    }

    let columns_file = File::open(dir.join(COLUMNS_FILE))?;
    let payload: Vec<Column> = bincode::deserialize_from(BufReader::new(columns_file))?;

    if payload.len() != manifest.columns.len() {
        return Err(DatasetError::Manifest(format!(
            "manifest lists {} columns, payload holds {}",
            manifest.columns.len(),
            payload.len()
        )));
    }
    for (described, column) in manifest.columns.iter().zip(&payload) {
        if column.data_type() != described.dtype {
            return Err(DatasetError::Manifest(format!(
                "column '{}' has type {}, manifest says {}",
                described.name,
                column.data_type(),
                described.dtype
            )));
        }
        if column.len() != manifest.num_rows {
            return Err(DatasetError::Manifest(format!(
                "column '{}' has {} rows, manifest says {}",
                described.name,
                column.len(),
                manifest.num_rows
            )));
        }
    }

    let named = manifest
        .columns
        .into_iter()
        .map(|c| c.name)
        .zip(payload)
        .collect();
    Dataset::from_columns(named)
}
