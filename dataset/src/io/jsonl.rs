//! Line-delimited JSON reading.
//!
//! Each non-empty line must hold one JSON object. The column set is the
//! union of keys across all rows, in first-seen order. A key whose non-null
//! values are all strings, integers, numbers or booleans lowers to the
//! matching typed column; anything mixed or nested lands in a `Json` column.

use crate::column::Column;
use crate::dataset::Dataset;
use crate::error::{DatasetError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub fn read_jsonl(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DatasetError::InvalidPath(path.display().to_string()));
    }

    let reader = BufReader::new(File::open(path)?);
    let mut rows: Vec<serde_json::Map<String, serde_json::Value>> = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<serde_json::Value>(&line)? {
            serde_json::Value::Object(object) => rows.push(object),
            _ => {
                return Err(DatasetError::MalformedRecord(format!(
                    "{}:{}: expected a JSON object",
                    path.display(),
                    line_number + 1
                )))
            }
        }
    }

    let mut keys: Vec<String> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            if !keys.iter().any(|k| k == key) {
                keys.push(key.clone());
            }
        }
    }

    let mut columns = Vec::with_capacity(keys.len());
    for key in &keys {
        let cells: Vec<Option<serde_json::Value>> = rows
            .iter()
            .map(|row| row.get(key).filter(|v| !v.is_null()).cloned())
            .collect();
        columns.push((key.clone(), lower_column(cells)));
    }

    let dataset = Dataset::from_columns(columns)?;
    log::debug!(
        "Read {} rows x {} columns from {}",
        dataset.num_rows(),
        dataset.num_columns(),
        path.display()
    );
    Ok(dataset)
}

fn lower_column(cells: Vec<Option<serde_json::Value>>) -> Column {
    let non_null = || cells.iter().flatten();

    if non_null().count() > 0 {
        if non_null().all(serde_json::Value::is_string) {
            return Column::Utf8(
                cells
                    .iter()
                    .map(|cell| cell.as_ref().and_then(|v| v.as_str()).map(str::to_string))
                    .collect(),
            );
        }
        if non_null().all(serde_json::Value::is_i64) {
            return Column::Int64(
                cells
                    .iter()
                    .map(|cell| cell.as_ref().and_then(serde_json::Value::as_i64))
                    .collect(),
            );
        }
        if non_null().all(serde_json::Value::is_number) {
            return Column::Float64(
                cells
                    .iter()
                    .map(|cell| cell.as_ref().and_then(serde_json::Value::as_f64))
                    .collect(),
            );
        }
        if non_null().all(serde_json::Value::is_boolean) {
            return Column::Bool(
                cells
                    .iter()
                    .map(|cell| cell.as_ref().and_then(serde_json::Value::as_bool))
                    .collect(),
            );
        }
    }
    Column::Json(cells)
}
