//! Typed column storage.
//!
//! A [`Column`] is one nullable, homogeneously typed vector of cells. The
//! supported cell types cover the multimodal use case: scalar text/numeric
//! columns for metadata, `Binary` for blob references, `FloatList` for
//! embedding vectors and `Json` for nested results such as classification
//! output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Utf8,
    Int64,
    Float64,
    Bool,
    Binary,
    /// One `f32` vector per row (embeddings).
    FloatList,
    /// One arbitrary JSON value per row (nested records, classification results).
    Json,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Utf8 => "utf8",
            DataType::Int64 => "int64",
            DataType::Float64 => "float64",
            DataType::Bool => "bool",
            DataType::Binary => "binary",
            DataType::FloatList => "float_list",
            DataType::Json => "json",
        };
        f.write_str(name)
    }
}

/// A single named column's cells. Every variant is nullable per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Utf8(Vec<Option<String>>),
    Int64(Vec<Option<i64>>),
    Float64(Vec<Option<f64>>),
    Bool(Vec<Option<bool>>),
    Binary(Vec<Option<Vec<u8>>>),
    FloatList(Vec<Option<Vec<f32>>>),
    Json(Vec<Option<serde_json::Value>>),
}

impl Column {
    pub fn data_type(&self) -> DataType {
        match self {
            Column::Utf8(_) => DataType::Utf8,
            Column::Int64(_) => DataType::Int64,
            Column::Float64(_) => DataType::Float64,
            Column::Bool(_) => DataType::Bool,
            Column::Binary(_) => DataType::Binary,
            Column::FloatList(_) => DataType::FloatList,
            Column::Json(_) => DataType::Json,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Utf8(v) => v.len(),
            Column::Int64(v) => v.len(),
            Column::Float64(v) => v.len(),
            Column::Bool(v) => v.len(),
            Column::Binary(v) => v.len(),
            Column::FloatList(v) => v.len(),
            Column::Json(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell at `row` as a [`Value`]. Out-of-range rows read as null.
    pub fn value(&self, row: usize) -> Value {
        fn cell<T: Clone>(cells: &[Option<T>], row: usize) -> Option<T> {
            cells.get(row).and_then(Clone::clone)
        }
        match self {
            Column::Utf8(v) => cell(v, row).map_or(Value::Null, Value::Utf8),
            Column::Int64(v) => cell(v, row).map_or(Value::Null, Value::Int64),
            Column::Float64(v) => cell(v, row).map_or(Value::Null, Value::Float64),
            Column::Bool(v) => cell(v, row).map_or(Value::Null, Value::Bool),
            Column::Binary(v) => cell(v, row).map_or(Value::Null, Value::Binary),
            Column::FloatList(v) => cell(v, row).map_or(Value::Null, Value::FloatList),
            Column::Json(v) => cell(v, row).map_or(Value::Null, Value::Json),
        }
    }

    /// Keep the cells whose mask entry is `true`. The mask length is
    /// validated by [`Dataset::filter`](crate::Dataset::filter) before this
    /// is called.
    pub(crate) fn filtered(&self, mask: &[bool]) -> Column {
        fn keep<T: Clone>(cells: &[Option<T>], mask: &[bool]) -> Vec<Option<T>> {
            cells
                .iter()
                .zip(mask)
                .filter(|(_, keep)| **keep)
                .map(|(cell, _)| cell.clone())
                .collect()
        }
        match self {
            Column::Utf8(v) => Column::Utf8(keep(v, mask)),
            Column::Int64(v) => Column::Int64(keep(v, mask)),
            Column::Float64(v) => Column::Float64(keep(v, mask)),
            Column::Bool(v) => Column::Bool(keep(v, mask)),
            Column::Binary(v) => Column::Binary(keep(v, mask)),
            Column::FloatList(v) => Column::FloatList(keep(v, mask)),
            Column::Json(v) => Column::Json(keep(v, mask)),
        }
    }
}

/// One row-level scalar cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Utf8(String),
    Int64(i64),
    Float64(f64),
    Bool(bool),
    Binary(Vec<u8>),
    FloatList(Vec<f32>),
    Json(serde_json::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            Value::Int64(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Plain-text rendering used by the CSV writer. Null renders as an empty
    /// cell, binary as lowercase hex, vectors and JSON as JSON text.
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Utf8(s) => s.clone(),
            Value::Int64(v) => v.to_string(),
            Value::Float64(v) => v.to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Binary(bytes) => bytes.iter().map(|b| format!("{b:02x}")).collect(),
            Value::FloatList(v) => serde_json::to_string(v).unwrap_or_default(),
            Value::Json(v) => v.to_string(),
        }
    }
}
