//! The columnar table passed between pipeline operators.

use crate::column::{Column, DataType, Value};
use crate::error::{DatasetError, Result};
use std::collections::HashMap;

/// An ordered collection of equally long named columns.
///
/// Operators never mutate a dataset in place; `with_column`, `filter`,
/// `select` and `drop_column` all return a derived copy. Column order is
/// insertion order and survives every derivation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<(String, Column)>,
}

impl Dataset {
    /// An empty dataset with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from named columns, validating that all columns have
    /// the same length and that no name repeats.
    pub fn from_columns(columns: Vec<(String, Column)>) -> Result<Self> {
        let mut dataset = Self::new();
        for (name, column) in columns {
            if dataset.has_column(&name) {
                return Err(DatasetError::DuplicateColumn(name));
            }
            if !dataset.columns.is_empty() && column.len() != dataset.num_rows() {
                return Err(DatasetError::LengthMismatch {
                    column: name,
                    expected: dataset.num_rows(),
                    actual: column.len(),
                });
            }
            dataset.columns.push((name, column));
        }
        Ok(dataset)
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, column)| column.len())
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Iterate columns in order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(name, column)| (name.as_str(), column))
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, column)| column)
            .ok_or_else(|| DatasetError::ColumnNotFound(name.to_string()))
    }

    /// Typed accessor for a text column.
    pub fn utf8(&self, name: &str) -> Result<&[Option<String>]> {
        match self.column(name)? {
            Column::Utf8(cells) => Ok(cells),
            other => Err(type_mismatch(name, DataType::Utf8, other)),
        }
    }

    pub fn int64(&self, name: &str) -> Result<&[Option<i64>]> {
        match self.column(name)? {
            Column::Int64(cells) => Ok(cells),
            other => Err(type_mismatch(name, DataType::Int64, other)),
        }
    }

    pub fn float64(&self, name: &str) -> Result<&[Option<f64>]> {
        match self.column(name)? {
            Column::Float64(cells) => Ok(cells),
            other => Err(type_mismatch(name, DataType::Float64, other)),
        }
    }

    pub fn bools(&self, name: &str) -> Result<&[Option<bool>]> {
        match self.column(name)? {
            Column::Bool(cells) => Ok(cells),
            other => Err(type_mismatch(name, DataType::Bool, other)),
        }
    }

    pub fn float_list(&self, name: &str) -> Result<&[Option<Vec<f32>>]> {
        match self.column(name)? {
            Column::FloatList(cells) => Ok(cells),
            other => Err(type_mismatch(name, DataType::FloatList, other)),
        }
    }

    pub fn json(&self, name: &str) -> Result<&[Option<serde_json::Value>]> {
        match self.column(name)? {
            Column::Json(cells) => Ok(cells),
            other => Err(type_mismatch(name, DataType::Json, other)),
        }
    }

    /// Derive a dataset with `column` placed under `name`: an existing column
    /// of that name is replaced in position, otherwise the column is appended.
    pub fn with_column(&self, name: &str, column: Column) -> Result<Dataset> {
        if !self.columns.is_empty() && column.len() != self.num_rows() {
            return Err(DatasetError::LengthMismatch {
                column: name.to_string(),
                expected: self.num_rows(),
                actual: column.len(),
            });
        }
        let mut derived = self.clone();
        match derived.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = column,
            None => derived.columns.push((name.to_string(), column)),
        }
        Ok(derived)
    }

    pub fn drop_column(&self, name: &str) -> Result<Dataset> {
        if !self.has_column(name) {
            return Err(DatasetError::ColumnNotFound(name.to_string()));
        }
        let columns = self
            .columns
            .iter()
            .filter(|(n, _)| n != name)
            .cloned()
            .collect();
        Ok(Dataset { columns })
    }

    /// Derive a dataset holding only the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<Dataset> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            columns.push(((*name).to_string(), self.column(name)?.clone()));
        }
        Dataset::from_columns(columns)
    }

    /// Derive a dataset keeping the rows whose mask entry is `true`.
    pub fn filter(&self, mask: &[bool]) -> Result<Dataset> {
        if mask.len() != self.num_rows() {
            return Err(DatasetError::MaskLengthMismatch {
                expected: self.num_rows(),
                actual: mask.len(),
            });
        }
        let columns = self
            .columns
            .iter()
            .map(|(name, column)| (name.clone(), column.filtered(mask)))
            .collect();
        Ok(Dataset { columns })
    }

    /// Materialize one row as name/value pairs.
    pub fn row(&self, index: usize) -> HashMap<String, Value> {
        self.columns
            .iter()
            .map(|(name, column)| (name.clone(), column.value(index)))
            .collect()
    }

    /// Materialize the whole table row-wise.
    pub fn to_rows(&self) -> Vec<HashMap<String, Value>> {
        (0..self.num_rows()).map(|i| self.row(i)).collect()
    }
}

fn type_mismatch(name: &str, expected: DataType, actual: &Column) -> DatasetError {
    DatasetError::TypeMismatch {
        column: name.to_string(),
        expected,
        actual: actual.data_type(),
    }
}
