//! Delimited-text reading and writing.
//!
//! Reading infers one type per column from the cell text: a column whose
//! non-empty cells all parse as `i64` becomes `Int64`, else `f64` becomes
//! `Float64`, else `true`/`false` becomes `Bool`, else the column stays
//! `Utf8`. Empty cells are null.

use crate::column::Column;
use crate::dataset::Dataset;
use crate::error::{DatasetError, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    pub delimiter: u8,
    pub has_headers: bool,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }
}

pub fn read_csv(path: impl AsRef<Path>, options: &CsvReadOptions) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DatasetError::InvalidPath(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(false)
        .from_path(path)?;

    let headers: Vec<String> = if options.has_headers {
        reader.headers()?.iter().map(str::to_string).collect()
    } else {
        Vec::new()
    };

    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?);
    }

    let names: Vec<String> = if options.has_headers {
        headers
    } else {
        let width = records.first().map_or(0, csv::StringRecord::len);
        (0..width).map(|i| format!("column_{i}")).collect()
    };

    let mut columns = Vec::with_capacity(names.len());
    for (index, name) in names.iter().enumerate() {
        let cells: Vec<Option<String>> = records
            .iter()
            .map(|record| {
                record
                    .get(index)
                    .filter(|cell| !cell.is_empty())
                    .map(str::to_string)
            })
            .collect();
        columns.push((name.clone(), infer_column(cells)));
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

pub fn write_csv(dataset: &Dataset, path: impl AsRef<Path>, delimiter: u8) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;

    writer.write_record(dataset.column_names())?;
    for row in 0..dataset.num_rows() {
        let record: Vec<String> = dataset
            .columns()
            .map(|(_, column)| column.value(row).render())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    log::debug!("Wrote {} rows to {}", dataset.num_rows(), path.display());
    Ok(())
}

fn infer_column(cells: Vec<Option<String>>) -> Column {
    let non_null = || cells.iter().flatten();

    if non_null().count() > 0 {
        if non_null().all(|cell| cell.parse::<i64>().is_ok()) {
            return Column::Int64(
                cells
                    .iter()
                    .map(|cell| cell.as_ref().and_then(|c| c.parse().ok()))
                    .collect(),
            );
        }
        if non_null().all(|cell| cell.parse::<f64>().is_ok()) {
            return Column::Float64(
                cells
                    .iter()
                    .map(|cell| cell.as_ref().and_then(|c| c.parse().ok()))
                    .collect(),
            );
        }
        if non_null().all(|cell| cell.as_str() == "true" || cell.as_str() == "false") {
            return Column::Bool(
                cells
                    .iter()
                    .map(|cell| cell.as_ref().map(|c| c.as_str() == "true"))
                    .collect(),
            );
        }
    }
    Column::Utf8(cells)
}
