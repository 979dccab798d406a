//! Exact-match deduplication on one column.

use crate::error::Result;
use crate::operator::Operator;
use mmpipe_dataset::Dataset;
use std::collections::{HashMap, HashSet};

/// Which occurrence survives when a value repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeepPolicy {
    /// Keep the first occurrence.
    #[default]
    First,
    /// Keep the last occurrence.
    Last,
    /// Drop every row whose value occurs more than once.
    None,
}

/// Removes rows that are exact duplicates on the configured text column.
///
/// Null cells compare equal to each other, like any other value. Matching
/// is exact only - there is no similarity threshold.
#[derive(Debug, Clone)]
pub struct TextDeduper {
    text_column: String,
    keep: KeepPolicy,
}

impl TextDeduper {
    pub fn new(text_column: impl Into<String>, keep: KeepPolicy) -> Self {
        Self {
            text_column: text_column.into(),
            keep,
        }
    }
}

impl Operator for TextDeduper {
    fn name(&self) -> &str {
        "TextDeduper"
    }

    fn transform(&mut self, dataset: Dataset) -> Result<Dataset> {
        let values = dataset.utf8(&self.text_column)?;
        let mut mask = vec![false; values.len()];
        match self.keep {
            KeepPolicy::First => {
                let mut seen: HashSet<Option<&str>> = HashSet::new();
                for (index, value) in values.iter().enumerate() {
                    if seen.insert(value.as_deref()) {
                        mask[index] = true;
                    }
                }
            }
            KeepPolicy::Last => {
                let mut seen: HashSet<Option<&str>> = HashSet::new();
                for (index, value) in values.iter().enumerate().rev() {
                    if seen.insert(value.as_deref()) {
                        mask[index] = true;
                    }
                }
            }
            KeepPolicy::None => {
                let mut counts: HashMap<Option<&str>, usize> = HashMap::new();
                for value in values {
                    *counts.entry(value.as_deref()).or_default() += 1;
                }
                for (index, value) in values.iter().enumerate() {
                    mask[index] = counts.get(&value.as_deref()).copied() == Some(1);
                }
            }
        }
        Ok(dataset.filter(&mask)?)
    }
}
