//! Heuristic text-quality scoring.

use crate::error::Result;
use crate::operator::Operator;
use mmpipe_dataset::{Column, Dataset};

const PUNCTUATION: &[char] = &['.', '!', '?', '，', '。', '！', '？'];

/// Appends a deterministic quality score in `[0, 1]` computed from a text
/// column: a weighted sum of length (saturating at 0.5 for 1000 characters),
/// punctuation density (0.3 for 20 marks) and word count (0.2 for 100
/// words). Null or empty text scores 0.
#[derive(Debug, Clone)]
pub struct TextQualityEvaluator {
    text_column: String,
    score_column: String,
}

impl TextQualityEvaluator {
    pub fn new(text_column: impl Into<String>, score_column: impl Into<String>) -> Self {
        Self {
            text_column: text_column.into(),
            score_column: score_column.into(),
        }
    }
}

impl Operator for TextQualityEvaluator {
    fn name(&self) -> &str {
        "TextQualityEvaluator"
    }

    fn transform(&mut self, dataset: Dataset) -> Result<Dataset> {
        let scores: Vec<Option<f64>> = dataset
            .utf8(&self.text_column)?
            .iter()
            .map(|text| Some(text.as_deref().map_or(0.0, score_text)))
            .collect();
        Ok(dataset.with_column(&self.score_column, Column::Float64(scores))?)
    }
}

fn score_text(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    let chars = text.chars().count() as f64;
    let length_score = (chars / 1000.0).min(0.5);

    let punctuation = text.chars().filter(|c| PUNCTUATION.contains(c)).count() as f64;
    let punctuation_score = (punctuation / 20.0).min(0.3);

    let words = text.split_whitespace().count() as f64;
    let word_score = (words / 100.0).min(0.2);

    length_score + punctuation_score + word_score
}
