//! Row filters: length, resolution, duration and quality-score bounds.
//!
//! All bound checks are inclusive. A minimum bound is inactive at its unset
//! sentinel (0 for counts and sizes, 0.0 for durations); a maximum bound is
//! inactive when `None`. Rows whose checked value is null fail any active
//! bound. Filters only ever remove rows; the column set passes through
//! unchanged.

use crate::error::Result;
use crate::operator::Operator;
use mmpipe_dataset::Dataset;

/// Keeps rows whose text length (in characters) lies within
/// `[min_length, max_length]`.
///
/// The derived length is computed on the fly and does not appear as a
/// column in the output.
#[derive(Debug, Clone)]
pub struct TextLengthFilter {
    text_column: String,
    min_length: usize,
    max_length: Option<usize>,
}

impl TextLengthFilter {
    pub fn new(text_column: impl Into<String>, min_length: usize, max_length: Option<usize>) -> Self {
        Self {
            text_column: text_column.into(),
            min_length,
            max_length,
        }
    }
}

impl Operator for TextLengthFilter {
    fn name(&self) -> &str {
        "TextLengthFilter"
    }

    fn transform(&mut self, dataset: Dataset) -> Result<Dataset> {
        let mask: Vec<bool> = dataset
            .utf8(&self.text_column)?
            .iter()
            .map(|text| match text {
                Some(text) => {
                    let length = text.chars().count();
                    (self.min_length == 0 || length >= self.min_length)
                        && self.max_length.map_or(true, |max| length <= max)
                }
                None => self.min_length == 0 && self.max_length.is_none(),
            })
            .collect();
        Ok(dataset.filter(&mask)?)
    }
}

/// Keeps rows whose `width`/`height` columns lie within the configured
/// bounds, after dropping rows whose text key is null.
#[derive(Debug, Clone)]
pub struct ImageResolutionFilter {
    text_column: String,
    min_width: i64,
    min_height: i64,
    max_width: Option<i64>,
    max_height: Option<i64>,
}

impl ImageResolutionFilter {
    pub fn new(
        text_column: impl Into<String>,
        min_width: i64,
        min_height: i64,
        max_width: Option<i64>,
        max_height: Option<i64>,
    ) -> Self {
        Self {
            text_column: text_column.into(),
            min_width,
            min_height,
            max_width,
            max_height,
        }
    }
}

impl Operator for ImageResolutionFilter {
    fn name(&self) -> &str {
        "ImageResolutionFilter"
    }

    fn transform(&mut self, dataset: Dataset) -> Result<Dataset> {
        let mut mask: Vec<bool> = dataset
            .utf8(&self.text_column)?
            .iter()
            .map(Option::is_some)
            .collect();
        bound_i64(&mut mask, dataset.int64("width")?, self.min_width, self.max_width);
        bound_i64(&mut mask, dataset.int64("height")?, self.min_height, self.max_height);
        Ok(dataset.filter(&mask)?)
    }
}

/// Keeps rows whose `duration` column (seconds) lies within the configured
/// bounds.
#[derive(Debug, Clone)]
pub struct AudioDurationFilter {
    min_duration: f64,
    max_duration: Option<f64>,
}

impl AudioDurationFilter {
    pub fn new(min_duration: f64, max_duration: Option<f64>) -> Self {
        Self {
            min_duration,
            max_duration,
        }
    }
}

impl Operator for AudioDurationFilter {
    fn name(&self) -> &str {
        "AudioDurationFilter"
    }

    fn transform(&mut self, dataset: Dataset) -> Result<Dataset> {
        let mut mask = vec![true; dataset.num_rows()];
        bound_f64(&mut mask, dataset.float64("duration")?, self.min_duration, self.max_duration);
        Ok(dataset.filter(&mask)?)
    }
}

/// Keeps rows whose score column is `>= min_score`.
///
/// Rows with a null score are always dropped.
#[derive(Debug, Clone)]
pub struct QualityScoreFilter {
    score_column: String,
    min_score: f64,
}

impl QualityScoreFilter {
    pub fn new(score_column: impl Into<String>, min_score: f64) -> Self {
        Self {
            score_column: score_column.into(),
            min_score,
        }
    }
}

impl Operator for QualityScoreFilter {
    fn name(&self) -> &str {
        "QualityScoreFilter"
    }

    fn transform(&mut self, dataset: Dataset) -> Result<Dataset> {
        let min_score = self.min_score;
        let mask: Vec<bool> = dataset
            .float64(&self.score_column)?
            .iter()
            .map(|score| score.is_some_and(|s| s >= min_score))
            .collect();
        Ok(dataset.filter(&mask)?)
    }
}

fn bound_i64(mask: &mut [bool], values: &[Option<i64>], min: i64, max: Option<i64>) {
    if min > 0 {
        for (keep, value) in mask.iter_mut().zip(values) {
            *keep &= value.is_some_and(|v| v >= min);
        }
    }
    if let Some(max) = max {
        for (keep, value) in mask.iter_mut().zip(values) {
            *keep &= value.is_some_and(|v| v <= max);
        }
    }
}

fn bound_f64(mask: &mut [bool], values: &[Option<f64>], min: f64, max: Option<f64>) {
    if min > 0.0 {
        for (keep, value) in mask.iter_mut().zip(values) {
            *keep &= value.is_some_and(|v| v >= min);
        }
    }
    if let Some(max) = max {
        for (keep, value) in mask.iter_mut().zip(values) {
            *keep &= value.is_some_and(|v| v <= max);
        }
    }
}
