//! Image and audio directory scans.
//!
//! Both scans are non-recursive, classify files by extension and sort by
//! file name so the resulting row order is deterministic. Files whose
//! headers cannot be decoded keep their row with null metadata rather than
//! failing the whole scan.

use crate::column::Column;
use crate::dataset::Dataset;
use crate::error::{DatasetError, Result};
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];
const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "ogg"];

/// Scan a directory for image files.
///
/// Produces columns `path`, `file_name`, `width`, `height`, `size_bytes`.
/// Dimensions come from the image header; undecodable files get null
/// width/height.
pub fn scan_images(dir: impl AsRef<Path>) -> Result<Dataset> {
    let files = list_files(dir.as_ref(), IMAGE_EXTENSIONS)?;

    let mut widths = Vec::with_capacity(files.len());
    let mut heights = Vec::with_capacity(files.len());
    for file in &files {
        match image::image_dimensions(file) {
            Ok((width, height)) => {
                widths.push(Some(i64::from(width)));
                heights.push(Some(i64::from(height)));
            }
            Err(error) => {
                log::warn!("Could not read dimensions of {}: {}", file.display(), error);
                widths.push(None);
                heights.push(None);
            }
        }
    }

    let mut dataset = file_table(&files)?;
    dataset = dataset.with_column("width", Column::Int64(widths))?;
    dataset = dataset.with_column("height", Column::Int64(heights))?;
    dataset = dataset.with_column("size_bytes", Column::Int64(sizes(&files)))?;
    log::debug!("Scanned {} image files under {}", files.len(), dir.as_ref().display());
    Ok(dataset)
}

/// Scan a directory for audio files.
///
/// Produces columns `path`, `file_name`, `duration` (seconds), `size_bytes`.
/// Duration is decoded for WAV containers; other formats get a null
/// duration.
pub fn scan_audio(dir: impl AsRef<Path>) -> Result<Dataset> {
    let files = list_files(dir.as_ref(), AUDIO_EXTENSIONS)?;

    let mut durations = Vec::with_capacity(files.len());
    for file in &files {
        durations.push(wav_duration(file));
    }

    let mut dataset = file_table(&files)?;
    dataset = dataset.with_column("duration", Column::Float64(durations))?;
    dataset = dataset.with_column("size_bytes", Column::Int64(sizes(&files)))?;
    log::debug!("Scanned {} audio files under {}", files.len(), dir.as_ref().display());
    Ok(dataset)
}

fn wav_duration(file: &Path) -> Option<f64> {
    let is_wav = file
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));
    if !is_wav {
        return None;
    }
    match hound::WavReader::open(file) {
        Ok(reader) => {
            let spec = reader.spec();
            Some(f64::from(reader.duration()) / f64::from(spec.sample_rate))
        }
        Err(error) => {
            log::warn!("Could not read duration of {}: {}", file.display(), error);
            None
        }
    }
}

fn list_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(DatasetError::InvalidPath(dir.display().to_string()));
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                extensions.iter().any(|known| ext.eq_ignore_ascii_case(known))
            });
        if matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_table(files: &[PathBuf]) -> Result<Dataset> {
    let paths = files
        .iter()
        .map(|f| Some(f.display().to_string()))
        .collect();
    let names = files
        .iter()
        .map(|f| {
            f.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .collect();
    Dataset::from_columns(vec![
        ("path".to_string(), Column::Utf8(paths)),
        ("file_name".to_string(), Column::Utf8(names)),
    ])
}

fn sizes(files: &[PathBuf]) -> Vec<Option<i64>> {
    files
        .iter()
        .map(|file| {
            std::fs::metadata(file)
                .ok()
                .and_then(|meta| i64::try_from(meta.len()).ok())
        })
        .collect()
}
