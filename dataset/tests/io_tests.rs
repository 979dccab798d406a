//! Integration tests for the dataset I/O formats.

use mmpipe_dataset::io::csv::{read_csv, write_csv, CsvReadOptions};
use mmpipe_dataset::io::columnar::{read_columnar, write_columnar};
use mmpipe_dataset::io::jsonl::read_jsonl;
use mmpipe_dataset::io::media::{scan_audio, scan_images};
use mmpipe_dataset::{Column, Dataset, DatasetError};

fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample() -> Dataset {
    Dataset::from_columns(vec![
        (
            "text".to_string(),
            Column::Utf8(vec![Some("ab".into()), None, Some("xyz".into())]),
        ),
        (
            "count".to_string(),
            Column::Int64(vec![Some(1), Some(2), None]),
        ),
        (
            "score".to_string(),
            Column::Float64(vec![Some(0.5), None, Some(1.25)]),
        ),
        (
            "flag".to_string(),
            Column::Bool(vec![Some(true), Some(false), None]),
        ),
    ])
    .expect("sample dataset should build")
}

#[test]
fn csv_round_trip_with_type_inference() {
    setup();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rows.csv");
    let original = sample();

    write_csv(&original, &path, b',').expect("write should succeed");
    let reread = read_csv(&path, &CsvReadOptions::default()).expect("read should succeed");

    // Empty cells become nulls, and the column types are re-inferred.
    assert_eq!(reread, original);
}

#[test]
fn csv_round_trip_narrows_whole_floats_and_empty_strings() {
    setup();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lossy.csv");
    let original = Dataset::from_columns(vec![
        (
            "ratio".to_string(),
            Column::Float64(vec![Some(3.0), Some(4.0)]),
        ),
        (
            "note".to_string(),
            Column::Utf8(vec![Some(String::new()), Some("x".into())]),
        ),
    ])
    .expect("dataset should build");

    write_csv(&original, &path, b',').expect("write should succeed");
    let reread = read_csv(&path, &CsvReadOptions::default()).expect("read should succeed");

    // Whole-value floats render without a decimal point and re-infer as
    // Int64; empty-string cells are indistinguishable from nulls on disk.
    assert_eq!(reread.int64("ratio").expect("ratio"), &[Some(3), Some(4)]);
    assert_eq!(
        reread.utf8("note").expect("note"),
        &[None, Some("x".to_string())]
    );
}

#[test]
fn csv_custom_delimiter() {
    setup();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rows.tsv");
    write_csv(&sample(), &path, b'\t').expect("write should succeed");

    let options = CsvReadOptions {
        delimiter: b'\t',
        has_headers: true,
    };
    let reread = read_csv(&path, &options).expect("read should succeed");
    assert_eq!(reread.column_names(), vec!["text", "count", "score", "flag"]);
    assert_eq!(reread.num_rows(), 3);
}

#[test]
fn csv_headerless_columns_are_numbered() {
    setup();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("raw.csv");
    std::fs::write(&path, "a,1\nb,2\n").expect("write file");

    let options = CsvReadOptions {
        delimiter: b',',
        has_headers: false,
    };
    let dataset = read_csv(&path, &options).expect("read should succeed");
    assert_eq!(dataset.column_names(), vec!["column_0", "column_1"]);
    assert_eq!(dataset.int64("column_1").expect("column_1"), &[Some(1), Some(2)]);
}

#[test]
fn csv_mixed_column_stays_utf8() {
    setup();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("mixed.csv");
    std::fs::write(&path, "v\n1\ntwo\n").expect("write file");

    let dataset = read_csv(&path, &CsvReadOptions::default()).expect("read should succeed");
    assert_eq!(
        dataset.utf8("v").expect("v column"),
        &[Some("1".to_string()), Some("two".to_string())]
    );
}

#[test]
fn csv_missing_file_is_invalid_path() {
    setup();
    let err = read_csv("/no/such/file.csv", &CsvReadOptions::default())
        .expect_err("missing file should fail");
    assert!(matches!(err, DatasetError::InvalidPath(_)));
}

#[test]
fn jsonl_reads_key_union_with_typed_columns() {
    setup();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rows.jsonl");
    std::fs::write(
        &path,
        concat!(
            "{\"text\": \"a\", \"n\": 1}\n",
            "\n",
            "{\"text\": \"b\", \"tags\": [\"x\"]}\n",
        ),
    )
    .expect("write file");

    let dataset = read_jsonl(&path).expect("read should succeed");
    assert_eq!(dataset.column_names(), vec!["text", "n", "tags"]);
    assert_eq!(
        dataset.utf8("text").expect("text"),
        &[Some("a".to_string()), Some("b".to_string())]
    );
    assert_eq!(dataset.int64("n").expect("n"), &[Some(1), None]);
    // Nested values stay JSON.
    let tags = dataset.json("tags").expect("tags");
    assert_eq!(tags[0], None);
    assert_eq!(tags[1], Some(serde_json::json!(["x"])));
}

#[test]
fn jsonl_rejects_non_object_lines() {
    setup();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.jsonl");
    std::fs::write(&path, "[1, 2]\n").expect("write file");

    let err = read_jsonl(&path).expect_err("array line should fail");
    assert!(matches!(err, DatasetError::MalformedRecord(_)));
}

#[test]
fn columnar_round_trip_preserves_all_types() {
    setup();
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("snapshot");

    let original = sample()
        .with_column(
            "embedding",
            Column::FloatList(vec![Some(vec![0.1, 0.2]), None, Some(vec![])]),
        )
        .expect("add embedding column")
        .with_column(
            "meta",
            Column::Json(vec![
                Some(serde_json::json!({"k": 1})),
                None,
                Some(serde_json::json!([true])),
            ]),
        )
        .expect("add meta column");

    write_columnar(&original, &target).expect("write should succeed");
    let reread = read_columnar(&target).expect("read should succeed");
    assert_eq!(reread, original);
}

#[test]
fn columnar_missing_directory_is_invalid_path() {
    setup();
    let err = read_columnar("/no/such/dir").expect_err("missing dir should fail");
    assert!(matches!(err, DatasetError::InvalidPath(_)));
}

#[test]
fn columnar_rejects_foreign_format_version() {
    setup();
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("snapshot");
    write_columnar(&sample(), &target).expect("write should succeed");

    let manifest_path = target.join("manifest.json");
    let manifest = std::fs::read_to_string(&manifest_path).expect("read manifest");
    let bumped = manifest.replace("\"version\": 1", "\"version\": 99");
    assert_ne!(manifest, bumped);
    std::fs::write(&manifest_path, bumped).expect("rewrite manifest");

    let err = read_columnar(&target).expect_err("foreign version should fail");
    assert!(matches!(err, DatasetError::Manifest(_)));
}

#[test]
fn image_scan_reads_dimensions_and_nulls_undecodable_files() {
    setup();
    let dir = tempfile::tempdir().expect("tempdir");
    image::RgbImage::new(4, 2)
        .save(dir.path().join("a.png"))
        .expect("write png");
    std::fs::write(dir.path().join("b.png"), b"not an image").expect("write junk");
    std::fs::write(dir.path().join("notes.txt"), b"ignored").expect("write txt");

    let dataset = scan_images(dir.path()).expect("scan should succeed");
    assert_eq!(dataset.num_rows(), 2);
    assert_eq!(
        dataset.utf8("file_name").expect("file_name"),
        &[Some("a.png".to_string()), Some("b.png".to_string())]
    );
    assert_eq!(dataset.int64("width").expect("width"), &[Some(4), None]);
    assert_eq!(dataset.int64("height").expect("height"), &[Some(2), None]);
    let sizes = dataset.int64("size_bytes").expect("size_bytes");
    assert!(sizes.iter().all(Option::is_some));
}

#[test]
fn audio_scan_decodes_wav_duration() {
    setup();
    let dir = tempfile::tempdir().expect("tempdir");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer =
        hound::WavWriter::create(dir.path().join("tone.wav"), spec).expect("create wav");
    for _ in 0..4000 {
        writer.write_sample(0_i16).expect("write sample");
    }
    writer.finalize().expect("finalize wav");
    std::fs::write(dir.path().join("song.mp3"), b"\xff\xfb").expect("write mp3 stub");

    let dataset = scan_audio(dir.path()).expect("scan should succeed");
    assert_eq!(dataset.num_rows(), 2);
    assert_eq!(
        dataset.utf8("file_name").expect("file_name"),
        &[Some("song.mp3".to_string()), Some("tone.wav".to_string())]
    );
    let durations = dataset.float64("duration").expect("duration");
    assert_eq!(durations[0], None);
    assert!((durations[1].expect("wav duration") - 0.5).abs() < 1e-9);
}

#[test]
fn media_scan_missing_directory_is_invalid_path() {
    setup();
    let err = scan_images("/no/such/dir").expect_err("missing dir should fail");
    assert!(matches!(err, DatasetError::InvalidPath(_)));
}
