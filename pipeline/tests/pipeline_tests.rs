//! Integration tests for pipeline sequencing and the built-in operators.

use mmpipe_dataset::{Column, Dataset};
use mmpipe_pipeline::{
    AudioDurationFilter, ColumnarReader, ColumnarWriter, CsvReader, CsvWriter,
    ImageResolutionFilter, KeepPolicy, Pipeline, PipelineError, QualityScoreFilter, TextDeduper,
    TextLengthFilter, TextQualityEvaluator,
};

fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn text_dataset(texts: &[Option<&str>]) -> Dataset {
    Dataset::from_columns(vec![(
        "text".to_string(),
        Column::Utf8(texts.iter().map(|t| t.map(str::to_string)).collect()),
    )])
    .expect("dataset should build")
}

#[test]
fn empty_pipeline_returns_input_unchanged() {
    setup();
    let input = text_dataset(&[Some("a"), Some("b")]);
    let mut pipeline = Pipeline::new();
    pipeline.set_input(input.clone());
    let output = pipeline.run().expect("run should succeed");
    assert_eq!(output, input);
}

#[test]
fn run_without_input_fails_before_any_operator() {
    setup();
    let mut pipeline = Pipeline::new();
    pipeline.add_operator(TextLengthFilter::new("text", 1, None));
    let err = pipeline.run().expect_err("run should fail");
    assert!(matches!(err, PipelineError::NoInput));
}

#[test]
fn rerun_restarts_from_attached_input() {
    setup();
    let mut pipeline = Pipeline::new();
    pipeline
        .add_operator(TextLengthFilter::new("text", 5, None))
        .set_input(text_dataset(&[Some("ab"), Some("abcdefghij")]));
    let first = pipeline.run().expect("first run");
    let second = pipeline.run().expect("second run");
    assert_eq!(first, second);
    assert_eq!(first.num_rows(), 1);
}

#[test]
fn length_filter_scenario() {
    setup();
    let input = text_dataset(&[Some("ab"), Some("abcdefghij")]);
    let mut pipeline = Pipeline::new();
    pipeline
        .add_operator(TextLengthFilter::new("text", 5, None))
        .set_input(input);
    let output = pipeline.run().expect("run should succeed");
    assert_eq!(output.num_rows(), 1);
    assert_eq!(
        output.utf8("text").expect("text column"),
        &[Some("abcdefghij".to_string())]
    );
}

#[test]
fn length_filter_is_idempotent_and_monotonic() {
    setup();
    let input = text_dataset(&[Some("a"), Some("abc"), None, Some("abcdefgh")]);
    let mut once = TextLengthFilter::new("text", 2, Some(5));
    let mut twice = TextLengthFilter::new("text", 2, Some(5));

    use mmpipe_pipeline::Operator as _;
    let first = once.transform(input.clone()).expect("first pass");
    assert!(first.num_rows() <= input.num_rows());
    let second = twice.transform(first.clone()).expect("second pass");
    assert_eq!(first, second);
}

#[test]
fn length_filter_missing_column_fails() {
    setup();
    let input = text_dataset(&[Some("a")]);
    let mut pipeline = Pipeline::new();
    pipeline
        .add_operator(TextLengthFilter::new("body", 1, None))
        .set_input(input);
    let err = pipeline.run().expect_err("missing column should fail");
    assert!(matches!(err, PipelineError::Dataset(_)));
}

#[test]
fn operator_order_is_significant() {
    setup();
    let input = text_dataset(&[Some("Excellent work! Truly great."), Some("meh")]);

    // Score then filter on the score: the filter sees the evaluator's column.
    let mut scored_first = Pipeline::new();
    scored_first
        .add_operator(TextQualityEvaluator::new("text", "quality"))
        .add_operator(QualityScoreFilter::new("quality", 0.05))
        .set_input(input.clone());
    let output = scored_first.run().expect("run should succeed");
    assert_eq!(output.num_rows(), 1);

    // Filter before scoring: the score column does not exist yet.
    let mut filtered_first = Pipeline::new();
    filtered_first
        .add_operator(QualityScoreFilter::new("quality", 0.05))
        .add_operator(TextQualityEvaluator::new("text", "quality"))
        .set_input(input);
    assert!(filtered_first.run().is_err());
}

#[test]
fn quality_score_filter_drops_null_scores() {
    setup();
    let dataset = Dataset::from_columns(vec![
        (
            "text".to_string(),
            Column::Utf8(vec![Some("a".into()), Some("b".into()), Some("c".into())]),
        ),
        (
            "quality_score".to_string(),
            Column::Float64(vec![Some(0.9), None, Some(0.1)]),
        ),
    ])
    .expect("dataset should build");

    let mut pipeline = Pipeline::new();
    pipeline
        .add_operator(QualityScoreFilter::new("quality_score", 0.5))
        .set_input(dataset);
    let output = pipeline.run().expect("run should succeed");
    assert_eq!(output.num_rows(), 1);
    assert_eq!(output.utf8("text").expect("text"), &[Some("a".to_string())]);
}

#[test]
fn evaluator_appends_bounded_scores() {
    setup();
    let input = text_dataset(&[Some("Great! Great! Great?"), Some(""), None]);
    let mut pipeline = Pipeline::new();
    pipeline
        .add_operator(TextQualityEvaluator::new("text", "text_quality_score"))
        .set_input(input);
    let output = pipeline.run().expect("run should succeed");

    let scores = output.float64("text_quality_score").expect("score column");
    for score in scores.iter().flatten() {
        assert!((0.0..=1.0).contains(score));
    }
    // 20 chars, 3 punctuation marks, 3 words.
    let expected = 20.0 / 1000.0 + 3.0 / 20.0 + 3.0 / 100.0;
    assert!((scores[0].expect("score") - expected).abs() < 1e-9);
    assert_eq!(scores[1], Some(0.0));
    assert_eq!(scores[2], Some(0.0));
    // The evaluator adds a column but never removes rows.
    assert_eq!(output.num_rows(), 3);
}

#[test]
fn deduper_keep_first_and_last() {
    setup();
    let input = Dataset::from_columns(vec![
        (
            "text".to_string(),
            Column::Utf8(vec![Some("a".into()), Some("b".into()), Some("a".into())]),
        ),
        (
            "index".to_string(),
            Column::Int64(vec![Some(0), Some(1), Some(2)]),
        ),
    ])
    .expect("dataset should build");

    use mmpipe_pipeline::Operator as _;
    let first = TextDeduper::new("text", KeepPolicy::First)
        .transform(input.clone())
        .expect("dedup first");
    assert_eq!(first.int64("index").expect("index"), &[Some(0), Some(1)]);

    let last = TextDeduper::new("text", KeepPolicy::Last)
        .transform(input.clone())
        .expect("dedup last");
    assert_eq!(last.int64("index").expect("index"), &[Some(1), Some(2)]);

    let none = TextDeduper::new("text", KeepPolicy::None)
        .transform(input)
        .expect("dedup none");
    assert_eq!(none.int64("index").expect("index"), &[Some(1)]);
}

#[test]
fn deduper_is_idempotent() {
    setup();
    let input = text_dataset(&[Some("a"), Some("a"), Some("b"), None, None]);
    use mmpipe_pipeline::Operator as _;
    let once = TextDeduper::new("text", KeepPolicy::First)
        .transform(input)
        .expect("first pass");
    let twice = TextDeduper::new("text", KeepPolicy::First)
        .transform(once.clone())
        .expect("second pass");
    assert_eq!(once, twice);
    assert_eq!(once.num_rows(), 3);
}

#[test]
fn resolution_filter_drops_null_text_then_bounds() {
    setup();
    let dataset = Dataset::from_columns(vec![
        (
            "text".to_string(),
            Column::Utf8(vec![None, Some("cat".into()), Some("dog".into())]),
        ),
        (
            "width".to_string(),
            Column::Int64(vec![Some(800), Some(640), Some(100)]),
        ),
        (
            "height".to_string(),
            Column::Int64(vec![Some(600), Some(480), Some(100)]),
        ),
    ])
    .expect("dataset should build");

    use mmpipe_pipeline::Operator as _;
    let output = ImageResolutionFilter::new("text", 320, 240, None, None)
        .transform(dataset)
        .expect("filter should succeed");
    assert_eq!(output.num_rows(), 1);
    assert_eq!(output.utf8("text").expect("text"), &[Some("cat".to_string())]);
}

#[test]
fn resolution_filter_unset_bounds_keep_everything() {
    setup();
    let dataset = Dataset::from_columns(vec![
        (
            "text".to_string(),
            Column::Utf8(vec![Some("a".into()), Some("b".into())]),
        ),
        ("width".to_string(), Column::Int64(vec![Some(1), None])),
        ("height".to_string(), Column::Int64(vec![Some(1), None])),
    ])
    .expect("dataset should build");

    use mmpipe_pipeline::Operator as _;
    let output = ImageResolutionFilter::new("text", 0, 0, None, None)
        .transform(dataset)
        .expect("filter should succeed");
    // All bounds inactive: even null dimensions survive.
    assert_eq!(output.num_rows(), 2);
}

#[test]
fn duration_filter_bounds() {
    setup();
    let dataset = Dataset::from_columns(vec![(
        "duration".to_string(),
        Column::Float64(vec![Some(0.5), Some(3.0), Some(30.0), None]),
    )])
    .expect("dataset should build");

    use mmpipe_pipeline::Operator as _;
    let output = AudioDurationFilter::new(1.0, Some(10.0))
        .transform(dataset)
        .expect("filter should succeed");
    assert_eq!(output.num_rows(), 1);
    assert_eq!(output.float64("duration").expect("duration"), &[Some(3.0)]);
}

#[test]
fn csv_round_trip_through_pipeline() {
    setup();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rows.csv");
    std::fs::write(&path, "text,len\nab,2\nabcdefghij,10\n").expect("write csv");

    let mut pipeline = Pipeline::new();
    pipeline
        .add_operator(CsvReader::new(&path).expect("reader"))
        .add_operator(TextLengthFilter::new("text", 5, None))
        .add_operator(CsvWriter::new(dir.path().join("out.csv")).expect("writer"))
        .set_input(Dataset::new());
    let output = pipeline.run().expect("run should succeed");

    assert_eq!(output.num_rows(), 1);
    assert_eq!(output.int64("len").expect("len column"), &[Some(10)]);
    let written = std::fs::read_to_string(dir.path().join("out.csv")).expect("read back");
    assert!(written.contains("abcdefghij"));
}

#[test]
fn writers_pass_the_dataset_through_mid_pipeline() {
    setup();
    let dir = tempfile::tempdir().expect("tempdir");
    let input = text_dataset(&[Some("ab"), Some("abcdefghij")]);

    let mut pipeline = Pipeline::new();
    pipeline
        .add_operator(ColumnarWriter::new(dir.path().join("snapshot")).expect("writer"))
        .add_operator(TextLengthFilter::new("text", 5, None))
        .set_input(input.clone());
    let output = pipeline.run().expect("run should succeed");

    // The snapshot holds the pre-filter dataset; the chain kept running.
    assert_eq!(output.num_rows(), 1);
    let mut reread = Pipeline::new();
    reread
        .add_operator(ColumnarReader::new(dir.path().join("snapshot")).expect("reader"))
        .set_input(Dataset::new());
    assert_eq!(reread.run().expect("reread"), input);
}

#[test]
fn reader_construction_rejects_empty_path() {
    setup();
    let err = CsvReader::new("").expect_err("empty path should fail");
    assert!(matches!(err, PipelineError::InvalidConfiguration(_)));
}

#[test]
fn reader_missing_file_fails_at_transform() {
    setup();
    let mut pipeline = Pipeline::new();
    pipeline
        .add_operator(CsvReader::new("/no/such/file.csv").expect("reader"))
        .set_input(Dataset::new());
    assert!(matches!(
        pipeline.run().expect_err("missing file"),
        PipelineError::Dataset(_)
    ));
}

#[test]
fn pipeline_display_lists_operators_in_order() {
    setup();
    let mut pipeline = Pipeline::new();
    pipeline
        .add_operator(TextQualityEvaluator::new("text", "q"))
        .add_operator(QualityScoreFilter::new("q", 0.5));
    assert_eq!(
        pipeline.to_string(),
        "DataPipeline: TextQualityEvaluator -> QualityScoreFilter"
    );
}
