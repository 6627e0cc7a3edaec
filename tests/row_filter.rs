use parquet_frame::{read_frame, write_frame, Column, FrameError, ReadOptions, WriteOptions};
use tempfile::TempDir;

use test_helpers::*;

/// 100 rows written in groups of 16, so filters cross group boundaries.
fn chunked_file(dir: &TempDir) -> std::path::PathBuf {
    let frame = sequential_frame(100);
    let path = scratch_path(dir, "chunked.parquet");
    let options = WriteOptions {
        rows_per_group: 16,
        ..WriteOptions::default()
    };
    write_frame(&frame, &path, &["integer"], &options).unwrap();
    path
}

#[test]
fn test_filter_keeps_kth_true_in_source_order() {
    let dir = TempDir::new().unwrap();
    let path = chunked_file(&dir);

    // Keep every third row: 0, 3, 6, ...
    let filter: Vec<bool> = (0..100).map(|i| i % 3 == 0).collect();
    let expected: Vec<Option<i32>> = (0..100).filter(|i| i % 3 == 0).map(Some).collect();

    let options = ReadOptions {
        row_filter: Some(filter.clone()),
        ..ReadOptions::default()
    };
    let frame = read_frame(&path, &options).unwrap();

    let kept = filter.iter().filter(|&&b| b).count();
    assert_eq!(frame.num_rows(), kept);
    assert_eq!(frame.column("seq"), Some(&Column::Int32(expected)));
}

#[test]
fn test_filter_spanning_group_boundaries() {
    let dir = TempDir::new().unwrap();
    let path = chunked_file(&dir);

    // Exactly the last row of each 16-row group plus the first row overall
    let mut filter = vec![false; 100];
    filter[0] = true;
    for end in [15usize, 31, 47, 63, 79, 95] {
        filter[end] = true;
    }
    let options = ReadOptions {
        row_filter: Some(filter),
        ..ReadOptions::default()
    };
    let frame = read_frame(&path, &options).unwrap();
    assert_eq!(
        frame.column("seq"),
        Some(&Column::Int32(vec![
            Some(0),
            Some(15),
            Some(31),
            Some(47),
            Some(63),
            Some(79),
            Some(95),
        ]))
    );
}

#[test]
fn test_short_filter_excludes_unmentioned_rows() {
    let dir = TempDir::new().unwrap();
    let path = chunked_file(&dir);

    // Rows 5..100 are never mentioned, so they are dropped
    let options = ReadOptions {
        row_filter: Some(vec![true, false, true, false, true]),
        ..ReadOptions::default()
    };
    let frame = read_frame(&path, &options).unwrap();
    assert_eq!(
        frame.column("seq"),
        Some(&Column::Int32(vec![Some(0), Some(2), Some(4)]))
    );
}

#[test]
fn test_single_true_filter_selects_every_row() {
    let dir = TempDir::new().unwrap();
    let path = chunked_file(&dir);

    let options = ReadOptions {
        row_filter: Some(vec![true]),
        ..ReadOptions::default()
    };
    let frame = read_frame(&path, &options).unwrap();
    assert_eq!(frame.num_rows(), 100);
}

#[test]
fn test_all_false_filter_fails_before_touching_the_file() {
    // A nonexistent path: if the filter check ran after open, this would
    // surface as an IO error instead.
    let options = ReadOptions {
        row_filter: Some(vec![false, false, false]),
        ..ReadOptions::default()
    };
    let err = read_frame("/nonexistent/never.parquet", &options).unwrap_err();
    assert!(matches!(err, FrameError::EmptySelection(_)));
}

#[test]
fn test_filter_longer_than_table_leaves_trailing_missing_slots() {
    let dir = TempDir::new().unwrap();
    let path = chunked_file(&dir);

    // 102 entries for 100 rows; the two trailing trues can never match a
    // source row, so their output slots stay missing.
    let mut filter = vec![false; 102];
    filter[0] = true;
    filter[100] = true;
    filter[101] = true;
    let options = ReadOptions {
        row_filter: Some(filter),
        ..ReadOptions::default()
    };
    let frame = read_frame(&path, &options).unwrap();
    assert_eq!(
        frame.column("seq"),
        Some(&Column::Int32(vec![Some(0), None, None]))
    );
}

#[test]
fn test_filtered_output_rows_match_across_columns() {
    let (frame, types) = full_frame();
    let dir = TempDir::new().unwrap();
    let path = scratch_path(&dir, "multi.parquet");
    write_frame(&frame, &path, &types, &WriteOptions::default()).unwrap();

    let options = ReadOptions {
        row_filter: Some(vec![true, false, true, false]),
        ..ReadOptions::default()
    };
    let back = read_frame(&path, &options).unwrap();
    assert_eq!(back.num_rows(), 2);
    for name in back.names() {
        assert_eq!(back.column(name).unwrap().len(), 2, "column {name}");
    }
    // Row 2 of the source (a missing name) is the second output row
    assert_eq!(
        back.column("name"),
        Some(&Column::Utf8(vec![Some("alice".to_string()), None]))
    );
}
