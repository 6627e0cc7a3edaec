use parquet_frame::{read_frame, read_metadata, write_frame, FrameError, ReadOptions, WriteOptions};
use tempfile::TempDir;

use test_helpers::*;

#[test]
fn test_thousand_rows_chunk_into_three_full_groups_and_a_remainder() {
    let dir = TempDir::new().unwrap();
    let path = scratch_path(&dir, "groups.parquet");
    let frame = sequential_frame(1000);
    let options = WriteOptions {
        rows_per_group: 300,
        ..WriteOptions::default()
    };
    write_frame(&frame, &path, &["integer"], &options).unwrap();

    let info = read_metadata(&path, true).unwrap();
    assert_eq!(info.num_rows, 1000);
    assert_eq!(info.num_row_groups, 4);
    let group_rows: Vec<i64> = info.row_groups.iter().map(|g| g.num_rows).collect();
    assert_eq!(group_rows, vec![300, 300, 300, 100]);
}

#[test]
fn test_group_size_larger_than_table_yields_one_group() {
    let dir = TempDir::new().unwrap();
    let path = scratch_path(&dir, "single.parquet");
    let frame = sequential_frame(50);
    let options = WriteOptions {
        rows_per_group: 10_000,
        ..WriteOptions::default()
    };
    write_frame(&frame, &path, &["integer"], &options).unwrap();

    let info = read_metadata(&path, true).unwrap();
    assert_eq!(info.num_row_groups, 1);
    assert_eq!(info.row_groups[0].num_rows, 50);
}

#[test]
fn test_group_sizes_sum_to_total_rows() {
    let dir = TempDir::new().unwrap();
    let path = scratch_path(&dir, "sum.parquet");
    let frame = sequential_frame(777);
    let options = WriteOptions {
        rows_per_group: 128,
        ..WriteOptions::default()
    };
    write_frame(&frame, &path, &["integer"], &options).unwrap();

    let info = read_metadata(&path, true).unwrap();
    let sum: i64 = info.row_groups.iter().map(|g| g.num_rows).sum();
    assert_eq!(sum, 777);
}

#[test]
fn test_zero_group_size_is_fatal_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = scratch_path(&dir, "never.parquet");
    let frame = sequential_frame(10);
    let options = WriteOptions {
        rows_per_group: 0,
        ..WriteOptions::default()
    };
    let err = write_frame(&frame, &path, &["integer"], &options).unwrap_err();
    assert!(matches!(err, FrameError::Config(_)));
    assert!(!path.exists());
}

#[test]
fn test_chunked_file_reads_back_in_order() {
    let dir = TempDir::new().unwrap();
    let path = scratch_path(&dir, "ordered.parquet");
    let frame = sequential_frame(1000);
    let options = WriteOptions {
        rows_per_group: 300,
        ..WriteOptions::default()
    };
    write_frame(&frame, &path, &["integer"], &options).unwrap();

    let back = read_frame(&path, &ReadOptions::default()).unwrap();
    assert_eq!(back, frame);

    // A read batch size smaller than the group size must not change the
    // result either.
    let small_batches = read_frame(
        &path,
        &ReadOptions {
            group_read_size: 64,
            ..ReadOptions::default()
        },
    )
    .unwrap();
    assert_eq!(small_batches, frame);
}
