use parquet_frame::{read_metadata, write_frame, WriteOptions};
use tempfile::TempDir;

use test_helpers::*;

#[test]
fn test_summary_lists_every_column_with_types() {
    let (frame, types) = full_frame();
    let dir = TempDir::new().unwrap();
    let path = scratch_path(&dir, "meta.parquet");
    write_frame(&frame, &path, &types, &WriteOptions::default()).unwrap();

    let info = read_metadata(&path, false).unwrap();
    assert_eq!(info.num_rows, 4);
    assert_eq!(info.num_columns, 7);
    assert_eq!(info.num_row_groups, 1);

    let by_name: Vec<(&str, &str)> = info
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.physical_type.as_str()))
        .collect();
    assert_eq!(
        by_name,
        vec![
            ("id", "INT32"),
            ("price", "DOUBLE"),
            ("active", "BOOLEAN"),
            ("name", "BYTE_ARRAY"),
            ("big", "INT64"),
            ("seen_at", "INT64"),
            ("grade", "BYTE_ARRAY"),
        ]
    );

    // Without details, per-group aggregates are absent
    assert!(info.row_groups.is_empty());
    assert!(info.columns.iter().all(|c| c.null_count.is_none()));
}

#[test]
fn test_details_aggregate_null_counts_and_sizes() {
    let (frame, types) = full_frame();
    let dir = TempDir::new().unwrap();
    let path = scratch_path(&dir, "details.parquet");
    let options = WriteOptions {
        rows_per_group: 2,
        ..WriteOptions::default()
    };
    write_frame(&frame, &path, &types, &options).unwrap();

    let info = read_metadata(&path, true).unwrap();
    assert_eq!(info.num_row_groups, 2);
    assert_eq!(info.row_groups.len(), 2);

    // Each column in full_frame carries exactly one missing value
    for column in &info.columns {
        assert_eq!(column.null_count, Some(1), "column {}", column.name);
        assert!(column.compressed_bytes.unwrap() > 0, "column {}", column.name);
        assert!(column.uncompressed_bytes.unwrap() > 0, "column {}", column.name);
    }
}

#[test]
fn test_timestamp_logical_type_is_reported() {
    let (frame, types) = full_frame();
    let dir = TempDir::new().unwrap();
    let path = scratch_path(&dir, "logical.parquet");
    write_frame(&frame, &path, &types, &WriteOptions::default()).unwrap();

    let info = read_metadata(&path, false).unwrap();
    let seen_at = info.columns.iter().find(|c| c.name == "seen_at").unwrap();
    assert!(seen_at.logical_type.contains("Timestamp"), "{}", seen_at.logical_type);
    let name = info.columns.iter().find(|c| c.name == "name").unwrap();
    assert!(name.logical_type.contains("String"), "{}", name.logical_type);
}

#[test]
fn test_display_is_human_readable() {
    let (frame, types) = full_frame();
    let dir = TempDir::new().unwrap();
    let path = scratch_path(&dir, "display.parquet");
    write_frame(&frame, &path, &types, &WriteOptions::default()).unwrap();

    let info = read_metadata(&path, true).unwrap();
    let text = info.to_string();
    assert!(text.contains("Total Rows : 4"));
    assert!(text.contains("[name:grade"));
    assert!(text.contains("row group 0"));
}
