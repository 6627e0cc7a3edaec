//! Read-only inspection of Parquet file metadata
//!
//! Independent of the decode engine: nothing here touches column data.
//! With `details`, per-column null counts and byte sizes are aggregated
//! across all row groups.

use std::fmt;
use std::fs::File;
use std::path::Path;

use parquet::file::metadata::ParquetMetaDataReader;
use serde::Serialize;

use crate::error::Result;

/// Per-column description.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub physical_type: String,
    pub logical_type: String,
    /// Nulls across all row groups, where statistics are present.
    pub null_count: Option<i64>,
    pub compressed_bytes: Option<i64>,
    pub uncompressed_bytes: Option<i64>,
}

/// Per-row-group layout.
#[derive(Debug, Clone, Serialize)]
pub struct RowGroupInfo {
    pub num_rows: i64,
    pub compressed_bytes: i64,
    pub uncompressed_bytes: i64,
}

/// File-level summary returned by [`read_metadata`].
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub path: String,
    pub num_rows: i64,
    pub num_row_groups: usize,
    pub num_columns: usize,
    pub created_by: Option<String>,
    pub columns: Vec<ColumnInfo>,
    /// Populated only when details are requested.
    pub row_groups: Vec<RowGroupInfo>,
}

/// Summarize a Parquet file without decoding any data.
pub fn read_metadata<P: AsRef<Path>>(path: P, details: bool) -> Result<FileInfo> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = ParquetMetaDataReader::new();
    reader.try_parse(&file)?;
    let metadata = reader.finish()?;

    let file_meta = metadata.file_metadata();
    let descr = file_meta.schema_descr();

    let mut columns: Vec<ColumnInfo> = (0..descr.num_columns())
        .map(|i| {
            let column = descr.column(i);
            ColumnInfo {
                name: column.name().to_string(),
                physical_type: column.physical_type().to_string(),
                logical_type: match column.logical_type() {
                    Some(logical) => format!("{logical:?}"),
                    None => format!("{:?}", column.converted_type()),
                },
                null_count: None,
                compressed_bytes: None,
                uncompressed_bytes: None,
            }
        })
        .collect();

    let mut row_groups = Vec::new();
    if details {
        for group in metadata.row_groups() {
            row_groups.push(RowGroupInfo {
                num_rows: group.num_rows(),
                compressed_bytes: group.compressed_size(),
                uncompressed_bytes: group.total_byte_size(),
            });
            for (col_idx, chunk) in group.columns().iter().enumerate() {
                let info = &mut columns[col_idx];
                if let Some(stats) = chunk.statistics() {
                    if let Some(nulls) = stats.null_count_opt() {
                        *info.null_count.get_or_insert(0) += nulls as i64;
                    }
                }
                *info.compressed_bytes.get_or_insert(0) += chunk.compressed_size();
                *info.uncompressed_bytes.get_or_insert(0) += chunk.uncompressed_size();
            }
        }
    }

    Ok(FileInfo {
        path: path.display().to_string(),
        num_rows: file_meta.num_rows(),
        num_row_groups: metadata.num_row_groups(),
        num_columns: descr.num_columns(),
        created_by: file_meta.created_by().map(|s| s.to_string()),
        columns,
        row_groups,
    })
}

impl fmt::Display for FileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Filename : {}", self.path)?;
        writeln!(f, "Row Groups : {}", self.num_row_groups)?;
        writeln!(f, "Total Rows : {}", self.num_rows)?;
        writeln!(f, "Number of Columns : {}", self.num_columns)?;
        for column in &self.columns {
            write!(
                f,
                "[name:{}, physical:{}, logical:{}",
                column.name, column.physical_type, column.logical_type
            )?;
            if let Some(nulls) = column.null_count {
                write!(f, ", nulls:{nulls}")?;
            }
            if let (Some(compressed), Some(uncompressed)) =
                (column.compressed_bytes, column.uncompressed_bytes)
            {
                write!(f, ", compressed/uncompressed:{compressed}/{uncompressed}")?;
            }
            writeln!(f, "]")?;
        }
        for (idx, group) in self.row_groups.iter().enumerate() {
            writeln!(
                f,
                "row group {} : {} rows, {}/{} bytes",
                idx, group.num_rows, group.compressed_bytes, group.uncompressed_bytes
            )?;
        }
        Ok(())
    }
}
