//! The column writer engine: frame columns into a Parquet file
//!
//! Each selected column is resolved against the type registry, scanned once
//! for validity, and encoded as a null-aware Arrow array. Only when every
//! column has been validated and encoded is the output file created, so a
//! bad column or unknown type never leaves a partial file behind. Physical
//! row-group splitting belongs to the Parquet writer; this module's job is
//! to pick and validate the group size.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use arrow_array::{
    ArrayRef, BooleanArray, Float64Array, Int32Array, Int64Array, StringArray,
    TimestampNanosecondArray,
};
use arrow_buffer::NullBuffer;
use arrow_schema::{Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::info;

use crate::error::{FrameError, Result};
use crate::frame::{carrier_is_null, carrier_to_i64, Column, Frame};
use crate::selection::ColumnSelection;
use crate::types::PhysicalType;

/// Options for [`write_frame`].
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Columns to write.
    pub columns: ColumnSelection,
    /// Target rows per row group; the final group holds any remainder.
    pub rows_per_group: usize,
    pub compression: Compression,
    /// Log a layout summary before encoding.
    pub verbose: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            columns: ColumnSelection::All,
            rows_per_group: 65_536,
            compression: Compression::SNAPPY,
            verbose: false,
        }
    }
}

/// Write selected columns of a frame to a Parquet file.
///
/// `logical_types` is parallel to the frame's columns and names each
/// column's declared logical type (`"integer"`, `"integer64"`,
/// `"nanotime"`, `"numeric"`, `"character"`, `"factor"`, `"logical"`).
/// An unknown name for any selected column fails the whole write before
/// the output file is created.
pub fn write_frame<P, S>(
    frame: &Frame,
    path: P,
    logical_types: &[S],
    options: &WriteOptions,
) -> Result<()>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    if options.rows_per_group == 0 {
        return Err(FrameError::config("rows per group must be greater than 0"));
    }
    if logical_types.len() != frame.num_columns() {
        return Err(FrameError::config(format!(
            "{} logical types declared for {} columns",
            logical_types.len(),
            frame.num_columns()
        )));
    }
    let selected: Vec<usize> = options.columns.resolve(frame.num_columns())?.into_iter().collect();

    let total_rows = frame.num_rows();
    let group_rows = options.rows_per_group.min(total_rows).max(1);

    if options.verbose {
        log_summary(frame, path, logical_types, &selected, total_rows, group_rows);
    }

    let mut fields = Vec::with_capacity(selected.len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(selected.len());
    for &idx in &selected {
        let (name, column) = frame
            .column_at(idx)
            .ok_or_else(|| FrameError::config(format!("column {} out of range", idx + 1)))?;
        let logical = logical_types[idx].as_ref();
        let physical = PhysicalType::for_logical(logical)
            .ok_or_else(|| FrameError::unsupported_type(name, logical))?;
        arrays.push(encode_column(name, column, logical, physical)?);
        fields.push(Field::new(name, physical.to_arrow(), true));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;
    let props = WriterProperties::builder()
        .set_compression(options.compression)
        .set_max_row_group_size(group_rows)
        .build();

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn log_summary<S: AsRef<str>>(
    frame: &Frame,
    path: &Path,
    logical_types: &[S],
    selected: &[usize],
    total_rows: usize,
    group_rows: usize,
) {
    let (full_groups, remainder) = if total_rows > group_rows {
        (total_rows / group_rows, total_rows % group_rows)
    } else {
        (1, 0)
    };
    info!(path = %path.display(), "writing parquet file");
    info!("total rows: {total_rows}");
    info!("total columns: {}", frame.num_columns());
    info!("selected columns:");
    for &idx in selected {
        if let Some((name, _)) = frame.column_at(idx) {
            info!(
                "[id:{}, name:{}, type:{}]",
                idx + 1,
                name,
                logical_types[idx].as_ref()
            );
        }
    }
    info!("row groups: {full_groups}");
    info!("rows per group: {group_rows}");
    info!("row remainder: {remainder}");
}

/// Encode one column as the Arrow array its physical type calls for.
///
/// Validity is computed in full before the array is constructed; the
/// builders underneath are append-once and cannot be patched for
/// nullability afterward.
fn encode_column(
    name: &str,
    column: &Column,
    logical: &str,
    physical: PhysicalType,
) -> Result<ArrayRef> {
    let array: ArrayRef = match (physical, column) {
        // Carrier columns: the payload is recovered with a bit copy, never
        // a numeric cast, and the negative-zero bit pattern means missing.
        (PhysicalType::Int64, Column::Int64(slots)) => {
            let validity: Vec<bool> = slots.iter().map(|&s| !carrier_is_null(s)).collect();
            let payloads: Vec<i64> = slots.iter().map(|&s| carrier_to_i64(s)).collect();
            Arc::new(Int64Array::new(
                payloads.into(),
                Some(NullBuffer::from(validity)),
            ))
        }
        (PhysicalType::TimestampNanos, Column::Timestamp(slots)) => {
            let validity: Vec<bool> = slots.iter().map(|&s| !carrier_is_null(s)).collect();
            let payloads: Vec<i64> = slots.iter().map(|&s| carrier_to_i64(s)).collect();
            Arc::new(TimestampNanosecondArray::new(
                payloads.into(),
                Some(NullBuffer::from(validity)),
            ))
        }
        (PhysicalType::Int32, Column::Int32(values)) => Arc::new(Int32Array::from(values.clone())),
        (PhysicalType::Float64, Column::Float64(values)) => {
            Arc::new(Float64Array::from(values.clone()))
        }
        (PhysicalType::Boolean, Column::Boolean(values)) => {
            Arc::new(BooleanArray::from(values.clone()))
        }
        (PhysicalType::Utf8, Column::Utf8(values)) => {
            Arc::new(StringArray::from_iter(values.iter().map(|v| v.as_deref())))
        }
        (PhysicalType::Utf8, Column::Factor { codes, levels }) => {
            let mut lowered: Vec<Option<&str>> = Vec::with_capacity(codes.len());
            for code in codes {
                match code {
                    None => lowered.push(None),
                    Some(c) => {
                        let level = levels.get(*c as usize).ok_or_else(|| {
                            FrameError::conversion(format!(
                                "column '{name}' has factor code {c} outside its {} levels",
                                levels.len()
                            ))
                        })?;
                        lowered.push(Some(level.as_str()));
                    }
                }
            }
            Arc::new(StringArray::from(lowered))
        }
        (_, column) => {
            return Err(FrameError::config(format!(
                "column '{}' declared as '{}' but its storage is {}",
                name,
                logical,
                column.storage_name()
            )))
        }
    };
    Ok(array)
}
