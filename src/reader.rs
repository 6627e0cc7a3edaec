//! The column reader engine: Parquet row groups into frame columns
//!
//! Each selected column is decoded by walking the file's row groups in
//! order, one group's column chunk materialized at a time, writing values
//! into an output buffer preallocated at the shared output capacity. Nulls
//! become the column's missing-value marker; timestamps are normalized to
//! nanoseconds; 64-bit integers and timestamps land bit-for-bit in `f64`
//! carrier slots.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use arrow_array::types::{
    ArrowPrimitiveType, TimestampMicrosecondType, TimestampMillisecondType,
    TimestampNanosecondType, TimestampSecondType,
};
use arrow_array::{
    Array, ArrayRef, BinaryArray, BooleanArray, Float64Array, Int32Array, Int64Array,
    PrimitiveArray, StringArray,
};
use arrow_schema::{DataType, SchemaRef, TimeUnit};
use parquet::arrow::arrow_reader::{
    ArrowReaderMetadata, ArrowReaderOptions, ParquetRecordBatchReaderBuilder,
};
use parquet::arrow::ProjectionMask;
use tracing::{debug, info};

use crate::error::{FrameError, Result};
use crate::frame::{carrier_from_i64, carrier_null, Column, Frame};
use crate::selection::{ColumnSelection, RowMask};
use crate::types::PhysicalType;

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_MICRO: i64 = 1_000;

/// Options for [`read_frame`].
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Columns to materialize.
    pub columns: ColumnSelection,
    /// Optional per-row keep mask; see [`RowMask::compile`] for the exact
    /// semantics.
    pub row_filter: Option<Vec<bool>>,
    /// Upper bound on rows decoded per batch within one row group.
    pub group_read_size: usize,
    /// Columns decoded concurrently. 0 or 1 decodes sequentially; the
    /// result is identical either way.
    pub threads: usize,
    /// Log a schema and layout summary before decoding.
    pub verbose: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            columns: ColumnSelection::All,
            row_filter: None,
            group_read_size: 65_536,
            threads: 1,
            verbose: false,
        }
    }
}

/// Read a Parquet file into a [`Frame`].
pub fn read_frame<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Frame> {
    FrameReader::open(path.as_ref(), options)?.read()
}

struct FrameReader<'a> {
    path: PathBuf,
    metadata: ArrowReaderMetadata,
    schema: SchemaRef,
    total_rows: usize,
    mask: RowMask,
    /// Output rows per column, shared so every column agrees on length.
    capacity: usize,
    /// 0-based positions of the selected columns, ascending.
    selected: Vec<usize>,
    options: &'a ReadOptions,
}

impl<'a> FrameReader<'a> {
    fn open(path: &Path, options: &'a ReadOptions) -> Result<Self> {
        if options.group_read_size == 0 {
            return Err(FrameError::config("read size must be greater than 0"));
        }
        // Checked before the file is touched: a filter keeping nothing is a
        // caller mistake, not an empty result.
        if let Some(filter) = &options.row_filter {
            RowMask::ensure_selects_rows(filter)?;
        }

        let file = File::open(path)?;
        let metadata = ArrowReaderMetadata::load(&file, ArrowReaderOptions::new())?;
        let schema = metadata.schema().clone();
        let total_rows = metadata.metadata().file_metadata().num_rows() as usize;

        let mask = RowMask::compile(options.row_filter.as_deref(), total_rows)?;
        let capacity = mask.output_rows(total_rows);
        let selected: Vec<usize> = options
            .columns
            .resolve(schema.fields().len())?
            .into_iter()
            .collect();

        let reader = Self {
            path: path.to_path_buf(),
            metadata,
            schema,
            total_rows,
            mask,
            capacity,
            selected,
            options,
        };
        if options.verbose {
            reader.log_summary();
        }
        Ok(reader)
    }

    fn log_summary(&self) {
        info!(path = %self.path.display(), "reading parquet file");
        info!("total rows: {}", self.total_rows);
        info!("total columns: {}", self.schema.fields().len());
        info!("selected columns:");
        for &idx in &self.selected {
            let field = self.schema.field(idx);
            let logical = PhysicalType::from_arrow(field.data_type())
                .map(|p| p.logical_name())
                .unwrap_or("unsupported");
            info!(
                "[id:{}, name:{}, type:{}, as:{}]",
                idx + 1,
                field.name(),
                field.data_type(),
                logical
            );
        }
        info!("row groups: {}", self.metadata.metadata().num_row_groups());
        info!("read size: {}", self.options.group_read_size);
        info!(
            "row filter: {}",
            if self.mask.is_all() { "none" } else { "active" }
        );
        info!("output rows: {}", self.capacity);
    }

    fn read(self) -> Result<Frame> {
        let columns = if self.options.threads > 1 && self.selected.len() > 1 {
            self.read_columns_parallel()?
        } else {
            let mut columns = Vec::with_capacity(self.selected.len());
            for &idx in &self.selected {
                let column = self.read_column(idx)?;
                columns.push((self.schema.field(idx).name().to_string(), column));
            }
            columns
        };

        let mut frame = Frame::new();
        for (name, column) in columns {
            frame.push_column(name, column)?;
        }
        Ok(frame)
    }

    /// Fan the selected columns out over a bounded pool of scoped threads.
    ///
    /// Each worker pulls the next unclaimed column and owns that column's
    /// output buffer outright, so the only shared state is the dispenser.
    /// Results are reassembled by selection position, which keeps the
    /// output identical to the sequential path.
    fn read_columns_parallel(&self) -> Result<Vec<(String, Column)>> {
        let next = AtomicUsize::new(0);
        let workers = self.options.threads.min(self.selected.len());
        let mut slots: Vec<Option<Result<Column>>> = Vec::new();
        slots.resize_with(self.selected.len(), || None);

        std::thread::scope(|scope| {
            let next = &next;
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    scope.spawn(move || {
                        let mut done = Vec::new();
                        loop {
                            let slot = next.fetch_add(1, Ordering::Relaxed);
                            let Some(&col_idx) = self.selected.get(slot) else {
                                break;
                            };
                            done.push((slot, self.read_column(col_idx)));
                        }
                        done
                    })
                })
                .collect();
            for handle in handles {
                match handle.join() {
                    Ok(done) => {
                        for (slot, outcome) in done {
                            slots[slot] = Some(outcome);
                        }
                    }
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
        });

        self.selected
            .iter()
            .zip(slots)
            .map(|(&idx, outcome)| {
                let column = outcome.unwrap_or_else(|| {
                    Err(FrameError::conversion(format!(
                        "column {} was never decoded",
                        idx + 1
                    )))
                })?;
                Ok((self.schema.field(idx).name().to_string(), column))
            })
            .collect()
    }

    fn read_column(&self, col_idx: usize) -> Result<Column> {
        let field = self.schema.field(col_idx);
        debug!(column = %field.name(), data_type = %field.data_type(), "decoding column");
        match field.data_type() {
            DataType::Int64 => {
                let slots = self.read_into::<Int64Array, _, _>(col_idx, carrier_null(), |a, i| {
                    Ok(carrier_from_i64(a.value(i)))
                })?;
                Ok(Column::Int64(slots))
            }
            DataType::Float64 => {
                let values = self
                    .read_into::<Float64Array, _, _>(col_idx, None, |a, i| Ok(Some(a.value(i))))?;
                Ok(Column::Float64(values))
            }
            DataType::Int32 => {
                let values = self
                    .read_into::<Int32Array, _, _>(col_idx, None, |a, i| Ok(Some(a.value(i))))?;
                Ok(Column::Int32(values))
            }
            DataType::Boolean => {
                let values = self
                    .read_into::<BooleanArray, _, _>(col_idx, None, |a, i| Ok(Some(a.value(i))))?;
                Ok(Column::Boolean(values))
            }
            DataType::Utf8 => {
                let values = self.read_into::<StringArray, _, _>(col_idx, None, |a, i| {
                    Ok(Some(a.value(i).to_string()))
                })?;
                Ok(Column::Utf8(values))
            }
            // Binary columns come back as strings, replacing any invalid
            // UTF-8 rather than failing the read.
            DataType::Binary => {
                let values = self.read_into::<BinaryArray, _, _>(col_idx, None, |a, i| {
                    Ok(Some(String::from_utf8_lossy(a.value(i)).into_owned()))
                })?;
                Ok(Column::Utf8(values))
            }
            // The declared timezone, if any, is ignored: stored ticks are
            // UTC-normalized and only the unit matters here.
            DataType::Timestamp(unit, _) => {
                let slots = match unit {
                    TimeUnit::Second => {
                        self.read_ticks::<TimestampSecondType>(col_idx, NANOS_PER_SECOND)?
                    }
                    TimeUnit::Millisecond => {
                        self.read_ticks::<TimestampMillisecondType>(col_idx, NANOS_PER_MILLI)?
                    }
                    TimeUnit::Microsecond => {
                        self.read_ticks::<TimestampMicrosecondType>(col_idx, NANOS_PER_MICRO)?
                    }
                    TimeUnit::Nanosecond => self.read_ticks::<TimestampNanosecondType>(col_idx, 1)?,
                };
                Ok(Column::Timestamp(slots))
            }
            other => Err(FrameError::unsupported_type(
                field.name(),
                format!("{other}"),
            )),
        }
    }

    /// Decode a timestamp column, scaling source ticks to nanoseconds and
    /// packing them bit-for-bit into carrier slots.
    fn read_ticks<T>(&self, col_idx: usize, scale: i64) -> Result<Vec<f64>>
    where
        T: ArrowPrimitiveType<Native = i64>,
    {
        let name = self.schema.field(col_idx).name().to_string();
        self.read_into::<PrimitiveArray<T>, _, _>(col_idx, carrier_null(), move |a, i| {
            let ticks = a.value(i);
            let nanos = ticks.checked_mul(scale).ok_or_else(|| {
                FrameError::conversion(format!(
                    "column '{name}': timestamp tick {ticks} overflows the nanosecond range"
                ))
            })?;
            Ok(carrier_from_i64(nanos))
        })
    }

    /// Walk the row groups of one column in order, converting each present
    /// value into its output slot.
    ///
    /// The output buffer is allocated once at the shared capacity and
    /// prefilled with the missing-value marker, so a null source value
    /// simply leaves its slot untouched. Exactly one row group's column
    /// chunk is materialized at a time, which bounds peak memory to one
    /// group's worth of one column.
    fn read_into<A, T, F>(&self, col_idx: usize, null_marker: T, convert: F) -> Result<Vec<T>>
    where
        A: Array + 'static,
        T: Clone,
        F: Fn(&A, usize) -> Result<T>,
    {
        let mut out = vec![null_marker; self.capacity];
        let mut cursor = self.mask.cursor();
        let file = File::open(&self.path)?;
        let column_name = self.schema.field(col_idx).name();
        let num_groups = self.metadata.metadata().num_row_groups();

        for group_idx in 0..num_groups {
            let group_rows = self
                .metadata
                .metadata()
                .row_group(group_idx)
                .num_rows() as usize;
            let batch_size = self.options.group_read_size.min(group_rows.max(1));
            let projection = ProjectionMask::roots(
                self.metadata.metadata().file_metadata().schema_descr(),
                [col_idx],
            );
            let reader = ParquetRecordBatchReaderBuilder::new_with_metadata(
                file.try_clone()?,
                self.metadata.clone(),
            )
            .with_row_groups(vec![group_idx])
            .with_projection(projection)
            .with_batch_size(batch_size)
            .build()?;

            for batch in reader {
                let batch = batch?;
                let array = downcast_column::<A>(batch.column(0), column_name)?;
                for i in 0..array.len() {
                    let Some(slot) = cursor.advance() else {
                        continue;
                    };
                    if !array.is_null(i) {
                        out[slot] = convert(array, i)?;
                    }
                }
            }
        }
        Ok(out)
    }
}

fn downcast_column<'a, A: Array + 'static>(array: &'a ArrayRef, column: &str) -> Result<&'a A> {
    array.as_any().downcast_ref::<A>().ok_or_else(|| {
        FrameError::conversion(format!(
            "column '{}' could not be read as {}",
            column,
            std::any::type_name::<A>()
        ))
    })
}
