//! The in-memory tabular representation
//!
//! A [`Frame`] is an ordered, name-keyed collection of equal-length typed
//! columns. Most column kinds mark a missing value with `None`. The two
//! carrier kinds ([`Column::Int64`] and [`Column::Timestamp`]) instead
//! transport a 64-bit payload bit-for-bit inside `f64` slots, because the
//! hosts this representation is exchanged with have no wide integer storage
//! of their own; for those, the negative-zero bit pattern marks a missing
//! value.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::error::{FrameError, Result};

/// Bit pattern of negative zero: the missing-value marker for 64-bit
/// payloads transported inside `f64` carrier slots.
///
/// The same bits read back as `i64::MIN`, the missing-value encoding of
/// 64-bit-integer host packages, so the two views of "missing" coincide.
/// The flip side: a genuine `i64::MIN` datum is indistinguishable from a
/// missing one.
pub const CARRIER_NULL_BITS: u64 = 0x8000_0000_0000_0000;

/// The carrier slot holding the missing-value marker.
pub fn carrier_null() -> f64 {
    f64::from_bits(CARRIER_NULL_BITS)
}

/// Pack a 64-bit integer payload into a carrier slot. Bit copy, not a
/// numeric cast: the full 64 bits survive.
pub fn carrier_from_i64(value: i64) -> f64 {
    f64::from_bits(value as u64)
}

/// Recover the 64-bit integer payload from a carrier slot.
pub fn carrier_to_i64(slot: f64) -> i64 {
    slot.to_bits() as i64
}

/// Whether a carrier slot holds the missing-value marker.
pub fn carrier_is_null(slot: f64) -> bool {
    slot.to_bits() == CARRIER_NULL_BITS
}

/// One column of a frame.
#[derive(Debug, Clone)]
pub enum Column {
    /// 32-bit integers
    Int32(Vec<Option<i32>>),
    /// 64-bit floats
    Float64(Vec<Option<f64>>),
    /// Booleans
    Boolean(Vec<Option<bool>>),
    /// UTF-8 strings
    Utf8(Vec<Option<String>>),
    /// 64-bit integers transported bit-for-bit inside `f64` slots
    Int64(Vec<f64>),
    /// Nanosecond timestamps transported bit-for-bit inside `f64` slots
    Timestamp(Vec<f64>),
    /// Categorical values: 0-based codes into a level table
    Factor {
        codes: Vec<Option<u32>>,
        levels: Vec<String>,
    },
}

impl Column {
    /// Number of rows in the column
    pub fn len(&self) -> usize {
        match self {
            Column::Int32(v) => v.len(),
            Column::Float64(v) => v.len(),
            Column::Boolean(v) => v.len(),
            Column::Utf8(v) => v.len(),
            Column::Int64(v) => v.len(),
            Column::Timestamp(v) => v.len(),
            Column::Factor { codes, .. } => codes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name of the storage kind, for error messages
    pub fn storage_name(&self) -> &'static str {
        match self {
            Column::Int32(_) => "int32",
            Column::Float64(_) => "float64",
            Column::Boolean(_) => "boolean",
            Column::Utf8(_) => "utf8",
            Column::Int64(_) => "int64 carrier",
            Column::Timestamp(_) => "timestamp carrier",
            Column::Factor { .. } => "factor",
        }
    }

    /// Build an [`Column::Int64`] carrier column from plain integers.
    pub fn from_i64s<I: IntoIterator<Item = Option<i64>>>(values: I) -> Self {
        Column::Int64(Self::pack_carrier(values))
    }

    /// Build a [`Column::Timestamp`] carrier column from epoch nanoseconds.
    pub fn from_timestamp_nanos<I: IntoIterator<Item = Option<i64>>>(values: I) -> Self {
        Column::Timestamp(Self::pack_carrier(values))
    }

    fn pack_carrier<I: IntoIterator<Item = Option<i64>>>(values: I) -> Vec<f64> {
        values
            .into_iter()
            .map(|v| match v {
                Some(payload) => carrier_from_i64(payload),
                None => carrier_null(),
            })
            .collect()
    }

    /// View a carrier column as its integer payloads, `None` where the slot
    /// holds the missing-value marker. Returns `None` for non-carrier
    /// columns.
    pub fn carrier_i64s(&self) -> Option<Vec<Option<i64>>> {
        let slots = match self {
            Column::Int64(v) | Column::Timestamp(v) => v,
            _ => return None,
        };
        Some(
            slots
                .iter()
                .map(|&s| (!carrier_is_null(s)).then(|| carrier_to_i64(s)))
                .collect(),
        )
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Column::Int32(a), Column::Int32(b)) => a == b,
            (Column::Boolean(a), Column::Boolean(b)) => a == b,
            (Column::Utf8(a), Column::Utf8(b)) => a == b,
            // NaN-aware: a missing float compares equal to a missing float,
            // and a genuine NaN to a genuine NaN
            (Column::Float64(a), Column::Float64(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|(x, y)| x.map(OrderedFloat) == y.map(OrderedFloat))
            }
            // Carrier slots compare by bit pattern, never numerically
            (Column::Int64(a), Column::Int64(b)) | (Column::Timestamp(a), Column::Timestamp(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
            }
            (
                Column::Factor { codes: a, levels: al },
                Column::Factor { codes: b, levels: bl },
            ) => a == b && al == bl,
            _ => false,
        }
    }
}

/// An ordered, name-keyed collection of equal-length columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: IndexMap<String, Column>,
    num_rows: usize,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. The first column fixes the frame's row count; every
    /// later column must match it, and names must be unique.
    pub fn push_column<S: Into<String>>(&mut self, name: S, column: Column) -> Result<()> {
        let name = name.into();
        if self.columns.is_empty() {
            self.num_rows = column.len();
        } else if column.len() != self.num_rows {
            return Err(FrameError::config(format!(
                "column '{}' has {} rows but the frame has {}",
                name,
                column.len(),
                self.num_rows
            )));
        }
        if self.columns.contains_key(&name) {
            return Err(FrameError::config(format!(
                "duplicate column name '{name}'"
            )));
        }
        self.columns.insert(name, column);
        Ok(())
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in frame order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|k| k.as_str())
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Look up a column by 0-based position
    pub fn column_at(&self, index: usize) -> Option<(&str, &Column)> {
        self.columns
            .get_index(index)
            .map(|(name, column)| (name.as_str(), column))
    }
}
