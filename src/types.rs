//! The type registry: which on-disk types exist, what they are called in
//! memory, and how the two map onto each other.

use arrow_schema::{DataType, TimeUnit};

/// On-disk physical types this engine reads and writes.
///
/// A closed set: dispatch over it is exhaustive, and anything outside it is
/// rejected with an unsupported-type error rather than coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalType {
    Boolean,
    Int32,
    Int64,
    Float64,
    Utf8,
    TimestampNanos,
}

impl PhysicalType {
    /// Resolve a declared logical type name to its on-disk physical type.
    ///
    /// `factor` lowers to plain strings; `integer64` and `nanotime` travel
    /// as reinterpreted 64-bit payloads.
    pub fn for_logical(name: &str) -> Option<PhysicalType> {
        Some(match name {
            "integer" => PhysicalType::Int32,
            "integer64" => PhysicalType::Int64,
            "nanotime" => PhysicalType::TimestampNanos,
            "numeric" => PhysicalType::Float64,
            "character" | "factor" => PhysicalType::Utf8,
            "logical" => PhysicalType::Boolean,
            _ => return None,
        })
    }

    /// Classify an Arrow column type, if it is one this engine decodes.
    ///
    /// All timestamp tick units classify as nanosecond timestamps; the
    /// reader normalizes the ticks.
    pub fn from_arrow(data_type: &DataType) -> Option<PhysicalType> {
        Some(match data_type {
            DataType::Boolean => PhysicalType::Boolean,
            DataType::Int32 => PhysicalType::Int32,
            DataType::Int64 => PhysicalType::Int64,
            DataType::Float64 => PhysicalType::Float64,
            DataType::Utf8 | DataType::Binary => PhysicalType::Utf8,
            DataType::Timestamp(_, _) => PhysicalType::TimestampNanos,
            _ => return None,
        })
    }

    /// The logical type name a column of this physical type decodes to.
    pub fn logical_name(&self) -> &'static str {
        match self {
            PhysicalType::Boolean => "logical",
            PhysicalType::Int32 => "integer",
            PhysicalType::Int64 => "integer64",
            PhysicalType::Float64 => "numeric",
            PhysicalType::Utf8 => "character",
            PhysicalType::TimestampNanos => "nanotime",
        }
    }

    /// The Arrow type columns of this physical type are encoded as.
    pub fn to_arrow(&self) -> DataType {
        match self {
            PhysicalType::Boolean => DataType::Boolean,
            PhysicalType::Int32 => DataType::Int32,
            PhysicalType::Int64 => DataType::Int64,
            PhysicalType::Float64 => DataType::Float64,
            PhysicalType::Utf8 => DataType::Utf8,
            PhysicalType::TimestampNanos => DataType::Timestamp(TimeUnit::Nanosecond, None),
        }
    }
}
