//! Conversion between Parquet files and an in-memory data frame
//!
//! `parquet-frame` moves tabular data between Parquet's row-group-chunked,
//! strongly-typed columnar files and a [`Frame`]: an ordered, name-keyed
//! collection of typed columns. It wraps the Apache parquet-rs crate with an
//! API focused on whole-table reads and writes.
//!
//! # Key Components
//!
//! - **Reader**: row-group-at-a-time column decoding through [`read_frame`]
//!   - Column selection by 1-based position (or all columns)
//!   - Per-row boolean filtering applied during decode
//!   - Timestamp tick units normalized to nanoseconds
//!   - Optional multi-column decode parallelism
//!
//! - **Writer**: whole-frame encoding through [`write_frame`]
//!   - Logical type names resolved against a closed physical-type registry
//!   - Null-aware array construction (validity computed up front)
//!   - Fixed row-group sizing with a final remainder group
//!   - Configurable compression
//!
//! - **Frame**: the in-memory representation
//!   - `Option`-based null markers for fixed-width and string columns
//!   - 64-bit integers and nanosecond timestamps transported bit-for-bit
//!     inside `f64` carrier slots, where the negative-zero bit pattern
//!     marks a missing value
//!
//! - **Metadata**: read-only file inspection through [`read_metadata`],
//!   independent of the decode engine
//!
//! # Design Philosophy
//!
//! One call is one operation: a read or write runs to completion on the
//! calling stack or fails with a terminal error. There is no partial
//! success; configuration problems are rejected before any I/O wherever the
//! check does not need file metadata, and an unsupported type anywhere in
//! the selection aborts the whole operation.

pub mod error;
pub mod frame;
pub mod metadata;
pub mod reader;
pub mod selection;
pub mod types;
pub mod writer;

#[cfg(test)]
pub mod test_utils;

pub use error::{FrameError, Result};
pub use frame::{Column, Frame};
pub use metadata::{read_metadata, ColumnInfo, FileInfo, RowGroupInfo};
pub use reader::{read_frame, ReadOptions};
pub use selection::{ColumnSelection, RowMask};
pub use types::PhysicalType;
pub use writer::{write_frame, WriteOptions};
