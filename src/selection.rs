//! Row and column selection
//!
//! Both selectors accept a sentinel "take everything" form and a validated
//! explicit form, and both treat an empty effective selection as a fatal
//! configuration problem rather than an empty result.

use std::collections::BTreeSet;

use crate::error::{FrameError, Result};

/// Which columns of the source participate in an operation.
///
/// Explicit positions are 1-based, matching how callers address columns;
/// internally everything is 0-based.
#[derive(Debug, Clone, Default)]
pub enum ColumnSelection {
    /// Every column.
    #[default]
    All,
    /// 1-based positions. The single sentinel `-1` also selects every
    /// column; positions outside `1..=num_columns` are dropped.
    Indices(Vec<i64>),
}

impl ColumnSelection {
    /// Resolve to the sorted set of 0-based positions.
    pub fn resolve(&self, num_columns: usize) -> Result<BTreeSet<usize>> {
        let set: BTreeSet<usize> = match self {
            ColumnSelection::All => (0..num_columns).collect(),
            ColumnSelection::Indices(indices) if indices.len() == 1 && indices[0] == -1 => {
                (0..num_columns).collect()
            }
            ColumnSelection::Indices(indices) => indices
                .iter()
                .filter(|&&i| i > 0 && i <= num_columns as i64)
                .map(|&i| (i - 1) as usize)
                .collect(),
        };
        if set.is_empty() {
            return Err(FrameError::config("no valid column has been selected"));
        }
        Ok(set)
    }
}

/// A compiled per-row keep/skip decision.
#[derive(Debug, Clone)]
pub enum RowMask {
    /// Every source row appears in the output.
    All,
    /// `true` = keep. At least as long as the source row count.
    Keep(Vec<bool>),
}

impl RowMask {
    /// Compile a requested row filter against the true total row count.
    ///
    /// A filter of exactly `[true]` disables filtering entirely — callers
    /// use it as the "no filter" default, so a one-element all-true filter
    /// must keep every row, not just the first. A filter shorter than the
    /// table is extended with `false`: rows it never mentions are excluded.
    pub fn compile(filter: Option<&[bool]>, total_rows: usize) -> Result<RowMask> {
        let Some(filter) = filter else {
            return Ok(RowMask::All);
        };
        Self::ensure_selects_rows(filter)?;
        let kept = filter.iter().filter(|&&keep| keep).count();
        if kept == 1 && filter.len() == 1 {
            return Ok(RowMask::All);
        }
        let mut mask = filter.to_vec();
        if mask.len() < total_rows {
            mask.resize(total_rows, false);
        }
        Ok(RowMask::Keep(mask))
    }

    /// Reject a filter that keeps nothing. Needs no file metadata, so the
    /// caller can run it before opening anything.
    pub fn ensure_selects_rows(filter: &[bool]) -> Result<()> {
        if !filter.iter().any(|&keep| keep) {
            return Err(FrameError::empty_selection(
                "all rows are skipped by the filter",
            ));
        }
        Ok(())
    }

    /// Output row count shared by every selected column.
    pub fn output_rows(&self, total_rows: usize) -> usize {
        match self {
            RowMask::All => total_rows,
            RowMask::Keep(mask) => mask.iter().filter(|&&keep| keep).count(),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, RowMask::All)
    }

    pub(crate) fn cursor(&self) -> MaskCursor<'_> {
        MaskCursor {
            mask: self,
            source: 0,
            out: 0,
        }
    }
}

/// Maps successive source row positions to output slots under a mask.
///
/// Unfiltered, the slot is the source position itself; filtered, kept rows
/// take sequential slots in source order.
#[derive(Debug)]
pub(crate) struct MaskCursor<'a> {
    mask: &'a RowMask,
    source: usize,
    out: usize,
}

impl MaskCursor<'_> {
    /// Consume the current source row, returning its output slot or `None`
    /// when the row is filtered out.
    pub(crate) fn advance(&mut self) -> Option<usize> {
        let source = self.source;
        self.source += 1;
        match self.mask {
            RowMask::All => Some(source),
            RowMask::Keep(mask) => {
                if mask.get(source).copied().unwrap_or(false) {
                    let slot = self.out;
                    self.out += 1;
                    Some(slot)
                } else {
                    None
                }
            }
        }
    }
}
