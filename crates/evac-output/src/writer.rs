//! The `OutputWriter` trait implemented by backend writers.

use crate::{EvacuationRow, OutputResult, TickCountsRow};

/// Trait implemented by output backends.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with [`SimOutputObserver::take_error`].
///
/// [`SimOutputObserver::take_error`]: crate::SimOutputObserver::take_error
pub trait OutputWriter {
    /// Write one status-counts row.
    fn write_counts(&mut self, row: &TickCountsRow) -> OutputResult<()>;

    /// Write one evacuation event row.
    fn write_evacuation(&mut self, row: &EvacuationRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
