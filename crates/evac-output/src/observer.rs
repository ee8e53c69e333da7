//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use evac_agent::StatusCounts;
use evac_core::{ResidentId, Tick};
use evac_sim::SimObserver;

use crate::row::{EvacuationRow, TickCountsRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes status counts and evacuation events to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_evacuated(&mut self, id: ResidentId, tick: Tick, elapsed_secs: f64) {
        let row = EvacuationRow {
            resident_id: id.0,
            tick: tick.0,
            elapsed_secs,
        };
        let result = self.writer.write_evacuation(&row);
        self.store_err(result);
    }

    fn on_report(&mut self, tick: Tick, elapsed_secs: f64, counts: &StatusCounts) {
        let row = TickCountsRow {
            tick: tick.0,
            elapsed_secs,
            waiting:    counts.waiting as u64,
            evacuating: counts.evacuating as u64,
            evacuated:  counts.evacuated as u64,
            dead:       counts.dead as u64,
        };
        let result = self.writer.write_counts(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _counts: &StatusCounts) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
