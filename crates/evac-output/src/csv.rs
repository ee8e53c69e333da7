//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_counts.csv`
//! - `evacuations.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{EvacuationRow, OutputResult, TickCountsRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    counts:      Writer<File>,
    evacuations: Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut counts = Writer::from_path(dir.join("tick_counts.csv"))?;
        counts.write_record(["tick", "elapsed_secs", "waiting", "evacuating", "evacuated", "dead"])?;

        let mut evacuations = Writer::from_path(dir.join("evacuations.csv"))?;
        evacuations.write_record(["resident_id", "tick", "elapsed_secs"])?;

        Ok(Self {
            counts,
            evacuations,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_counts(&mut self, row: &TickCountsRow) -> OutputResult<()> {
        self.counts.write_record(&[
            row.tick.to_string(),
            row.elapsed_secs.to_string(),
            row.waiting.to_string(),
            row.evacuating.to_string(),
            row.evacuated.to_string(),
            row.dead.to_string(),
        ])?;
        Ok(())
    }

    fn write_evacuation(&mut self, row: &EvacuationRow) -> OutputResult<()> {
        self.evacuations.write_record(&[
            row.resident_id.to_string(),
            row.tick.to_string(),
            row.elapsed_secs.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.counts.flush()?;
        self.evacuations.flush()?;
        Ok(())
    }
}
