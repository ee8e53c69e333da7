//! `evac-output` — CSV output writers for evacuation runs.
//!
//! Two files are produced per run:
//!
//! | File               | One row per…                | Columns                                                        |
//! |--------------------|-----------------------------|----------------------------------------------------------------|
//! | `tick_counts.csv`  | reporting interval          | `tick`, `elapsed_secs`, `waiting`, `evacuating`, `evacuated`, `dead` |
//! | `evacuations.csv`  | resident reaching shelter   | `resident_id`, `tick`, `elapsed_secs`                          |
//!
//! The backend implements [`OutputWriter`] and is driven by
//! [`SimOutputObserver`], which implements `evac_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use evac_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{EvacuationRow, TickCountsRow};
pub use writer::OutputWriter;
