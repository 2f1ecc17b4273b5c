//! School record ingestion.
//!
//! Loads a school table from CSV, keeps the target population, drops rows
//! without coordinates and splits the rest by participation into the two
//! point sets the matcher works on.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use geolink_ingest::{IngestOptions, load_point_sets};
//!
//! let partition = load_point_sets(Path::new("data/schools.csv"), &IngestOptions::default())?;
//! println!("{} participants", partition.reference.len());
//! ```

mod csv_table;
mod error;
mod options;
mod partition;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv_table::{CsvRow, CsvTable, read_csv_table};

// === Options ===
pub use options::{DEFAULT_ATTRIBUTE_COLUMNS, IngestOptions, PopulationFilter};

// === Partitioning ===
pub use partition::{IngestReport, Partition, load_point_sets, parse_number, partition_table};
