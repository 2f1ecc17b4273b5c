use std::path::PathBuf;

use geolink_cli::pipeline::DistanceStats;
use geolink_ingest::IngestReport;

#[derive(Debug)]
pub struct MatchSummary {
    pub input: PathBuf,
    pub report: IngestReport,
    pub strategy: &'static str,
    pub matched: usize,
    pub distance: Option<DistanceStats>,
    /// Attribute values that came out null after projection.
    pub missing_values: usize,
    pub written: Vec<PathBuf>,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct InspectSummary {
    pub input: PathBuf,
    pub report: IngestReport,
}
