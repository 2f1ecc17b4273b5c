//! Ingest, match and link stages composed into one run.
//!
//! Each stage is a plain function call on the previous stage's output; file
//! writing is left to [`write_outputs`] so a dry run can stop before it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use geolink_ingest::{IngestOptions, Partition, load_point_sets};
use geolink_match::{LinkOptions, LinkageBuilder, MatchOptions, NearestMatcher};
use geolink_model::{AttributeProjection, Linkage, MatchResult};
use geolink_output::{
    CsvOutputOptions, write_connectors_geojson_file, write_linked_csv_file,
    write_points_geojson_file,
};

/// Source and target names of the default imputation.
pub const DEFAULT_IMPUTE_PAIRS: &[(&str, &str)] = &[
    ("ece", "ece_imputado"),
    ("ind_lenguaje_ece_prim", "ind_leng_prim_imp"),
    ("ind_mate_ece_prim", "ind_mate_prim_imp"),
];

pub fn default_projection() -> Result<AttributeProjection> {
    AttributeProjection::new(DEFAULT_IMPUTE_PAIRS.iter().copied())
        .context("build default projection")
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub ingest: IngestOptions,
    pub matching: MatchOptions,
    pub link: LinkOptions,
    pub projection: AttributeProjection,
    pub csv: CsvOutputOptions,
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub partition: Partition,
    pub matches: Vec<MatchResult>,
    pub linkage: Linkage,
}

/// Mean and maximum match distance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DistanceStats {
    pub mean: f64,
    pub max: f64,
}

impl DistanceStats {
    /// `None` for an empty match list.
    pub fn from_matches(matches: &[MatchResult]) -> Option<Self> {
        if matches.is_empty() {
            return None;
        }
        let mut total = 0.0;
        let mut max = 0.0_f64;
        for result in matches {
            total += result.distance;
            max = max.max(result.distance);
        }
        Some(Self {
            mean: total / matches.len() as f64,
            max,
        })
    }
}

/// Where the output files go. `None` skips a file.
#[derive(Debug, Clone, Default)]
pub struct OutputPaths {
    pub linked_csv: Option<PathBuf>,
    pub connectors: Option<PathBuf>,
    pub points: Option<PathBuf>,
}

pub fn ingest(path: &Path, options: &IngestOptions) -> Result<Partition> {
    load_point_sets(path, options).with_context(|| format!("load schools from {}", path.display()))
}

/// Runs ingest, match and link. Nothing is written.
pub fn run_pipeline(path: &Path, config: &PipelineConfig) -> Result<PipelineOutput> {
    warn_unknown_sources(config);
    let partition = ingest(path, &config.ingest)?;

    let matches = NearestMatcher::new(config.matching.clone())
        .run(&partition.query, &partition.reference)
        .context("match schools")?;

    let linkage = LinkageBuilder::new(&config.projection)
        .with_options(config.link)
        .build(&partition.query, &partition.reference, &matches)
        .context("build linkage")?;
    info!(linked = linkage.len(), "pipeline finished");

    Ok(PipelineOutput {
        partition,
        matches,
        linkage,
    })
}

/// Writes every configured output file. Returns the paths written.
pub fn write_outputs(
    output: &PipelineOutput,
    config: &PipelineConfig,
    paths: &OutputPaths,
) -> Result<Vec<PathBuf>> {
    let span = info_span!("output");
    let _guard = span.enter();
    let mut written = Vec::new();

    if let Some(path) = &paths.linked_csv {
        let headers: Vec<&str> = config.projection.output_keys().collect();
        write_linked_csv_file(path, &output.linkage.records, &headers, &config.csv)
            .with_context(|| format!("write {}", path.display()))?;
        written.push(path.clone());
    }
    if let Some(path) = &paths.connectors {
        write_connectors_geojson_file(path, &output.linkage.connectors)
            .with_context(|| format!("write {}", path.display()))?;
        written.push(path.clone());
    }
    if let Some(path) = &paths.points {
        write_points_geojson_file(
            path,
            &output.partition.reference,
            &output.partition.query,
            config.link.swap_axes,
        )
        .with_context(|| format!("write {}", path.display()))?;
        written.push(path.clone());
    }
    Ok(written)
}

/// Projection sources that ingest never loads can only come out null.
fn warn_unknown_sources(config: &PipelineConfig) {
    for rename in config.projection.renames() {
        let loaded = rename.source == config.ingest.flag_attribute
            || config
                .ingest
                .attribute_columns
                .iter()
                .any(|column| *column == rename.source);
        if !loaded {
            warn!(
                source = %rename.source,
                target = %rename.target,
                "imputed attribute is not loaded from the input; values will be empty"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use geolink_model::{Coord, RecordId};

    use super::*;

    fn result(distance: f64) -> MatchResult {
        MatchResult {
            query_id: RecordId::new("Q").unwrap(),
            query_coord: Coord::new(0.0, 0.0),
            matched_id: RecordId::new("A").unwrap(),
            matched_coord: Coord::new(distance, 0.0),
            distance,
        }
    }

    #[test]
    fn distance_stats_mean_and_max() {
        let stats = DistanceStats::from_matches(&[result(1.0), result(3.0)]).unwrap();
        assert_eq!(stats, DistanceStats { mean: 2.0, max: 3.0 });
    }

    #[test]
    fn distance_stats_empty() {
        assert!(DistanceStats::from_matches(&[]).is_none());
    }

    #[test]
    fn default_projection_keys() {
        let projection = default_projection().unwrap();
        let keys: Vec<&str> = projection.output_keys().collect();
        assert_eq!(keys, vec!["ece_imputado", "ind_leng_prim_imp", "ind_mate_prim_imp"]);
    }
}
