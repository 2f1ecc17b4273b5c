use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};

use geolink_cli::pipeline::{
    DistanceStats, OutputPaths, PipelineConfig, default_projection, ingest, run_pipeline,
    write_outputs,
};
use geolink_ingest::{IngestOptions, PopulationFilter};
use geolink_match::{LinkOptions, MatchOptions};
use geolink_model::AttributeProjection;
use geolink_output::CsvOutputOptions;

use crate::cli::{ColumnArgs, InspectArgs, MatchArgs};
use crate::types::{InspectSummary, MatchSummary};

pub fn run_match(args: &MatchArgs) -> Result<MatchSummary> {
    let config = pipeline_config(args)?;
    let output = run_pipeline(&args.input, &config)?;

    let paths = OutputPaths {
        linked_csv: Some(
            args.output
                .clone()
                .unwrap_or_else(|| default_output_path(&args.input)),
        ),
        connectors: args.connectors.clone(),
        points: args.points.clone(),
    };
    let written = if args.dry_run {
        Vec::new()
    } else {
        write_outputs(&output, &config, &paths)?
    };

    let missing_values = output
        .linkage
        .records
        .iter()
        .flat_map(|record| record.attributes.iter())
        .filter(|(_, value)| value.is_none())
        .count();
    Ok(MatchSummary {
        input: args.input.clone(),
        strategy: config
            .matching
            .strategy
            .resolve(output.partition.reference.len())
            .as_str(),
        matched: output.matches.len(),
        distance: DistanceStats::from_matches(&output.matches),
        missing_values,
        report: output.partition.report,
        written,
        dry_run: args.dry_run,
    })
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectSummary> {
    let partition = ingest(&args.input, &ingest_options(&args.columns))?;
    Ok(InspectSummary {
        input: args.input.clone(),
        report: partition.report,
    })
}

fn pipeline_config(args: &MatchArgs) -> Result<PipelineConfig> {
    let projection = if args.impute.is_empty() {
        default_projection()?
    } else {
        AttributeProjection::parse_pairs(&args.impute).context("parse --impute")?
    };
    let threads = match args.threads {
        Some(threads) => threads,
        None => thread::available_parallelism().map_or(1, NonZeroUsize::get),
    };
    let ingest = ingest_options(&args.columns);
    let csv = CsvOutputOptions::default()
        .with_id_header(ingest.id_column.as_str())
        .with_matched_id(args.match_columns)
        .with_distance(args.match_columns);
    Ok(PipelineConfig {
        ingest,
        matching: MatchOptions::new()
            .with_strategy(args.strategy.into())
            .with_threads(threads),
        link: LinkOptions::default().with_swap_axes(args.swap_axes),
        projection,
        csv,
    })
}

fn ingest_options(columns: &ColumnArgs) -> IngestOptions {
    let population = (!columns.no_population_filter).then(|| PopulationFilter {
        column: columns.population_column.clone(),
        value: columns.population_value.clone(),
    });
    let mut options = IngestOptions {
        id_column: columns.id_column.clone(),
        x_column: columns.x_column.clone(),
        y_column: columns.y_column.clone(),
        participation_column: columns.participation_column.clone(),
        ..IngestOptions::default()
    }
    .with_population(population);
    if !columns.attributes.is_empty() {
        options = options.with_attribute_columns(columns.attributes.clone());
    }
    options
}

/// Default linked CSV path: `<stem>_imputado.csv` beside the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "schools".to_string(), |stem| stem.to_string_lossy().into_owned());
    input.with_file_name(format!("{stem}_imputado.csv"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::TempDir;

    use super::*;
    use crate::cli::{Cli, Command};

    const INPUT: &str = "cod_mod_anexo,NLAT_IE,NLONG_IE,ind_lenguaje_ece_prim,ind_mate_ece_prim,D_NIV_MOD\n\
                         0001,-11.90,-77.04,512.3,498.0,Primaria\n\
                         0003,-11.91,-77.00,,,Primaria\n";

    fn match_args(argv: &[&str]) -> MatchArgs {
        match Cli::try_parse_from(argv).expect("parse args").command {
            Command::Match(args) => args,
            Command::Inspect(_) => panic!("expected match subcommand"),
        }
    }

    #[test]
    fn dry_run_summarises_without_writing() {
        let tmp = TempDir::new().expect("create temp dir");
        let input = tmp.path().join("padron.csv");
        fs::write(&input, INPUT).expect("write input");
        let input_arg = input.to_string_lossy().into_owned();
        let args = match_args(&[
            "geolink",
            "match",
            &input_arg,
            "--attribute",
            "ind_lenguaje_ece_prim",
            "--attribute",
            "ind_mate_ece_prim",
            "--dry-run",
        ]);

        let summary = run_match(&args).expect("run match");
        assert_eq!(summary.matched, 1);
        assert_eq!(summary.strategy, "brute_force");
        assert_eq!(summary.missing_values, 0);
        let stats = summary.distance.expect("distance stats");
        assert!(stats.max > 0.0 && stats.mean == stats.max);
        assert!(summary.written.is_empty());
        assert!(!tmp.path().join("padron_imputado.csv").exists());
    }

    #[test]
    fn default_output_sits_beside_input() {
        let path = default_output_path(Path::new("data/padron.csv"));
        assert_eq!(path, Path::new("data/padron_imputado.csv"));
    }
}
