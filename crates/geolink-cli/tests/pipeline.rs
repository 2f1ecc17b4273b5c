use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use geolink_cli::pipeline::{
    OutputPaths, PipelineConfig, default_projection, run_pipeline, write_outputs,
};
use geolink_ingest::IngestOptions;
use geolink_match::{LinkOptions, MatchError, MatchOptions, SearchStrategy};
use geolink_output::CsvOutputOptions;

const HEADER: &str = "cod_mod_anexo,NLAT_IE,NLONG_IE,ind_eib_lengua1,ind_eib_lengua2,\
ind_lenguaje_ece_prim,ind_mate_ece_prim,ind_lenguaje_ece_sec,ind_mate_ece_sec,D_NIV_MOD,eib";

fn write_input(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("schools.csv");
    let mut lines = vec![HEADER];
    lines.extend_from_slice(rows);
    fs::write(&path, lines.join("\n")).expect("write input");
    path
}

fn config(strategy: SearchStrategy) -> PipelineConfig {
    PipelineConfig {
        ingest: IngestOptions::default(),
        matching: MatchOptions::new().with_strategy(strategy).with_threads(2),
        link: LinkOptions::default(),
        projection: default_projection().expect("projection"),
        csv: CsvOutputOptions::default(),
    }
}

const ROWS: &[&str] = &[
    "0001,-11.90,-77.04,,,512.3,498.0,,,Primaria,0",
    "0002,-12.40,-76.50,,,470.1,,,,Primaria,1",
    "0003,-11.91,-77.00,,,,,,,Primaria,0",
    "0004,-12.38,-76.52,,,,,,,Primaria,0",
    "0005,-12.00,-77.10,,,480.0,470.0,,,Secundaria,0",
];

#[test]
fn end_to_end_writes_linked_csv_and_geojson() {
    let tmp = TempDir::new().expect("create temp dir");
    let dir = tmp.path();
    let input = write_input(dir, ROWS);
    let config = config(SearchStrategy::Auto);

    let output = run_pipeline(&input, &config).expect("pipeline");
    assert_eq!(output.partition.reference.len(), 2);
    assert_eq!(output.partition.query.len(), 2);
    let matched: Vec<&str> = output
        .matches
        .iter()
        .map(|result| result.matched_id.as_str())
        .collect();
    assert_eq!(matched, vec!["0001", "0002"]);

    let paths = OutputPaths {
        linked_csv: Some(dir.join("linked.csv")),
        connectors: Some(dir.join("connectors.geojson")),
        points: Some(dir.join("points.geojson")),
    };
    let written = write_outputs(&output, &config, &paths).expect("write outputs");
    assert_eq!(written.len(), 3);

    let text = fs::read_to_string(dir.join("linked.csv")).expect("read csv");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "cod_mod_anexo,ece_imputado,ind_leng_prim_imp,ind_mate_prim_imp",
            "0003,1,512.3,498",
            "0004,1,470.1,",
        ]
    );

    let connectors: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("connectors.geojson")).expect("read"))
            .expect("parse connectors");
    assert_eq!(connectors["features"].as_array().map(Vec::len), Some(2));
}

#[test]
fn strategies_produce_identical_linkage() {
    let tmp = TempDir::new().expect("create temp dir");
    let dir = tmp.path();
    let input = write_input(dir, ROWS);
    let brute = run_pipeline(&input, &config(SearchStrategy::BruteForce)).expect("brute");
    let rtree = run_pipeline(&input, &config(SearchStrategy::RTree)).expect("rtree");
    assert_eq!(brute.matches, rtree.matches);
    assert_eq!(brute.linkage, rtree.linkage);
}

#[test]
fn no_participants_is_an_error() {
    let tmp = TempDir::new().expect("create temp dir");
    let dir = tmp.path();
    let input = write_input(dir, &["0003,-11.91,-77.00,,,,,,,Primaria,0"]);
    let error = run_pipeline(&input, &config(SearchStrategy::Auto)).unwrap_err();
    let cause = error.downcast_ref::<MatchError>().expect("match error in chain");
    assert_eq!(*cause, MatchError::EmptyReferenceSet { query_count: 1 });
}

#[test]
fn missing_input_reports_path() {
    let tmp = TempDir::new().expect("create temp dir");
    let dir = tmp.path();
    let error = run_pipeline(&dir.join("absent.csv"), &config(SearchStrategy::Auto)).unwrap_err();
    assert!(format!("{error:#}").contains("absent.csv"));
}
