//! Tests for the CSV and GeoJSON writers.

use geolink_model::{Attributes, Connector, Coord, LinkedRecord, PointSet, RecordId};
use geolink_output::{
    CsvOutputOptions, write_connectors_geojson, write_linked_csv, write_points_geojson,
};
use serde_json::Value;

const HEADERS: &[&str] = &["ece_imputado", "ind_leng_prim_imp", "ind_mate_prim_imp"];

fn id(value: &str) -> RecordId {
    RecordId::new(value).unwrap()
}

fn linked() -> Vec<LinkedRecord> {
    vec![
        LinkedRecord {
            query_id: id("0003"),
            matched_id: id("0001"),
            distance: 0.5,
            attributes: vec![
                ("ece_imputado".to_string(), Some(1.0)),
                ("ind_leng_prim_imp".to_string(), Some(512.3)),
                ("ind_mate_prim_imp".to_string(), Some(498.0)),
            ],
        },
        LinkedRecord {
            query_id: id("0004"),
            matched_id: id("0002"),
            distance: 0.25,
            attributes: vec![
                ("ece_imputado".to_string(), Some(1.0)),
                ("ind_leng_prim_imp".to_string(), Some(470.1)),
                ("ind_mate_prim_imp".to_string(), None),
            ],
        },
    ]
}

fn render_csv(options: &CsvOutputOptions) -> String {
    let mut buffer = Vec::new();
    write_linked_csv(&mut buffer, &linked(), HEADERS, options).expect("write csv");
    String::from_utf8(buffer).expect("utf8")
}

#[test]
fn linked_csv_layout() {
    let text = render_csv(&CsvOutputOptions::default());
    insta::assert_snapshot!(text.trim_end(), @r"
    cod_mod_anexo,ece_imputado,ind_leng_prim_imp,ind_mate_prim_imp
    0003,1,512.3,498
    0004,1,470.1,
    ");
}

#[test]
fn linked_csv_with_match_columns() {
    let options = CsvOutputOptions::default()
        .with_matched_id(true)
        .with_distance(true);
    let text = render_csv(&options);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "cod_mod_anexo,ece_imputado,ind_leng_prim_imp,ind_mate_prim_imp,cod_mod_anexo_cercano,distancia"
    );
    assert_eq!(lines[1], "0003,1,512.3,498,0001,0.5");
    assert_eq!(lines[2], "0004,1,470.1,,0002,0.25");
}

#[test]
fn linked_csv_custom_id_header() {
    let text = render_csv(&CsvOutputOptions::default().with_id_header("school"));
    assert!(text.starts_with("school,ece_imputado,"));
}

#[test]
fn connectors_geojson_shape() {
    let connectors = vec![Connector {
        query_id: id("0003"),
        matched_id: id("0001"),
        start: Coord::new(-77.00, -11.91),
        end: Coord::new(-77.04, -11.90),
    }];
    let mut buffer = Vec::new();
    write_connectors_geojson(&mut buffer, &connectors).expect("write geojson");
    let json: Value = serde_json::from_slice(&buffer).expect("parse geojson");

    assert_eq!(json["type"], "FeatureCollection");
    let feature = &json["features"][0];
    assert_eq!(feature["type"], "Feature");
    assert_eq!(feature["geometry"]["type"], "LineString");
    assert_eq!(
        feature["geometry"]["coordinates"],
        serde_json::json!([[-77.00, -11.91], [-77.04, -11.90]])
    );
    assert_eq!(feature["properties"]["query_id"], "0003");
    assert_eq!(feature["properties"]["matched_id"], "0001");
}

#[test]
fn points_geojson_tags_roles_and_swaps() {
    let reference = PointSet::from_tuples([("0001", -77.04, -11.90, Attributes::new())]).unwrap();
    let query = PointSet::from_tuples([("0003", -77.00, -11.91, Attributes::new())]).unwrap();
    let mut buffer = Vec::new();
    write_points_geojson(&mut buffer, &reference, &query, true).expect("write geojson");
    let json: Value = serde_json::from_slice(&buffer).expect("parse geojson");

    let features = json["features"].as_array().expect("features");
    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["properties"]["role"], "reference");
    assert_eq!(features[0]["properties"]["id"], "0001");
    assert_eq!(
        features[0]["geometry"]["coordinates"],
        serde_json::json!([-11.90, -77.04])
    );
    assert_eq!(features[1]["properties"]["role"], "query");
    assert_eq!(features[1]["geometry"]["type"], "Point");
}
