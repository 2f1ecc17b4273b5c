use geolink_model::{
    AttributeProjection, Attributes, Coord, ModelError, PointSet, Record, RecordId,
};

fn attrs(pairs: &[(&str, Option<f64>)]) -> Attributes {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), *value))
        .collect()
}

#[test]
fn point_set_preserves_insertion_order() {
    let set = PointSet::from_tuples([
        ("B", 10.0, 0.0, Attributes::new()),
        ("A", 0.0, 0.0, Attributes::new()),
        ("C", 5.0, 5.0, Attributes::new()),
    ])
    .unwrap();
    let ids: Vec<&str> = set.iter().map(|record| record.id().as_str()).collect();
    assert_eq!(ids, vec!["B", "A", "C"]);
    assert_eq!(set.len(), 3);
}

#[test]
fn point_set_lookup_by_id() {
    let set = PointSet::from_tuples([
        ("A", 0.0, 0.0, attrs(&[("score", Some(1.5))])),
        ("B", 10.0, 0.0, Attributes::new()),
    ])
    .unwrap();
    let id = RecordId::new("A").unwrap();
    let record = set.lookup(&id).expect("A present");
    assert_eq!(record.coord(), Coord::new(0.0, 0.0));
    assert_eq!(record.attribute("score"), Some(1.5));
    assert_eq!(set.position_of(&RecordId::new("B").unwrap()), Some(1));
    assert!(set.lookup(&RecordId::new("Z").unwrap()).is_none());
}

#[test]
fn point_set_rejects_duplicate_ids() {
    let err = PointSet::from_tuples([
        ("A", 0.0, 0.0, Attributes::new()),
        ("A", 1.0, 1.0, Attributes::new()),
    ])
    .unwrap_err();
    match err {
        ModelError::InvalidRecord { id, reason } => {
            assert_eq!(id, "A");
            assert!(reason.contains("duplicate"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn point_set_rejects_infinite_coordinates() {
    let err = PointSet::from_tuples([("A", f64::INFINITY, 0.0, Attributes::new())]).unwrap_err();
    assert!(matches!(err, ModelError::InvalidRecord { .. }));
}

#[test]
fn empty_point_set_is_valid() {
    let set = PointSet::new(Vec::<Record>::new()).unwrap();
    assert!(set.is_empty());
}

#[test]
fn record_ids_are_trimmed() {
    let id = RecordId::new(" 0234567 ").unwrap();
    assert_eq!(id.as_str(), "0234567");
}

#[test]
fn projection_parses_cli_pairs_in_order() {
    let projection = AttributeProjection::parse_pairs(&[
        "ece=ece_imputado",
        "ind_lenguaje_ece_prim=ind_leng_prim_imp",
    ])
    .unwrap();
    let keys: Vec<&str> = projection.output_keys().collect();
    assert_eq!(keys, vec!["ece_imputado", "ind_leng_prim_imp"]);
}

#[test]
fn projection_rejects_malformed_pair() {
    let err = AttributeProjection::parse_pairs(&["no_separator"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid attribute projection: expected SOURCE=TARGET, got 'no_separator'"
    );
}
