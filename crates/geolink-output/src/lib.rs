//! Output writers for linked school records.
//!
//! - **Linked CSV**: one row per query school with its imputed values
//! - **Connectors GeoJSON**: query-to-match segments for map rendering
//! - **Points GeoJSON**: both school sets tagged by role

mod error;
mod geojson;
mod linked_csv;

pub use error::{OutputError, Result};
pub use geojson::{
    write_connectors_geojson, write_connectors_geojson_file, write_points_geojson,
    write_points_geojson_file,
};
pub use linked_csv::{CsvOutputOptions, write_linked_csv, write_linked_csv_file};
