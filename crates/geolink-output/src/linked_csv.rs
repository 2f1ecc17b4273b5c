//! Tabular export of imputed values.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use geolink_model::{AttributeValue, LinkedRecord};
use serde::{Deserialize, Serialize};

use crate::error::{OutputError, Result};

/// Column layout of the linked CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvOutputOptions {
    /// Header of the query id column.
    pub id_header: String,
    /// Append the matched reference id.
    pub include_matched_id: bool,
    pub matched_id_header: String,
    /// Append the match distance.
    pub include_distance: bool,
    pub distance_header: String,
}

impl Default for CsvOutputOptions {
    fn default() -> Self {
        Self {
            id_header: "cod_mod_anexo".to_string(),
            include_matched_id: false,
            matched_id_header: "cod_mod_anexo_cercano".to_string(),
            include_distance: false,
            distance_header: "distancia".to_string(),
        }
    }
}

impl CsvOutputOptions {
    #[must_use]
    pub fn with_id_header(mut self, header: impl Into<String>) -> Self {
        self.id_header = header.into();
        self
    }

    #[must_use]
    pub fn with_matched_id(mut self, enable: bool) -> Self {
        self.include_matched_id = enable;
        self
    }

    #[must_use]
    pub fn with_distance(mut self, enable: bool) -> Self {
        self.include_distance = enable;
        self
    }
}

fn format_value(value: AttributeValue) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes one row per linked record. Null values are written as empty cells.
///
/// Attribute columns are written in `attribute_headers` order; names a record
/// does not carry come out empty.
pub fn write_linked_csv<W: Write>(
    writer: W,
    records: &[LinkedRecord],
    attribute_headers: &[&str],
    options: &CsvOutputOptions,
) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    let mut header: Vec<&str> = vec![options.id_header.as_str()];
    header.extend_from_slice(attribute_headers);
    if options.include_matched_id {
        header.push(options.matched_id_header.as_str());
    }
    if options.include_distance {
        header.push(options.distance_header.as_str());
    }
    out.write_record(&header)?;

    for record in records {
        let mut row = Vec::with_capacity(header.len());
        row.push(record.query_id.to_string());
        for name in attribute_headers {
            row.push(format_value(record.attribute(name).flatten()));
        }
        if options.include_matched_id {
            row.push(record.matched_id.to_string());
        }
        if options.include_distance {
            row.push(record.distance.to_string());
        }
        out.write_record(&row)?;
    }
    out.flush()?;
    Ok(())
}

/// Writes the linked CSV to `path`.
pub fn write_linked_csv_file(
    path: &Path,
    records: &[LinkedRecord],
    attribute_headers: &[&str],
    options: &CsvOutputOptions,
) -> Result<()> {
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_linked_csv(file, records, attribute_headers, options)?;
    tracing::info!(path = %path.display(), rows = records.len(), "wrote linked csv");
    Ok(())
}
