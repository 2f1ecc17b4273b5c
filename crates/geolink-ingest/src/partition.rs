//! Turning CSV rows into participant and non-participant point sets.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use geolink_model::{Attributes, PointSet, Record};

use crate::csv_table::{CsvTable, read_csv_table};
use crate::error::{IngestError, Result};
use crate::options::IngestOptions;

/// Counts gathered while partitioning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub total_rows: usize,
    /// Rows outside the target population.
    pub excluded_population: usize,
    /// Rows dropped for empty or non-numeric coordinates.
    pub dropped_missing_coordinates: usize,
    /// Non-empty attribute cells that were not numbers (read as null).
    pub unparsed_values: usize,
    pub participants: usize,
    pub non_participants: usize,
}

/// Input split by participation.
#[derive(Debug, Clone)]
pub struct Partition {
    /// Participants: candidates to match against.
    pub reference: PointSet,
    /// Non-participants: records that need imputed values.
    pub query: PointSet,
    pub report: IngestReport,
}

struct Columns {
    id: usize,
    x: usize,
    y: usize,
    participation: usize,
    population: Option<usize>,
    attributes: Vec<(String, usize)>,
}

fn resolve_columns(table: &CsvTable, options: &IngestOptions, path: &Path) -> Result<Columns> {
    let require = |name: &str| {
        table
            .column_index(name)
            .ok_or_else(|| IngestError::MissingColumn {
                column: name.to_string(),
                path: path.to_path_buf(),
            })
    };
    let population = match &options.population {
        Some(filter) => Some(require(filter.column.as_str())?),
        None => None,
    };
    let attributes = options
        .attribute_columns
        .iter()
        .map(|name| Ok((name.trim().to_string(), require(name.as_str())?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Columns {
        id: require(options.id_column.as_str())?,
        x: require(options.x_column.as_str())?,
        y: require(options.y_column.as_str())?,
        participation: require(options.participation_column.as_str())?,
        population,
        attributes,
    })
}

/// Parses a numeric cell. Empty and non-finite values read as `None`.
pub fn parse_number(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Splits a loaded table into reference (participants) and query
/// (non-participants) point sets.
///
/// `path` is only used in error messages.
pub fn partition_table(table: &CsvTable, options: &IngestOptions, path: &Path) -> Result<Partition> {
    let columns = resolve_columns(table, options, path)?;
    let mut report = IngestReport {
        total_rows: table.rows.len(),
        ..IngestReport::default()
    };
    let mut participants = Vec::new();
    let mut non_participants = Vec::new();

    for row in &table.rows {
        if let (Some(filter), Some(column)) = (&options.population, columns.population) {
            if CsvTable::cell(row, column) != filter.value.trim() {
                report.excluded_population += 1;
                continue;
            }
        }
        let x = parse_number(CsvTable::cell(row, columns.x));
        let y = parse_number(CsvTable::cell(row, columns.y));
        let (Some(x), Some(y)) = (x, y) else {
            report.dropped_missing_coordinates += 1;
            continue;
        };

        let participates = parse_number(CsvTable::cell(row, columns.participation)).is_some();
        let mut attributes = Attributes::new();
        for (name, column) in &columns.attributes {
            let cell = CsvTable::cell(row, *column);
            let value = parse_number(cell);
            if value.is_none() && !cell.is_empty() {
                report.unparsed_values += 1;
                debug!(line = row.line, column = %name, "non-numeric attribute read as null");
            }
            attributes.insert(name.clone(), value);
        }
        attributes.insert(
            options.flag_attribute.clone(),
            Some(if participates { 1.0 } else { 0.0 }),
        );

        let record = Record::new(CsvTable::cell(row, columns.id), x, y, attributes)
            .map_err(|source| IngestError::Record {
                line: row.line,
                source,
            })?;
        if participates {
            participants.push(record);
        } else {
            non_participants.push(record);
        }
    }

    report.participants = participants.len();
    report.non_participants = non_participants.len();
    if report.dropped_missing_coordinates > 0 {
        warn!(
            dropped = report.dropped_missing_coordinates,
            "rows without usable coordinates were skipped"
        );
    }
    if report.unparsed_values > 0 {
        warn!(
            count = report.unparsed_values,
            "non-numeric attribute values were read as null"
        );
    }
    Ok(Partition {
        reference: PointSet::new(participants)?,
        query: PointSet::new(non_participants)?,
        report,
    })
}

/// Reads `path` and partitions it into point sets.
pub fn load_point_sets(path: &Path, options: &IngestOptions) -> Result<Partition> {
    let span = info_span!("ingest", path = %path.display());
    let _guard = span.enter();
    let table = read_csv_table(path)?;
    let partition = partition_table(&table, options, path)?;
    info!(
        rows = partition.report.total_rows,
        participants = partition.report.participants,
        non_participants = partition.report.non_participants,
        "input partitioned"
    );
    Ok(partition)
}
