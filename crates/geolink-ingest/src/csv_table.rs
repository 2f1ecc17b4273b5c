//! CSV file reading with header and cell normalisation.

use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// One data row with its 1-based line number in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub line: usize,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

impl CsvTable {
    /// Position of a column, compared after header normalisation.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = normalize_header(name);
        self.headers.iter().position(|header| *header == wanted)
    }

    /// Cell of `row` at `column`, empty when the row is short.
    pub fn cell<'a>(row: &'a CsvRow, column: usize) -> &'a str {
        row.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads a CSV file whose first non-blank row is the header.
///
/// Fully blank rows are skipped. Rows shorter than the header read as empty
/// cells on the missing positions.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| open_error(path, source))?;
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let cells: Vec<String> = record.iter().map(normalize_cell).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        if headers.is_none() {
            headers = Some(record.iter().map(normalize_header).collect());
            continue;
        }
        let line = record
            .position()
            .map_or(0, |position| usize::try_from(position.line()).unwrap_or(usize::MAX));
        rows.push(CsvRow { line, cells });
    }
    let Some(headers) = headers else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };
    tracing::debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "read csv table"
    );
    Ok(CsvTable { headers, rows })
}

fn open_error(path: &Path, source: csv::Error) -> IngestError {
    let not_found = matches!(
        source.kind(),
        csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound
    );
    if not_found {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_collapse_inner_whitespace() {
        assert_eq!(normalize_header("\u{feff} cod   mod "), "cod mod");
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let row = CsvRow {
            line: 2,
            cells: vec!["a".to_string()],
        };
        assert_eq!(CsvTable::cell(&row, 0), "a");
        assert_eq!(CsvTable::cell(&row, 3), "");
    }
}
