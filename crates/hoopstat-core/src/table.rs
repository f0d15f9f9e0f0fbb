// Tabular loading: delimited text into an in-memory table of raw string cells.
//
// The first record is the header. Every later record is reconciled to the
// header width (right-padded with empty strings or right-truncated), so a
// ragged file never aborts the batch.

use crate::error::{Result, StatsError};
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Column-major table of raw text cells. All columns have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    labels: Vec<String>,
    columns: Vec<Vec<String>>,
    row_count: usize,
}

impl RawTable {
    /// Header labels, whitespace-trimmed, in file order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.labels.len()
    }

    /// Cells of the column at `position`.
    pub fn column_at(&self, position: usize) -> Option<&[String]> {
        self.columns.get(position).map(Vec::as_slice)
    }
}

#[cfg(test)]
impl RawTable {
    /// Cells of the first column labelled exactly `label`.
    pub fn column(&self, label: &str) -> Option<&[String]> {
        let position = self.labels.iter().position(|l| l == label)?;
        self.column_at(position)
    }

    /// One row as a vector of cells, in header order.
    pub fn row(&self, index: usize) -> Option<Vec<&str>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.iter().map(|c| c[index].as_str()).collect())
    }
}

/// Counts of rows that did not match the header width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub padded: usize,
    pub truncated: usize,
}

// ---------------------------------------------------------------------------
// Reader-based loader
// ---------------------------------------------------------------------------

/// Parse delimited text from any reader.
///
/// Returns an empty table (no labels) when the source has no header line.
pub fn load_table_from_reader<R: Read>(
    rdr: R,
    delimiter: u8,
) -> std::result::Result<(RawTable, Reconciliation), csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(rdr);

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record?,
        None => return Ok((RawTable::default(), Reconciliation::default())),
    };
    let labels = header_labels(&header);
    let width = labels.len();

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); width];
    let mut fit = Reconciliation::default();
    let mut row_count = 0;

    for result in records {
        let record = result?;
        if record.is_empty() {
            continue;
        }
        if record.len() < width {
            fit.padded += 1;
        } else if record.len() > width {
            fit.truncated += 1;
        }
        for (position, column) in columns.iter_mut().enumerate() {
            column.push(record.get(position).unwrap_or("").to_string());
        }
        row_count += 1;
    }

    Ok((
        RawTable {
            labels,
            columns,
            row_count,
        },
        fit,
    ))
}

fn header_labels(header: &StringRecord) -> Vec<String> {
    header
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let label = if i == 0 {
                label.trim_start_matches('\u{feff}')
            } else {
                label
            };
            label.trim().to_string()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Path-based loader
// ---------------------------------------------------------------------------

/// Load a delimited text file into a `RawTable`.
pub fn load_table(path: &Path, delimiter: u8) -> Result<RawTable> {
    let file = std::fs::File::open(path).map_err(|e| StatsError::from_io(path, e))?;
    let (table, fit) = load_table_from_reader(file, delimiter).map_err(|e| StatsError::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;

    if table.labels.is_empty() {
        return Err(StatsError::EmptyInput {
            path: path.to_path_buf(),
        });
    }
    if fit.padded > 0 || fit.truncated > 0 {
        debug!(
            padded = fit.padded,
            truncated = fit.truncated,
            "reconciled ragged rows to header width"
        );
    }
    info!(
        path = %path.display(),
        columns = table.column_count(),
        rows = table.row_count(),
        "loaded source table"
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
