// Batch driver: load -> resolve -> compute -> export.

use crate::columns::ColumnMap;
use crate::error::Result;
use crate::export::{export_all, ExportSummary};
use crate::metrics::{compute, MetricsTable};
use crate::table::{load_table, RawTable};
use std::path::Path;

/// A loaded source table together with its resolved columns.
///
/// Construction fails fast with `MissingColumn` before any metric is computed.
#[derive(Debug, Clone)]
pub struct SeasonTable {
    raw: RawTable,
    columns: ColumnMap,
}

impl SeasonTable {
    pub fn open(path: &Path, delimiter: u8) -> Result<Self> {
        let raw = load_table(path, delimiter)?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawTable) -> Result<Self> {
        let columns = ColumnMap::resolve(&raw)?;
        Ok(SeasonTable { raw, columns })
    }

    pub fn raw(&self) -> &RawTable {
        &self.raw
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn metrics(&self) -> MetricsTable {
        compute(&self.raw, &self.columns)
    }
}

/// Run the whole batch: read `input`, write every output table into `output_dir`.
pub fn run(input: &Path, output_dir: &Path, delimiter: u8) -> Result<ExportSummary> {
    let table = SeasonTable::open(input, delimiter)?;
    let metrics = table.metrics();
    export_all(&metrics, output_dir)
}
