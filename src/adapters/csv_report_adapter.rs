//! CSV result table writer.

use std::fmt::Display;
use std::hash::Hash;
use std::io::Write;

use crate::domain::error::ReturnsError;
use crate::domain::table::{ResultTable, TableRow};
use crate::ports::report_port::ReportSink;

/// Writes `Period,<columns...>` rows to any writer; NaN cells become `NaN`.
pub struct CsvReportAdapter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvReportAdapter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    pub fn into_inner(self) -> Result<W, ReturnsError> {
        self.writer.into_inner().map_err(|e| ReturnsError::Data {
            reason: format!("failed to flush report: {}", e),
        })
    }
}

fn format_cell(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        value.to_string()
    }
}

fn csv_error(e: csv::Error) -> ReturnsError {
    ReturnsError::Data {
        reason: format!("failed to write report: {}", e),
    }
}

impl<W: Write> ReportSink for CsvReportAdapter<W> {
    fn write_table<K, R>(&mut self, table: &ResultTable<K, R>) -> Result<(), ReturnsError>
    where
        K: Eq + Hash + Clone + Display,
        R: TableRow,
    {
        let mut header = vec!["Period"];
        header.extend_from_slice(R::column_names());
        self.writer.write_record(&header).map_err(csv_error)?;

        for (key, row) in table.iter() {
            let mut cells = vec![key.to_string()];
            cells.extend(row.values().into_iter().map(format_cell));
            self.writer.write_record(&cells).map_err(csv_error)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
