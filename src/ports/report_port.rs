//! Result table output port.

use std::fmt::Display;
use std::hash::Hash;

use crate::domain::error::ReturnsError;
use crate::domain::table::{ResultTable, TableRow};

/// Port for persisting a finished result table.
pub trait ReportSink {
    fn write_table<K, R>(&mut self, table: &ResultTable<K, R>) -> Result<(), ReturnsError>
    where
        K: Eq + Hash + Clone + Display,
        R: TableRow;
}
