//! Economic index table access port.

use crate::domain::error::ReturnsError;
use crate::domain::index_tables::EconomicIndexTables;

pub trait IndexSource {
    fn load_tables(&self) -> Result<EconomicIndexTables, ReturnsError>;
}
