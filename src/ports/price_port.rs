//! Price data access port.

use crate::domain::error::ReturnsError;
use crate::domain::price::PriceSeries;

pub trait PriceSource {
    /// Loads the full, date-ordered series for one instrument.
    fn load_series(&self) -> Result<PriceSeries, ReturnsError>;
}
