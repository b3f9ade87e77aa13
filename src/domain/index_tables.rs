//! CPI and dividend-yield lookup tables.
//!
//! Loaded once and passed by reference into every calculation. A lookup for a
//! year outside coverage is a hard error, never a default.

use std::collections::BTreeMap;

use super::error::{IndexTable, ReturnsError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EconomicIndexTables {
    cpi: BTreeMap<i32, f64>,
    dividend_yield: BTreeMap<i32, f64>,
}

impl EconomicIndexTables {
    pub fn new(cpi: BTreeMap<i32, f64>, dividend_yield: BTreeMap<i32, f64>) -> Self {
        EconomicIndexTables {
            cpi,
            dividend_yield,
        }
    }

    /// Builds tables from `(year, cpi, dividend_yield_pct)` rows.
    pub fn from_rows(rows: &[(i32, f64, f64)]) -> Self {
        let mut tables = EconomicIndexTables::default();
        for &(year, cpi, dividend) in rows {
            tables.cpi.insert(year, cpi);
            tables.dividend_yield.insert(year, dividend);
        }
        tables
    }

    pub fn cpi(&self, year: i32) -> Result<f64, ReturnsError> {
        self.cpi
            .get(&year)
            .copied()
            .ok_or(ReturnsError::MissingIndexYear {
                table: IndexTable::Cpi,
                year,
            })
    }

    /// Dividend yield for `year`, in percent.
    pub fn dividend_yield(&self, year: i32) -> Result<f64, ReturnsError> {
        self.dividend_yield
            .get(&year)
            .copied()
            .ok_or(ReturnsError::MissingIndexYear {
                table: IndexTable::DividendYield,
                year,
            })
    }

    /// cpi[year] / cpi[year - 1]
    pub fn inflation_factor(&self, year: i32) -> Result<f64, ReturnsError> {
        Ok(self.cpi(year)? / self.cpi(year - 1)?)
    }

    /// Multiplier that restates a value from `from_year` money in `to_year` money.
    pub fn deflator(&self, from_year: i32, to_year: i32) -> Result<f64, ReturnsError> {
        Ok(self.cpi(to_year)? / self.cpi(from_year)?)
    }

    /// First and last CPI year covered, if any.
    pub fn coverage(&self) -> Option<(i32, i32)> {
        let first = self.cpi.keys().next()?;
        let last = self.cpi.keys().next_back()?;
        Some((*first, *last))
    }
}
