//! CSV file adapters for price series and index tables.

use crate::domain::error::ReturnsError;
use crate::domain::index_tables::EconomicIndexTables;
use crate::domain::price::{PriceRecord, PriceSeries};
use crate::ports::index_port::IndexSource;
use crate::ports::price_port::PriceSource;
use chrono::NaiveDate;
use csv::StringRecord;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Reads `Date` and `Close` (or `Close/Last`) columns from a price CSV.
pub struct CsvPriceAdapter {
    path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

/// Reads `Year`, `CPI` and `Dividend` columns from an index CSV.
pub struct CsvIndexAdapter {
    path: PathBuf,
}

impl CsvIndexAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

fn read_file(path: &PathBuf) -> Result<String, ReturnsError> {
    fs::read_to_string(path).map_err(|e| ReturnsError::Data {
        reason: format!("failed to read {}: {}", path.display(), e),
    })
}

fn column_index(headers: &StringRecord, names: &[&str]) -> Result<usize, ReturnsError> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        .ok_or_else(|| ReturnsError::Data {
            reason: format!("missing {} column", names[0]),
        })
}

fn field<'a>(record: &'a StringRecord, index: usize, name: &str) -> Result<&'a str, ReturnsError> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| ReturnsError::Data {
            reason: format!("missing {} value", name),
        })
}

pub fn parse_date(value: &str) -> Result<NaiveDate, ReturnsError> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .ok_or_else(|| ReturnsError::Data {
            reason: format!("invalid date format: {}", value),
        })
}

/// Parses a number, tolerating a leading `$` and thousands separators.
pub fn parse_number(value: &str, name: &str) -> Result<f64, ReturnsError> {
    let cleaned: String = value
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse().map_err(|e| ReturnsError::Data {
        reason: format!("invalid {} value {:?}: {}", name, value, e),
    })
}

impl PriceSource for CsvPriceAdapter {
    fn load_series(&self) -> Result<PriceSeries, ReturnsError> {
        let content = read_file(&self.path)?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| ReturnsError::Data {
                reason: format!("CSV header error: {}", e),
            })?
            .clone();
        let date_col = column_index(&headers, &["Date"])?;
        let close_col = column_index(&headers, &["Close", "Close/Last"])?;

        let mut records = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| ReturnsError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;
            let date = parse_date(field(&record, date_col, "date")?)?;
            let close = parse_number(field(&record, close_col, "close")?, "close")?;
            records.push(PriceRecord::new(date, close));
        }

        Ok(PriceSeries::new(records))
    }
}

impl IndexSource for CsvIndexAdapter {
    fn load_tables(&self) -> Result<EconomicIndexTables, ReturnsError> {
        let content = read_file(&self.path)?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| ReturnsError::Data {
                reason: format!("CSV header error: {}", e),
            })?
            .clone();
        let year_col = column_index(&headers, &["Year"])?;
        let cpi_col = column_index(&headers, &["CPI"])?;
        let div_col = column_index(&headers, &["Dividend", "Dividend Yield"])?;

        let mut cpi = BTreeMap::new();
        let mut dividend_yield = BTreeMap::new();
        for result in rdr.records() {
            let record = result.map_err(|e| ReturnsError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;
            let year_str = field(&record, year_col, "year")?;
            let year: i32 = year_str.parse().map_err(|e| ReturnsError::Data {
                reason: format!("invalid year value {:?}: {}", year_str, e),
            })?;
            cpi.insert(year, parse_number(field(&record, cpi_col, "CPI")?, "CPI")?);
            let dividend = field(&record, div_col, "dividend")?;
            if !dividend.is_empty() {
                dividend_yield.insert(year, parse_number(dividend, "dividend")?);
            }
        }

        Ok(EconomicIndexTables::new(cpi, dividend_yield))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_series_iso_dates() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "spx.csv",
            "Date,Open,High,Low,Close\n\
             2000-01-04,1,1,1,1399.42\n\
             2000-01-03,1,1,1,1455.22\n",
        );
        let series = CsvPriceAdapter::new(path).load_series().unwrap();

        assert_eq!(series.len(), 2);
        let first = &series.records()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2000, 1, 3).unwrap());
        assert_eq!(first.year, 2000);
        assert_eq!(first.month, 1);
        assert_eq!(first.close, 1455.22);
    }

    #[test]
    fn load_series_us_dates_and_close_last() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "gold.csv",
            "Date,Close/Last,Volume\n\
             02/01/2024,\"$2,054.70\",100\n\
             01/31/2024,$2067.40,100\n",
        );
        let series = CsvPriceAdapter::new(path).load_series().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.records()[0].close, 2067.40);
        assert_eq!(series.records()[1].close, 2054.70);
        assert_eq!(series.records()[1].month, 2);
    }

    #[test]
    fn missing_close_column_fails() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.csv", "Date,Open\n2000-01-03,1\n");
        let err = CsvPriceAdapter::new(path).load_series().unwrap_err();
        assert!(matches!(err, ReturnsError::Data { reason } if reason.contains("Close")));
    }

    #[test]
    fn invalid_date_fails() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.csv", "Date,Close\n2000.01.03,1\n");
        assert!(CsvPriceAdapter::new(path).load_series().is_err());
    }

    #[test]
    fn missing_file_fails() {
        let adapter = CsvPriceAdapter::new(PathBuf::from("/nonexistent/prices.csv"));
        assert!(adapter.load_series().is_err());
    }

    #[test]
    fn load_index_tables() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "indices.csv",
            "Year,CPI,Dividend\n1950,24.1,8.74\n1951,26.0,6.9\n2024,313.7,\n",
        );
        let tables = CsvIndexAdapter::new(path).load_tables().unwrap();
        assert_eq!(tables.cpi(1950).unwrap(), 24.1);
        assert_eq!(tables.dividend_yield(1951).unwrap(), 6.9);
        assert_eq!(tables.cpi(2024).unwrap(), 313.7);
        assert!(tables.dividend_yield(2024).is_err());
        assert_eq!(tables.coverage(), Some((1950, 2024)));
    }

    #[test]
    fn parse_number_strips_currency() {
        assert_eq!(parse_number(" $1,234.5 ", "close").unwrap(), 1234.5);
        assert!(parse_number("n/a", "close").is_err());
    }
}
