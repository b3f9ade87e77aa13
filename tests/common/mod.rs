#![allow(dead_code)]

use chrono::NaiveDate;
use realreturns::domain::error::ReturnsError;
use realreturns::domain::index_tables::EconomicIndexTables;
use realreturns::domain::price::PriceSeries;
use realreturns::ports::index_port::IndexSource;
use realreturns::ports::price_port::PriceSource;
use std::ops::Range;

pub struct MockPriceSource {
    pub series: Option<PriceSeries>,
    pub error: Option<String>,
}

impl MockPriceSource {
    pub fn new(series: PriceSeries) -> Self {
        Self {
            series: Some(series),
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            series: None,
            error: Some(reason.to_string()),
        }
    }
}

impl PriceSource for MockPriceSource {
    fn load_series(&self) -> Result<PriceSeries, ReturnsError> {
        if let Some(reason) = &self.error {
            return Err(ReturnsError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.series.clone().unwrap_or_default())
    }
}

pub struct MockIndexSource {
    pub tables: EconomicIndexTables,
}

impl MockIndexSource {
    pub fn flat(years: Range<i32>, cpi: f64, dividend: f64) -> Self {
        Self {
            tables: flat_tables(years, cpi, dividend),
        }
    }
}

impl IndexSource for MockIndexSource {
    fn load_tables(&self) -> Result<EconomicIndexTables, ReturnsError> {
        Ok(self.tables.clone())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn flat_tables(years: Range<i32>, cpi: f64, dividend: f64) -> EconomicIndexTables {
    let rows: Vec<_> = years.map(|y| (y, cpi, dividend)).collect();
    EconomicIndexTables::from_rows(&rows)
}

/// Two closes per month (the 5th and the 20th), priced by `close(year, month)`.
pub fn monthly_series<F>(years: Range<i32>, close: F) -> PriceSeries
where
    F: Fn(i32, u32) -> f64,
{
    let mut points = Vec::new();
    for year in years {
        for month in 1..=12 {
            let price = close(year, month);
            points.push((date(year, month, 5), price));
            points.push((date(year, month, 20), price));
        }
    }
    PriceSeries::from_closes(&points)
}

/// Consecutive daily closes starting at `start`.
pub fn daily_series(start: NaiveDate, closes: &[f64]) -> PriceSeries {
    let points: Vec<_> = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| (start + chrono::Duration::days(i as i64), c))
        .collect();
    PriceSeries::from_closes(&points)
}

/// `Date,Close` CSV text for a series.
pub fn series_csv(series: &PriceSeries) -> String {
    let mut out = String::from("Date,Close\n");
    for r in series.records() {
        out.push_str(&format!("{},{}\n", r.date.format("%Y-%m-%d"), r.close));
    }
    out
}

/// `Year,CPI,Dividend` CSV text for constant tables.
pub fn indices_csv(years: Range<i32>, cpi: f64, dividend: f64) -> String {
    let mut out = String::from("Year,CPI,Dividend\n");
    for y in years {
        out.push_str(&format!("{y},{cpi},{dividend}\n"));
    }
    out
}
