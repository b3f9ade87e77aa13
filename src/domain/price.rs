//! Price records and ordered price series.

use chrono::{Datelike, NaiveDate};

/// One closing price. Year and month are derived from the date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub close: f64,
}

impl PriceRecord {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        PriceRecord {
            date,
            year: date.year(),
            month: date.month(),
            close,
        }
    }
}

/// Date-ordered closes for one instrument.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    records: Vec<PriceRecord>,
}

impl PriceSeries {
    /// Builds a series, sorting records by date (stable for equal dates).
    pub fn new(mut records: Vec<PriceRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        PriceSeries { records }
    }

    pub fn from_closes(points: &[(NaiveDate, f64)]) -> Self {
        Self::new(
            points
                .iter()
                .map(|&(date, close)| PriceRecord::new(date, close))
                .collect(),
        )
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.close).collect()
    }

    /// Contiguous slice of the records dated in `year`.
    pub fn year_records(&self, year: i32) -> &[PriceRecord] {
        let start = self.records.partition_point(|r| r.year < year);
        let end = self.records.partition_point(|r| r.year <= year);
        &self.records[start..end]
    }

    pub fn month_records(&self, year: i32, month: u32) -> &[PriceRecord] {
        let in_year = self.year_records(year);
        let start = in_year.partition_point(|r| r.month < month);
        let end = in_year.partition_point(|r| r.month <= month);
        &in_year[start..end]
    }

    /// Mean close over `year`, NaN when the year has no records.
    pub fn mean_close(&self, year: i32) -> f64 {
        mean_close(self.year_records(year))
    }

    /// Mean close over one calendar month, NaN when the month has no records.
    pub fn mean_close_in_month(&self, year: i32, month: u32) -> f64 {
        mean_close(self.month_records(year, month))
    }

    pub fn year_range(&self) -> Option<(i32, i32)> {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => Some((first.year, last.year)),
            _ => None,
        }
    }
}

pub fn mean_close(records: &[PriceRecord]) -> f64 {
    if records.is_empty() {
        return f64::NAN;
    }
    records.iter().map(|r| r.close).sum::<f64>() / records.len() as f64
}
