//! Inflation- and dividend-adjusted annual returns.
//!
//! Every variant keys its rows by the `(year - 1, year)` span and compares the
//! mean close of `year` against the mean close of `year - 1` restated in
//! `year` money (`cpi[year] / cpi[year - 1]`). Missing price data becomes NaN;
//! missing index years are errors.

use std::ops::Range;

use tracing::{info, warn};

use super::error::ReturnsError;
use super::index_tables::EconomicIndexTables;
use super::period::{MonthKey, Period};
use super::price::PriceSeries;
use super::table::{ResultTable, TableRow};

/// Default range of `year` values (periods 1950-1951 through 2022-2023).
pub const DEFAULT_RETURN_YEARS: Range<i32> = 1951..2024;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockReturn {
    pub without_dividends: f64,
    pub with_dividends: f64,
}

impl TableRow for StockReturn {
    fn column_names() -> &'static [&'static str] {
        &[
            "(%)Adjusted_Annual_Return_Without_Dividends",
            "(%)Adjusted_Annual_Return_With_Dividends",
        ]
    }

    fn values(&self) -> Vec<f64> {
        vec![self.without_dividends, self.with_dividends]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealReturn {
    pub real_return: f64,
}

impl TableRow for RealReturn {
    fn column_names() -> &'static [&'static str] {
        &["(%)Adjusted_Real_Return"]
    }

    fn values(&self) -> Vec<f64> {
        vec![self.real_return]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyReturn {
    pub month: u32,
    pub real_return: f64,
}

impl TableRow for MonthlyReturn {
    fn column_names() -> &'static [&'static str] {
        &["Month", "(%)Adjusted_Real_Return"]
    }

    fn values(&self) -> Vec<f64> {
        vec![self.month as f64, self.real_return]
    }
}

/// Real percentage change from `previous_mean` to `current_mean`.
///
/// `inflation` restates the previous mean (and its dividend) in current money.
/// `dividend_yield_pct` of `None` leaves dividends out.
pub fn adjusted_return(
    current_mean: f64,
    previous_mean: f64,
    inflation: f64,
    dividend_yield_pct: Option<f64>,
) -> f64 {
    let adjusted_previous = previous_mean * inflation;
    let adjusted_dividend = dividend_yield_pct
        .map(|d| d * previous_mean / 100.0 * inflation)
        .unwrap_or(0.0);
    (current_mean + adjusted_dividend - adjusted_previous) / adjusted_previous * 100.0
}

/// Annual returns of a stock index from annual mean closes, with and
/// without the previous year's dividend yield.
pub fn annual_returns_stocks(
    series: &PriceSeries,
    tables: &EconomicIndexTables,
    years: Range<i32>,
) -> Result<ResultTable<Period, StockReturn>, ReturnsError> {
    let mut table = ResultTable::new();
    for year in years {
        let current = series.mean_close(year);
        let previous = series.mean_close(year - 1);
        let dividend = tables.dividend_yield(year - 1)?;
        let inflation = tables.inflation_factor(year)?;

        let row = StockReturn {
            without_dividends: adjusted_return(current, previous, inflation, None),
            with_dividends: adjusted_return(current, previous, inflation, Some(dividend)),
        };
        if row.with_dividends.is_nan() {
            warn!(year, "no price data for annual stock return");
        }
        table.push(Period::year_over_year(year), row)?;
    }
    info!(rows = table.len(), "computed annual stock returns");
    Ok(table)
}

fn monthly_stock_returns(
    series: &PriceSeries,
    tables: &EconomicIndexTables,
    year: i32,
) -> Result<[f64; 12], ReturnsError> {
    let dividend = tables.dividend_yield(year - 1)?;
    let inflation = tables.inflation_factor(year)?;
    let mut returns = [f64::NAN; 12];
    for (slot, month) in returns.iter_mut().zip(1..=12u32) {
        let current = series.mean_close_in_month(year, month);
        let previous = series.mean_close_in_month(year - 1, month);
        *slot = adjusted_return(current, previous, inflation, Some(dividend));
    }
    Ok(returns)
}

/// Annual stock returns computed month by month (January against January,
/// and so on) and then averaged. A month with no data makes the year NaN.
pub fn monthly_averaged_returns_stocks(
    series: &PriceSeries,
    tables: &EconomicIndexTables,
    years: Range<i32>,
) -> Result<ResultTable<Period, RealReturn>, ReturnsError> {
    let mut table = ResultTable::new();
    for year in years {
        let monthly = monthly_stock_returns(series, tables, year)?;
        let real_return = mean(&monthly);
        if real_return.is_nan() {
            warn!(year, "incomplete monthly data for stock return");
        }
        table.push(Period::year_over_year(year), RealReturn { real_return })?;
    }
    info!(rows = table.len(), "computed monthly-averaged stock returns");
    Ok(table)
}

/// The twelve monthly stock returns behind [`monthly_averaged_returns_stocks`].
pub fn monthly_returns_stocks(
    series: &PriceSeries,
    tables: &EconomicIndexTables,
    years: Range<i32>,
) -> Result<ResultTable<MonthKey, MonthlyReturn>, ReturnsError> {
    let mut table = ResultTable::new();
    for year in years {
        let monthly = monthly_stock_returns(series, tables, year)?;
        for (month, real_return) in (1..=12u32).zip(monthly) {
            let key = MonthKey {
                period: Period::year_over_year(year),
                month,
            };
            table.push(key, MonthlyReturn { month, real_return })?;
        }
    }
    Ok(table)
}

/// Annual commodity returns from annual mean closes (no dividends).
pub fn annual_returns_commodity(
    series: &PriceSeries,
    tables: &EconomicIndexTables,
    years: Range<i32>,
) -> Result<ResultTable<Period, RealReturn>, ReturnsError> {
    let mut table = ResultTable::new();
    for year in years {
        let inflation = tables.inflation_factor(year)?;
        let real_return =
            adjusted_return(series.mean_close(year), series.mean_close(year - 1), inflation, None);
        if real_return.is_nan() {
            warn!(year, "no price data for annual commodity return");
        }
        table.push(Period::year_over_year(year), RealReturn { real_return })?;
    }
    info!(rows = table.len(), "computed annual commodity returns");
    Ok(table)
}

/// Commodity returns month by month, then averaged. Months without a price
/// in either year are skipped; a year with no usable month is NaN.
pub fn monthly_averaged_returns_commodity(
    series: &PriceSeries,
    tables: &EconomicIndexTables,
    years: Range<i32>,
) -> Result<ResultTable<Period, RealReturn>, ReturnsError> {
    let mut table = ResultTable::new();
    for year in years {
        let inflation = tables.inflation_factor(year)?;
        let mut monthly = Vec::with_capacity(12);
        for month in 1..=12u32 {
            let current = series.month_records(year, month);
            let previous = series.month_records(year - 1, month);
            if current.is_empty() || previous.is_empty() {
                continue;
            }
            monthly.push(adjusted_return(
                series.mean_close_in_month(year, month),
                series.mean_close_in_month(year - 1, month),
                inflation,
                None,
            ));
        }
        let real_return = mean(&monthly);
        if monthly.is_empty() {
            warn!(year, "no overlapping months for commodity return");
        }
        table.push(Period::year_over_year(year), RealReturn { real_return })?;
    }
    info!(rows = table.len(), "computed monthly-averaged commodity returns");
    Ok(table)
}

/// Arithmetic mean, NaN for an empty slice or when any value is NaN.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
