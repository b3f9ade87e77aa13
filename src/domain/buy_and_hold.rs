//! Buy-and-hold baselines.
//!
//! The control group buys at the January mean price and sells at the
//! December mean price of each year. The window simulations buy a random
//! selection of prices from a start year and hold them for a fixed number of
//! years, compounding annual growth, and restate both ends in the money of a
//! common reference year.
//!
//! Random draws come from the caller's RNG. Production callers use an
//! unseeded thread RNG, so repeated runs give different samples.

use std::ops::Range;

use rand::seq::index;
use rand::Rng;
use tracing::{debug, info};

use super::error::ReturnsError;
use super::index_tables::EconomicIndexTables;
use super::period::{Period, SampleKey};
use super::price::PriceSeries;
use super::table::{ResultTable, TableRow};
use super::trade_sim::{DEFAULT_EXPENSE_RATE, ETF_PRICE_DIVISOR};

/// Days charged between the January buy and the December sell.
const CONTROL_HOLDING_DAYS: f64 = 335.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ControlGroupConfig {
    pub units: f64,
    pub price_divisor: f64,
    pub expense_rate: f64,
    pub years: Range<i32>,
}

impl ControlGroupConfig {
    pub fn stocks() -> Self {
        ControlGroupConfig {
            units: 20.0,
            price_divisor: ETF_PRICE_DIVISOR,
            expense_rate: DEFAULT_EXPENSE_RATE,
            years: 1950..2023,
        }
    }

    pub fn gold() -> Self {
        ControlGroupConfig {
            units: 20.0,
            price_divisor: 1.0,
            expense_rate: 0.0,
            years: 1970..2023,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlGroupRecord {
    pub capital_invested: f64,
    pub final_capital: f64,
    pub expenses: f64,
    pub capital_gained: f64,
    pub percent_return: f64,
}

impl TableRow for ControlGroupRecord {
    fn column_names() -> &'static [&'static str] {
        &[
            "Capital Invested",
            "Final Capital",
            "Expenses",
            "Capital Gained",
            "(%)Annual_Return",
        ]
    }

    fn values(&self) -> Vec<f64> {
        vec![
            self.capital_invested,
            self.final_capital,
            self.expenses,
            self.capital_gained,
            self.percent_return,
        ]
    }
}

/// Buy in January, sell in December, every year in range. Years missing
/// either month produce NaN rows.
pub fn simulate_control_group(
    series: &PriceSeries,
    config: &ControlGroupConfig,
) -> Result<ResultTable<Period, ControlGroupRecord>, ReturnsError> {
    let mut table = ResultTable::new();
    for year in config.years.clone() {
        let buy_price = series.mean_close_in_month(year, 1) / config.price_divisor;
        let sell_price = series.mean_close_in_month(year, 12) / config.price_divisor;
        let start_value = buy_price * config.units;
        let end_value = sell_price * config.units;
        let expenses = start_value * config.expense_rate * CONTROL_HOLDING_DAYS / 365.0;
        let capital_gained = end_value - start_value - expenses;

        table.push(
            Period::Year(year),
            ControlGroupRecord {
                capital_invested: start_value,
                final_capital: end_value - expenses,
                expenses,
                capital_gained,
                percent_return: capital_gained / start_value * 100.0,
            },
        )?;
    }
    info!(rows = table.len(), "simulated control group");
    Ok(table)
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowSimConfig {
    pub window_years: i32,
    /// Range of window start years.
    pub start_years: Range<i32>,
    /// Distinct purchase prices drawn from the start year per sample.
    pub purchase_times: usize,
    /// Independent samples per window.
    pub sample_size: usize,
    pub units_per_purchase: f64,
    pub price_divisor: f64,
    pub expense_ratio: f64,
    /// Year whose money all adjusted values are expressed in.
    pub reference_year: i32,
    /// A start year with at most this many records buys only once.
    pub sparse_year_records: Option<usize>,
}

impl WindowSimConfig {
    pub fn stocks() -> Self {
        WindowSimConfig {
            window_years: 20,
            start_years: 1950..2004,
            purchase_times: 10,
            sample_size: 1,
            units_per_purchase: 2.0,
            price_divisor: ETF_PRICE_DIVISOR,
            expense_ratio: DEFAULT_EXPENSE_RATE,
            reference_year: 2023,
            sparse_year_records: None,
        }
    }

    pub fn gold() -> Self {
        WindowSimConfig {
            sample_size: 30,
            price_divisor: 1.0,
            expense_ratio: 0.0,
            sparse_year_records: Some(4),
            ..Self::stocks()
        }
    }

    fn window(&self, start: i32) -> Result<Period, ReturnsError> {
        Period::span(start, start + self.window_years)
    }

    fn purchases_for(&self, available: usize) -> usize {
        match self.sparse_year_records {
            Some(limit) if available <= limit => 1,
            _ => self.purchase_times,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSimulationRecord {
    pub capital_invested: f64,
    pub portfolio_value: f64,
    pub capital_gained: f64,
    pub capital_invested_adjusted: f64,
    pub portfolio_value_adjusted: f64,
    pub percent_change_without_dividends: f64,
    pub percent_change_with_dividends: f64,
    /// Adjusted gain of the portfolio that did not reinvest dividends.
    pub real_return: f64,
}

impl TableRow for WindowSimulationRecord {
    fn column_names() -> &'static [&'static str] {
        &[
            "Capital Invested",
            "Portfolio Value",
            "Capital Gained",
            "Capital Invested Adjusted",
            "Portfolio Value Adjusted",
            "% Change w.o. Dividend",
            "% Change with Dividend",
            "Real Returns",
        ]
    }

    fn values(&self) -> Vec<f64> {
        vec![
            self.capital_invested,
            self.portfolio_value,
            self.capital_gained,
            self.capital_invested_adjusted,
            self.portfolio_value_adjusted,
            self.percent_change_without_dividends,
            self.percent_change_with_dividends,
            self.real_return,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommodityWindowRecord {
    pub capital_invested: f64,
    pub portfolio_value: f64,
    pub capital_gained: f64,
    pub capital_invested_adjusted: f64,
    pub portfolio_value_adjusted: f64,
    pub percent_change: f64,
}

impl TableRow for CommodityWindowRecord {
    fn column_names() -> &'static [&'static str] {
        &[
            "Capital Invested",
            "Portfolio Value",
            "Capital Gained",
            "Capital Invested Adjusted",
            "Portfolio Value Adjusted",
            "% Change",
        ]
    }

    fn values(&self) -> Vec<f64> {
        vec![
            self.capital_invested,
            self.portfolio_value,
            self.capital_gained,
            self.capital_invested_adjusted,
            self.portfolio_value_adjusted,
            self.percent_change,
        ]
    }
}

/// Draws `amount` distinct closes from `year`, divided by `divisor`.
fn draw_prices<R: Rng + ?Sized>(
    rng: &mut R,
    series: &PriceSeries,
    year: i32,
    amount: usize,
    divisor: f64,
) -> Result<Vec<f64>, ReturnsError> {
    let records = series.year_records(year);
    if amount > records.len() {
        return Err(ReturnsError::InsufficientSamples {
            year,
            available: records.len(),
            requested: amount,
        });
    }
    Ok(index::sample(rng, records.len(), amount)
        .into_iter()
        .map(|i| records[i].close / divisor)
        .collect())
}

/// Growth multipliers for holding one year to the next: the reinvesting
/// portfolio with dividends less the expense drag, and the bare price ratio
/// for the portfolio that neither reinvests nor pays fees.
fn annual_growth(
    series: &PriceSeries,
    tables: &EconomicIndexTables,
    year: i32,
    expense_ratio: f64,
) -> Result<(f64, f64), ReturnsError> {
    let growth = series.mean_close(year) / series.mean_close(year - 1);
    let dividend = tables.dividend_yield(year - 1)? / 100.0;
    Ok((growth + dividend - expense_ratio, growth))
}

/// Stock index windows: compound from the start year to the end year, in
/// parallel with and without dividend reinvestment.
pub fn simulate_windows<R: Rng + ?Sized>(
    series: &PriceSeries,
    tables: &EconomicIndexTables,
    config: &WindowSimConfig,
    rng: &mut R,
) -> Result<ResultTable<SampleKey, WindowSimulationRecord>, ReturnsError> {
    let mut table = ResultTable::new();

    for start in config.start_years.clone() {
        let period = config.window(start)?;
        let end = period.end_year();
        let growth: Vec<(f64, f64)> = (start + 1..=end)
            .map(|year| annual_growth(series, tables, year, config.expense_ratio))
            .collect::<Result<_, _>>()?;
        let end_deflator = tables.deflator(end, config.reference_year)?;
        let start_deflator = tables.deflator(start, config.reference_year)?;
        let purchases = config.purchases_for(series.year_records(start).len());

        for sample in 0..config.sample_size {
            let prices = draw_prices(rng, series, start, purchases, config.price_divisor)?;
            let capital_invested: f64 = prices.iter().map(|p| p * config.units_per_purchase).sum();

            let (portfolio_value, not_reinvested) = growth.iter().fold(
                (capital_invested, capital_invested),
                |(with, without), (g_with, g_without)| (with * g_with, without * g_without),
            );

            let portfolio_value_adjusted = portfolio_value * end_deflator;
            let not_reinvested_adjusted = not_reinvested * end_deflator;
            let capital_invested_adjusted = capital_invested * start_deflator;

            let record = WindowSimulationRecord {
                capital_invested,
                portfolio_value,
                capital_gained: portfolio_value - capital_invested,
                capital_invested_adjusted,
                portfolio_value_adjusted,
                percent_change_without_dividends: (not_reinvested_adjusted
                    - capital_invested_adjusted)
                    * 100.0
                    / capital_invested_adjusted,
                percent_change_with_dividends: (portfolio_value_adjusted
                    - capital_invested_adjusted)
                    * 100.0
                    / capital_invested_adjusted,
                real_return: not_reinvested_adjusted - capital_invested_adjusted,
            };
            debug!(%period, sample, capital_invested, portfolio_value, "window sample");
            table.push(SampleKey { period, sample }, record)?;
        }
    }

    info!(rows = table.len(), "simulated stock holding windows");
    Ok(table)
}

/// Commodity windows: sampled purchases in the start year, valued at the
/// end year's mean price.
pub fn simulate_commodity_windows<R: Rng + ?Sized>(
    series: &PriceSeries,
    tables: &EconomicIndexTables,
    config: &WindowSimConfig,
    rng: &mut R,
) -> Result<ResultTable<SampleKey, CommodityWindowRecord>, ReturnsError> {
    let mut table = ResultTable::new();

    for start in config.start_years.clone() {
        let period = config.window(start)?;
        let end = period.end_year();
        let end_price = series.mean_close(end) / config.price_divisor;
        let end_deflator = tables.deflator(end, config.reference_year)?;
        let start_deflator = tables.deflator(start, config.reference_year)?;
        let purchases = config.purchases_for(series.year_records(start).len());

        for sample in 0..config.sample_size {
            let prices = draw_prices(rng, series, start, purchases, config.price_divisor)?;
            let capital_invested = prices.iter().sum::<f64>() * config.units_per_purchase;
            let portfolio_value = end_price * purchases as f64 * config.units_per_purchase;

            let portfolio_value_adjusted = portfolio_value * end_deflator;
            let capital_invested_adjusted = capital_invested * start_deflator;

            table.push(
                SampleKey { period, sample },
                CommodityWindowRecord {
                    capital_invested,
                    portfolio_value,
                    capital_gained: portfolio_value - capital_invested,
                    capital_invested_adjusted,
                    portfolio_value_adjusted,
                    percent_change: (portfolio_value_adjusted - capital_invested_adjusted)
                        / capital_invested_adjusted
                        * 100.0,
                },
            )?;
        }
    }

    info!(rows = table.len(), "simulated commodity holding windows");
    Ok(table)
}
