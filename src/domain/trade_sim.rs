//! EMA crossover trade simulation, one calendar year at a time.
//!
//! Crossover signals are computed once over the whole series so that each
//! year starts with EMAs carried over from the previous one. Each year then
//! folds a fresh [`PositionState`] over its own records and, if anything was
//! bought, produces one [`TradeLedgerRecord`].

use std::ops::Range;

use tracing::info;

use super::ema::{ema_crossover, Signal};
use super::error::ReturnsError;
use super::period::Period;
use super::position::{ExpenseModel, PositionState};
use super::price::{PriceRecord, PriceSeries};
use super::table::{ResultTable, TableRow};

/// SPY-style expense ratio charged on held value.
pub const DEFAULT_EXPENSE_RATE: f64 = 0.00095;
/// Index level divided by this gives the ETF price.
pub const ETF_PRICE_DIVISOR: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TradeSimConfig {
    pub fast_span: usize,
    pub slow_span: usize,
    /// Units bought by the first trade of each year.
    pub seed_units: f64,
    /// Close divided by this is the traded unit price.
    pub price_divisor: f64,
    pub expense_model: ExpenseModel,
    pub years: Range<i32>,
}

impl TradeSimConfig {
    /// ETF on a stock index: 20 units, index/10 pricing, holding costs.
    pub fn stocks() -> Self {
        TradeSimConfig {
            fast_span: 12,
            slow_span: 26,
            seed_units: 20.0,
            price_divisor: ETF_PRICE_DIVISOR,
            expense_model: ExpenseModel::HoldingCost {
                annual_rate: DEFAULT_EXPENSE_RATE,
            },
            years: 1950..2023,
        }
    }

    /// Physical gold: 20 ounces at the quoted price, no holding costs.
    pub fn gold() -> Self {
        TradeSimConfig {
            price_divisor: 1.0,
            expense_model: ExpenseModel::None,
            years: 1970..2023,
            ..Self::stocks()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeLedgerRecord {
    pub trade_count: usize,
    pub capital_invested: f64,
    pub final_cash: f64,
    pub expenses: f64,
    pub capital_gained: f64,
    pub percent_return: f64,
}

impl TradeLedgerRecord {
    fn from_state(state: &PositionState) -> Self {
        let capital_gained = state.cash_balance - state.capital_invested;
        TradeLedgerRecord {
            trade_count: state.trade_count,
            capital_invested: state.capital_invested,
            final_cash: state.cash_balance,
            expenses: state.expenses,
            capital_gained,
            percent_return: capital_gained / state.capital_invested * 100.0,
        }
    }
}

impl TableRow for TradeLedgerRecord {
    fn column_names() -> &'static [&'static str] {
        &[
            "Trade Counts",
            "Capital Invested",
            "Final Capital",
            "Expenses",
            "Capital Gained",
            "(%)Annual_Return",
        ]
    }

    fn values(&self) -> Vec<f64> {
        vec![
            self.trade_count as f64,
            self.capital_invested,
            self.final_cash,
            self.expenses,
            self.capital_gained,
            self.percent_return,
        ]
    }
}

/// Runs one period's records through the Flat/Long state machine.
///
/// `records` and `signals` must be aligned. An open position is liquidated
/// at the last record. Returns `None` when nothing was ever bought.
pub fn simulate_period(
    records: &[PriceRecord],
    signals: &[Signal],
    config: &TradeSimConfig,
) -> Option<TradeLedgerRecord> {
    let mut state = PositionState::new();

    for (record, signal) in records.iter().zip(signals) {
        let price = record.close / config.price_divisor;
        match signal {
            Signal::Buy if !state.in_position() => {
                state.open(record.date, price, config.seed_units);
            }
            Signal::Sell if state.in_position() => {
                state.close(record.date, price, config.expense_model);
            }
            _ => {}
        }
    }

    if state.in_position() {
        if let Some(last) = records.last() {
            state.close(
                last.date,
                last.close / config.price_divisor,
                config.expense_model,
            );
        }
    }

    if state.capital_invested == 0.0 {
        return None;
    }
    Some(TradeLedgerRecord::from_state(&state))
}

/// One ledger row per year with at least one trade, keyed by `Period::Year`.
pub fn simulate_ema_trades(
    series: &PriceSeries,
    config: &TradeSimConfig,
) -> Result<ResultTable<Period, TradeLedgerRecord>, ReturnsError> {
    let signals = ema_crossover(series, config.fast_span, config.slow_span)?;
    let records = series.records();
    let mut table = ResultTable::new();

    for year in config.years.clone() {
        let start = records.partition_point(|r| r.year < year);
        let end = records.partition_point(|r| r.year <= year);
        if let Some(row) = simulate_period(&records[start..end], &signals[start..end], config) {
            table.push(Period::Year(year), row)?;
        }
    }

    info!(
        years = config.years.len(),
        rows = table.len(),
        fast = config.fast_span,
        slow = config.slow_span,
        "simulated EMA crossover trading"
    );
    Ok(table)
}
