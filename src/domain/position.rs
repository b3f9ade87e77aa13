//! Per-period position state for the crossover trade simulation.
//!
//! Flat -> Long on a buy, Long -> Flat on a sell or at the end of the period.

use chrono::NaiveDate;
use tracing::debug;

/// How holding costs are charged when a position is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpenseModel {
    /// units * price * rate * days_held / 365
    HoldingCost { annual_rate: f64 },
    None,
}

impl ExpenseModel {
    pub fn charge(&self, proceeds: f64, days_held: i64) -> f64 {
        match *self {
            ExpenseModel::HoldingCost { annual_rate } => {
                proceeds * annual_rate * days_held as f64 / 365.0
            }
            ExpenseModel::None => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionState {
    pub cash_balance: f64,
    pub units_held: f64,
    pub capital_invested: f64,
    pub entry_date: Option<NaiveDate>,
    pub trade_count: usize,
    pub expenses: f64,
}

impl PositionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_position(&self) -> bool {
        self.entry_date.is_some()
    }

    /// Flat -> Long.
    ///
    /// With an empty cash balance this is treated as the seed purchase:
    /// `seed_units` are bought and their cost becomes the invested capital,
    /// without touching cash. Otherwise all cash buys whole units and the
    /// remainder stays as cash. Does nothing if already long.
    pub fn open(&mut self, date: NaiveDate, price: f64, seed_units: f64) {
        if self.in_position() {
            return;
        }
        if self.cash_balance == 0.0 {
            self.units_held = seed_units;
            self.capital_invested = seed_units * price;
        } else {
            self.units_held = (self.cash_balance / price).floor();
            self.cash_balance -= self.units_held * price;
        }
        self.entry_date = Some(date);
        debug!(
            %date,
            units = self.units_held,
            price,
            cost = self.units_held * price,
            cash = self.cash_balance,
            "bought"
        );
    }

    /// Long -> Flat. Returns `false` if there was no open position.
    pub fn close(&mut self, date: NaiveDate, price: f64, expense_model: ExpenseModel) -> bool {
        let Some(entry_date) = self.entry_date.take() else {
            return false;
        };
        let proceeds = self.units_held * price;
        let days_held = (date - entry_date).num_days();
        let expense = expense_model.charge(proceeds, days_held);

        self.cash_balance += proceeds - expense;
        self.expenses += expense;
        self.trade_count += 1;

        debug!(
            %date,
            units = self.units_held,
            price,
            proceeds,
            expense,
            cash = self.cash_balance,
            "sold"
        );
        self.units_held = 0.0;
        true
    }
}
