//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt::Display;
use std::fs::File;
use std::hash::Hash;
use std::io::{self, BufWriter, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use crate::adapters::csv_adapter::{CsvIndexAdapter, CsvPriceAdapter};
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::buy_and_hold::{
    simulate_commodity_windows, simulate_control_group, simulate_windows, ControlGroupConfig,
    WindowSimConfig,
};
use crate::domain::config_validation::{
    validate_all, validate_control_config, validate_returns_config, validate_simulation_config,
    validate_trade_config,
};
use crate::domain::error::ReturnsError;
use crate::domain::position::ExpenseModel;
use crate::domain::returns::{
    annual_returns_commodity, annual_returns_stocks, monthly_averaged_returns_commodity,
    monthly_averaged_returns_stocks, monthly_returns_stocks, DEFAULT_RETURN_YEARS,
};
use crate::domain::summary::ColumnSummary;
use crate::domain::table::{ResultTable, TableRow};
use crate::domain::trade_sim::{simulate_ema_trades, TradeSimConfig};
use crate::ports::config_port::ConfigPort;
use crate::ports::index_port::IndexSource;
use crate::ports::price_port::PriceSource;
use crate::ports::report_port::ReportSink;

#[derive(Parser, Debug)]
#[command(
    name = "realreturns",
    about = "Inflation-adjusted returns and trading simulations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every computing subcommand.
#[derive(Args, Debug, Clone)]
pub struct IoArgs {
    /// INI configuration; defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Daily price CSV
    #[arg(short, long)]
    pub prices: PathBuf,
    /// Result CSV; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute inflation-adjusted annual returns
    Returns {
        #[arg(long, value_enum)]
        variant: ReturnsVariant,
        /// Annual CPI and dividend yield CSV
        #[arg(short, long)]
        indices: PathBuf,
        #[command(flatten)]
        args: IoArgs,
    },
    /// Simulate EMA-crossover trading per calendar year
    Trade {
        #[arg(long, value_enum, default_value_t = Asset::Stock)]
        asset: Asset,
        #[command(flatten)]
        args: IoArgs,
    },
    /// Simulate the January-to-December buy-and-hold control group
    Control {
        #[arg(long, value_enum, default_value_t = Asset::Stock)]
        asset: Asset,
        #[command(flatten)]
        args: IoArgs,
    },
    /// Simulate random-purchase buy-and-hold windows
    Simulate {
        #[arg(long, value_enum, default_value_t = Asset::Stock)]
        asset: Asset,
        /// Annual CPI and dividend yield CSV
        #[arg(short, long)]
        indices: PathBuf,
        #[command(flatten)]
        args: IoArgs,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnsVariant {
    Stocks,
    StocksMonthly,
    StocksMonthlyDetail,
    Commodity,
    CommodityMonthly,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Stock,
    Gold,
}

pub fn run(cli: Cli) -> ExitCode {
    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Dispatches one subcommand.
pub fn execute(command: Command) -> Result<(), ReturnsError> {
    match command {
        Command::Returns {
            variant,
            indices,
            args,
        } => run_returns(variant, &indices, &args),
        Command::Trade { asset, args } => run_trade(asset, &args),
        Command::Control { asset, args } => run_control(asset, &args),
        Command::Simulate {
            asset,
            indices,
            args,
        } => run_simulate(asset, &indices, &args),
        Command::Validate { config } => run_validate(&config),
    }
}

/// Loads the INI file, or an empty configuration when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, ReturnsError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            FileConfigAdapter::from_file(path)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

fn run_returns(
    variant: ReturnsVariant,
    indices: &Path,
    args: &IoArgs,
) -> Result<(), ReturnsError> {
    let config = load_config(args.config.as_deref())?;
    validate_returns_config(&config)?;
    let years = returns_years(&config)?;

    let series = CsvPriceAdapter::new(args.prices.clone()).load_series()?;
    let tables = CsvIndexAdapter::new(indices.to_path_buf()).load_tables()?;
    info!(
        records = series.len(),
        span = ?series.year_range(),
        coverage = ?tables.coverage(),
        ?variant,
        "computing returns"
    );

    match variant {
        ReturnsVariant::Stocks => {
            emit(&config, args, &annual_returns_stocks(&series, &tables, years)?)
        }
        ReturnsVariant::StocksMonthly => emit(
            &config,
            args,
            &monthly_averaged_returns_stocks(&series, &tables, years)?,
        ),
        ReturnsVariant::StocksMonthlyDetail => {
            emit(&config, args, &monthly_returns_stocks(&series, &tables, years)?)
        }
        ReturnsVariant::Commodity => {
            emit(&config, args, &annual_returns_commodity(&series, &tables, years)?)
        }
        ReturnsVariant::CommodityMonthly => emit(
            &config,
            args,
            &monthly_averaged_returns_commodity(&series, &tables, years)?,
        ),
    }
}

fn run_trade(asset: Asset, args: &IoArgs) -> Result<(), ReturnsError> {
    let config = load_config(args.config.as_deref())?;
    validate_trade_config(&config)?;
    let trade_config = build_trade_config(&config, asset)?;

    let series = CsvPriceAdapter::new(args.prices.clone()).load_series()?;
    info!(
        records = series.len(),
        fast = trade_config.fast_span,
        slow = trade_config.slow_span,
        "simulating crossover trades"
    );
    emit(&config, args, &simulate_ema_trades(&series, &trade_config)?)
}

fn run_control(asset: Asset, args: &IoArgs) -> Result<(), ReturnsError> {
    let config = load_config(args.config.as_deref())?;
    validate_control_config(&config)?;
    let control_config = build_control_config(&config, asset)?;

    let series = CsvPriceAdapter::new(args.prices.clone()).load_series()?;
    info!(records = series.len(), span = ?series.year_range(), "simulating control group");
    emit(&config, args, &simulate_control_group(&series, &control_config)?)
}

fn run_simulate(asset: Asset, indices: &Path, args: &IoArgs) -> Result<(), ReturnsError> {
    let config = load_config(args.config.as_deref())?;
    validate_simulation_config(&config)?;
    let window_config = build_window_config(&config, asset)?;

    let series = CsvPriceAdapter::new(args.prices.clone()).load_series()?;
    let tables = CsvIndexAdapter::new(indices.to_path_buf()).load_tables()?;
    info!(
        windows = window_config.start_years.len(),
        samples = window_config.sample_size,
        "simulating buy-and-hold windows"
    );

    let mut rng = rand::thread_rng();
    match asset {
        Asset::Stock => emit(
            &config,
            args,
            &simulate_windows(&series, &tables, &window_config, &mut rng)?,
        ),
        Asset::Gold => emit(
            &config,
            args,
            &simulate_commodity_windows(&series, &tables, &window_config, &mut rng)?,
        ),
    }
}

fn run_validate(path: &Path) -> Result<(), ReturnsError> {
    eprintln!("Validating config: {}", path.display());
    let config = load_config(Some(path))?;
    validate_all(&config)?;

    for asset in [Asset::Stock, Asset::Gold] {
        let trade = build_trade_config(&config, asset)?;
        let control = build_control_config(&config, asset)?;
        let window = build_window_config(&config, asset)?;
        eprintln!(
            "  {:?}: trade {}..{} EMA({}/{}), control {}..{}, windows {}..{} x{} years",
            asset,
            trade.years.start,
            trade.years.end,
            trade.fast_span,
            trade.slow_span,
            control.years.start,
            control.years.end,
            window.start_years.start,
            window.start_years.end,
            window.window_years,
        );
    }
    eprintln!("Configuration is valid.");
    Ok(())
}

/// Writes the table to `--output` (or stdout) and, unless disabled by
/// `[output] summary`, prints per-column statistics to stderr.
fn emit<K, R>(
    config: &dyn ConfigPort,
    args: &IoArgs,
    table: &ResultTable<K, R>,
) -> Result<(), ReturnsError>
where
    K: Eq + Hash + Clone + Display,
    R: TableRow,
{
    match &args.output {
        Some(path) => {
            let file = File::create(path)?;
            let mut sink = CsvReportAdapter::new(BufWriter::new(file));
            sink.write_table(table)?;
            sink.into_inner()?.flush()?;
            info!(path = %path.display(), rows = table.len(), "wrote report");
        }
        None => {
            let mut sink = CsvReportAdapter::new(io::stdout().lock());
            sink.write_table(table)?;
            sink.into_inner()?;
        }
    }

    if config.get_bool("output", "summary", true) {
        print_summary(table);
    }
    Ok(())
}

pub fn print_summary<K, R>(table: &ResultTable<K, R>)
where
    K: Eq + Hash + Clone + Display,
    R: TableRow,
{
    eprintln!("\n{} rows", table.len());
    for (i, name) in R::column_names().iter().enumerate() {
        let s = ColumnSummary::compute(&table.column(|row| row.values()[i]));
        eprintln!(
            "  {:<32} mean {:>12.4}  sd {:>12.4}  min {:>12.4}  median {:>12.4}  max {:>12.4}  positive {:>5.1}%  NaN {}",
            name,
            s.mean,
            s.std_dev,
            s.min,
            s.median,
            s.max,
            s.positive_share * 100.0,
            s.nan_count,
        );
    }
}

/// `start_year..end_year` from a section, end exclusive.
pub fn year_range(
    adapter: &dyn ConfigPort,
    section: &str,
    default: Range<i32>,
) -> Result<Range<i32>, ReturnsError> {
    let start = adapter.get_year(section, "start_year", default.start)?;
    let end = adapter.get_year(section, "end_year", default.end)?;
    if start >= end {
        return Err(ReturnsError::ConfigInvalid {
            section: section.into(),
            key: "start_year".into(),
            reason: "start_year must be before end_year".into(),
        });
    }
    Ok(start..end)
}

pub fn returns_years(adapter: &dyn ConfigPort) -> Result<Range<i32>, ReturnsError> {
    year_range(adapter, "returns", DEFAULT_RETURN_YEARS)
}

/// The asset preset overridden by `[trade]`. A zero `expense_rate` disables
/// holding costs.
pub fn build_trade_config(
    adapter: &dyn ConfigPort,
    asset: Asset,
) -> Result<TradeSimConfig, ReturnsError> {
    let base = match asset {
        Asset::Stock => TradeSimConfig::stocks(),
        Asset::Gold => TradeSimConfig::gold(),
    };
    let expense_model = match adapter.get_string("trade", "expense_rate") {
        None => base.expense_model,
        Some(_) => match adapter.get_double("trade", "expense_rate", 0.0) {
            rate if rate > 0.0 => ExpenseModel::HoldingCost { annual_rate: rate },
            _ => ExpenseModel::None,
        },
    };

    Ok(TradeSimConfig {
        fast_span: adapter.get_count("trade", "fast_span", base.fast_span)?,
        slow_span: adapter.get_count("trade", "slow_span", base.slow_span)?,
        seed_units: adapter.get_double("trade", "units", base.seed_units),
        price_divisor: adapter.get_double("trade", "price_divisor", base.price_divisor),
        expense_model,
        years: year_range(adapter, "trade", base.years)?,
    })
}

pub fn build_control_config(
    adapter: &dyn ConfigPort,
    asset: Asset,
) -> Result<ControlGroupConfig, ReturnsError> {
    let base = match asset {
        Asset::Stock => ControlGroupConfig::stocks(),
        Asset::Gold => ControlGroupConfig::gold(),
    };
    Ok(ControlGroupConfig {
        units: adapter.get_double("control", "units", base.units),
        price_divisor: adapter.get_double("control", "price_divisor", base.price_divisor),
        expense_rate: adapter.get_double("control", "expense_rate", base.expense_rate),
        years: year_range(adapter, "control", base.years)?,
    })
}

/// The asset preset overridden by `[simulation]`. `start_year..end_year`
/// are window start years.
pub fn build_window_config(
    adapter: &dyn ConfigPort,
    asset: Asset,
) -> Result<WindowSimConfig, ReturnsError> {
    let base = match asset {
        Asset::Stock => WindowSimConfig::stocks(),
        Asset::Gold => WindowSimConfig::gold(),
    };
    Ok(WindowSimConfig {
        window_years: adapter.get_year("simulation", "window_years", base.window_years)?,
        start_years: year_range(adapter, "simulation", base.start_years.clone())?,
        purchase_times: adapter.get_count("simulation", "purchase_times", base.purchase_times)?,
        sample_size: adapter.get_count("simulation", "sample_size", base.sample_size)?,
        units_per_purchase: adapter.get_double(
            "simulation",
            "units_per_purchase",
            base.units_per_purchase,
        ),
        price_divisor: adapter.get_double("simulation", "price_divisor", base.price_divisor),
        expense_ratio: adapter.get_double("simulation", "expense_ratio", base.expense_ratio),
        reference_year: adapter.get_year("simulation", "reference_year", base.reference_year)?,
        sparse_year_records: base.sparse_year_records,
    })
}
