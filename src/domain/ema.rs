//! Exponential moving averages and crossover signals.
//!
//! alpha = 2/(span+1). The recursive form seeds with the first close,
//! EMA[t] = alpha*C[t] + (1-alpha)*EMA[t-1], and has no warmup. Signals are
//! always derived from the recursive form.
//!
//! The update is evaluated as C[t] + (1-alpha)*(EMA[t-1] - C[t]), the same
//! quantity regrouped. It yields exactly C[t] when the previous average
//! equals the close, and exactly the close for span 1, so a flat stretch
//! keeps fast and slow averages bit-identical and never produces a
//! crossing from rounding alone.

use super::error::ReturnsError;
use super::price::PriceSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmaWeighting {
    /// Recursive smoothing seeded with the first value.
    #[default]
    Recursive,
    /// Weighted average over all history with weights (1-alpha)^i,
    /// normalised by the sum of weights.
    Normalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Signal {
    #[default]
    Hold,
    Buy,
    Sell,
}

pub fn smoothing_factor(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

pub fn calculate_ema(
    values: &[f64],
    span: usize,
    weighting: EmaWeighting,
) -> Result<Vec<f64>, ReturnsError> {
    if span == 0 {
        return Err(ReturnsError::InvalidSpan { span });
    }
    let alpha = smoothing_factor(span);
    let mut out = Vec::with_capacity(values.len());

    match weighting {
        EmaWeighting::Recursive => {
            let mut ema = 0.0;
            for (i, &x) in values.iter().enumerate() {
                ema = if i == 0 { x } else { x + (1.0 - alpha) * (ema - x) };
                out.push(ema);
            }
        }
        EmaWeighting::Normalized => {
            let decay = 1.0 - alpha;
            let mut numerator = 0.0;
            let mut denominator = 0.0;
            for &x in values {
                numerator = x + decay * numerator;
                denominator = 1.0 + decay * denominator;
                out.push(numerator / denominator);
            }
        }
    }
    Ok(out)
}

/// Buy where `fast` crosses above `slow`, Sell where it crosses below.
/// The first element is always Hold.
pub fn crossover_signals(fast: &[f64], slow: &[f64]) -> Vec<Signal> {
    let n = fast.len().min(slow.len());
    let mut signals = Vec::with_capacity(n);
    for t in 0..n {
        if t == 0 {
            signals.push(Signal::Hold);
            continue;
        }
        let (f, s, pf, ps) = (fast[t], slow[t], fast[t - 1], slow[t - 1]);
        let signal = if f > s && pf <= ps {
            Signal::Buy
        } else if f < s && pf >= ps {
            Signal::Sell
        } else {
            Signal::Hold
        };
        signals.push(signal);
    }
    signals
}

/// One signal per record of `series`, from recursive EMAs of its closes.
pub fn ema_crossover(
    series: &PriceSeries,
    fast_span: usize,
    slow_span: usize,
) -> Result<Vec<Signal>, ReturnsError> {
    let closes = series.closes();
    let fast = calculate_ema(&closes, fast_span, EmaWeighting::Recursive)?;
    let slow = calculate_ema(&closes, slow_span, EmaWeighting::Recursive)?;
    Ok(crossover_signals(&fast, &slow))
}
