//! Result-table keys.

use std::fmt;

use super::error::ReturnsError;

/// A single calendar year or a `(start, end)` year span with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Period {
    Year(i32),
    Span { start: i32, end: i32 },
}

impl Period {
    pub fn span(start: i32, end: i32) -> Result<Self, ReturnsError> {
        if start >= end {
            return Err(ReturnsError::InvalidPeriod { start, end });
        }
        Ok(Period::Span { start, end })
    }

    /// The `(year - 1, year)` span every annual return is keyed by.
    pub fn year_over_year(year: i32) -> Self {
        Period::Span {
            start: year - 1,
            end: year,
        }
    }

    pub fn start_year(&self) -> i32 {
        match *self {
            Period::Year(y) => y,
            Period::Span { start, .. } => start,
        }
    }

    pub fn end_year(&self) -> i32 {
        match *self {
            Period::Year(y) => y,
            Period::Span { end, .. } => end,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Year(y) => write!(f, "{y}"),
            Period::Span { start, end } => write!(f, "({start}, {end})"),
        }
    }
}

/// One calendar month inside a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthKey {
    pub period: Period,
    pub month: u32,
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} m{:02}", self.period, self.month)
    }
}

/// One random draw inside a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleKey {
    pub period: Period,
    pub sample: usize,
}

impl fmt::Display for SampleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.period, self.sample)
    }
}
