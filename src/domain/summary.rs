//! Descriptive statistics over one result column.
//!
//! NaN cells are counted separately and excluded from every statistic.

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub count: usize,
    pub nan_count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
    /// Share of finite values above zero, in [0, 1].
    pub positive_share: f64,
}

impl ColumnSummary {
    pub fn compute(values: &[f64]) -> Self {
        let mut finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let nan_count = values.len() - finite.len();
        let count = finite.len();

        if count == 0 {
            return ColumnSummary {
                count,
                nan_count,
                mean: f64::NAN,
                std_dev: f64::NAN,
                min: f64::NAN,
                median: f64::NAN,
                max: f64::NAN,
                positive_share: 0.0,
            };
        }

        finite.sort_by(|a, b| a.total_cmp(b));
        let n = count as f64;
        let mean = finite.iter().sum::<f64>() / n;

        // Sample standard deviation (n - 1).
        let std_dev = if count > 1 {
            (finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            f64::NAN
        };

        let median = if count % 2 == 1 {
            finite[count / 2]
        } else {
            (finite[count / 2 - 1] + finite[count / 2]) / 2.0
        };

        let positives = finite.iter().filter(|&&v| v > 0.0).count();

        ColumnSummary {
            count,
            nan_count,
            mean,
            std_dev,
            min: finite[0],
            median,
            max: finite[count - 1],
            positive_share: positives as f64 / n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn summary_of_simple_column() {
        let s = ColumnSummary::compute(&[4.0, -2.0, 1.0, 3.0]);
        assert_eq!(s.count, 4);
        assert_eq!(s.nan_count, 0);
        assert_relative_eq!(s.mean, 1.5);
        assert_relative_eq!(s.min, -2.0);
        assert_relative_eq!(s.max, 4.0);
        assert_relative_eq!(s.median, 2.0);
        assert_relative_eq!(s.positive_share, 0.75);
        // deviations 2.5, -3.5, -0.5, 1.5 -> 21 / 3
        assert_relative_eq!(s.std_dev, 7.0_f64.sqrt());
    }

    #[test]
    fn nan_values_are_excluded() {
        let s = ColumnSummary::compute(&[f64::NAN, 2.0, f64::NAN, 4.0, 6.0]);
        assert_eq!(s.count, 3);
        assert_eq!(s.nan_count, 2);
        assert_relative_eq!(s.mean, 4.0);
        assert_relative_eq!(s.median, 4.0);
    }

    #[test]
    fn all_nan_column() {
        let s = ColumnSummary::compute(&[f64::NAN]);
        assert_eq!(s.count, 0);
        assert_eq!(s.nan_count, 1);
        assert!(s.mean.is_nan());
        assert!(s.max.is_nan());
        assert_eq!(s.positive_share, 0.0);
    }

    #[test]
    fn single_value_has_no_spread() {
        let s = ColumnSummary::compute(&[5.0]);
        assert_relative_eq!(s.mean, 5.0);
        assert!(s.std_dev.is_nan());
    }

    #[test]
    fn empty_column() {
        let s = ColumnSummary::compute(&[]);
        assert_eq!(s.count, 0);
        assert_eq!(s.nan_count, 0);
    }
}
