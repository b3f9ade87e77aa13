//! Configuration access port trait.

use crate::domain::error::ReturnsError;

/// Sectioned key/value configuration. Absent or unparsable values fall back
/// to the supplied default.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// An `i32` value such as a calendar year or a year count.
    fn get_year(&self, section: &str, key: &str, default: i32) -> Result<i32, ReturnsError> {
        let raw = self.get_int(section, key, i64::from(default));
        i32::try_from(raw).map_err(|_| ReturnsError::ConfigInvalid {
            section: section.into(),
            key: key.into(),
            reason: format!("{raw} is out of range"),
        })
    }

    /// A non-negative count such as an EMA span or a sample size.
    fn get_count(&self, section: &str, key: &str, default: usize) -> Result<usize, ReturnsError> {
        let raw = self.get_int(section, key, default as i64);
        usize::try_from(raw).map_err(|_| ReturnsError::ConfigInvalid {
            section: section.into(),
            key: key.into(),
            reason: format!("{raw} is not a valid count"),
        })
    }
}
