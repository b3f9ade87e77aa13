//! Ordered, uniquely keyed result tables.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use super::error::ReturnsError;

/// Column names and per-row values, used by report sinks.
pub trait TableRow {
    fn column_names() -> &'static [&'static str];
    fn values(&self) -> Vec<f64>;
}

/// Rows in insertion (chronological) order with keyed lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable<K, R>
where
    K: Eq + Hash,
{
    rows: Vec<(K, R)>,
    index: HashMap<K, usize>,
}

impl<K, R> Default for ResultTable<K, R>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        ResultTable {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K, R> ResultTable<K, R>
where
    K: Eq + Hash + Clone + Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: K, row: R) -> Result<(), ReturnsError> {
        if self.index.contains_key(&key) {
            return Err(ReturnsError::DuplicateKey {
                key: key.to_string(),
            });
        }
        self.index.insert(key.clone(), self.rows.len());
        self.rows.push((key, row));
        Ok(())
    }

    pub fn get(&self, key: &K) -> Option<&R> {
        self.index.get(key).map(|&i| &self.rows[i].1)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &R)> {
        self.rows.iter().map(|(k, r)| (k, r))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.rows.iter().map(|(k, _)| k)
    }

    pub fn rows(&self) -> impl Iterator<Item = &R> {
        self.rows.iter().map(|(_, r)| r)
    }

    /// Extracts one numeric column in row order.
    pub fn column<F>(&self, f: F) -> Vec<f64>
    where
        F: Fn(&R) -> f64,
    {
        self.rows.iter().map(|(_, r)| f(r)).collect()
    }
}
