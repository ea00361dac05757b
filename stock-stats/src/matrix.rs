//! Correlation matrix across a set of tickers
//!
//! Drives the heatmap view. Rows and columns follow the order the tickers were
//! given in.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::correlation::correlation;
use crate::types::PricePoint;

/// Square ticker-by-ticker correlation table
///
/// Every row has an entry for every column, the diagonal is exactly `1.0`, and
/// a pair with a missing series is `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CorrelationMatrix(IndexMap<String, IndexMap<String, f64>>);

impl CorrelationMatrix {
    /// Correlation between `row` and `col`, `None` if either ticker is not in the matrix
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        self.0.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Tickers in row order
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &IndexMap<String, f64>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build the full correlation matrix, computing every ordered pair on its own.
///
/// - row == column → `1.0`, even when the ticker has no series
/// - both series present → [`correlation`]
/// - otherwise → `0.0`
///
/// Cost is O(n² · m). Fine for the handful of tickers a dashboard shows; use
/// [`build_symmetric_correlation_matrix`] for larger sets.
pub fn build_correlation_matrix<T, K, S>(
    tickers: &[T],
    series_by_ticker: &HashMap<K, S>,
) -> CorrelationMatrix
where
    T: AsRef<str>,
    K: Borrow<str> + Eq + Hash,
    S: AsRef<[PricePoint]>,
{
    let mut matrix = IndexMap::with_capacity(tickers.len());

    for row in tickers {
        let row = row.as_ref();
        let mut cells = IndexMap::with_capacity(tickers.len());

        for col in tickers {
            let col = col.as_ref();
            let value = if row == col {
                1.0
            } else {
                match (series_by_ticker.get(row), series_by_ticker.get(col)) {
                    (Some(a), Some(b)) => correlation(a.as_ref(), b.as_ref()),
                    _ => 0.0,
                }
            };
            cells.insert(col.to_string(), value);
        }

        matrix.insert(row.to_string(), cells);
    }

    trace!(tickers = matrix.len(), "built correlation matrix");
    CorrelationMatrix(matrix)
}

/// Same output as [`build_correlation_matrix`], but each unordered pair is
/// computed once and mirrored into the lower triangle.
pub fn build_symmetric_correlation_matrix<T, K, S>(
    tickers: &[T],
    series_by_ticker: &HashMap<K, S>,
) -> CorrelationMatrix
where
    T: AsRef<str>,
    K: Borrow<str> + Eq + Hash,
    S: AsRef<[PricePoint]>,
{
    // Pre-size every row in input order so mirrored writes keep column order
    let mut matrix: IndexMap<String, IndexMap<String, f64>> = tickers
        .iter()
        .map(|row| {
            let cells = tickers
                .iter()
                .map(|col| (col.as_ref().to_string(), 0.0))
                .collect();
            (row.as_ref().to_string(), cells)
        })
        .collect();

    let unique: Vec<String> = matrix.keys().cloned().collect();

    for (i, row) in unique.iter().enumerate() {
        set_cell(&mut matrix, row, row, 1.0);

        for col in &unique[i + 1..] {
            let value = match (series_by_ticker.get(row.as_str()), series_by_ticker.get(col.as_str())) {
                (Some(a), Some(b)) => correlation(a.as_ref(), b.as_ref()),
                _ => 0.0,
            };
            set_cell(&mut matrix, row, col, value);
            set_cell(&mut matrix, col, row, value);
        }
    }

    trace!(tickers = matrix.len(), "built symmetric correlation matrix");
    CorrelationMatrix(matrix)
}

fn set_cell(matrix: &mut IndexMap<String, IndexMap<String, f64>>, row: &str, col: &str, value: f64) {
    if let Some(cell) = matrix.get_mut(row).and_then(|cells| cells.get_mut(col)) {
        *cell = value;
    }
}
