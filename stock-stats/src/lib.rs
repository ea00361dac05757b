//! Stock Stats - Price statistics and correlation engine
//!
//! Pure, synchronous computation over in-memory price series:
//! - mean and population standard deviation
//! - Pearson correlation between two index-aligned series
//! - ticker-by-ticker correlation matrix for heatmap views
//!
//! Every function is total. Degenerate input (empty, zero variance, missing or
//! mismatched series) maps to a neutral sentinel instead of an error or `NaN`:
//! `0.0` for "no data", `1.0` on the matrix diagonal.

pub mod band;
pub mod correlation;
pub mod matrix;
pub mod statistic;
pub mod summary;
pub mod types;

pub use band::CorrelationBand;
pub use correlation::correlation;
pub use matrix::{build_correlation_matrix, build_symmetric_correlation_matrix, CorrelationMatrix};
pub use statistic::{mean, standard_deviation};
pub use summary::StockSummary;
pub use types::{PricePoint, PriceSeries, Stock};
