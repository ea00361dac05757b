/// Stock Dashboard - Shared Library
///
/// This library provides common functionality for the two TUI binaries:
/// - correlation-heatmap: Pairwise price correlation across the tracked stocks
/// - stock-chart: Price history and summary statistics for a single stock
///
/// The library includes:
/// - REST client for the stock price API (with mock fallback)
/// - Page state for each dashboard
/// - Ratatui widgets for the heatmap, legend, details card and price chart
pub mod shared;

// Re-export commonly used types for convenience
pub use shared::client::{fallback_stocks, mock_price_history, StockClient};
pub use shared::config::{DashboardConfig, DEFAULT_API_BASE_URL};
pub use shared::error::ClientError;
pub use shared::logging::init_logging;
pub use shared::state::{ChartState, HeatmapState, StatusMessage};
pub use shared::time_range::TimeRange;
