//! Page state for the heatmap and chart dashboards
//!
//! Holds the loaded stocks and price series plus UI selection. Statistics are
//! never cached here: the matrix and summaries are recomputed from the loaded
//! series on every call.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use stock_stats::{
    build_correlation_matrix, CorrelationMatrix, PriceSeries, Stock, StockSummary,
};
use tracing::{info, warn};

use super::client::StockClient;
use super::config::DashboardConfig;
use super::time_range::TimeRange;

/// Transient notice shown under the header (success or failure of the last action)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Fetch one ticker, substituting mock data on failure when enabled
async fn fetch_series(
    client: &StockClient,
    ticker: &str,
    minutes: u32,
    mock_fallback: bool,
) -> Option<PriceSeries> {
    if mock_fallback {
        return Some(client.price_history_or_mock(ticker, minutes).await);
    }

    match client.fetch_price_history(ticker, minutes).await {
        Ok(series) => Some(series),
        Err(e) => {
            warn!("Error fetching price data for {}: {}", ticker, e);
            None
        }
    }
}

fn wrap_next(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(current.map(|i| (i + 1) % len).unwrap_or(0))
}

fn wrap_prev(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(current.map(|i| (i + len - 1) % len).unwrap_or(len - 1))
}

/// State for the correlation heatmap page
#[derive(Debug, Clone)]
pub struct HeatmapState {
    pub stocks: Vec<Stock>,
    pub prices: HashMap<String, PriceSeries>,
    pub time_range: TimeRange,
    /// Index into `stocks` of the stock whose details are shown
    pub selected: Option<usize>,
    pub last_updated: DateTime<Utc>,
    pub is_loading: bool,
    pub status: Option<StatusMessage>,
    max_stocks: usize,
    mock_fallback: bool,
}

impl HeatmapState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            stocks: Vec::new(),
            prices: HashMap::new(),
            time_range: config.time_range,
            selected: None,
            last_updated: Utc::now(),
            is_loading: true,
            status: None,
            max_stocks: config.max_stocks,
            mock_fallback: config.mock_fallback,
        }
    }

    /// Fetch the stock list, keeping only the first `max_stocks`
    pub async fn load_stocks(&mut self, client: &StockClient) {
        self.is_loading = true;
        let stocks = client.stock_list_or_fallback().await;
        self.set_stocks(stocks);
        self.is_loading = false;
    }

    pub fn set_stocks(&mut self, mut stocks: Vec<Stock>) {
        stocks.truncate(self.max_stocks);
        info!("Tracking {} stocks on heatmap", stocks.len());
        self.stocks = stocks;
        self.selected = self.selected.filter(|&i| i < self.stocks.len());
    }

    /// Fetch prices for every stock, one ticker at a time
    ///
    /// A ticker whose fetch fails is left out, so its heatmap cells read `0.0`.
    pub async fn refresh_prices(&mut self, client: &StockClient) {
        if self.stocks.is_empty() {
            return;
        }

        self.is_loading = true;
        let minutes = self.time_range.minutes();
        let mut prices = HashMap::with_capacity(self.stocks.len());

        for stock in &self.stocks {
            if let Some(series) =
                fetch_series(client, &stock.symbol, minutes, self.mock_fallback).await
            {
                prices.insert(stock.symbol.clone(), series);
            }
        }

        let loaded = prices.len();
        self.apply_prices(prices);
        self.status = Some(if loaded < self.stocks.len() {
            StatusMessage::error("Some stock price data couldn't be loaded.")
        } else {
            StatusMessage::info(format!("Loaded {} stocks ({})", loaded, self.time_range))
        });
        self.is_loading = false;
    }

    /// Replace loaded prices, stamp the update time and select the first stock if nothing is selected
    pub fn apply_prices(&mut self, prices: HashMap<String, PriceSeries>) {
        self.prices = prices;
        self.last_updated = Utc::now();
        if self.selected.is_none() && !self.stocks.is_empty() {
            self.selected = Some(0);
        }
    }

    /// Change the time range, returns `true` if prices need refetching
    pub fn set_time_range(&mut self, time_range: TimeRange) -> bool {
        if self.time_range == time_range {
            return false;
        }
        self.time_range = time_range;
        true
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.stocks.iter().map(|s| s.symbol.as_str()).collect()
    }

    /// Correlation matrix over the tracked stocks, rebuilt on every call
    pub fn matrix(&self) -> CorrelationMatrix {
        build_correlation_matrix(&self.symbols(), &self.prices)
    }

    pub fn selected_symbol(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.stocks.get(i))
            .map(|s| s.symbol.as_str())
    }

    /// Summary of the selected stock, `None` when nothing is selected or its prices are missing
    pub fn selected_summary(&self) -> Option<StockSummary> {
        let symbol = self.selected_symbol()?;
        let series = self.prices.get(symbol)?;
        StockSummary::from_prices(&series.prices)
    }

    /// Select the stock with `symbol`, returns `true` if the selection changed
    pub fn select_symbol(&mut self, symbol: &str) -> bool {
        let Some(idx) = self.stocks.iter().position(|s| s.symbol == symbol) else {
            return false;
        };
        let changed = self.selected != Some(idx);
        self.selected = Some(idx);
        changed
    }

    pub fn select_next(&mut self) {
        self.selected = wrap_next(self.selected, self.stocks.len());
    }

    pub fn select_prev(&mut self) {
        self.selected = wrap_prev(self.selected, self.stocks.len());
    }
}

/// State for the single-stock chart page
#[derive(Debug, Clone)]
pub struct ChartState {
    pub stocks: Vec<Stock>,
    pub selected: Option<usize>,
    pub prices: Option<PriceSeries>,
    pub time_range: TimeRange,
    pub last_updated: DateTime<Utc>,
    pub is_loading: bool,
    pub status: Option<StatusMessage>,
    mock_fallback: bool,
}

impl ChartState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            stocks: Vec::new(),
            selected: None,
            prices: None,
            time_range: config.time_range,
            last_updated: Utc::now(),
            is_loading: true,
            status: None,
            mock_fallback: config.mock_fallback,
        }
    }

    /// Fetch the full stock list and select the first entry
    pub async fn load_stocks(&mut self, client: &StockClient) {
        self.is_loading = true;
        let stocks = client.stock_list_or_fallback().await;
        self.set_stocks(stocks);
        self.is_loading = false;
    }

    pub fn set_stocks(&mut self, stocks: Vec<Stock>) {
        self.selected = if stocks.is_empty() { None } else { Some(0) };
        self.stocks = stocks;
        self.prices = None;
    }

    /// Fetch price history for the selected stock
    pub async fn load_prices(&mut self, client: &StockClient) {
        let Some(symbol) = self.selected_symbol().map(str::to_string) else {
            return;
        };

        self.is_loading = true;
        let series = fetch_series(client, &symbol, self.time_range.minutes(), self.mock_fallback).await;
        self.apply_prices(&symbol, series);
        self.is_loading = false;
    }

    pub fn apply_prices(&mut self, symbol: &str, series: Option<PriceSeries>) {
        match series {
            Some(series) if !series.is_empty() => {
                self.prices = Some(series);
                self.last_updated = Utc::now();
                self.status = None;
            }
            _ => {
                self.prices = None;
                self.status = Some(StatusMessage::error(format!(
                    "Couldn't find any price data for {}. Maybe try another stock?",
                    symbol
                )));
            }
        }
    }

    pub fn set_time_range(&mut self, time_range: TimeRange) -> bool {
        if self.time_range == time_range {
            return false;
        }
        self.time_range = time_range;
        true
    }

    pub fn selected_symbol(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.stocks.get(i))
            .map(|s| s.symbol.as_str())
    }

    pub fn summary(&self) -> Option<StockSummary> {
        self.prices
            .as_ref()
            .and_then(|s| StockSummary::from_prices(&s.prices))
    }

    /// Chart points as (unix seconds, price)
    pub fn chart_points(&self) -> Vec<(f64, f64)> {
        self.prices
            .as_ref()
            .map(|s| {
                s.prices
                    .iter()
                    .map(|p| (p.timestamp.timestamp() as f64, p.price))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Select the next stock, returns `true` if the selection changed
    pub fn select_next(&mut self) -> bool {
        let next = wrap_next(self.selected, self.stocks.len());
        let changed = next != self.selected;
        self.selected = next;
        changed
    }

    /// Select the previous stock, returns `true` if the selection changed
    pub fn select_prev(&mut self) -> bool {
        let prev = wrap_prev(self.selected, self.stocks.len());
        let changed = prev != self.selected;
        self.selected = prev;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::client::{fallback_stocks, mock_price_history};
    use rand::{SeedableRng, rngs::StdRng};
    use std::time::Duration;

    fn many_stocks(n: usize) -> Vec<Stock> {
        (0..n)
            .map(|i| Stock::new(format!("T{i}"), format!("Ticker {i}")))
            .collect()
    }

    fn mock_prices(symbols: &[&str], minutes: u32) -> HashMap<String, PriceSeries> {
        let now = DateTime::from_timestamp(1_746_662_400, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        symbols
            .iter()
            .map(|s| (s.to_string(), mock_price_history(s, minutes, now, &mut rng)))
            .collect()
    }

    fn unreachable_config() -> DashboardConfig {
        DashboardConfig::new("http://127.0.0.1:1").with_request_timeout(Duration::from_secs(2))
    }

    #[test]
    fn test_heatmap_truncates_stock_list() {
        let mut state = HeatmapState::new(&DashboardConfig::default());
        state.set_stocks(many_stocks(12));
        assert_eq!(state.stocks.len(), 8);
        assert_eq!(state.symbols().last(), Some(&"T7"));
    }

    #[test]
    fn test_heatmap_apply_prices_selects_first() {
        let mut state = HeatmapState::new(&DashboardConfig::default());
        state.set_stocks(fallback_stocks());
        assert_eq!(state.selected_symbol(), None);

        state.apply_prices(mock_prices(&["AAPL", "MSFT"], 15));
        assert_eq!(state.selected_symbol(), Some("AAPL"));
        assert!(state.selected_summary().is_some());
    }

    #[test]
    fn test_heatmap_matrix_marks_missing_prices() {
        let mut state = HeatmapState::new(&DashboardConfig::default());
        state.set_stocks(fallback_stocks());
        state.apply_prices(mock_prices(&["AAPL", "MSFT"], 15));

        let matrix = state.matrix();
        assert_eq!(matrix.len(), 5);
        assert_eq!(matrix.get("META", "META"), Some(1.0));
        assert_eq!(matrix.get("AAPL", "META"), Some(0.0));
        assert_eq!(matrix.get("AAPL", "MSFT"), matrix.get("MSFT", "AAPL"));
    }

    #[test]
    fn test_heatmap_selected_summary_missing_prices() {
        let mut state = HeatmapState::new(&DashboardConfig::default());
        state.set_stocks(fallback_stocks());
        state.selected = Some(4);
        state.apply_prices(mock_prices(&["AAPL"], 5));
        assert_eq!(state.selected_symbol(), Some("META"));
        assert!(state.selected_summary().is_none());
    }

    #[test]
    fn test_heatmap_selection_wraps() {
        let mut state = HeatmapState::new(&DashboardConfig::default());
        state.set_stocks(many_stocks(3));

        state.select_prev();
        assert_eq!(state.selected, Some(2));
        state.select_next();
        assert_eq!(state.selected, Some(0));
        state.select_next();
        assert_eq!(state.selected, Some(1));
    }

    #[test]
    fn test_heatmap_select_symbol() {
        let mut state = HeatmapState::new(&DashboardConfig::default());
        state.set_stocks(fallback_stocks());

        assert!(state.select_symbol("AMZN"));
        assert_eq!(state.selected, Some(3));
        assert!(!state.select_symbol("AMZN"));
        assert!(!state.select_symbol("NOPE"));
        assert_eq!(state.selected_symbol(), Some("AMZN"));
    }

    #[test]
    fn test_heatmap_selection_empty() {
        let mut state = HeatmapState::new(&DashboardConfig::default());
        state.select_next();
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_time_range_change() {
        let mut state = HeatmapState::new(&DashboardConfig::default());
        assert!(!state.set_time_range(TimeRange::Minutes15));
        assert!(state.set_time_range(TimeRange::Hour1));
        assert_eq!(state.time_range, TimeRange::Hour1);
    }

    #[tokio::test]
    async fn test_heatmap_refresh_with_mock_fallback() {
        let client = StockClient::new(&unreachable_config()).unwrap();
        let mut state = HeatmapState::new(&unreachable_config());

        state.load_stocks(&client).await;
        assert_eq!(state.stocks, fallback_stocks());

        state.refresh_prices(&client).await;
        assert!(!state.is_loading);
        assert_eq!(state.prices.len(), 5);
        assert!(state.prices.values().all(|s| s.len() == 16));
        assert_eq!(
            state.status,
            Some(StatusMessage::info("Loaded 5 stocks (Last 15m)"))
        );
    }

    #[tokio::test]
    async fn test_heatmap_refresh_without_fallback_leaves_gaps() {
        let config = unreachable_config().with_mock_fallback(false);
        let client = StockClient::new(&config).unwrap();
        let mut state = HeatmapState::new(&config);

        state.set_stocks(fallback_stocks());
        state.refresh_prices(&client).await;

        assert!(state.prices.is_empty());
        assert!(state.status.as_ref().is_some_and(|s| s.is_error));
        assert_eq!(state.matrix().get("AAPL", "MSFT"), Some(0.0));
        assert_eq!(state.matrix().get("AAPL", "AAPL"), Some(1.0));
    }

    #[test]
    fn test_chart_set_stocks_selects_first() {
        let mut state = ChartState::new(&DashboardConfig::default());
        state.set_stocks(fallback_stocks());
        assert_eq!(state.selected_symbol(), Some("AAPL"));

        assert!(state.select_prev());
        assert_eq!(state.selected_symbol(), Some("META"));
    }

    #[test]
    fn test_chart_apply_empty_prices_sets_status() {
        let mut state = ChartState::new(&DashboardConfig::default());
        state.set_stocks(fallback_stocks());

        state.apply_prices("AAPL", Some(PriceSeries::new("AAPL", Vec::new())));
        assert!(state.prices.is_none());
        assert!(state.status.as_ref().is_some_and(|s| s.is_error));
        assert!(state.chart_points().is_empty());
    }

    #[test]
    fn test_chart_points() {
        let mut state = ChartState::new(&DashboardConfig::default());
        state.set_stocks(fallback_stocks());

        let series = mock_prices(&["AAPL"], 5).remove("AAPL");
        state.apply_prices("AAPL", series);

        let points = state.chart_points();
        assert_eq!(points.len(), 6);
        assert_eq!(points.last().map(|p| p.0), Some(1_746_662_400.0));
        assert!(state.summary().is_some());
    }

    #[tokio::test]
    async fn test_chart_load_prices_with_mock_fallback() {
        let client = StockClient::new(&unreachable_config()).unwrap();
        let mut state = ChartState::new(&unreachable_config().with_time_range(TimeRange::Minutes5));

        state.load_stocks(&client).await;
        state.load_prices(&client).await;

        assert_eq!(state.prices.as_ref().map(|s| s.len()), Some(6));
        assert_eq!(state.prices.as_ref().map(|s| s.symbol.as_str()), Some("AAPL"));
    }
}
