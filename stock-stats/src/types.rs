//! Core data types for stock price history
//!
//! These types match the JSON format served by the stock price API:
//! `/stocks` returns `[{symbol, name}]`, `/stocks/{ticker}` returns
//! `[{timestamp, price}]`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stock descriptor from the stock list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Stock {
    /// Ticker symbol (e.g., "AAPL")
    pub symbol: String,
    /// Company name (e.g., "Apple Inc.")
    pub name: String,
}

impl Stock {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Stock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.symbol, self.name)
    }
}

/// Single timestamped price observation
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PricePoint {
    /// Observation time (ISO-8601 on the wire)
    pub timestamp: DateTime<Utc>,
    /// Observed price
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Price history for one ticker
///
/// Prices are chronological by construction. Nothing here re-sorts them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub prices: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, prices: Vec<PricePoint>) -> Self {
        Self {
            symbol: symbol.into(),
            prices,
        }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Earliest sample, if any
    pub fn first(&self) -> Option<&PricePoint> {
        self.prices.first()
    }

    /// Most recent sample, if any
    pub fn latest(&self) -> Option<&PricePoint> {
        self.prices.last()
    }
}

impl AsRef<[PricePoint]> for PriceSeries {
    fn as_ref(&self) -> &[PricePoint] {
        &self.prices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_display() {
        let stock = Stock::new("AAPL", "Apple Inc.");
        assert_eq!(stock.to_string(), "AAPL - Apple Inc.");
    }

    #[test]
    fn test_price_point_deserialize() {
        let json = r#"[
            {"timestamp": "2025-05-08T04:11:42.465706306Z", "price": 258.1},
            {"timestamp": "2025-05-08T04:12:42Z", "price": 259.75}
        ]"#;
        let prices: Vec<PricePoint> = serde_json::from_str(json).unwrap();

        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].price, 258.1);
        assert!(prices[0].timestamp < prices[1].timestamp);
    }

    #[test]
    fn test_stock_list_deserialize() {
        let json = r#"[{"symbol": "MSFT", "name": "Microsoft Corporation"}]"#;
        let stocks: Vec<Stock> = serde_json::from_str(json).unwrap();
        assert_eq!(stocks, vec![Stock::new("MSFT", "Microsoft Corporation")]);
    }

    #[test]
    fn test_series_accessors() {
        let ts = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let series = PriceSeries::new(
            "AAPL",
            vec![PricePoint::new(ts, 1.0), PricePoint::new(ts, 2.0)],
        );

        assert_eq!(series.len(), 2);
        assert!(!series.is_empty());
        assert_eq!(series.first().map(|p| p.price), Some(1.0));
        assert_eq!(series.latest().map(|p| p.price), Some(2.0));
    }
}
