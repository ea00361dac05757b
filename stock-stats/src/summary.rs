//! Per-stock figures shown next to the chart and heatmap

use serde::{Deserialize, Serialize};

use crate::statistic::{mean, standard_deviation};
use crate::types::PricePoint;

/// Price summary for one stock over the loaded window
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct StockSummary {
    pub first_price: f64,
    pub current_price: f64,
    /// `current_price - first_price`
    pub change: f64,
    /// Change as a percentage of `first_price`, `0.0` when the first price is not positive
    pub change_pct: f64,
    pub average: f64,
    /// Population standard deviation, used as the volatility figure
    pub std_dev: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub samples: usize,
}

impl StockSummary {
    /// Summarise a price series, `None` when it is empty
    pub fn from_prices(prices: &[PricePoint]) -> Option<Self> {
        let first_price = prices.first()?.price;
        let current_price = prices.last()?.price;
        let change = current_price - first_price;
        let change_pct = if first_price > 0.0 {
            (change / first_price) * 100.0
        } else {
            0.0
        };

        let (min_price, max_price) = prices.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), p| (min.min(p.price), max.max(p.price)),
        );

        Some(Self {
            first_price,
            current_price,
            change,
            change_pct,
            average: mean(prices),
            std_dev: standard_deviation(prices),
            min_price,
            max_price,
            samples: prices.len(),
        })
    }

    pub fn is_positive(&self) -> bool {
        self.change >= 0.0
    }

    /// Y-axis bounds for a price chart: 10% padding either side, floored at zero
    pub fn chart_bounds(&self) -> [f64; 2] {
        let buffer = (self.max_price - self.min_price) * 0.1;
        [(self.min_price - buffer).max(0.0), self.max_price + buffer]
    }
}
