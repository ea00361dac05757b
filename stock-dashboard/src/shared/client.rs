/// REST client for the stock price API
///
/// Two endpoints:
/// - `GET {base}/stocks` → `[{symbol, name}]`
/// - `GET {base}/stocks/{ticker}?minutes={n}` → `[{timestamp, price}]`
///
/// The `*_or_fallback` / `*_or_mock` variants never fail: on any error they log
/// a warning and return placeholder data so the dashboard always has
/// something to draw.
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::de::DeserializeOwned;
use stock_stats::{PricePoint, PriceSeries, Stock};
use tracing::{debug, warn};

use super::config::DashboardConfig;
use super::error::ClientError;

/// Stock price API client
#[derive(Debug, Clone)]
pub struct StockClient {
    http: reqwest::Client,
    base_url: String,
}

impl StockClient {
    /// Build a client from dashboard configuration
    pub fn new(config: &DashboardConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the list of available stocks
    pub async fn fetch_stock_list(&self) -> Result<Vec<Stock>, ClientError> {
        let url = format!("{}/stocks", self.base_url);
        let stocks: Vec<Stock> = self.get_json(&url, &[]).await?;
        debug!("Fetched {} stocks", stocks.len());
        Ok(stocks)
    }

    /// Fetch the last `minutes` of price history for `ticker`
    pub async fn fetch_price_history(
        &self,
        ticker: &str,
        minutes: u32,
    ) -> Result<PriceSeries, ClientError> {
        let url = format!("{}/stocks/{}", self.base_url, ticker);
        let prices: Vec<PricePoint> = self
            .get_json(&url, &[("minutes", minutes.to_string())])
            .await?;
        debug!("Fetched {} prices for {} ({}m)", prices.len(), ticker, minutes);
        Ok(PriceSeries::new(ticker, prices))
    }

    /// Stock list, or the built-in fallback list if the API is unreachable
    pub async fn stock_list_or_fallback(&self) -> Vec<Stock> {
        match self.fetch_stock_list().await {
            Ok(stocks) => stocks,
            Err(e) => {
                warn!("Error fetching stock list, using fallback: {}", e);
                fallback_stocks()
            }
        }
    }

    /// Price history, or a generated mock series if the API is unreachable
    pub async fn price_history_or_mock(&self, ticker: &str, minutes: u32) -> PriceSeries {
        match self.fetch_price_history(ticker, minutes).await {
            Ok(series) => series,
            Err(e) => {
                warn!("Error fetching price history for {}, using mock data: {}", ticker, e);
                mock_price_history(ticker, minutes, Utc::now(), &mut rand::rng())
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.json().await.map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Stocks shown when the stock list cannot be fetched
pub fn fallback_stocks() -> Vec<Stock> {
    vec![
        Stock::new("AAPL", "Apple Inc."),
        Stock::new("MSFT", "Microsoft Corporation"),
        Stock::new("GOOGL", "Alphabet Inc."),
        Stock::new("AMZN", "Amazon.com Inc."),
        Stock::new("META", "Meta Platforms Inc."),
    ]
}

/// Generate `minutes + 1` one-minute samples ending at `now`
///
/// `price = 150 + sin(i / 3) * 20 + noise`, `noise` uniform in `[0, 10)`, where
/// `i` counts down from `minutes` to 0. Prices therefore stay within `[130, 180)`.
pub fn mock_price_history<R: Rng>(
    ticker: &str,
    minutes: u32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> PriceSeries {
    let base_price = 150.0;

    let prices = (0..=minutes)
        .rev()
        .map(|i| {
            let timestamp = now - Duration::minutes(i as i64);
            let variation = (i as f64 / 3.0).sin() * 20.0 + rng.random_range(0.0..10.0);
            PricePoint::new(timestamp, base_price + variation)
        })
        .collect();

    PriceSeries::new(ticker, prices)
}
