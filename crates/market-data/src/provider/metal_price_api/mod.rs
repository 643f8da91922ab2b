//! Metal Price API provider for precious metals market data.
//!
//! Supports the four metals the buy-quote engine prices:
//! - XAU (Gold)
//! - XAG (Silver)
//! - XPT (Platinum)
//! - XPD (Palladium)
//!
//! Latest prices come from `/v1/latest`, history from `/v1/timeframe`
//! (at most 365 days per request, so longer ranges are split).

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::{MetalSpotPrice, SUPPORTED_METALS};
use crate::provider::MetalsPriceProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "METAL_PRICE_API";

const DEFAULT_BASE_URL: &str = "https://api.metalpriceapi.com/v1";

/// Longest range accepted by the timeframe endpoint.
const MAX_TIMEFRAME_DAYS: i64 = 365;

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// API response from `/latest`
#[derive(Debug, Deserialize)]
struct LatestResponse {
    success: bool,
    #[serde(default)]
    timestamp: Option<i64>,
    /// Rates for requested metals (1 base_currency = rate troy ounces)
    #[serde(default)]
    rates: HashMap<String, f64>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

/// API response from `/timeframe`
#[derive(Debug, Deserialize)]
struct TimeframeResponse {
    success: bool,
    /// Rates keyed by ISO date, then by symbol
    #[serde(default)]
    rates: HashMap<String, HashMap<String, f64>>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    info: Option<String>,
}

/// Metal Price API provider.
///
/// # Example
///
/// ```ignore
/// use wisebuy_market_data::MetalPriceApiProvider;
///
/// let provider = MetalPriceApiProvider::new(Some("your_api_key".to_string()));
/// ```
pub struct MetalPriceApiProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl MetalPriceApiProvider {
    /// Create a new provider. Without an API key every call fails with `NotConfigured`.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a provider pointing at a different API host.
    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Check if the given symbol is a supported metal.
    fn is_supported_metal(symbol: &str) -> bool {
        SUPPORTED_METALS.contains(&symbol)
    }

    fn api_key(&self) -> Result<&str, MarketDataError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| MarketDataError::NotConfigured {
                provider: PROVIDER_ID.to_string(),
                message: "metals API key is not set".to_string(),
            })
    }

    fn validate_symbols(symbols: &[&str]) -> Result<String, MarketDataError> {
        if let Some(unknown) = symbols.iter().find(|s| !Self::is_supported_metal(s)) {
            return Err(MarketDataError::InvalidResponse {
                provider: PROVIDER_ID.to_string(),
                message: format!("unsupported metal symbol {}", unknown),
            });
        }
        Ok(symbols.join(","))
    }

    async fn get_json(&self, url: &str) -> Result<String, MarketDataError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(MarketDataError::from_status(PROVIDER_ID, status, body));
        }
        Ok(body)
    }
}

/// Converts an API rate (ounces per unit of currency) into a price per ounce.
fn rate_to_price(symbol: &str, rate: f64) -> Result<Decimal, MarketDataError> {
    if rate <= 0.0 || !rate.is_finite() {
        return Err(MarketDataError::InvalidResponse {
            provider: PROVIDER_ID.to_string(),
            message: format!("invalid rate {} for {}", rate, symbol),
        });
    }
    Decimal::try_from(1.0 / rate)
        .map(|d| d.round_dp(4))
        .map_err(|_| MarketDataError::InvalidResponse {
            provider: PROVIDER_ID.to_string(),
            message: format!("rate for {} does not fit a decimal", symbol),
        })
}

fn api_failure(error: Option<ApiErrorBody>) -> MarketDataError {
    MarketDataError::ProviderError {
        provider: PROVIDER_ID.to_string(),
        message: error
            .and_then(|e| e.info)
            .unwrap_or_else(|| "API request failed".to_string()),
    }
}

fn parse_latest(
    body: &str,
    symbols: &[&str],
    currency: &str,
    fallback_date: NaiveDate,
) -> Result<Vec<MetalSpotPrice>, MarketDataError> {
    let response: LatestResponse =
        serde_json::from_str(body).map_err(|e| MarketDataError::InvalidResponse {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })?;

    if !response.success {
        return Err(api_failure(response.error));
    }

    let date = response
        .timestamp
        .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.date_naive())
        .unwrap_or(fallback_date);

    symbols
        .iter()
        .map(|symbol| {
            let rate = response.rates.get(*symbol).ok_or_else(|| {
                MarketDataError::InvalidResponse {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("no rate returned for {}", symbol),
                }
            })?;
            Ok(MetalSpotPrice {
                symbol: symbol.to_string(),
                date,
                price_per_ounce: rate_to_price(symbol, *rate)?,
                currency: currency.to_string(),
                source: PROVIDER_ID.to_string(),
            })
        })
        .collect()
}

fn parse_timeframe(
    body: &str,
    symbols: &[&str],
    currency: &str,
) -> Result<Vec<MetalSpotPrice>, MarketDataError> {
    let response: TimeframeResponse =
        serde_json::from_str(body).map_err(|e| MarketDataError::InvalidResponse {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })?;

    if !response.success {
        return Err(api_failure(response.error));
    }

    let mut prices = Vec::new();
    for (day, rates) in response.rates {
        let date = NaiveDate::parse_from_str(&day, "%Y-%m-%d").map_err(|e| {
            MarketDataError::InvalidResponse {
                provider: PROVIDER_ID.to_string(),
                message: format!("bad date '{}': {}", day, e),
            }
        })?;
        for symbol in symbols {
            if let Some(rate) = rates.get(*symbol) {
                prices.push(MetalSpotPrice {
                    symbol: symbol.to_string(),
                    date,
                    price_per_ounce: rate_to_price(symbol, *rate)?,
                    currency: currency.to_string(),
                    source: PROVIDER_ID.to_string(),
                });
            }
        }
    }
    prices.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.symbol.cmp(&b.symbol)));
    Ok(prices)
}

#[async_trait]
impl MetalsPriceProvider for MetalPriceApiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn get_latest_prices(
        &self,
        symbols: &[&str],
        currency: &str,
    ) -> Result<Vec<MetalSpotPrice>, MarketDataError> {
        let api_key = self.api_key()?;
        let currencies = Self::validate_symbols(symbols)?;

        let url = format!(
            "{}/latest?api_key={}&base={}&currencies={}",
            self.base_url,
            urlencoding::encode(api_key),
            currency,
            currencies
        );
        debug!("Fetching latest metal prices for {}", currencies);

        let body = self.get_json(&url).await?;
        parse_latest(&body, symbols, currency, Utc::now().date_naive())
    }

    async fn get_historical_prices(
        &self,
        symbols: &[&str],
        currency: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MetalSpotPrice>, MarketDataError> {
        let api_key = self.api_key()?;
        let currencies = Self::validate_symbols(symbols)?;

        let mut prices = Vec::new();
        let mut window_start = start;
        while window_start <= end {
            let window_end =
                std::cmp::min(window_start + ChronoDuration::days(MAX_TIMEFRAME_DAYS - 1), end);
            let url = format!(
                "{}/timeframe?api_key={}&start_date={}&end_date={}&base={}&currencies={}",
                self.base_url,
                urlencoding::encode(api_key),
                window_start.format("%Y-%m-%d"),
                window_end.format("%Y-%m-%d"),
                currency,
                currencies
            );
            debug!(
                "Fetching metal price history {} .. {} for {}",
                window_start, window_end, currencies
            );

            let body = self.get_json(&url).await?;
            prices.extend(parse_timeframe(&body, symbols, currency)?);
            window_start = window_end + ChronoDuration::days(1);
        }

        Ok(prices)
    }
}
