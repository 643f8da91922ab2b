//! Provider trait definitions.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::MarketDataError;
use crate::models::{MetalSpotPrice, PriceListKind, VendorTokenGrant};

/// Trait for precious metals price feeds.
///
/// Implementations return prices per troy ounce. Conversion to pennyweight and
/// purity adjustments belong to the domain layer.
#[async_trait]
pub trait MetalsPriceProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "METAL_PRICE_API".
    fn id(&self) -> &'static str;

    /// Whether the provider has the credentials it needs to be called.
    fn is_configured(&self) -> bool;

    /// Fetch the latest price for each requested symbol.
    async fn get_latest_prices(
        &self,
        symbols: &[&str],
        currency: &str,
    ) -> Result<Vec<MetalSpotPrice>, MarketDataError>;

    /// Fetch daily prices for each requested symbol in `[start, end]`.
    ///
    /// Days the provider has no data for (weekends, holidays) are simply absent.
    /// Default implementation returns `NotSupported`.
    async fn get_historical_prices(
        &self,
        symbols: &[&str],
        currency: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MetalSpotPrice>, MarketDataError> {
        let _ = (symbols, currency, start, end);
        Err(MarketDataError::NotSupported {
            operation: "historical_prices".to_string(),
            provider: self.id().to_string(),
        })
    }
}

/// Trait for the third-party diamond pricing vendor.
///
/// Covers the OAuth authorization-code flow and the bulk price list download.
/// The content of a price list is passed through as raw JSON: its row layout is
/// owned by the vendor and interpreted by the domain layer.
#[async_trait]
pub trait DiamondVendorProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "RAPAPORT".
    fn id(&self) -> &'static str;

    /// Whether an OAuth client id/secret pair is configured.
    fn is_configured(&self) -> bool;

    /// URL the operator is sent to in order to grant access.
    /// `state` is echoed back on the callback and identifies the store.
    fn authorization_url(&self, state: &str) -> Result<String, MarketDataError>;

    /// Exchange an authorization code for tokens.
    async fn exchange_code(&self, code: &str) -> Result<VendorTokenGrant, MarketDataError>;

    /// Obtain a fresh access token from a refresh token.
    async fn refresh_token(&self, refresh_token: &str)
        -> Result<VendorTokenGrant, MarketDataError>;

    /// Download the current price list of the given kind.
    async fn fetch_price_list(
        &self,
        access_token: &str,
        kind: PriceListKind,
    ) -> Result<serde_json::Value, MarketDataError>;
}
