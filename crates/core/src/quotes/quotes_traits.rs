//! Quote repository and service traits.

use async_trait::async_trait;

use super::quotes_model::{NewQuote, PricedItem, Quote, QuoteItemRequest};
use crate::errors::Result;

#[async_trait]
pub trait QuoteRepositoryTrait: Send + Sync {
    async fn create(&self, quote: Quote) -> Result<Quote>;

    /// Quotes of a store, newest first.
    fn list_by_store(&self, store_id: &str) -> Result<Vec<Quote>>;

    /// Fails with a not-found error when absent.
    fn get_by_id(&self, quote_id: &str) -> Result<Quote>;
}

#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    /// Resolves metal and stone prices for a capture request and returns the
    /// finalized item along with any notices for the operator.
    fn price_item(&self, store_id: &str, request: QuoteItemRequest) -> Result<PricedItem>;

    /// Recomputes every value and persists the quote as completed.
    async fn save_quote(&self, store_id: &str, new_quote: NewQuote) -> Result<Quote>;

    fn list_quotes(&self, store_id: &str) -> Result<Vec<Quote>>;

    /// Fetches a quote, scoped to the owning store.
    fn get_quote(&self, store_id: &str, quote_id: &str) -> Result<Quote>;
}
