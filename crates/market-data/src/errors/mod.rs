//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while calling a remote price feed.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider has not been configured (missing API key or OAuth client).
    #[error("Provider not configured: {provider} - {message}")]
    NotConfigured {
        /// The provider that is missing configuration
        provider: String,
        /// What is missing
        message: String,
    },

    /// The provider rejected our credentials (HTTP 401/403 or an OAuth error).
    #[error("Unauthorized: {provider} - {message}")]
    Unauthorized {
        /// The provider that rejected the request
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider answered, but the payload could not be understood.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        /// The provider that sent the payload
        provider: String,
        /// Description of the problem
        message: String,
    },

    /// The provider does not support the requested operation.
    #[error("Operation '{operation}' not supported by {provider}")]
    NotSupported {
        /// The operation that was attempted
        operation: String,
        /// The provider that doesn't support it
        provider: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Builds the error for a non-success HTTP status.
    pub fn from_status(provider: &str, status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            401 | 403 => MarketDataError::Unauthorized {
                provider: provider.to_string(),
                message: body,
            },
            408 | 504 => MarketDataError::Timeout {
                provider: provider.to_string(),
            },
            429 => MarketDataError::RateLimited {
                provider: provider.to_string(),
            },
            _ => MarketDataError::ProviderError {
                provider: provider.to_string(),
                message: format!("HTTP {}: {}", status.as_u16(), body),
            },
        }
    }

    /// Returns true if reconnecting or re-authorizing is the only way forward.
    pub fn requires_reauthorization(&self) -> bool {
        matches!(self, MarketDataError::Unauthorized { .. })
    }
}
