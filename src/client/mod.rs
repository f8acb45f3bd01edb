//! Quote source
//!
//! Fetches random quotes from a remote API.

pub mod http;

pub use http::HttpQuoteSource;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::Quote;

/// Quote fetch errors
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Quote API returned status {0}")]
    Status(u16),
    #[error("Unexpected quote payload: {0}")]
    Payload(String),
}

/// Anything that can hand out a random quote
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_random_quote(&self) -> Result<Quote, NetworkError>;
}
