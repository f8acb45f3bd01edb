//! Saved quotes storage
//!
//! Persists the user's favorites as a JSON array under a single key of the key-value store.
//! The on-disk record names the text field `quote` while the API calls it `content`;
//! [`StoredQuote`] is the only place that translation happens.

use crate::storage::kv::{KeyValueStore, KvError};
use crate::types::Quote;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Storage key holding the saved quotes
pub const QUOTES_KEY: &str = "quotes";

/// Saved quotes storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read saved quotes: {0}")]
    Read(#[source] KvError),
    #[error("Saved quotes are corrupted: {0}")]
    CorruptStore(#[source] serde_json::Error),
    #[error("Failed to encode saved quotes: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Failed to persist saved quotes: {0}")]
    Persist(#[source] KvError),
    #[error("No saved quote at index {index} (list has {len})")]
    Index { index: usize, len: usize },
}

/// A saved quote as it is laid out in storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredQuote {
    pub quote: String,
    pub author: String,
}

impl From<&Quote> for StoredQuote {
    fn from(quote: &Quote) -> Self {
        Self {
            quote: quote.content.clone(),
            author: quote.author.clone(),
        }
    }
}

impl From<StoredQuote> for Quote {
    fn from(stored: StoredQuote) -> Self {
        Quote {
            content: stored.quote,
            author: stored.author,
        }
    }
}

/// Encode quotes into the persisted JSON layout
pub fn encode_quotes(quotes: &[Quote]) -> Result<String, serde_json::Error> {
    let stored: Vec<StoredQuote> = quotes.iter().map(StoredQuote::from).collect();
    serde_json::to_string(&stored)
}

/// Decode quotes from the persisted JSON layout
pub fn decode_quotes(raw: &str) -> Result<Vec<Quote>, serde_json::Error> {
    let stored: Vec<StoredQuote> = serde_json::from_str(raw)?;
    Ok(stored.into_iter().map(Quote::from).collect())
}

/// Local store for the saved quote list
#[derive(Clone)]
pub struct LocalQuoteStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl LocalQuoteStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(backend, QUOTES_KEY)
    }

    pub fn with_key(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Load every saved quote
    ///
    /// A key that was never written yields an empty list. Undecodable contents yield
    /// [`StoreError::CorruptStore`]; callers are expected to fall back to an empty list.
    pub async fn load_all(&self) -> Result<Vec<Quote>, StoreError> {
        let raw = self
            .backend
            .get_item(&self.key)
            .await
            .map_err(StoreError::Read)?;

        match raw {
            None => {
                tracing::debug!("No saved quotes under key '{}'", self.key);
                Ok(Vec::new())
            }
            Some(raw) => {
                let quotes = decode_quotes(&raw).map_err(StoreError::CorruptStore)?;
                tracing::debug!("Loaded {} saved quotes", quotes.len());
                Ok(quotes)
            }
        }
    }

    /// Append `quote` to `current` and persist the result
    pub async fn append_and_persist(
        &self,
        quote: &Quote,
        current: &[Quote],
    ) -> Result<Vec<Quote>, StoreError> {
        let mut updated = current.to_vec();
        updated.push(quote.clone());
        self.persist(&updated).await?;
        Ok(updated)
    }

    /// Remove the element at `index` from `current` and persist the result
    pub async fn remove_and_persist(
        &self,
        index: usize,
        current: &[Quote],
    ) -> Result<Vec<Quote>, StoreError> {
        if index >= current.len() {
            return Err(StoreError::Index {
                index,
                len: current.len(),
            });
        }

        let mut updated = current.to_vec();
        updated.remove(index);
        self.persist(&updated).await?;
        Ok(updated)
    }

    async fn persist(&self, quotes: &[Quote]) -> Result<(), StoreError> {
        let json = encode_quotes(quotes).map_err(StoreError::Encode)?;
        self.backend
            .set_item(&self.key, &json)
            .await
            .map_err(StoreError::Persist)?;
        tracing::debug!("Persisted {} saved quotes", quotes.len());
        Ok(())
    }
}
