//! Quote session
//!
//! Owns the on-screen state and funnels every user action through one place:
//! fetch a quote, save it, remove a saved one, toggle the saved list, share.
//!
//! Failures never escape the session. Each operation logs its error and records it in
//! [`SessionState::last_error`], leaving the rest of the state as it was.

pub mod share;

use std::sync::Arc;
use thiserror::Error;

use crate::client::{HttpQuoteSource, NetworkError, QuoteSource};
use crate::session::share::ShareTarget;
use crate::storage::kv::FileKeyValueStore;
use crate::storage::quotes::{LocalQuoteStore, StoreError};
use crate::storage::settings::QuoteSettings;
use crate::storage::StorageError;
use crate::types::{CurrentQuote, Quote};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("No quote loaded yet")]
    NoQuote,
}

/// A user action the presentation layer can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Refresh,
    Save,
    Share,
    ToggleList,
    Remove(usize),
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub current: CurrentQuote,
    pub saved: Vec<Quote>,
    pub list_visible: bool,
    /// Message of the most recent failed operation, cleared by the next success
    pub last_error: Option<String>,
}

/// Controller for one running session
pub struct QuoteSession {
    source: Arc<dyn QuoteSource>,
    store: LocalQuoteStore,
    share: Arc<dyn ShareTarget>,
    state: SessionState,
}

impl QuoteSession {
    pub fn new(
        source: Arc<dyn QuoteSource>,
        store: LocalQuoteStore,
        share: Arc<dyn ShareTarget>,
    ) -> Self {
        Self {
            source,
            store,
            share,
            state: SessionState::default(),
        }
    }

    /// Build a session backed by the HTTP quote API and the on-disk store
    pub fn from_settings(
        settings: &QuoteSettings,
        share: Arc<dyn ShareTarget>,
    ) -> Result<Self, SessionError> {
        let source = HttpQuoteSource::from_settings(settings)?;
        let storage_dir = settings.resolved_storage_dir()?;
        tracing::info!("Saved quotes live in {}", storage_dir.display());
        let store = LocalQuoteStore::new(Arc::new(FileKeyValueStore::new(storage_dir)));
        Ok(Self::new(Arc::new(source), store, share))
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Fetch the first quote and load the saved list, concurrently
    pub async fn init(&mut self) {
        let (fetched, loaded) =
            tokio::join!(self.source.fetch_random_quote(), self.store.load_all());

        // Successes never clear last_error here, so a failure on either side stays visible
        self.state.last_error = None;
        let _ = self.apply_fetch(fetched.map_err(SessionError::from));
        let _ = self.apply_load(loaded.map_err(SessionError::from));

        tracing::info!(
            "Session initialized ({} saved quotes)",
            self.state.saved.len()
        );
    }

    /// Run one user action. Failures are already logged and recorded in the state.
    pub async fn apply(&mut self, action: Action) {
        tracing::debug!("Applying {:?}", action);
        let _ = match action {
            Action::Refresh => self.refresh().await,
            Action::Save => self.save().await,
            Action::Remove(index) => self.remove(index).await,
            Action::ToggleList => {
                self.toggle_list();
                Ok(())
            }
            Action::Share => {
                self.share();
                Ok(())
            }
        };
    }

    /// Replace the current quote with a freshly fetched one
    pub async fn refresh(&mut self) -> Result<(), SessionError> {
        let fetched = self
            .source
            .fetch_random_quote()
            .await
            .map_err(SessionError::from);
        let result = self.apply_fetch(fetched);
        self.settle(result)
    }

    /// Reload the saved list from storage, falling back to empty when it is unreadable
    pub async fn load_saved(&mut self) -> Result<(), SessionError> {
        let loaded = self.store.load_all().await.map_err(SessionError::from);
        let result = self.apply_load(loaded);
        self.settle(result)
    }

    /// Append the current quote to the saved list
    ///
    /// The in-memory list only changes once the write has succeeded.
    pub async fn save(&mut self) -> Result<(), SessionError> {
        let result = match self.state.current.as_quote() {
            None => Err(SessionError::NoQuote),
            Some(quote) => self
                .store
                .append_and_persist(quote, &self.state.saved)
                .await
                .map_err(SessionError::from),
        };

        match result {
            Ok(saved) => {
                tracing::info!("Saved quote ({} total)", saved.len());
                self.state.saved = saved;
                self.state.last_error = None;
                Ok(())
            }
            Err(e) => self.fail("save quote", e),
        }
    }

    /// Remove the saved quote at `index`
    ///
    /// The in-memory list only changes once the write has succeeded.
    pub async fn remove(&mut self, index: usize) -> Result<(), SessionError> {
        let result = self
            .store
            .remove_and_persist(index, &self.state.saved)
            .await
            .map_err(SessionError::from);

        match result {
            Ok(saved) => {
                tracing::info!("Removed saved quote {} ({} left)", index, saved.len());
                self.state.saved = saved;
                self.state.last_error = None;
                Ok(())
            }
            Err(e) => self.fail("remove saved quote", e),
        }
    }

    /// Show or hide the saved list
    pub fn toggle_list(&mut self) {
        self.state.list_visible = !self.state.list_visible;
        self.state.last_error = None;
    }

    /// Hand the current quote's text to the share target
    pub fn share(&mut self) {
        let Some(quote) = self.state.current.as_quote() else {
            tracing::warn!("Nothing to share yet");
            return;
        };
        match self.share.share(&quote.content) {
            Ok(()) => self.state.last_error = None,
            Err(e) => tracing::error!("Failed to share quote: {}", e),
        }
    }

    fn apply_fetch(&mut self, fetched: Result<Quote, SessionError>) -> Result<(), SessionError> {
        match fetched {
            Ok(quote) => {
                tracing::debug!("Fetched quote by {}", quote.author);
                self.state.current = CurrentQuote::Loaded(quote);
                Ok(())
            }
            Err(e) => self.fail("fetch quote", e),
        }
    }

    fn apply_load(&mut self, loaded: Result<Vec<Quote>, SessionError>) -> Result<(), SessionError> {
        match loaded {
            Ok(quotes) => {
                self.state.saved = quotes;
                Ok(())
            }
            Err(e) => {
                self.state.saved = Vec::new();
                self.fail("load saved quotes", e)
            }
        }
    }

    fn settle(&mut self, result: Result<(), SessionError>) -> Result<(), SessionError> {
        if result.is_ok() {
            self.state.last_error = None;
        }
        result
    }

    fn fail(&mut self, action: &str, error: SessionError) -> Result<(), SessionError> {
        tracing::error!("Failed to {}: {}", action, error);
        self.state.last_error = Some(format!("Failed to {}: {}", action, error));
        Err(error)
    }
}
