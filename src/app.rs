//! Root Dioxus application component
//!
//! This module contains the main App component that serves as the root of the UI tree.

use crate::session::{Action, QuoteSession, SessionState};
use crate::ui::{Layout, Pending};
use dioxus::prelude::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Session handle passed in from `main` through the launch context
pub type SharedSession = Arc<Mutex<QuoteSession>>;

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub session: SharedSession,
    /// Latest state published by the session, read by every component
    pub snapshot: Signal<SessionState>,
    /// Actions dispatched but not yet applied
    pub pending: Signal<Pending>,
}

impl AppState {
    pub fn new(session: SharedSession) -> Self {
        tracing::info!("AppState initialized");
        Self {
            session,
            snapshot: Signal::new(SessionState::default()),
            pending: Signal::new(Pending::default()),
        }
    }

    /// Fetch the first quote and load saved ones
    pub fn init(&self) {
        let session = self.session.clone();
        let mut snapshot = self.snapshot;
        spawn(async move {
            let mut session = session.lock().await;
            session.init().await;
            snapshot.set(session.state().clone());
        });
    }

    /// Run `action` on the session and publish the resulting state
    pub fn dispatch(&self, action: Action) {
        let session = self.session.clone();
        let mut snapshot = self.snapshot;
        let mut pending = self.pending;
        spawn(async move {
            pending.with_mut(|p| p.begin());
            let mut session = session.lock().await;
            session.apply(action).await;
            snapshot.set(session.state().clone());
            pending.with_mut(|p| p.finish());
        });
    }

    pub fn is_busy(&self) -> bool {
        self.pending.read().is_busy()
    }
}

#[component]
pub fn App() -> Element {
    let session = use_context::<SharedSession>();
    let app_state = use_context_provider(move || AppState::new(session));

    use_effect(move || app_state.init());

    rsx! {
        Layout {}
    }
}
