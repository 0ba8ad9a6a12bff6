//! API token availability tracking
//!
//! The backend owns the token; this component only mirrors whether one is
//! currently usable. State moves on an initial probe of the bridge and on
//! `token_set` / `token_invalid` events, and every state change publishes
//! the derived "available" flag to observers exactly once.

use crate::events::EventRegistry;
use ghd_bridge::{Bridge, GhdError, EV_TOKEN_INVALID, EV_TOKEN_SET};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Listener ID used on the event registry.
const LISTENER_ID: &str = "token-availability";

/// Whether a usable API token is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenState {
    /// No token was ever configured
    #[default]
    NotSet,

    /// A token exists but the backend rejected it
    Invalid,

    /// A token exists and the backend accepted it
    Valid,
}

/// Tracks the token state and broadcasts the derived availability flag.
pub struct TokenAvailability {
    state: Mutex<TokenState>,
    tx: watch::Sender<bool>,
}

impl Default for TokenAvailability {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenAvailability {
    /// Create a tracker in the initial `NotSet` state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            state: Mutex::new(TokenState::NotSet),
            tx,
        }
    }

    /// Register for token events on `registry`.
    ///
    /// Must be called once by the composition root; the listener stays
    /// registered for the process lifetime.
    pub fn attach(self: &Arc<Self>, registry: &EventRegistry) {
        let this = self.clone();
        registry.register(
            EV_TOKEN_SET,
            LISTENER_ID,
            Arc::new(move |_event| {
                this.transition(TokenState::Valid);
            }),
        );

        let this = self.clone();
        registry.register(
            EV_TOKEN_INVALID,
            LISTENER_ID,
            Arc::new(move |_event| {
                this.transition(TokenState::Invalid);
            }),
        );
    }

    /// Query the backend for the stored token and adopt the result.
    ///
    /// A present, non-empty token means `Valid`; a missing token keeps (or
    /// returns to) `NotSet`; a malformed token means `Invalid`. Transient
    /// errors leave the state untouched.
    pub async fn probe(&self, bridge: &dyn Bridge) {
        match bridge.get_token().await {
            Ok(token) if !token.is_empty() => self.transition(TokenState::Valid),
            Ok(_) => {
                // backend answered with an empty string: nothing stored yet
            }
            Err(GhdError::TokenNotFound) => self.transition(TokenState::NotSet),
            Err(GhdError::BadToken) => self.transition(TokenState::Invalid),
            Err(err) => {
                log::warn!("token probe failed: {}", err);
            }
        }
    }

    /// Move to `next`, publishing the availability flag on a real change.
    ///
    /// Same-state triggers emit nothing, so observers never see duplicate
    /// notifications for no-op transitions.
    pub fn transition(&self, next: TokenState) {
        let mut state = self.state.lock().unwrap();
        if *state == next {
            return;
        }
        log::debug!("token state {:?} -> {:?}", *state, next);
        *state = next;
        self.tx.send_replace(next == TokenState::Valid);
    }

    /// Current state.
    pub fn state(&self) -> TokenState {
        *self.state.lock().unwrap()
    }

    /// True iff a token is set and accepted.
    pub fn is_available(&self) -> bool {
        self.state() == TokenState::Valid
    }

    /// True iff some token is configured, valid or not.
    pub fn has_token_set(&self) -> bool {
        self.state() != TokenState::NotSet
    }

    /// True iff the configured token was rejected.
    pub fn is_token_invalid(&self) -> bool {
        self.state() == TokenState::Invalid
    }

    /// Observe the availability flag.
    ///
    /// The receiver replays the current value via `borrow()` and signals
    /// every subsequent transition.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}
