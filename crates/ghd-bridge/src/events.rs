//! Named events pushed by the backend
//!
//! The set of event names is closed and fixed for the process lifetime.
//! Payload shapes are determined by the name, not self-describing, so the
//! dispatch layer carries them as opaque JSON values.

use serde::{Deserialize, Serialize};

/// Background loop iteration tick; payload is the iteration counter.
pub const EV_ITERATION: &str = "iteration";

/// The backend accepted a new API token; payload is `true`.
pub const EV_TOKEN_SET: &str = "token_set";

/// The backend found the configured token invalid; payload is `true`.
pub const EV_TOKEN_INVALID: &str = "token_invalid";

/// Fresh data is available for one login; payload is the login string.
pub const EV_USER_DATA_UPDATE: &str = "user_data_update";

/// A tracked user was added or its profile changed; payload is the user.
pub const EV_USER_UPDATE: &str = "user_update";

/// Every event name the backend can emit.
pub const EVENT_NAMES: &[&str] = &[
    EV_ITERATION,
    EV_TOKEN_SET,
    EV_TOKEN_INVALID,
    EV_USER_DATA_UPDATE,
    EV_USER_UPDATE,
];

/// A named event as delivered to listeners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// One of [`EVENT_NAMES`]
    pub name: String,

    /// Name-specific payload
    pub payload: serde_json::Value,
}

impl Event {
    /// Build an event from a recognized name and its payload.
    pub fn new(name: &str, payload: serde_json::Value) -> Self {
        Self {
            name: name.to_string(),
            payload,
        }
    }
}
