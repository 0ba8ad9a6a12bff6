//! Event dispatch registry
//!
//! Routes named backend events to registered listeners. The registry owns
//! no domain knowledge: payloads stay opaque JSON and the recognized name
//! set is fixed at construction. Consumers register a callback under a
//! stable listener ID and must unregister it themselves when done.

use ghd_bridge::{Event, EVENT_NAMES};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

/// Callback invoked with every event dispatched on a registered name.
pub type ListenerCallback = Arc<dyn Fn(&Event) + Send + Sync>;

/// Multiplexes named events to per-name listener sets.
///
/// Listener sets keep registration order. Dispatch snapshots the set under
/// the lock and invokes callbacks outside it, so a listener may unregister
/// itself (or others) from within its own callback without deadlocking.
pub struct EventRegistry {
    listeners: Mutex<HashMap<String, Vec<(String, ListenerCallback)>>>,
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRegistry {
    /// Create a registry recognizing the backend's closed event-name set.
    pub fn new() -> Self {
        Self::with_names(EVENT_NAMES)
    }

    /// Create a registry recognizing the given names.
    pub fn with_names(names: &[&str]) -> Self {
        let mut listeners = HashMap::new();
        for name in names {
            listeners.insert(name.to_string(), Vec::new());
        }
        Self {
            listeners: Mutex::new(listeners),
        }
    }

    /// Register `callback` under `listener_id` for events named `name`.
    ///
    /// Re-registering an existing ID replaces its callback in place. An
    /// unrecognized name is a configuration error: logged, not fatal.
    pub fn register(&self, name: &str, listener_id: &str, callback: ListenerCallback) {
        let mut listeners = self.listeners.lock().unwrap();
        let Some(entries) = listeners.get_mut(name) else {
            log::error!("trying to listen for '{}', not tracked", name);
            return;
        };
        if let Some(entry) = entries.iter_mut().find(|(id, _)| id == listener_id) {
            entry.1 = callback;
        } else {
            entries.push((listener_id.to_string(), callback));
        }
    }

    /// Remove the listener registered under `listener_id` for `name`.
    ///
    /// A no-op (logged) if the name is unrecognized or the ID is absent.
    pub fn unregister(&self, name: &str, listener_id: &str) {
        let mut listeners = self.listeners.lock().unwrap();
        let Some(entries) = listeners.get_mut(name) else {
            log::error!("trying to unregister for '{}', not tracked", name);
            return;
        };
        let before = entries.len();
        entries.retain(|(id, _)| id != listener_id);
        if entries.len() == before {
            log::debug!("no listener '{}' registered for '{}'", listener_id, name);
        }
    }

    /// Deliver `payload` to every listener registered for `name`.
    ///
    /// Listeners run in registration order, though they must not rely on
    /// it. A panicking listener is caught and logged so delivery continues
    /// to the remaining listeners. Unrecognized names are logged and
    /// dropped.
    pub fn dispatch(&self, name: &str, payload: serde_json::Value) {
        let entries = {
            let listeners = self.listeners.lock().unwrap();
            let Some(entries) = listeners.get(name) else {
                log::error!("dispatch of unrecognized event '{}'", name);
                return;
            };
            entries.clone()
        };

        let event = Event::new(name, payload);
        for (listener_id, callback) in entries {
            if catch_unwind(AssertUnwindSafe(|| callback(&event))).is_err() {
                log::error!(
                    "listener '{}' panicked handling '{}' event",
                    listener_id,
                    name
                );
            }
        }
    }

    /// Number of listeners currently registered for `name`.
    ///
    /// Returns 0 for unrecognized names.
    pub fn listener_count(&self, name: &str) -> usize {
        let listeners = self.listeners.lock().unwrap();
        listeners.get(name).map_or(0, |entries| entries.len())
    }
}
