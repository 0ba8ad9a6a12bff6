//! Tracked-user directory
//!
//! Keeps the login → profile map for every tracked user and broadcasts it
//! on change. The first user ever seen becomes the main user. The map is
//! seeded from the bridge at startup and kept current by `user_update`
//! events.

use crate::events::EventRegistry;
use ghd_bridge::{Bridge, Result, EV_USER_UPDATE};
use ghd_types::GithubUser;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Listener ID used on the event registry.
const LISTENER_ID: &str = "user-directory";

/// Login → profile map published to observers.
pub type UsersMap = HashMap<String, GithubUser>;

struct DirectoryState {
    users: UsersMap,
    main_user: Option<String>,
}

/// Directory of tracked users with a reactive view of the map.
pub struct UserDirectory {
    state: Mutex<DirectoryState>,
    tx: watch::Sender<UsersMap>,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(UsersMap::new());
        Self {
            state: Mutex::new(DirectoryState {
                users: UsersMap::new(),
                main_user: None,
            }),
            tx,
        }
    }

    /// Register for `user_update` events on `registry`.
    pub fn attach(self: &Arc<Self>, registry: &EventRegistry) {
        let this = self.clone();
        registry.register(
            EV_USER_UPDATE,
            LISTENER_ID,
            Arc::new(move |event| {
                match serde_json::from_value::<GithubUser>(event.payload.clone()) {
                    Ok(user) => this.upsert(user),
                    Err(err) => {
                        log::error!("malformed user_update payload: {}", err);
                    }
                }
            }),
        );
    }

    /// Seed the directory from the backend's tracked-user list.
    ///
    /// Publishes the map once after all users are inserted.
    pub async fn load(&self, bridge: &dyn Bridge) -> Result<()> {
        let users = bridge.get_tracked_users().await?;
        let snapshot = {
            let mut state = self.state.lock().unwrap();
            for user in users {
                if state.main_user.is_none() {
                    state.main_user = Some(user.login.clone());
                }
                state.users.insert(user.login.clone(), user);
            }
            state.users.clone()
        };
        self.tx.send_replace(snapshot);
        Ok(())
    }

    /// Insert or update one user and publish the new map.
    pub fn upsert(&self, user: GithubUser) {
        let snapshot = {
            let mut state = self.state.lock().unwrap();
            if state.main_user.is_none() {
                state.main_user = Some(user.login.clone());
            }
            state.users.insert(user.login.clone(), user);
            state.users.clone()
        };
        self.tx.send_replace(snapshot);
    }

    /// Current map of tracked users.
    pub fn users(&self) -> UsersMap {
        self.state.lock().unwrap().users.clone()
    }

    /// Login of the main user, if one was established.
    pub fn main_user(&self) -> Option<String> {
        self.state.lock().unwrap().main_user.clone()
    }

    /// Observe the user map; replays the current value to new subscribers.
    pub fn subscribe(&self) -> watch::Receiver<UsersMap> {
        self.tx.subscribe()
    }
}
