//! Background refresh loop
//!
//! Drives the whole synchronization cycle: every tick it announces an
//! `iteration` event, makes sure the token is usable, refreshes tracked
//! users whose data has gone stale, and announces fresh data per login
//! with `user_data_update` events. Failures are logged and the loop keeps
//! going; a stale-but-present snapshot beats a crashed poller.

use crate::availability::TokenAvailability;
use crate::cache::PullRequestCache;
use crate::events::EventRegistry;
use crate::users::UserDirectory;
use chrono::{DateTime, Utc};
use ghd_bridge::{Bridge, EV_ITERATION, EV_USER_DATA_UPDATE};
use ghd_config::AppConfig;
use ghd_types::time::has_expired;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

/// Timing knobs for the poller.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Sleep between iterations
    pub tick: Duration,

    /// Minimum seconds between refreshes of the same login
    pub user_refresh_secs: i64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for PollerConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            tick: Duration::from_secs(config.poll_interval_secs),
            user_refresh_secs: config.user_refresh_secs,
        }
    }
}

/// The background task keeping tracked users' data fresh.
pub struct Poller {
    bridge: Arc<dyn Bridge>,
    registry: Arc<EventRegistry>,
    availability: Arc<TokenAvailability>,
    directory: Arc<UserDirectory>,
    cache: Arc<PullRequestCache>,
    config: PollerConfig,
    iteration: AtomicU64,
    last_refresh: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl Poller {
    /// Assemble a poller over already-constructed components.
    pub fn new(
        bridge: Arc<dyn Bridge>,
        registry: Arc<EventRegistry>,
        availability: Arc<TokenAvailability>,
        directory: Arc<UserDirectory>,
        cache: Arc<PullRequestCache>,
        config: PollerConfig,
    ) -> Self {
        Self {
            bridge,
            registry,
            availability,
            directory,
            cache,
            config,
            iteration: AtomicU64::new(0),
            last_refresh: Mutex::new(HashMap::new()),
        }
    }

    /// Run iterations until `shutdown` flips to true (or its sender drops).
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        loop {
            self.run_once().await;

            tokio::select! {
                _ = tokio::time::sleep(self.config.tick) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        log::info!("poller stopping");
                        return;
                    }
                }
            }
        }
    }

    /// One iteration of the loop.
    pub async fn run_once(&self) {
        let n = self.iteration.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("background iteration #{}", n);
        self.registry.dispatch(EV_ITERATION, serde_json::json!(n));

        if !self.availability.is_available() {
            self.availability.probe(self.bridge.as_ref()).await;
            if !self.availability.is_available() {
                return;
            }
            // a token just became usable: pick up the tracked users too
            if let Err(err) = self.directory.load(self.bridge.as_ref()).await {
                log::error!("unable to load tracked users: {}", err);
                return;
            }
        }

        let users = match self.bridge.get_tracked_users().await {
            Ok(users) => users,
            Err(err) => {
                log::error!("unable to obtain tracked users: {}", err);
                return;
            }
        };

        for user in &users {
            if !self.should_refresh(&user.login) {
                continue;
            }
            match self.cache.refresh(self.bridge.as_ref(), &user.login).await {
                Ok(()) => {
                    self.mark_refreshed(&user.login);
                    self.registry
                        .dispatch(EV_USER_DATA_UPDATE, serde_json::json!(user.login));
                }
                Err(err) => {
                    log::error!("error refreshing user '{}': {}", user.login, err);
                }
            }
        }
    }

    fn should_refresh(&self, login: &str) -> bool {
        let last_refresh = self.last_refresh.lock().unwrap();
        match last_refresh.get(login) {
            None => true,
            Some(t) => has_expired(t, self.config.user_refresh_secs),
        }
    }

    fn mark_refreshed(&self, login: &str) {
        self.last_refresh
            .lock()
            .unwrap()
            .insert(login.to_string(), Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{pr, user, StubBridge};
    use ghd_bridge::GhdError;

    fn poller_with(bridge: StubBridge) -> (Poller, Arc<EventRegistry>, Arc<PullRequestCache>) {
        let registry = Arc::new(EventRegistry::new());
        let cache = Arc::new(PullRequestCache::new());
        let poller = Poller::new(
            Arc::new(bridge),
            registry.clone(),
            Arc::new(TokenAvailability::new()),
            Arc::new(UserDirectory::new()),
            cache.clone(),
            PollerConfig::default(),
        );
        (poller, registry, cache)
    }

    fn record_events(registry: &EventRegistry, name: &str) -> Arc<Mutex<Vec<serde_json::Value>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_ref = seen.clone();
        registry.register(
            name,
            "test-recorder",
            Arc::new(move |event| {
                seen_ref.lock().unwrap().push(event.payload.clone());
            }),
        );
        seen
    }

    #[tokio::test]
    async fn test_iteration_refreshes_due_users() {
        crate::testing::init_logs();
        let bridge = StubBridge::new().with_tracked_users(vec![user(1, "alice")]);
        bridge.push_own("alice", Ok(vec![pr(1, 100, None)]));

        let (poller, registry, cache) = poller_with(bridge);
        let iterations = record_events(&registry, EV_ITERATION);
        let updates = record_events(&registry, EV_USER_DATA_UPDATE);

        poller.run_once().await;

        assert_eq!(iterations.lock().unwrap().len(), 1);
        assert_eq!(
            *updates.lock().unwrap(),
            vec![serde_json::json!("alice")]
        );
        assert_eq!(cache.snapshot("alice").own.len(), 1);
        assert!(poller.availability.is_available());
    }

    #[tokio::test]
    async fn test_recent_user_is_not_refreshed_again() {
        let bridge = StubBridge::new().with_tracked_users(vec![user(1, "alice")]);
        let (poller, registry, _cache) = poller_with(bridge);
        let updates = record_events(&registry, EV_USER_DATA_UPDATE);

        poller.run_once().await;
        poller.run_once().await;

        // second iteration ticks but finds alice fresh
        assert_eq!(updates.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_without_token_only_iterates() {
        let bridge = StubBridge::new()
            .with_token(Err(GhdError::TokenNotFound))
            .with_tracked_users(vec![user(1, "alice")]);

        let (poller, registry, cache) = poller_with(bridge);
        let iterations = record_events(&registry, EV_ITERATION);
        let updates = record_events(&registry, EV_USER_DATA_UPDATE);

        poller.run_once().await;

        assert_eq!(iterations.lock().unwrap().len(), 1);
        assert!(updates.lock().unwrap().is_empty());
        assert!(cache.snapshot("alice").own.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_failure_does_not_stop_other_users() {
        let bridge =
            StubBridge::new().with_tracked_users(vec![user(1, "alice"), user(2, "bob")]);
        bridge.push_own("alice", Err(GhdError::Unknown("boom".to_string())));
        bridge.push_own("bob", Ok(vec![pr(2, 100, None)]));

        let (poller, registry, cache) = poller_with(bridge);
        let updates = record_events(&registry, EV_USER_DATA_UPDATE);

        poller.run_once().await;

        assert_eq!(*updates.lock().unwrap(), vec![serde_json::json!("bob")]);
        assert_eq!(cache.snapshot("bob").own.len(), 1);

        // alice stays due for refresh on the next iteration
        assert!(poller.should_refresh("alice"));
        assert!(!poller.should_refresh("bob"));
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let bridge = StubBridge::new();
        let (poller, _registry, _cache) = poller_with(bridge);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move { poller.run(shutdown_rx).await });

        shutdown_tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("poller must stop after shutdown signal")
            .unwrap();
    }
}
