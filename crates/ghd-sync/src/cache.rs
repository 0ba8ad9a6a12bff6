//! Per-login reactive pull-request cache
//!
//! One slot per tracked login, created lazily and never evicted (the set
//! of tracked users is small and user-controlled). A slot holds the latest
//! classified snapshot behind a watch channel; refreshes are serialized
//! per slot and publication follows refresh *initiation* order, so a slow,
//! older response can never clobber a newer one.

use crate::classify::classify;
use ghd_bridge::{Bridge, Result};
use ghd_types::UserPullRequests;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

struct CacheSlot {
    tx: watch::Sender<Arc<UserPullRequests>>,
    /// Initiation counter; taken at refresh entry, before any await.
    next_seq: AtomicU64,
    /// Sequence of the last published snapshot (0 = only the empty one).
    published_seq: AtomicU64,
    /// Serializes refresh execution for this slot. tokio's Mutex queues
    /// waiters FIFO, so queued refreshes run in initiation order.
    refresh_lock: tokio::sync::Mutex<()>,
}

impl CacheSlot {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(UserPullRequests::default()));
        Self {
            tx,
            next_seq: AtomicU64::new(0),
            published_seq: AtomicU64::new(0),
            refresh_lock: tokio::sync::Mutex::new(()),
        }
    }
}

/// Reactive cache of classified pull-request snapshots, keyed by login.
pub struct PullRequestCache {
    slots: Mutex<HashMap<String, Arc<CacheSlot>>>,
}

impl Default for PullRequestCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PullRequestCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slot(&self, login: &str) -> Arc<CacheSlot> {
        let mut slots = self.slots.lock().unwrap();
        slots
            .entry(login.to_string())
            .or_insert_with(|| Arc::new(CacheSlot::new()))
            .clone()
    }

    /// Observe `login`'s snapshot, creating an empty slot on first use.
    ///
    /// Repeated calls for the same login observe the same underlying slot:
    /// the receiver replays the latest snapshot immediately and signals
    /// every subsequent publication.
    pub fn subscribe(&self, login: &str) -> watch::Receiver<Arc<UserPullRequests>> {
        self.slot(login).tx.subscribe()
    }

    /// The latest snapshot for `login` (empty if never refreshed).
    pub fn snapshot(&self, login: &str) -> Arc<UserPullRequests> {
        self.slot(login).tx.borrow().clone()
    }

    /// Fetch, classify and publish a fresh snapshot for `login`.
    ///
    /// Both relations (authored and involved) are fetched through the
    /// bridge; any fetch error leaves the previous snapshot in place and
    /// is returned to the caller. Concurrent refreshes of the same login
    /// queue behind each other; refreshes of different logins never
    /// interact. A refresh whose initiation was superseded by a newer one
    /// publishes nothing.
    pub async fn refresh(&self, bridge: &dyn Bridge, login: &str) -> Result<()> {
        let slot = self.slot(login);
        let seq = slot.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = slot.refresh_lock.lock().await;

        let own = bridge.get_pull_requests_by_author(login).await?;
        let involved = bridge.get_involved_pull_requests(login).await?;

        let snapshot = UserPullRequests {
            own: classify(own),
            involved: classify(involved),
        };

        let claimed = slot
            .published_seq
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                (seq > current).then_some(seq)
            });
        match claimed {
            Ok(_) => {
                slot.tx.send_replace(Arc::new(snapshot));
            }
            Err(current) => {
                log::debug!(
                    "dropping stale refresh #{} for '{}' (latest is #{})",
                    seq,
                    login,
                    current
                );
            }
        }
        Ok(())
    }
}
