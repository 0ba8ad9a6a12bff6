//! Event-driven state synchronization core for ghd
//!
//! This crate multiplexes events pushed by the native backend to UI
//! subscribers and keeps a per-login reactive view of pull-request data.
//! It owns no I/O of its own; everything outbound goes through the
//! [`ghd_bridge::Bridge`] trait.
//!
//! # Architecture
//!
//! ```text
//!                 dispatch(name, payload)
//! backend bridge ─────────────────────────▶ EventRegistry
//!                                               │
//!                             ┌─────────────────┼──────────────────┐
//!                             ▼                 ▼                  ▼
//!                     TokenAvailability   UserDirectory    UI listeners
//!                       (watch<bool>)     (watch<users>)        │
//!                                                               ▼
//!                                                     PullRequestCache
//!                                                        │ refresh
//!                                                        ▼
//!                                        Bridge fetch ─▶ classify ─▶ publish
//!                                                     (watch<snapshot> per login)
//! ```
//!
//! The [`poller::Poller`] drives the cycle: each tick it dispatches an
//! `iteration` event, refreshes tracked users that are due, and announces
//! fresh data with `user_data_update` events.

pub mod availability;
pub mod cache;
pub mod classify;
pub mod events;
pub mod poller;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

pub use availability::{TokenAvailability, TokenState};
pub use cache::PullRequestCache;
pub use classify::classify;
pub use events::EventRegistry;
pub use poller::{Poller, PollerConfig};
pub use users::{UserDirectory, UsersMap};
