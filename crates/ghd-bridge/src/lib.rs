//! Backend bridge interfaces for the ghd sync core
//!
//! The sync core never talks to GitHub or to persistent storage directly.
//! Everything I/O-bound lives behind the [`Bridge`] trait, and everything
//! the backend pushes arrives as a named [`Event`]. This crate defines
//! that boundary:
//!
//! ```text
//! ┌───────────────────┐   dispatch(name, payload)   ┌──────────────┐
//! │  native backend    │ ───────────────────────────▶│  sync core   │
//! │  (API + storage)   │ ◀─────────────────────────── │  (ghd-sync)  │
//! └───────────────────┘      Bridge trait calls      └──────────────┘
//! ```
//!
//! Only the event names and the request/response operations are fixed
//! here; payload shapes are determined by the event name and stay opaque
//! to the dispatch layer.

pub mod bridge;
pub mod error;
pub mod events;

pub use bridge::Bridge;
pub use error::{GhdError, Result};
pub use events::{
    Event, EVENT_NAMES, EV_ITERATION, EV_TOKEN_INVALID, EV_TOKEN_SET, EV_USER_DATA_UPDATE,
    EV_USER_UPDATE,
};
