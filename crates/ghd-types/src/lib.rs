//! Domain types shared across the ghd workspace
//!
//! These types mirror what the native backend persists and sends over the
//! bridge. They are intentionally separate from any UI-facing view models
//! to keep this crate pure and reusable.

pub mod pull_request;
pub mod time;
pub mod user;

pub use pull_request::{PullRequestEntry, TrackedPrs, UserPullRequests};
pub use user::GithubUser;
