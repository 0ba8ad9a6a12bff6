//! The backend bridge trait
//!
//! This is the one I/O boundary of the sync core. The native process
//! implements it on top of the GitHub API and its local database; tests
//! implement it with mocks.

use crate::error::Result;
use async_trait::async_trait;
use ghd_types::{GithubUser, PullRequestEntry};

/// Request/response operations offered by the native backend.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so the sync core can share one
/// bridge across async tasks.
#[async_trait]
pub trait Bridge: Send + Sync {
    /// Fetch the configured API token.
    ///
    /// # Returns
    ///
    /// The token string if one is configured, `GhdError::TokenNotFound`
    /// if none was ever set, or `GhdError::BadToken` if the stored token
    /// is malformed.
    async fn get_token(&self) -> Result<String>;

    /// Hand a new API token to the backend.
    ///
    /// On acceptance the backend also emits a `token_set` event; the
    /// returned bool only confirms the request itself.
    async fn set_token(&self, token: &str) -> Result<bool>;

    /// Fetch a user's profile by login.
    async fn get_user(&self, login: &str) -> Result<GithubUser>;

    /// Fetch all users the dashboard currently tracks.
    async fn get_tracked_users(&self) -> Result<Vec<GithubUser>>;

    /// Fetch pull requests authored by `login`.
    ///
    /// Entries arrive in the backend's display order, which the caller
    /// must preserve.
    async fn get_pull_requests_by_author(&self, login: &str) -> Result<Vec<PullRequestEntry>>;

    /// Fetch pull requests `login` is involved in (reviewer, mentioned,
    /// assigned) without being the author.
    async fn get_involved_pull_requests(&self, login: &str) -> Result<Vec<PullRequestEntry>>;

    /// Mark pull requests as viewed now, by backend row ID.
    async fn mark_viewed(&self, ids: &[i64]) -> Result<()>;

    /// Archive pull requests, by backend row ID.
    async fn mark_archived(&self, ids: &[i64]) -> Result<()>;
}
