//! Pull request entries and their classified views
//!
//! `PullRequestEntry` is the backend's persisted row for a pull request a
//! tracked user authored or is involved in. Timestamps are epoch seconds,
//! matching what the backend stores.

use serde::{Deserialize, Serialize};

/// A pull request entry as delivered by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestEntry {
    /// Backend row ID (not the PR number)
    pub id: i64,

    /// PR number within its repository
    pub number: i64,

    /// PR title
    pub title: String,

    /// Author's login
    pub author: String,

    /// Author's numeric user ID
    pub author_id: i64,

    /// API URL
    pub url: String,

    /// Web URL for opening in a browser
    pub html_url: String,

    /// Repository owner (user or organization)
    pub repo_owner: String,

    /// Repository name
    pub repo_name: String,

    /// PR state (e.g., "open", "closed", "merged")
    pub state: String,

    /// Whether the PR is a draft
    pub is_draft: bool,

    /// Milestone title, if assigned
    pub milestone: Option<String>,

    /// Number of comments
    pub comments: i64,

    /// Review decision (e.g., "APPROVED", "REVIEW_REQUIRED")
    pub review_decision: String,

    /// Creation time, epoch seconds
    pub created_at: i64,

    /// Last update time, epoch seconds
    pub updated_at: i64,

    /// Close time, epoch seconds, if closed
    pub closed_at: Option<i64>,

    /// Merge time, epoch seconds, if merged
    pub merged_at: Option<i64>,

    /// When the user last viewed this PR, epoch seconds
    pub last_viewed: Option<i64>,
}

/// Pull requests split into "needs attention" and "already seen" bins.
///
/// Produced by the classifier; within each bin the backend's delivery
/// order is preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackedPrs {
    /// Entries updated since they were last viewed (or never viewed)
    pub to_view: Vec<PullRequestEntry>,

    /// Entries viewed at or after their last update
    pub viewed: Vec<PullRequestEntry>,
}

impl TrackedPrs {
    /// Total number of entries across both bins.
    pub fn len(&self) -> usize {
        self.to_view.len() + self.viewed.len()
    }

    /// True if neither bin holds any entries.
    pub fn is_empty(&self) -> bool {
        self.to_view.is_empty() && self.viewed.is_empty()
    }
}

/// The latest classified snapshot for one tracked login.
///
/// The backend answers two queries per login: PRs the login authored and
/// PRs the login is otherwise involved in. Both are classified separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPullRequests {
    /// PRs authored by the login
    pub own: TrackedPrs,

    /// PRs the login is involved in (reviewer, mentioned, assigned)
    pub involved: TrackedPrs,
}
