//! GitHub user as tracked by the dashboard

use serde::{Deserialize, Serialize};

/// A GitHub user tracked by the dashboard.
///
/// This is the backend's persisted shape, not the raw API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubUser {
    /// GitHub's numeric user ID
    pub id: i64,

    /// Login handle (e.g., "octocat"); case-sensitive, unique
    pub login: String,

    /// Display name
    pub name: String,

    /// Avatar image URL
    pub avatar_url: String,
}
