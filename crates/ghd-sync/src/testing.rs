//! Test-only stub bridge
//!
//! A scriptable [`Bridge`] implementation: token and tracked-user results
//! are fixed, pull-request responses are queued per login and consumed one
//! refresh at a time, and an optional per-login delay lets tests stage slow
//! backends.

use async_trait::async_trait;
use ghd_bridge::{Bridge, GhdError, Result};
use ghd_types::{GithubUser, PullRequestEntry};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

type PrResult = Result<Vec<PullRequestEntry>>;

pub(crate) struct StubBridge {
    token: Mutex<Result<String>>,
    tracked: Mutex<Result<Vec<GithubUser>>>,
    own: Mutex<HashMap<String, VecDeque<PrResult>>>,
    involved: Mutex<HashMap<String, VecDeque<PrResult>>>,
    delays: Mutex<HashMap<String, VecDeque<Duration>>>,
    fetch_calls: AtomicUsize,
}

impl StubBridge {
    pub fn new() -> Self {
        Self {
            token: Mutex::new(Ok("stub-token".to_string())),
            tracked: Mutex::new(Ok(Vec::new())),
            own: Mutex::new(HashMap::new()),
            involved: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_token(self, token: Result<String>) -> Self {
        *self.token.lock().unwrap() = token;
        self
    }

    pub fn with_tracked_users(self, users: Vec<GithubUser>) -> Self {
        *self.tracked.lock().unwrap() = Ok(users);
        self
    }

    /// Queue the next authored-PRs response for `login`.
    pub fn push_own(&self, login: &str, response: PrResult) {
        self.own
            .lock()
            .unwrap()
            .entry(login.to_string())
            .or_default()
            .push_back(response);
    }

    /// Queue the next involved-PRs response for `login`.
    pub fn push_involved(&self, login: &str, response: PrResult) {
        self.involved
            .lock()
            .unwrap()
            .entry(login.to_string())
            .or_default()
            .push_back(response);
    }

    /// Delay the next authored-PRs fetch for `login`.
    pub fn push_delay(&self, login: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .entry(login.to_string())
            .or_default()
            .push_back(delay);
    }

    /// Total pull-request fetches issued (both relations).
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn pop(map: &Mutex<HashMap<String, VecDeque<PrResult>>>, login: &str) -> PrResult {
        map.lock()
            .unwrap()
            .get_mut(login)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn pop_delay(&self, login: &str) -> Option<Duration> {
        self.delays
            .lock()
            .unwrap()
            .get_mut(login)
            .and_then(|queue| queue.pop_front())
    }
}

#[async_trait]
impl Bridge for StubBridge {
    async fn get_token(&self) -> Result<String> {
        self.token.lock().unwrap().clone()
    }

    async fn set_token(&self, _token: &str) -> Result<bool> {
        Ok(true)
    }

    async fn get_user(&self, login: &str) -> Result<GithubUser> {
        self.tracked
            .lock()
            .unwrap()
            .clone()?
            .into_iter()
            .find(|user| user.login == login)
            .ok_or(GhdError::UserNotFound)
    }

    async fn get_tracked_users(&self) -> Result<Vec<GithubUser>> {
        self.tracked.lock().unwrap().clone()
    }

    async fn get_pull_requests_by_author(&self, login: &str) -> Result<Vec<PullRequestEntry>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.pop_delay(login) {
            tokio::time::sleep(delay).await;
        }
        Self::pop(&self.own, login)
    }

    async fn get_involved_pull_requests(&self, login: &str) -> Result<Vec<PullRequestEntry>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Self::pop(&self.involved, login)
    }

    async fn mark_viewed(&self, _ids: &[i64]) -> Result<()> {
        Ok(())
    }

    async fn mark_archived(&self, _ids: &[i64]) -> Result<()> {
        Ok(())
    }
}

/// Enable log capture for a test (`RUST_LOG=debug cargo test -- --nocapture`).
pub(crate) fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A minimal user for test fixtures.
pub(crate) fn user(id: i64, login: &str) -> GithubUser {
    GithubUser {
        id,
        login: login.to_string(),
        name: format!("User {}", login),
        avatar_url: String::new(),
    }
}

/// A minimal pull-request entry for test fixtures.
pub(crate) fn pr(id: i64, updated_at: i64, last_viewed: Option<i64>) -> PullRequestEntry {
    PullRequestEntry {
        id,
        number: id,
        title: format!("PR #{}", id),
        author: "octocat".to_string(),
        author_id: 1,
        url: String::new(),
        html_url: String::new(),
        repo_owner: "owner".to_string(),
        repo_name: "repo".to_string(),
        state: "open".to_string(),
        is_draft: false,
        milestone: None,
        comments: 0,
        review_decision: String::new(),
        created_at: 0,
        updated_at,
        closed_at: None,
        merged_at: None,
        last_viewed,
    }
}
