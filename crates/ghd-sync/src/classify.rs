//! Pull-request classification
//!
//! Splits a fetched list into "needs attention" and "already seen" bins.
//! An entry counts as viewed only if it was viewed at or after its last
//! update; an entry never viewed always needs attention.

use ghd_types::{PullRequestEntry, TrackedPrs};

/// Stable-partition `entries` into [`TrackedPrs`] bins.
///
/// Within each bin the input order is preserved; no entry is dropped or
/// duplicated. The `last_viewed == updated_at` boundary lands on the
/// viewed side.
pub fn classify(entries: Vec<PullRequestEntry>) -> TrackedPrs {
    let mut prs = TrackedPrs::default();
    for entry in entries {
        let is_viewed = entry
            .last_viewed
            .is_some_and(|viewed| viewed >= entry.updated_at);
        if is_viewed {
            prs.viewed.push(entry);
        } else {
            prs.to_view.push(entry);
        }
    }
    prs
}
