//! Epoch-second timestamp helpers
//!
//! The backend stores all times as epoch seconds; these helpers convert
//! to and from `chrono` types at the edges.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};

/// Parse an RFC3339 datetime string into epoch seconds.
pub fn datetime_to_ts(datetime: &str) -> Result<i64> {
    let parsed = DateTime::parse_from_rfc3339(datetime)
        .with_context(|| format!("error parsing datetime '{}'", datetime))?;
    Ok(parsed.timestamp())
}

/// Convert epoch seconds into a UTC datetime.
///
/// Fails for non-positive timestamps, which the backend uses as a
/// "never" sentinel.
pub fn ts_to_datetime(ts: i64) -> Result<DateTime<Utc>> {
    if !ts.is_positive() {
        anyhow::bail!("timestamp {} is not positive", ts);
    }
    Utc.timestamp_opt(ts, 0)
        .single()
        .with_context(|| format!("timestamp {} out of range", ts))
}

/// Convert an optional datetime into optional epoch seconds.
pub fn dt_opt_to_ts(dt: &Option<DateTime<Utc>>) -> Option<i64> {
    dt.as_ref().map(|v| v.timestamp())
}

/// Whether `secs` seconds have elapsed since `t`.
pub fn has_expired(t: &DateTime<Utc>, secs: i64) -> bool {
    let now = Utc::now();
    let deadline = t
        .checked_add_signed(chrono::Duration::seconds(secs))
        .unwrap_or(now);
    deadline < now
}
