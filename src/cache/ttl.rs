//! Human-friendly cache lifetimes.

use anyhow::{bail, Result};
use chrono::Duration;

/// Parse a TTL string like "7d", "24h", "30m", "45s" or plain seconds.
pub fn parse_ttl(ttl: &str) -> Result<Duration> {
    let ttl = ttl.trim().to_lowercase();

    let duration = if let Some(days) = ttl.strip_suffix('d') {
        Duration::days(days.parse()?)
    } else if let Some(hours) = ttl.strip_suffix('h') {
        Duration::hours(hours.parse()?)
    } else if let Some(mins) = ttl.strip_suffix('m') {
        Duration::minutes(mins.parse()?)
    } else if let Some(secs) = ttl.strip_suffix('s') {
        Duration::seconds(secs.parse()?)
    } else {
        // Assume seconds if no suffix
        Duration::seconds(ttl.parse()?)
    };

    if duration < Duration::zero() {
        bail!("cache lifetime cannot be negative: {}", ttl);
    }

    Ok(duration)
}

/// Parse a TTL string into whole seconds.
pub fn parse_ttl_secs(ttl: &str) -> Result<u64> {
    Ok(parse_ttl(ttl)?.num_seconds().unsigned_abs())
}

/// Format a duration for display.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds();

    if secs >= 86400 {
        format!("{}d", secs / 86400)
    } else if secs >= 3600 {
        format!("{}h", secs / 3600)
    } else if secs >= 60 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}
