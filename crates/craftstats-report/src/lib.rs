//! Usage report composer
//!
//! One sample equals one minute of use; the poll loop writes at most one
//! sample per server per 60-second tick, so minutes-used is a plain row
//! count over the trailing window.

use chrono::{DateTime, Duration, Utc};
use craftstats_core::ActivitySample;
use std::collections::BTreeMap;

/// Aggregated usage over a trailing window
#[derive(Debug, Clone, PartialEq)]
pub struct UsageReport {
    pub window_days: u32,
    /// Minutes used per server; BTreeMap keeps rendering deterministic
    pub minutes_by_server: BTreeMap<String, u64>,
    pub total_minutes: u64,
    pub generated_at: DateTime<Utc>,
}

/// Aggregate samples inside the trailing `window_days` window ending at `now`
pub fn compose(samples: &[ActivitySample], window_days: u32, now: DateTime<Utc>) -> UsageReport {
    let cutoff = now - Duration::days(window_days as i64);

    let mut minutes_by_server: BTreeMap<String, u64> = BTreeMap::new();
    for sample in samples {
        if sample.timestamp >= cutoff {
            *minutes_by_server
                .entry(sample.server_name.clone())
                .or_insert(0) += 1;
        }
    }

    let total_minutes = minutes_by_server.values().sum();

    UsageReport {
        window_days,
        minutes_by_server,
        total_minutes,
        generated_at: now,
    }
}

impl UsageReport {
    /// Mail subject line
    pub fn subject(&self) -> String {
        format!("Server Usage Report - {} Minutes", self.total_minutes)
    }

    /// Plain-text report body
    pub fn body(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!(
            "Server usage for the last {} day(s):",
            self.window_days
        ));
        lines.push(String::new());
        for (server, minutes) in &self.minutes_by_server {
            lines.push(format!("{} has used {} minute(s).", server, minutes));
        }
        lines.push(String::new());
        lines.push(format!("Total: {} minute(s).", self.total_minutes));
        lines.push(format!("Report generated @ {}", self.generated_at));
        lines.join("\n")
    }
}
