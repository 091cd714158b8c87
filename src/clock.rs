//! Clock string formatting with graceful fallbacks

use std::fmt::Write as _;

use chrono::{DateTime, Local};

use crate::config::ClockConfig;
use crate::constants::{FALLBACK_DATE, FALLBACK_TIME};

/// The strings to lay out for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockText {
    pub time: String,
    pub date: Option<String>,
}

/// Expand the configured time and date formats for `now`.
///
/// A format that fails to expand degrades to a fixed fallback literal, so
/// the clock always has something drawable.
pub fn format_clock(now: DateTime<Local>, config: &ClockConfig) -> ClockText {
    ClockText {
        time: format_or(now, &config.time_format, FALLBACK_TIME),
        date: config
            .show_date
            .then(|| format_or(now, &config.date_format, FALLBACK_DATE)),
    }
}

fn format_or(now: DateTime<Local>, format: &str, fallback: &str) -> String {
    let mut out = String::new();
    // chrono's formatter reports bad format items only when driven.
    if write!(out, "{}", now.format(format)).is_err() || out.is_empty() {
        tracing::warn!(format, "time format expansion failed");
        return fallback.to_string();
    }
    out
}
