//! Reusable formatting utilities for CLI output
//!
//! Amounts, percentages and timestamps as they appear in market tables.

use chrono::{DateTime, Utc};

/// Format a large amount with a magnitude suffix.
///
/// # Example output
/// - `2.41T`
/// - `91.20B`
/// - `950.00`
pub fn format_compact(value: Option<f64>) -> String {
    let Some(value) = value else {
        return "N/A".to_string();
    };

    const THOUSAND: f64 = 1_000.0;
    const MILLION: f64 = THOUSAND * 1_000.0;
    const BILLION: f64 = MILLION * 1_000.0;
    const TRILLION: f64 = BILLION * 1_000.0;

    let abs = value.abs();
    if abs >= TRILLION {
        format!("{:.2}T", value / TRILLION)
    } else if abs >= BILLION {
        format!("{:.2}B", value / BILLION)
    } else if abs >= MILLION {
        format!("{:.2}M", value / MILLION)
    } else if abs >= THOUSAND {
        format!("{:.2}K", value / THOUSAND)
    } else {
        format!("{:.2}", value)
    }
}

/// Format a unit price, keeping precision below one unit
pub fn format_price(value: Option<f64>) -> String {
    match value {
        None => "N/A".to_string(),
        Some(v) if v.abs() >= 1.0 => format!("{:.2}", v),
        Some(v) => format!("{:.6}", v),
    }
}

/// Format a signed percentage change, e.g. `+1.25%`
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:+.2}%", v),
        None => "N/A".to_string(),
    }
}

/// Format a provider timestamp in Unix milliseconds as UTC
pub fn format_timestamp_millis(millis: f64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Format a provider timestamp in Unix seconds as UTC
pub fn format_timestamp_secs(secs: Option<i64>) -> String {
    secs.and_then(|s| DateTime::<Utc>::from_timestamp(s, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
